//! User-facing validation messages.

use serde::{Deserialize, Serialize};

use crate::error::SlotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Hu,
    En,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hu" => Ok(Locale::Hu),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {other} (expected hu or en)")),
        }
    }
}

/// Message shown to the person who sent the request. Only validation errors
/// get specific wording; anything else is a generic failure with no internals.
pub fn user_message(err: &SlotError, locale: Locale) -> &'static str {
    match (err, locale) {
        (SlotError::InvalidDateFormat(_), Locale::Hu) => {
            "Kérjük, adjon meg egy érvényes dátumot (ÉÉÉÉ-HH-NN)."
        }
        (SlotError::InvalidDateFormat(_), Locale::En) => {
            "Please provide a valid date (YYYY-MM-DD)."
        }
        (SlotError::InvalidDate(_), Locale::Hu) => "A megadott dátum formátuma érvénytelen.",
        (SlotError::InvalidDate(_), Locale::En) => "The given date does not exist.",
        (_, Locale::Hu) => "Belső szerverhiba.",
        (_, Locale::En) => "Internal server error",
    }
}
