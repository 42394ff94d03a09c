//! `slots` CLI — resolve appointment availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots for a date with the built-in weekly template
//! slots resolve --date 2024-06-03
//!
//! # With a config file, local bookings and exported calendar events
//! slots resolve --date 2024-06-03 -c availability.toml -b bookings.json -e events.json
//!
//! # The raw slot grid of a window
//! slots grid --open 08:30 --close 16:00 --interval 30
//!
//! # Validate a config file before deploying it
//! slots check-config -c availability.toml
//! ```
//!
//! Logs go to stderr and are controlled with `RUST_LOG` (default `warn`).

mod sources;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use slot_engine::calendar::{CalendarSource, NoCalendar};
use slot_engine::{generate_slots, user_message, AvailabilityConfig, Locale, Resolver};
use tracing_subscriber::EnvFilter;

use crate::sources::{load_bookings, JsonFileCalendar};

/// Exit code for a rejected request date.
const EXIT_VALIDATION: i32 = 2;

#[derive(Parser)]
#[command(name = "slots", version, about = "Appointment slot availability CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the free slots for a date as JSON
    Resolve {
        /// Date to resolve (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// TOML config file (built-in weekly template if omitted)
        #[arg(short, long)]
        config: Option<String>,
        /// JSON array of {"date","time"} bookings
        #[arg(short, long)]
        bookings: Option<String>,
        /// JSON calendar events (array or provider page with "items")
        #[arg(short, long)]
        events: Option<String>,
        /// Language of validation messages (hu or en; hu when omitted)
        #[arg(long)]
        locale: Option<Locale>,
    },
    /// Print the slot labels of an opening window, one per line
    Grid {
        #[arg(long)]
        open: String,
        #[arg(long)]
        close: String,
        /// Slot width in minutes
        #[arg(long, default_value_t = slot_engine::slots::DEFAULT_SLOT_INTERVAL_MINUTES)]
        interval: u32,
    },
    /// Validate a config file and summarize its weekly schedule
    CheckConfig {
        #[arg(short, long)]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            date,
            config,
            bookings,
            events,
            locale,
        } => {
            let settings = load_config(config.as_deref())?
                .validate()
                .context("Invalid configuration")?;
            let snapshot = load_bookings(bookings.as_deref())?;
            let calendar: Arc<dyn CalendarSource> = match events {
                Some(path) => Arc::new(JsonFileCalendar::new(path)),
                None => Arc::new(NoCalendar),
            };

            let resolver = Resolver::new(settings, calendar);
            match resolver.resolve(&date, &snapshot).await {
                Ok(result) => println!("{}", serde_json::to_string(&result)?),
                Err(e) if e.is_validation() => {
                    let locale = locale.unwrap_or_default();
                    let body = json!({ "success": false, "error": user_message(&e, locale) });
                    println!("{}", body);
                    process::exit(EXIT_VALIDATION);
                }
                Err(e) => return Err(e).context("Failed to resolve availability"),
            }
        }
        Commands::Grid {
            open,
            close,
            interval,
        } => {
            let slots = generate_slots(&open, &close, interval)
                .context("Failed to generate slots")?;
            for slot in slots {
                println!("{}", slot);
            }
        }
        Commands::CheckConfig { config } => {
            let settings = load_config(Some(&config))?
                .validate()
                .context("Invalid configuration")?;
            println!("time zone: {}", settings.business_tz.name());
            println!("interval:  {} min", settings.slot_interval_minutes);
            for (day, window) in settings.schedule.iter() {
                match window {
                    Some(w) => println!(
                        "{:?}: {}-{} ({} slots)",
                        day,
                        w.open,
                        w.close,
                        slot_engine::slots::slot_count(&w, settings.slot_interval_minutes)
                    ),
                    None => println!("{:?}: closed", day),
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<AvailabilityConfig> {
    match path {
        Some(path) => AvailabilityConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(AvailabilityConfig::default()),
    }
}
