//! In-memory booking store.
//!
//! Appending is the only mutation. Readers take a [`BookingSnapshot`] so an
//! in-flight availability lookup never sees bookings added after it started.

use parking_lot::RwLock;
use slot_engine::BookingSnapshot;

use crate::dto::BookingRequest;

#[derive(Debug, Default)]
pub struct BookingStore {
    requests: RwLock<Vec<BookingRequest>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, request: BookingRequest) {
        self.requests.write().push(request);
    }

    pub fn snapshot(&self) -> BookingSnapshot {
        self.requests.read().iter().map(BookingRequest::slot).collect()
    }

    pub fn len(&self) -> usize {
        self.requests.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.read().is_empty()
    }

    /// Copy of every stored request, oldest first.
    pub fn list(&self) -> Vec<BookingRequest> {
        self.requests.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request(date: &str, time: &str) -> BookingRequest {
        BookingRequest {
            id: format!("{date}-{time}"),
            full_name: "Teszt Elek".to_string(),
            email: "teszt@example.com".to_string(),
            phone: "+36 1 234 5678".to_string(),
            treatment: None,
            date: date.to_string(),
            time: time.to_string(),
            note: None,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn snapshot_is_not_affected_by_later_appends() {
        let store = BookingStore::new();
        store.append(request("2024-06-03", "09:00"));

        let snapshot = store.snapshot();
        store.append(request("2024-06-03", "10:00"));

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.reserved_times("2024-06-03").contains("09:00"));
        assert!(!snapshot.reserved_times("2024-06-03").contains("10:00"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = BookingStore::new();
        assert!(store.is_empty());
        store.append(request("2024-06-04", "11:00"));
        store.append(request("2024-06-03", "09:00"));

        let ids: Vec<String> = store.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["2024-06-04-11:00", "2024-06-03-09:00"]);
    }
}
