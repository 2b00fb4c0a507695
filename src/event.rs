//! Decoded event records.
//!
//! An [`Event`] is the unit produced by one successful decode: the fields
//! accumulated from one text block of the stream, terminated by a blank
//! line.

use serde::{Deserialize, Serialize};

/// A single decoded SSE event.
///
/// Carries two identity fields with different lifetimes:
///
/// - [`id`](Event::id) is what *this* record's `id:` field contained
///   (empty when the field was absent or rejected).
/// - [`last_event_id`](Event::last_event_id) is the decoder's running
///   last-seen id at the time this record was emitted. It persists across
///   records without an `id:` field, which is what callers send back when
///   resuming a dropped connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event-type name from the `event:` field; empty when absent.
    pub event: String,
    /// Payload from the `data:` field(s). Multiple `data:` lines within
    /// one record are joined with `\n` in arrival order.
    pub data: String,
    /// This record's own id; empty when absent or rejected.
    pub id: String,
    /// The running last-event-id at emission time.
    pub last_event_id: String,
    /// Raw reconnection-interval hint from the `retry:` field. `None`
    /// when the field was absent, `Some("")` when present but empty.
    pub retry: Option<String>,
}

impl Event {
    /// Parse the retry hint as a base-10 millisecond count.
    ///
    /// Returns `None` when the field was absent or not a valid integer.
    /// The raw [`retry`](Event::retry) field stays authoritative; how the
    /// interval affects reconnection is a caller concern.
    pub fn retry_millis(&self) -> Option<u64> {
        self.retry.as_deref()?.parse().ok()
    }

    /// Deserialize the data payload as JSON.
    ///
    /// Convenience for the common case of JSON-carrying streams; callers
    /// with opaque payloads can read [`data`](Event::data) directly.
    pub fn json_data<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.data)
    }
}
