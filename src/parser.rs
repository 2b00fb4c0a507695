//! SSE line classification and event assembly.
//!
//! The wire format is line-oriented:
//! - `event: <name>` - event type line
//! - `data: <payload>` - data payload line(s)
//! - `id: <id>` - event identifier line
//! - `retry: <ms>` - reconnection interval hint
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! [`parse_line`] classifies one line; [`EventParser`] accumulates
//! classified lines into [`Event`] records and tracks the running
//! last-event-id across records.

use crate::event::Event;

/// A single classified line from an SSE stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Blank line - terminates the in-progress event.
    Empty,
    /// Comment line (starts with `:`).
    Comment(String),
    /// A `name: value` field line. A bare name with no colon is a field
    /// with an empty value.
    Field { name: String, value: String },
}

/// Classify a single line, terminator already stripped.
///
/// At most one space after the colon is removed from the value; anything
/// beyond that is payload. Lines without a colon become a field with an
/// empty value rather than an error.
pub fn parse_line(line: &str) -> Line {
    if line.is_empty() {
        return Line::Empty;
    }

    if let Some(rest) = line.strip_prefix(':') {
        return Line::Comment(rest.to_string());
    }

    match line.split_once(':') {
        Some((name, value)) => {
            let value = value.strip_prefix(' ').unwrap_or(value);
            Line::Field {
                name: name.to_string(),
                value: value.to_string(),
            }
        }
        None => Line::Field {
            name: line.to_string(),
            value: String::new(),
        },
    }
}

/// Stateful parser that accumulates lines and emits complete events.
///
/// Feed lines one at a time with [`feed_line`](EventParser::feed_line);
/// a completed [`Event`] is returned when a blank line terminates a
/// record that had at least one field set. Blank lines with nothing
/// accumulated produce nothing, so runs of blank lines never turn into
/// phantom events.
///
/// The running last-event-id survives across records: it only changes
/// when a record supplies an accepted `id:` field (including an accepted
/// empty one, which clears it).
#[derive(Debug, Default)]
pub struct EventParser {
    /// Pending event type for the in-progress record.
    event: Option<String>,
    /// Accumulated data lines, joined with `\n`.
    data: Option<String>,
    /// Pending accepted id for the in-progress record.
    id: Option<String>,
    /// Pending retry hint for the in-progress record.
    retry: Option<String>,
    /// Most recent accepted id across all records so far.
    last_event_id: String,
}

impl EventParser {
    /// Create a parser with an empty running last-event-id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the running last-event-id pre-seeded, for
    /// resuming a stream whose last id is already known.
    pub fn with_last_event_id(id: impl Into<String>) -> Self {
        Self {
            last_event_id: id.into(),
            ..Self::default()
        }
    }

    /// Feed one line to the parser, terminator already stripped.
    ///
    /// Returns `Some(event)` exactly when this line is a blank line that
    /// terminates a record with at least one field set. Comment lines,
    /// unrecognized field names, and decorative blank lines are consumed
    /// without effect; there is no error path.
    pub fn feed_line(&mut self, line: &str) -> Option<Event> {
        match parse_line(line) {
            Line::Empty => self.take_event(),
            Line::Comment(_) => None,
            Line::Field { name, value } => {
                self.set_field(&name, value);
                None
            }
        }
    }

    /// The running last-event-id as of the lines fed so far.
    pub fn last_event_id(&self) -> &str {
        &self.last_event_id
    }

    /// Discard the in-progress record.
    ///
    /// The running last-event-id is kept; it belongs to the stream, not
    /// to the record being assembled.
    pub fn reset(&mut self) {
        self.event = None;
        self.data = None;
        self.id = None;
        self.retry = None;
    }

    /// Apply one field line to the in-progress record. Field names are
    /// exact-match and case-sensitive; anything unrecognized is inert.
    fn set_field(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "data" => match &mut self.data {
                Some(data) => {
                    data.push('\n');
                    data.push_str(&value);
                }
                None => self.data = Some(value),
            },
            "id" => {
                // An id carrying an embedded NUL is dropped wholesale:
                // this record keeps no id and the running last-event-id
                // is left untouched.
                if !value.contains('\0') {
                    self.last_event_id = value.clone();
                    self.id = Some(value);
                }
            }
            "retry" => self.retry = Some(value),
            _ => {}
        }
    }

    /// Emit the in-progress record if any field was set, stamping it
    /// with the running last-event-id.
    fn take_event(&mut self) -> Option<Event> {
        if self.event.is_none() && self.data.is_none() && self.id.is_none() && self.retry.is_none()
        {
            return None;
        }

        Some(Event {
            event: self.event.take().unwrap_or_default(),
            data: self.data.take().unwrap_or_default(),
            id: self.id.take().unwrap_or_default(),
            last_event_id: self.last_event_id.clone(),
            retry: self.retry.take(),
        })
    }
}
