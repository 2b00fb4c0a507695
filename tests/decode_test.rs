//! Decode semantics over in-memory streams.
//!
//! These tests drive a full [`Decoder`] end to end: raw bytes in,
//! decoded events out, terminated by the end-of-stream signal.

use std::io::Cursor;

use eventstream::{Decoder, DecoderOptions, Event};

fn source(input: &str) -> Cursor<Vec<u8>> {
    Cursor::new(input.as_bytes().to_vec())
}

/// Decode every event from `input`, asserting the stream terminates
/// with `Eof` rather than an error.
async fn decode_all(input: &str) -> Vec<Event> {
    let decoder = Decoder::new(source(input));
    let mut events = Vec::new();
    loop {
        match decoder.decode().await {
            Ok(event) => events.push(event),
            Err(err) => {
                assert!(err.is_eof(), "unexpected error for {input:?}: {err}");
                break;
            }
        }
    }
    events
}

#[tokio::test]
async fn test_decode_event_with_data() {
    let events = decode_all("event: eventName\ndata: {\"sample\":\"value\"}\n\n").await;
    assert_eq!(
        events,
        vec![Event {
            event: "eventName".to_string(),
            data: "{\"sample\":\"value\"}".to_string(),
            ..Event::default()
        }]
    );
}

#[tokio::test]
async fn test_blank_line_runs_are_not_empty_events() {
    let events = decode_all("\n\n\nevent: event1\n\n\n\n\nevent: event2\n\n").await;
    assert_eq!(
        events,
        vec![
            Event {
                event: "event1".to_string(),
                ..Event::default()
            },
            Event {
                event: "event2".to_string(),
                ..Event::default()
            },
        ]
    );
}

#[tokio::test]
async fn test_decode_id_field() {
    let events = decode_all("id: abc\ndata: def\n\n").await;
    assert_eq!(
        events,
        vec![Event {
            id: "abc".to_string(),
            last_event_id: "abc".to_string(),
            data: "def".to_string(),
            ..Event::default()
        }]
    );
}

#[tokio::test]
async fn test_id_with_null_is_ignored() {
    let events = decode_all("id: a\0bc\ndata: def\n\n").await;
    assert_eq!(
        events,
        vec![Event {
            data: "def".to_string(),
            ..Event::default()
        }]
    );
}

#[tokio::test]
async fn test_blank_only_inputs_produce_nothing() {
    for input in ["", "\n", "\n\n", "\n\n\n\n\n\n"] {
        let events = decode_all(input).await;
        assert!(events.is_empty(), "expected no events for {input:?}");
    }
}

#[tokio::test]
async fn test_last_event_id_from_options() {
    let decoder = Decoder::with_options(
        source("data: abc\n\n"),
        DecoderOptions::new().last_event_id("my-id"),
    );

    let event = decoder.decode().await.unwrap();
    assert_eq!(event.data, "abc");
    assert_eq!(event.id, "");
    assert_eq!(event.last_event_id, "my-id");
}

#[tokio::test]
async fn test_last_event_id_persists_until_overridden() {
    let decoder = Decoder::with_options(
        source("id: abc\ndata: first\n\ndata: second\n\nid: def\ndata:third\n\n"),
        DecoderOptions::new().last_event_id("my-id"),
    );

    let event1 = decoder.decode().await.unwrap();
    assert_eq!(event1.data, "first");
    assert_eq!(event1.id, "abc");
    assert_eq!(event1.last_event_id, "abc");

    let event2 = decoder.decode().await.unwrap();
    assert_eq!(event2.data, "second");
    assert_eq!(event2.id, "");
    assert_eq!(event2.last_event_id, "abc");

    let event3 = decoder.decode().await.unwrap();
    assert_eq!(event3.data, "third");
    assert_eq!(event3.id, "def");
    assert_eq!(event3.last_event_id, "def");
}

#[tokio::test]
async fn test_last_event_id_cleared_by_empty_id() {
    let decoder = Decoder::with_options(
        source("id: abc\ndata: first\n\nid: \ndata: second\n\n"),
        DecoderOptions::new().last_event_id("my-id"),
    );

    let event1 = decoder.decode().await.unwrap();
    assert_eq!(event1.id, "abc");
    assert_eq!(event1.last_event_id, "abc");

    let event2 = decoder.decode().await.unwrap();
    assert_eq!(event2.id, "");
    assert_eq!(event2.last_event_id, "");
}

#[tokio::test]
async fn test_multi_line_data() {
    let events = decode_all("data: line1\ndata: line2\n\n").await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data, "line1\nline2");
}

#[tokio::test]
async fn test_id_only_record_is_valid() {
    let events = decode_all("id: lonely\n\n").await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "lonely");
    assert_eq!(events[0].event, "");
    assert_eq!(events[0].data, "");
}

#[tokio::test]
async fn test_crlf_decodes_like_lf() {
    let lf = decode_all("event: e1\ndata: payload\n\nid: x\n\n").await;
    let crlf = decode_all("event: e1\r\ndata: payload\r\n\r\nid: x\r\n\r\n").await;
    assert_eq!(lf, crlf);
}

#[tokio::test]
async fn test_comments_and_unknown_fields_are_inert() {
    let events = decode_all(": keep-alive\nbogus: ignored\nnakedname\ndata: real\n\n").await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data, "real");
}

#[tokio::test]
async fn test_dangling_partial_record_is_discarded() {
    // No terminating blank line: the accumulated record never becomes
    // valid and the stream just ends.
    let events = decode_all("event: incomplete\ndata: half").await;
    assert!(events.is_empty());

    let events = decode_all("data: whole\n\ndata: half").await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data, "whole");
}

#[tokio::test]
async fn test_retry_hint_is_exposed_raw() {
    let events = decode_all("retry: 3000\ndata: x\n\n").await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].retry.as_deref(), Some("3000"));
    assert_eq!(events[0].retry_millis(), Some(3000));
}
