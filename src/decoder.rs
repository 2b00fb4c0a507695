//! Cancellable SSE decoding over a blocking byte source.
//!
//! The source's `read` is a plain blocking call that nothing can
//! interrupt, so each [`Decoder`] runs it on a dedicated background
//! thread and forwards lines over a channel. [`Decoder::decode`] races
//! the channel against a close signal; [`Decoder::close`] resolves any
//! pending decode with end-of-stream and lets the reader thread wind
//! down on its own. The thread's sends are fire-and-forget: an abandoned
//! decoder can never block the reader on a full sink.

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::sync::{mpsc, watch, Mutex};

use crate::error::DecodeError;
use crate::event::Event;
use crate::parser::EventParser;
use crate::reader::LineReader;

/// Construction-time configuration for [`Decoder`].
#[derive(Debug, Clone, Default)]
pub struct DecoderOptions {
    last_event_id: String,
}

impl DecoderOptions {
    /// Options with their defaults: empty initial last-event-id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the running last-event-id before any record is decoded.
    ///
    /// Used when resuming a dropped stream whose last delivered id is
    /// already known; the first records of the new stream then report it
    /// until one of them carries its own `id:` field.
    pub fn last_event_id(mut self, id: impl Into<String>) -> Self {
        self.last_event_id = id.into();
        self
    }
}

/// State owned by the single logical decode caller.
#[derive(Debug)]
struct DecodeState {
    parser: EventParser,
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
}

/// Decoder for an SSE byte stream.
///
/// Bound to one source for its whole life. [`decode`](Decoder::decode)
/// returns events one at a time until the source is exhausted, the
/// source errors, or the decoder is closed. The decoder supports one
/// logical decode caller, but [`close`](Decoder::close) may be invoked
/// from anywhere, concurrently with an in-flight decode and with other
/// close calls.
#[derive(Debug)]
pub struct Decoder {
    state: Mutex<DecodeState>,
    closed: Arc<AtomicBool>,
    close_tx: watch::Sender<bool>,
    close_rx: watch::Receiver<bool>,
}

impl Decoder {
    /// Create a decoder over a blocking byte source with default options.
    ///
    /// The source moves into a background reader thread; nothing else may
    /// consume from it afterwards.
    pub fn new<R: Read + Send + 'static>(source: R) -> Self {
        Self::with_options(source, DecoderOptions::default())
    }

    /// Create a decoder with explicit [`DecoderOptions`].
    pub fn with_options<R: Read + Send + 'static>(source: R, options: DecoderOptions) -> Self {
        let (line_tx, line_rx) = mpsc::unbounded_channel();
        let (close_tx, close_rx) = watch::channel(false);
        let closed = Arc::new(AtomicBool::new(false));

        let thread_closed = Arc::clone(&closed);
        thread::spawn(move || read_lines(LineReader::new(source), line_tx, thread_closed));

        Self {
            state: Mutex::new(DecodeState {
                parser: EventParser::with_last_event_id(options.last_event_id),
                lines: line_rx,
            }),
            closed,
            close_tx,
            close_rx,
        }
    }

    /// Decode the next event from the stream.
    ///
    /// Suspends until a record is completed by its terminating blank
    /// line, then returns it. Terminates with:
    ///
    /// - [`DecodeError::Eof`] when the source is exhausted or the decoder
    ///   was closed (a record left dangling at end of input without its
    ///   blank line is discarded, never emitted incomplete);
    /// - [`DecodeError::Io`] when the source fails; the decoder should be
    ///   closed and discarded afterwards.
    ///
    /// A concurrent [`close`](Decoder::close) resolves a pending call
    /// with `Eof` promptly. Once closed, decode fails fast without
    /// touching the source, even if input remained buffered.
    pub async fn decode(&self) -> Result<Event, DecodeError> {
        if self.is_closed() {
            return Err(DecodeError::Eof);
        }

        let mut close_rx = self.close_rx.clone();
        let mut state = self.state.lock().await;

        loop {
            // Biased so that a close observed alongside buffered lines
            // wins: a closed decoder must not emit further records.
            let line = tokio::select! {
                biased;
                _ = close_rx.changed() => return Err(DecodeError::Eof),
                line = state.lines.recv() => line,
            };

            match line {
                Some(Ok(line)) => {
                    if let Some(event) = state.parser.feed_line(&line) {
                        return Ok(event);
                    }
                }
                Some(Err(err)) => return Err(DecodeError::Io(err)),
                // Reader thread gone: natural end of input. Whatever was
                // accumulated without a terminating blank line stays
                // unemitted.
                None => return Err(DecodeError::Eof),
            }
        }
    }

    /// Close the decoder, releasing the stream.
    ///
    /// Idempotent and non-blocking; safe to call from any thread or
    /// task, concurrently with itself and with an in-flight
    /// [`decode`](Decoder::decode). A pending decode resolves with
    /// [`DecodeError::Eof`]; all future decodes fail fast. The reader
    /// thread exits after its current read returns; a read parked
    /// indefinitely inside the source is abandoned rather than killed,
    /// and its result goes nowhere.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        tracing::debug!("decoder closed");
        let _ = self.close_tx.send(true);
    }

    /// Whether the decoder has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        self.close();
    }
}

/// Background reader: forwards lines until end of input, a source error,
/// or decoder close. Runs on its own thread because the source read may
/// block indefinitely.
fn read_lines<R: Read>(
    mut lines: LineReader<R>,
    tx: mpsc::UnboundedSender<std::io::Result<String>>,
    closed: Arc<AtomicBool>,
) {
    tracing::trace!("stream reader started");
    loop {
        if closed.load(Ordering::Acquire) {
            tracing::trace!("stream reader exiting: decoder closed");
            return;
        }

        match lines.next_line() {
            Ok(Some(line)) => {
                if tx.send(Ok(line)).is_err() {
                    // Decoder dropped; nobody is listening.
                    return;
                }
            }
            Ok(None) => {
                tracing::trace!("stream reader exiting: end of input");
                return;
            }
            Err(err) => {
                tracing::debug!(error = %err, "stream read failed");
                let _ = tx.send(Err(err));
                return;
            }
        }
    }
}
