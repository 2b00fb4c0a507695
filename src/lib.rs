//! Decoder for Server-Sent Events (SSE) streams.
//!
//! Turns a byte-oriented, possibly blocking source into a sequence of
//! decoded [`Event`] records. The blocking reads run on a dedicated
//! background thread so that [`Decoder::decode`] can be raced against
//! [`Decoder::close`] without hanging the caller.
//!
//! ```no_run
//! use std::io::Cursor;
//! use eventstream::Decoder;
//!
//! # async fn run() {
//! let decoder = Decoder::new(Cursor::new(b"data: hello\n\n".to_vec()));
//! while let Ok(event) = decoder.decode().await {
//!     println!("{}: {}", event.event, event.data);
//! }
//! decoder.close();
//! # }
//! ```

pub mod decoder;
pub mod error;
pub mod event;
pub mod parser;
pub mod reader;

pub use decoder::{Decoder, DecoderOptions};
pub use error::DecodeError;
pub use event::Event;
pub use parser::{parse_line, EventParser, Line};
pub use reader::LineReader;
