//! Incremental line reading over a blocking byte source.

use std::io::{BufRead, BufReader, Read};

/// Reads terminator-stripped lines from a blocking byte source.
///
/// Both `\n` and `\r\n` terminate a line. A final chunk without a
/// terminator is still returned as a line; the caller's framing rules
/// decide what to do with whatever it was part of. After the source is
/// exhausted, [`next_line`](LineReader::next_line) returns `Ok(None)`.
#[derive(Debug)]
pub struct LineReader<R> {
    source: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    /// Wrap a byte source. The reader takes ownership; nothing else may
    /// consume from the source afterwards.
    pub fn new(source: R) -> Self {
        Self {
            source: BufReader::new(source),
            buf: Vec::new(),
        }
    }

    /// Read the next line, blocking until a terminator or end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than treated
    /// as an error; the framing characters themselves are ASCII.
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();
        let read = self.source.read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
