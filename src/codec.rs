//! Inbound line framing.
//!
//! [`CommandCodec`] splits a byte stream on `\n` like `LinesCodec`, but never
//! fails on content: invalid UTF-8 is replaced with U+FFFD and a line longer
//! than the limit is discarded up to its newline. Only I/O errors end the
//! stream, so a bad line costs the sender that line and nothing else.

use bytes::{Buf, BytesMut};
use std::io;
use tokio_util::codec::Decoder;
use tracing::warn;

/// Newline framing with lossy decoding and oversized-line discard.
#[derive(Debug, Clone)]
pub struct CommandCodec {
    max_length: usize,
    next_index: usize,
    discarding: bool,
}

impl CommandCodec {
    /// Creates a codec that drops lines longer than `max_length` bytes.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            discarding: false,
        }
    }

    /// Returns the longest line that is delivered.
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

fn to_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

impl Decoder for CommandCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        loop {
            let read_to = buf.len().min(self.max_length.saturating_add(1));
            let newline = buf[self.next_index..read_to]
                .iter()
                .position(|b| *b == b'\n');

            match (self.discarding, newline) {
                (true, Some(offset)) => {
                    buf.advance(self.next_index + offset + 1);
                    self.next_index = 0;
                    self.discarding = false;
                }
                (true, None) => {
                    buf.advance(read_to);
                    self.next_index = 0;
                    if buf.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(offset)) => {
                    let end = self.next_index + offset;
                    self.next_index = 0;
                    let line = buf.split_to(end + 1);
                    return Ok(Some(to_line(&line[..end])));
                }
                (false, None) if buf.len() > self.max_length => {
                    warn!(max_length = self.max_length, "Line too long; discarding");
                    self.next_index = 0;
                    self.discarding = true;
                }
                (false, None) => {
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if buf.is_empty() || self.discarding {
            buf.clear();
            self.discarding = false;
            return Ok(None);
        }
        let line = buf.split();
        Ok(Some(to_line(&line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(codec: &mut CommandCodec, input: &[u8]) -> Vec<String> {
        let mut buf = BytesMut::from(input);
        let mut lines = Vec::new();
        while let Some(line) = codec.decode(&mut buf).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_splits_lines_and_strips_carriage_return() {
        let mut codec = CommandCodec::new(64);
        let lines = decode_all(&mut codec, b"NAME Ann\r\nMove 1,1\n");
        assert_eq!(lines, vec!["NAME Ann", "Move 1,1"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut codec = CommandCodec::new(64);
        let lines = decode_all(&mut codec, b"NAME Jos\xe9\n");
        assert_eq!(lines, vec!["NAME Jos\u{fffd}"]);
    }

    #[test]
    fn test_long_line_is_discarded_and_next_kept() {
        let mut codec = CommandCodec::new(8);
        let lines = decode_all(&mut codec, b"Chat aaaaaaaaaaaa\nRESTART\n");
        assert_eq!(lines, vec!["RESTART"]);
    }

    #[test]
    fn test_long_line_split_across_reads() {
        let mut codec = CommandCodec::new(8);
        let mut buf = BytesMut::from(&b"Chat aaaaaa"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"aaaaaa");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"aa\nMove 0,0\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("Move 0,0"));
    }

    #[test]
    fn test_partial_line_waits_for_newline() {
        let mut codec = CommandCodec::new(64);
        let mut buf = BytesMut::from(&b"Move 1"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b",2\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("Move 1,2"));
    }

    #[test]
    fn test_unterminated_last_line_delivered_at_eof() {
        let mut codec = CommandCodec::new(64);
        let mut buf = BytesMut::from(&b"RESTART"[..]);
        assert_eq!(codec.decode_eof(&mut buf).unwrap().as_deref(), Some("RESTART"));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }
}
