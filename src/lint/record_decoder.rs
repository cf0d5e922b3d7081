// src/lint/record_decoder.rs

//! Incremental decoder for the batch helper's `path;flag` record stream.
//!
//! The decoder is a plain value: [`RecordDecoder::feed`] takes the current
//! state plus a chunk and returns the next state. Chunks may split a record
//! anywhere (mid-path, mid-UTF-8 sequence, right on the newline); the trailing
//! fragment after the last newline is carried over until more bytes arrive.
//!
//! Invariant: `carry` plus every chunk fed so far, concatenated in order, is
//! the full stream seen so far, and each complete line yields at most one
//! entry in `records`.

use std::collections::HashMap;

use tracing::{debug, warn};

/// Flag value that marks a file as skipped.
pub const SKIP_FLAG: &str = "1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDecoder {
    carry: Vec<u8>,
    records: HashMap<String, bool>,
}

impl RecordDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every record completed by `chunk`.
    #[must_use]
    pub fn feed(mut self, chunk: &[u8]) -> Self {
        if chunk.is_empty() {
            return self;
        }

        let mut pending = std::mem::take(&mut self.carry);
        pending.extend_from_slice(chunk);

        match pending.iter().rposition(|b| *b == b'\n') {
            None => self.carry = pending,
            Some(last_newline) => {
                for line in pending[..last_newline].split(|b| *b == b'\n') {
                    self.apply_line(line);
                }
                self.carry = pending[last_newline + 1..].to_vec();
            }
        }

        self
    }

    /// Treat a non-empty carry as the final record of a closed stream.
    #[must_use]
    pub fn finish(mut self) -> Self {
        let carry = std::mem::take(&mut self.carry);
        if !carry.is_empty() {
            self.apply_line(&carry);
        }
        self
    }

    /// Skip flag decoded for `file`, or `None` if no record named it yet.
    pub fn is_skipped(&self, file: &str) -> Option<bool> {
        self.records.get(file).copied()
    }

    pub fn records(&self) -> &HashMap<String, bool> {
        &self.records
    }

    /// Bytes received after the last newline.
    pub fn carry(&self) -> &[u8] {
        &self.carry
    }

    fn apply_line(&mut self, line: &[u8]) {
        let line = String::from_utf8_lossy(line);
        // CRLF-terminated records are accepted, so `1\r\n` still reads as skip.
        let line = line.strip_suffix('\r').unwrap_or(&*line);
        if line.is_empty() {
            return;
        }

        match line.split_once(';') {
            Some((file, flag)) => {
                let skipped = flag == SKIP_FLAG;
                debug!(file = %file, skipped, "decoded batch record");
                self.records.insert(file.to_string(), skipped);
            }
            None => {
                warn!(line = %line, "ignoring batch record without ';' separator");
            }
        }
    }
}
