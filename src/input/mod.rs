mod decoder;
mod reader;

pub use decoder::{Decoder, JsonDecoder};
pub use reader::LineReader;

use std::io;

use crate::error::Result;
use crate::model::PersonRecord;

pub struct RecordReader {
    lines: Box<dyn Iterator<Item = io::Result<Vec<u8>>>>,
    decoder: Box<dyn Decoder>,
}

impl RecordReader {
    pub fn new(
        lines: Box<dyn Iterator<Item = io::Result<Vec<u8>>>>,
        decoder: Box<dyn Decoder>,
    ) -> Self {
        Self { lines, decoder }
    }
}

impl std::iter::Iterator for RecordReader {
    type Item = Result<PersonRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let buf = match self.lines.next() {
                Some(Ok(buf)) => buf,
                Some(Err(e)) => return Some(Err(("reader failed", e).into())),
                None => return None, // EOF
            };

            if buf.iter().all(|b| b.is_ascii_whitespace()) {
                continue;
            }

            return Some(self.decoder.decode(&buf));
        }
    }
}
