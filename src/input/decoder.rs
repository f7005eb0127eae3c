use serde_json;

use crate::error::Result;
use crate::model::PersonRecord;

pub trait Decoder {
    fn decode(&mut self, buf: &[u8]) -> Result<PersonRecord>;
}

pub struct JsonDecoder {}

impl JsonDecoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Decoder for JsonDecoder {
    fn decode(&mut self, buf: &[u8]) -> Result<PersonRecord> {
        serde_json::from_slice(buf).map_err(|e| ("record decoding failed", e).into())
    }
}
