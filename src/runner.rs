use tracing::warn;

use crate::error::Result;
use crate::input::RecordReader;
use crate::mapping::RecordMapper;
use crate::output::{encoder::Encoder, Writer};

// (Reader -> Decoder) -> Mapper -> (Encoder -> Writer)
//       producer                        consumer
//
// Reader  == stdin [, line separator]  ->  Iterator<Result<Vec<u8>>>
// Decoder == bytes                     ->  PersonRecord
// Mapper  == PersonRecord              ->  Vec<TimedStatement>
// Encoder == TimedStatement            ->  bytes
// Writer  == bytes                     ->  stdout
pub struct Runner {
    records: RecordReader,
    mapper: RecordMapper,
    encoder: Box<dyn Encoder>,
    writer: Box<dyn Writer>,
}

impl Runner {
    pub fn new(
        records: RecordReader,
        mapper: RecordMapper,
        encoder: Box<dyn Encoder>,
        writer: Box<dyn Writer>,
    ) -> Self {
        Self {
            records,
            mapper,
            encoder,
            writer,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        while let Some(record) = self.records.next() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!(error = %err, "skipping undecodable record");
                    continue;
                }
            };

            for statement in self.mapper.map(&record) {
                let buf = self.encoder.encode(&statement)?;
                self.writer.write(&buf).map_err(|e| ("writer failed", e))?;
            }
        }
        Ok(())
    }
}
