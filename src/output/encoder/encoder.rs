use crate::error::Result;
use crate::model::TimedStatement;

pub trait Encoder {
    fn encode(&self, statement: &TimedStatement) -> Result<Vec<u8>>;
}
