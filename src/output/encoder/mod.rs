mod encoder;
mod json;
mod triples;

pub use encoder::Encoder;
pub use json::SemJsonEncoder;
pub use triples::TriplesEncoder;
