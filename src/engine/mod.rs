mod normalizer;

pub use normalizer::{Normalizer, DEFAULT_FUZZ_DAYS};
