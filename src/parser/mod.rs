mod expr;
mod partial;
mod result;

pub use expr::{classify, Expr};
pub use partial::{parse_partial, PartialDate};
