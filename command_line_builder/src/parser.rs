mod base;
mod column;
mod printer;

pub use base::*;
pub use printer::ErrorContext;
