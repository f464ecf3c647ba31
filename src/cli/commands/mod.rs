pub mod parse;

pub use parse::*;
