pub mod assemble;
pub mod error;
pub mod extractor;
pub mod parse;
