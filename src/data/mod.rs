//! CSV retrieval and row parsing.

pub mod parse;
pub mod source;
