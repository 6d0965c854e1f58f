mod ast;
mod parser;

use thiserror::Error;

pub use ast::{ContactFilter, FilterExpr, NameMatch};
pub use parser::parse_filter;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("empty tag token")]
    EmptyTag,
    #[error("empty pattern for {0}")]
    EmptyPattern(String),
    #[error("unknown name operator: {0}")]
    UnknownNameOperator(String),
}
