pub mod columns;
pub mod domain;
pub mod dto;
pub mod error;
pub mod extract;
pub mod filter;
pub mod links;

pub use columns::{classify, ColumnRole, ColumnRoleGuess, ColumnRules, ColumnSelection};
pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use extract::{contacts_from_pairs, LineExtractor, ManualParser, RowFilter, TableExtractor};
pub use filter::{parse_filter, ContactFilter, FilterExpr, FilterParseError};
pub use links::send_link;
