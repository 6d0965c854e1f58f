use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("contact name is required")]
    EmptyContactName,
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("invalid phone policy: {0}")]
    InvalidPhonePolicy(String),
    #[error("{0} keyword list is empty")]
    EmptyColumnKeywords(&'static str),
}
