use crate::domain::phone::CanonicalPhone;
use crate::error::CoreError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Contact {
    pub number: CanonicalPhone,
    pub name: String,
}

impl Contact {
    pub fn new(number: CanonicalPhone, name: impl Into<String>) -> Result<Self, CoreError> {
        let contact = Self {
            number,
            name: name.into(),
        };
        contact.validate()?;
        Ok(contact)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyContactName);
        }
        Ok(())
    }
}

/// Placeholder name for the `position`-th accepted contact (1-based).
pub fn fallback_name(position: usize) -> String {
    format!("Contact {position}")
}
