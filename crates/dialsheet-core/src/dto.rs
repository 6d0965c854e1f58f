use crate::domain::{CanonicalPhone, Contact};
use serde::Serialize;

/// Result shape handed back to callers of every extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactsResponse {
    pub success: bool,
    pub contacts: Vec<Contact>,
    pub count: usize,
    pub message: String,
}

impl ContactsResponse {
    pub fn extracted(contacts: Vec<Contact>) -> Self {
        let count = contacts.len();
        Self {
            success: true,
            contacts,
            count,
            message: format!("Successfully extracted {count} contacts"),
        }
    }

    pub fn parsed(contacts: Vec<Contact>) -> Self {
        let count = contacts.len();
        Self {
            success: true,
            contacts,
            count,
            message: format!("Successfully parsed {count} contacts"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub cleaned_number: Option<CanonicalPhone>,
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            message: "WhatsApp contact processor is ready",
        }
    }
}
