use crate::domain::{normalize_with, Contact, PhonePolicy};
use crate::dto::ContactsResponse;
use crate::extract::{looks_like_phone, Accepted};

const ENTRY_SEPARATORS: [char; 3] = ['\n', ',', ';'];
const LABEL_SEPARATORS: [char; 3] = [':', '-', '|'];

/// Parses pasted text such as `"Alice: 555-123-4567, 9998887776"`.
#[derive(Debug, Clone, Default)]
pub struct ManualParser {
    policy: PhonePolicy,
}

impl ManualParser {
    pub fn new(policy: PhonePolicy) -> Self {
        Self { policy }
    }

    pub fn parse(&self, text: &str) -> Vec<Contact> {
        let mut accepted = Accepted::default();
        for entry in text.split(ENTRY_SEPARATORS).map(str::trim) {
            if entry.is_empty() {
                continue;
            }
            let (phone, name) = split_entry(entry);
            if let Some(number) = normalize_with(phone, &self.policy) {
                accepted.push(number, name);
            }
        }
        accepted.into_contacts()
    }

    pub fn parse_response(&self, text: &str) -> ContactsResponse {
        ContactsResponse::parsed(self.parse(text))
    }
}

/// Splits `label: phone` or `phone - label`; ambiguous entries stay whole.
fn split_entry(entry: &str) -> (&str, Option<&str>) {
    let Some((left, right)) = entry.split_once(LABEL_SEPARATORS) else {
        return (entry, None);
    };
    let (left, right) = (left.trim(), right.trim());
    match (looks_like_phone(left), looks_like_phone(right)) {
        (false, true) => (right, Some(left)),
        (true, false) => (left, Some(right)),
        _ => (entry, None),
    }
}

pub fn parse_manual(text: &str) -> Vec<Contact> {
    ManualParser::default().parse(text)
}
