mod manual;
mod table;
mod text;

pub use manual::{parse_manual, ManualParser};
pub use table::{extract_table, RowFilter, TableExtractor};
pub use text::{extract_lines, extract_text, LineExtractor};

use crate::domain::{fallback_name, normalize_with, CanonicalPhone, Contact, PhoneInput, PhonePolicy};
use once_cell::sync::Lazy;
use regex::Regex;

/// A run of seven or more characters that can make up a written phone number.
static PHONE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d+\-()\s]{7,}").expect("phone run pattern"));

pub(crate) fn looks_like_phone(fragment: &str) -> bool {
    PHONE_RUN.is_match(fragment)
}

/// First phone run anywhere in `line`, crossing fragment delimiters such as tabs.
pub(crate) fn find_phone_in_line(line: &str) -> Option<&str> {
    PHONE_RUN.find(line).map(|found| found.as_str())
}

/// Accumulates accepted contacts and numbers placeholder names densely.
#[derive(Debug, Default)]
pub(crate) struct Accepted {
    contacts: Vec<Contact>,
}

impl Accepted {
    pub(crate) fn push(&mut self, number: CanonicalPhone, name: Option<&str>) {
        let name = match name.map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => fallback_name(self.contacts.len() + 1),
        };
        self.contacts.push(Contact { number, name });
    }

    pub(crate) fn into_contacts(self) -> Vec<Contact> {
        self.contacts
    }
}

/// Normalizes already-paired `(phone, name)` candidates, e.g. from vCards.
pub fn contacts_from_pairs<I, P, N>(pairs: I, policy: &PhonePolicy) -> Vec<Contact>
where
    I: IntoIterator<Item = (P, Option<N>)>,
    P: PhoneInput,
    N: AsRef<str>,
{
    let mut accepted = Accepted::default();
    for (phone, name) in pairs {
        if let Some(number) = normalize_with(&phone, policy) {
            let name: Option<&str> = name.as_ref().map(|value| value.as_ref());
            accepted.push(number, name);
        }
    }
    accepted.into_contacts()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_run_needs_seven_characters() {
        assert!(looks_like_phone("555-1234"));
        assert!(looks_like_phone("call +1 (555) 123"));
        assert!(!looks_like_phone("555-12"));
        assert!(!looks_like_phone("Alice"));
    }

    #[test]
    fn line_search_finds_digit_runs() {
        assert_eq!(
            find_phone_in_line("Bob 555 123 4567"),
            Some(" 555 123 4567")
        );
        assert_eq!(find_phone_in_line("no digits here"), None);
    }

    #[test]
    fn line_search_and_fragment_test_share_one_rule() {
        let line = "tel:555+123+4567";
        assert_eq!(find_phone_in_line(line), Some("555+123+4567"));
        assert!(looks_like_phone(line));
        assert_eq!(find_phone_in_line("Ann\t555\t123\t4567"), Some("\t555\t123\t4567"));
    }

    #[test]
    fn pairs_are_normalized_and_named() {
        let contacts = contacts_from_pairs(
            vec![
                ("555-123-4567", Some("Ada")),
                ("12", Some("Short")),
                ("+44 20 7946 0958", None),
            ],
            &PhonePolicy::default(),
        );
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Ada");
        assert_eq!(contacts[1].number.as_str(), "+442079460958");
        assert_eq!(contacts[1].name, "Contact 2");
    }

    #[test]
    fn accepted_numbers_placeholders_densely() {
        let mut accepted = Accepted::default();
        accepted.push(CanonicalPhone::new("5551234567").unwrap(), None);
        accepted.push(CanonicalPhone::new("5551234568").unwrap(), Some("  Ada "));
        accepted.push(CanonicalPhone::new("5551234569").unwrap(), Some(""));
        let names: Vec<String> = accepted
            .into_contacts()
            .into_iter()
            .map(|contact| contact.name)
            .collect();
        assert_eq!(names, vec!["Contact 1", "Ada", "Contact 3"]);
    }
}
