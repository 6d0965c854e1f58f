use crate::domain::{normalize_with, Contact, PhonePolicy};
use crate::extract::{find_phone_in_line, looks_like_phone, Accepted};

const FRAGMENT_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Reads one contact per line of loosely delimited text.
#[derive(Debug, Clone, Default)]
pub struct LineExtractor {
    policy: PhonePolicy,
}

impl LineExtractor {
    pub fn new(policy: PhonePolicy) -> Self {
        Self { policy }
    }

    pub fn extract<I, S>(&self, lines: I) -> Vec<Contact>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = Accepted::default();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            let Some((phone, name)) = split_line(line) else {
                continue;
            };
            if let Some(number) = normalize_with(phone.as_str(), &self.policy) {
                accepted.push(number, name.as_deref());
            }
        }
        accepted.into_contacts()
    }

    pub fn extract_text(&self, text: &str) -> Vec<Contact> {
        self.extract(text.lines())
    }
}

/// Phone and name candidates for a single non-blank line.
fn split_line(line: &str) -> Option<(String, Option<String>)> {
    let fragments: Vec<&str> = line.split(FRAGMENT_DELIMITERS).map(str::trim).collect();

    if let Some(phone_index) = fragments.iter().position(|part| looks_like_phone(part)) {
        let name = fragments
            .iter()
            .enumerate()
            .find(|(index, part)| {
                *index != phone_index && !part.is_empty() && !looks_like_phone(part)
            })
            .map(|(_, part)| part.to_string());
        return Some((fragments[phone_index].to_string(), name));
    }

    let phone = find_phone_in_line(line)?;
    let remainder = line.replace(phone, "");
    let remainder = remainder.trim();
    let name = if remainder.is_empty() {
        None
    } else {
        Some(remainder.to_string())
    };
    Some((phone.to_string(), name))
}

pub fn extract_lines<I, S>(lines: I) -> Vec<Contact>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    LineExtractor::default().extract(lines)
}

pub fn extract_text(text: &str) -> Vec<Contact> {
    LineExtractor::default().extract_text(text)
}
