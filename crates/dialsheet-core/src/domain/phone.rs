use crate::domain::table::format_float;
use crate::dto::Validation;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub const DEFAULT_MIN_DIGITS: usize = 7;
pub const DEFAULT_MAX_DIGITS: usize = 15;
pub const DEFAULT_INTERNATIONAL_THRESHOLD: usize = 10;
/// Longest number E.164 allows.
pub const MAX_PHONE_DIGITS: usize = 15;

/// Tunables for [`normalize_with`]. The default reproduces the canonical rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonePolicy {
    pub min_digits: usize,
    pub max_digits: usize,
    /// Numbers without a `+` longer than this are presumed international.
    pub international_threshold: usize,
    pub prefix_plus: bool,
}

impl Default for PhonePolicy {
    fn default() -> Self {
        Self {
            min_digits: DEFAULT_MIN_DIGITS,
            max_digits: DEFAULT_MAX_DIGITS,
            international_threshold: DEFAULT_INTERNATIONAL_THRESHOLD,
            prefix_plus: true,
        }
    }
}

impl PhonePolicy {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.min_digits == 0 {
            return Err(CoreError::InvalidPhonePolicy(
                "min_digits must be positive".to_string(),
            ));
        }
        if self.min_digits > self.max_digits {
            return Err(CoreError::InvalidPhonePolicy(format!(
                "min_digits {} exceeds max_digits {}",
                self.min_digits, self.max_digits
            )));
        }
        if self.max_digits > MAX_PHONE_DIGITS {
            return Err(CoreError::InvalidPhonePolicy(format!(
                "max_digits {} exceeds {MAX_PHONE_DIGITS}",
                self.max_digits
            )));
        }
        Ok(())
    }
}

/// A phone number that passed normalization: digits with an optional leading `+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalPhone(String);

impl CanonicalPhone {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        normalize(raw).ok_or_else(|| CoreError::InvalidPhone(raw.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digits(&self) -> &str {
        self.0.strip_prefix('+').unwrap_or(&self.0)
    }

    pub fn is_international(&self) -> bool {
        self.0.starts_with('+')
    }
}

impl fmt::Display for CanonicalPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Anything a phone number may arrive as: text, spreadsheet numbers, empty cells.
pub trait PhoneInput {
    /// Textual form of the value, or `None` for null-like input.
    fn phone_text(&self) -> Option<Cow<'_, str>>;
}

impl PhoneInput for str {
    fn phone_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl PhoneInput for String {
    fn phone_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<T: PhoneInput + ?Sized> PhoneInput for &T {
    fn phone_text(&self) -> Option<Cow<'_, str>> {
        (**self).phone_text()
    }
}

impl<T: PhoneInput> PhoneInput for Option<T> {
    fn phone_text(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(|value| value.phone_text())
    }
}

macro_rules! integer_phone_input {
    ($($ty:ty),*) => {
        $(
            impl PhoneInput for $ty {
                fn phone_text(&self) -> Option<Cow<'_, str>> {
                    Some(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

integer_phone_input!(i32, i64, u32, u64, usize);

impl PhoneInput for f64 {
    fn phone_text(&self) -> Option<Cow<'_, str>> {
        format_float(*self).map(Cow::Owned)
    }
}

impl PhoneInput for f32 {
    fn phone_text(&self) -> Option<Cow<'_, str>> {
        format_float(f64::from(*self)).map(Cow::Owned)
    }
}

pub fn normalize<T: PhoneInput + ?Sized>(raw: &T) -> Option<CanonicalPhone> {
    normalize_with(raw, &PhonePolicy::default())
}

pub fn normalize_with<T: PhoneInput + ?Sized>(
    raw: &T,
    policy: &PhonePolicy,
) -> Option<CanonicalPhone> {
    let text = raw.phone_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut cleaned = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if is_separator(ch) {
            continue;
        }
        if ch.is_ascii_digit() {
            cleaned.push(ch);
        } else if ch == '+' && cleaned.is_empty() {
            cleaned.push(ch);
        }
    }

    if !cleaned.starts_with('+') {
        let stripped = cleaned.trim_start_matches('0');
        if stripped.len() != cleaned.len() {
            cleaned = stripped.to_string();
        }
        if policy.prefix_plus && cleaned.len() > policy.international_threshold {
            cleaned.insert(0, '+');
        }
    }

    let digits = cleaned.bytes().filter(|b| b.is_ascii_digit()).count();
    if digits < policy.min_digits || digits > policy.max_digits {
        return None;
    }

    Some(CanonicalPhone(cleaned))
}

pub fn validate(raw: &str) -> Validation {
    validate_with(raw, &PhonePolicy::default())
}

pub fn validate_with(raw: &str, policy: &PhonePolicy) -> Validation {
    let cleaned_number = normalize_with(raw, policy);
    Validation {
        valid: cleaned_number.is_some(),
        cleaned_number,
        original: raw.to_string(),
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '-' | '(' | ')' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> Option<String> {
        normalize(raw).map(|phone| phone.as_str().to_string())
    }

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(norm("555-123-4567").as_deref(), Some("5551234567"));
        assert_eq!(norm(" (555) 123.4567 ").as_deref(), Some("5551234567"));
    }

    #[test]
    fn normalize_preserves_leading_plus() {
        assert_eq!(norm("+1 (555) 123-4567").as_deref(), Some("+15551234567"));
        assert_eq!(norm("+1 (555) 123-4567"), norm("+15551234567"));
    }

    #[test]
    fn normalize_prefixes_long_numbers() {
        assert_eq!(norm("15551234567").as_deref(), Some("+15551234567"));
        assert_eq!(norm("5551234567").as_deref(), Some("5551234567"));
    }

    #[test]
    fn normalize_strips_leading_zeros() {
        assert_eq!(norm("0123456789").as_deref(), Some("123456789"));
        assert_eq!(norm("0044 20 7946 0958").as_deref(), Some("+442079460958"));
    }

    #[test]
    fn normalize_keeps_zero_after_plus() {
        assert_eq!(norm("+0123456789").as_deref(), Some("+0123456789"));
    }

    #[test]
    fn normalize_drops_inner_plus_signs() {
        assert_eq!(norm("++1 555 123 4567").as_deref(), Some("+15551234567"));
        assert_eq!(norm("555+1234").as_deref(), Some("5551234"));
    }

    #[test]
    fn normalize_length_gate() {
        assert!(norm("123456").is_none());
        assert_eq!(norm("1234567").as_deref(), Some("1234567"));
        assert_eq!(norm("123456789012345").as_deref(), Some("+123456789012345"));
        assert!(norm("1234567890123456").is_none());
    }

    #[test]
    fn normalize_rejects_empty_and_garbage() {
        assert!(norm("").is_none());
        assert!(norm("   ").is_none());
        assert!(norm("call me maybe").is_none());
        assert!(normalize(&None::<String>).is_none());
    }

    #[test]
    fn normalize_accepts_numeric_input() {
        assert_eq!(
            normalize(&5_551_234_567_i64).map(|p| p.to_string()).as_deref(),
            Some("5551234567")
        );
        assert_eq!(
            normalize(&5_551_234_567.0_f64).map(|p| p.to_string()).as_deref(),
            Some("5551234567")
        );
        assert!(normalize(&f64::NAN).is_none());
    }

    #[test]
    fn normalize_is_idempotent_on_examples() {
        for raw in ["+1 (555) 123-4567", "0123456789", "44 20 7946 0958", "555.123.4567"] {
            let once = normalize(raw).expect("valid");
            let twice = normalize(once.as_str()).expect("still valid");
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalize_with_custom_policy() {
        let policy = PhonePolicy {
            prefix_plus: false,
            ..PhonePolicy::default()
        };
        assert_eq!(
            normalize_with("15551234567", &policy).map(|p| p.to_string()).as_deref(),
            Some("15551234567")
        );

        let strict = PhonePolicy {
            min_digits: 10,
            ..PhonePolicy::default()
        };
        assert!(normalize_with("555-1234", &strict).is_none());
    }

    #[test]
    fn policy_validation_rejects_inverted_bounds() {
        let policy = PhonePolicy {
            min_digits: 12,
            max_digits: 8,
            ..PhonePolicy::default()
        };
        assert!(policy.validate().is_err());
        assert!(PhonePolicy::default().validate().is_ok());
    }

    #[test]
    fn validate_reports_original_and_cleaned() {
        let result = validate(" 555-123-4567 ");
        assert!(result.valid);
        assert_eq!(
            result.cleaned_number.as_ref().map(|p| p.as_str()),
            Some("5551234567")
        );
        assert_eq!(result.original, " 555-123-4567 ");

        let rejected = validate("12");
        assert!(!rejected.valid);
        assert!(rejected.cleaned_number.is_none());
    }

    #[test]
    fn canonical_phone_exposes_digits() {
        let phone = CanonicalPhone::new("+1 555 123 4567").unwrap();
        assert!(phone.is_international());
        assert_eq!(phone.digits(), "15551234567");
        assert!(CanonicalPhone::new("42").is_err());
    }
}
