use dialsheet_core::Contact;
use serde::Serialize;
use std::borrow::Cow;

/// Raw name/phone pair read from one card, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VcfEntry {
    pub name: Option<String>,
    pub phone: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedVcf {
    pub entries: Vec<VcfEntry>,
    pub warnings: Vec<String>,
    pub skipped: usize,
}

pub fn parse_vcf(data: &str) -> ParsedVcf {
    let mut parsed = ParsedVcf::default();
    let mut current: Option<RawCard> = None;

    for line in unfold_lines(data) {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("BEGIN:VCARD") {
            if let Some(card) = current.take() {
                parsed
                    .warnings
                    .push("nested BEGIN:VCARD encountered".to_string());
                card.finish(&mut parsed);
            }
            current = Some(RawCard::default());
            continue;
        }

        if trimmed.eq_ignore_ascii_case("END:VCARD") {
            match current.take() {
                Some(card) => card.finish(&mut parsed),
                None => parsed
                    .warnings
                    .push("END:VCARD without matching BEGIN:VCARD".to_string()),
            }
            continue;
        }

        let Some(card) = current.as_mut() else {
            continue;
        };
        let Some((key, raw_value)) = split_property(trimmed) else {
            continue;
        };

        let value = unescape_vcard_value(raw_value);
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "FN" if card.formatted_name.is_none() => card.formatted_name = Some(value.to_string()),
            "N" if card.structured_name.is_none() => {
                card.structured_name = structured_display_name(raw_value)
            }
            "TEL" if card.phone.is_none() => card.phone = Some(value.to_string()),
            _ => {}
        }
    }

    if let Some(card) = current.take() {
        parsed
            .warnings
            .push("missing END:VCARD at end of file".to_string());
        card.finish(&mut parsed);
    }

    parsed
}

/// vCard 3.0 with one `FN`/`TEL` pair per contact, in input order.
pub fn export_vcf(contacts: &[Contact]) -> String {
    let mut out = String::new();
    for contact in contacts {
        out.push_str("BEGIN:VCARD\r\n");
        out.push_str("VERSION:3.0\r\n");
        out.push_str(&format!("FN:{}\r\n", escape_vcard_value(&contact.name)));
        out.push_str(&format!(
            "TEL;TYPE=CELL:{}\r\n",
            escape_vcard_value(contact.number.as_str())
        ));
        out.push_str("END:VCARD\r\n");
    }
    out
}

#[derive(Default)]
struct RawCard {
    formatted_name: Option<String>,
    structured_name: Option<String>,
    phone: Option<String>,
}

impl RawCard {
    fn finish(self, parsed: &mut ParsedVcf) {
        let Some(phone) = self.phone else {
            parsed.warnings.push("missing TEL; skipping vCard".to_string());
            parsed.skipped += 1;
            return;
        };
        parsed.entries.push(VcfEntry {
            name: self.formatted_name.or(self.structured_name),
            phone,
        });
    }
}

/// `N:Family;Given;Additional;Prefix;Suffix` read as `Given Family`.
fn structured_display_name(raw: &str) -> Option<String> {
    let parts: Vec<String> = split_unescaped(raw, ';')
        .into_iter()
        .map(|part| unescape_vcard_value(&part).trim().to_string())
        .collect();
    let family = parts.first().map(String::as_str).unwrap_or_default();
    let given = parts.get(1).map(String::as_str).unwrap_or_default();
    let joined = [given, family]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn unfold_lines(input: &str) -> Vec<String> {
    let input = normalize_line_endings(input);
    let mut lines: Vec<String> = Vec::new();
    for line in input.lines() {
        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            match lines.last_mut() {
                Some(last) => last.push_str(rest),
                None => lines.push(rest.to_string()),
            }
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Property name without parameters or group prefix, uppercased.
fn split_property(line: &str) -> Option<(String, &str)> {
    let (left, value) = line.split_once(':')?;
    let mut name = left.split(';').next()?.trim();
    if let Some((_, ungrouped)) = name.rsplit_once('.') {
        name = ungrouped;
    }
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_uppercase(), value))
}

fn split_unescaped(value: &str, separator: char) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut escape = false;

    for ch in value.chars() {
        if escape {
            current.push(ch);
            escape = false;
        } else if ch == '\\' {
            current.push(ch);
            escape = true;
        } else if ch == separator {
            items.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    items.push(current);
    items
}

fn escape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' => out.push_str("\\n"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n' | 'N' | 'r' | 'R') => out.push('\n'),
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}
