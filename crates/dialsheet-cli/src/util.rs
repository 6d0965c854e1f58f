use anyhow::{Context as _, Result};
use dialsheet_core::{parse_filter, ContactFilter};
use std::io::Read;

/// The argument itself, or all of stdin when it is `-`.
pub fn text_or_stdin(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .with_context(|| "read stdin")?;
    Ok(buffer)
}

pub fn parse_filter_arg(raw: Option<&str>) -> Result<Option<ContactFilter>> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => Ok(Some(parse_filter(raw)?)),
        _ => Ok(None),
    }
}
