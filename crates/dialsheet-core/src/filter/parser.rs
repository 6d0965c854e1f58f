use crate::filter::ast::{ContactFilter, FilterExpr, NameMatch};
use crate::filter::FilterParseError;

pub fn parse_filter(input: &str) -> Result<ContactFilter, FilterParseError> {
    let mut terms = Vec::new();

    for token in input.split_whitespace() {
        if let Some(tag_raw) = token.strip_prefix('#') {
            let tag = tag_raw.trim().to_lowercase();
            if tag.is_empty() {
                return Err(FilterParseError::EmptyTag);
            }
            terms.push(FilterExpr::Tag(tag));
        } else if let Some(rest) = token.strip_prefix("name") {
            match parse_name_term(rest)? {
                Some(term) => terms.push(term),
                None => terms.push(FilterExpr::Text(token.to_string())),
            }
        } else {
            terms.push(FilterExpr::Text(token.to_string()));
        }
    }

    Ok(FilterExpr::And(terms))
}

/// `rest` follows a leading `name`; returns `None` when the token is plain text.
fn parse_name_term(rest: &str) -> Result<Option<FilterExpr>, FilterParseError> {
    let Some((operator, pattern)) = rest.split_once('=') else {
        return Ok(None);
    };
    let kind = match operator {
        "^" => NameMatch::StartsWith,
        "$" => NameMatch::EndsWith,
        "~" => NameMatch::Contains,
        "" => return Err(FilterParseError::UnknownNameOperator("=".to_string())),
        other => {
            if other.chars().all(char::is_alphanumeric) {
                return Ok(None);
            }
            return Err(FilterParseError::UnknownNameOperator(format!("{other}=")));
        }
    };
    if pattern.is_empty() {
        return Err(FilterParseError::EmptyPattern(format!("name{operator}=")));
    }
    Ok(Some(FilterExpr::Name(kind, pattern.to_string())))
}
