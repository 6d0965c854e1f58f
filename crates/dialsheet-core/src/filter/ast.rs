use crate::domain::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    StartsWith,
    EndsWith,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    /// Case-insensitive substring of name or number.
    Text(String),
    /// Lowercased tag looked up in a table's tag column.
    Tag(String),
    Name(NameMatch, String),
    And(Vec<FilterExpr>),
}

pub type ContactFilter = FilterExpr;

impl FilterExpr {
    /// Tag terms, which only structured sources can evaluate.
    pub fn tags(&self) -> Vec<&str> {
        match self {
            FilterExpr::Tag(tag) => vec![tag.as_str()],
            FilterExpr::And(terms) => terms.iter().flat_map(FilterExpr::tags).collect(),
            FilterExpr::Text(_) | FilterExpr::Name(..) => Vec::new(),
        }
    }

    /// Evaluates name and text terms; tag terms are decided per row and pass here.
    pub fn matches(&self, contact: &Contact) -> bool {
        match self {
            FilterExpr::Text(needle) => {
                let needle = needle.to_lowercase();
                contact.name.to_lowercase().contains(&needle)
                    || contact.number.as_str().contains(&needle)
            }
            FilterExpr::Tag(_) => true,
            FilterExpr::Name(NameMatch::StartsWith, pattern) => {
                contact.name.starts_with(pattern.as_str())
            }
            FilterExpr::Name(NameMatch::EndsWith, pattern) => {
                contact.name.ends_with(pattern.as_str())
            }
            FilterExpr::Name(NameMatch::Contains, pattern) => {
                contact.name.contains(pattern.as_str())
            }
            FilterExpr::And(terms) => terms.iter().all(|term| term.matches(contact)),
        }
    }
}
