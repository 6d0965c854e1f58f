use crate::error::CoreError;
use serde::Serialize;

pub const DEFAULT_PHONE_KEYWORDS: [&str; 5] = ["phone", "number", "mobile", "cell", "tel"];
pub const DEFAULT_NAME_KEYWORDS: [&str; 3] = ["name", "contact", "person"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Phone,
    Name,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRoleGuess {
    pub column: String,
    pub role: ColumnRole,
}

/// Which columns an extraction reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    pub phone_column: Option<String>,
    pub name_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    pub role: ColumnRole,
    keywords: Vec<String>,
}

impl ColumnRule {
    pub fn new<S: AsRef<str>>(role: ColumnRole, keywords: &[S]) -> Self {
        Self {
            role,
            keywords: keywords
                .iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
    }
}

/// Keyword rules in rank order; earlier rules win when a column matches several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRules {
    rules: Vec<ColumnRule>,
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self {
            rules: vec![
                ColumnRule::new(ColumnRole::Phone, &DEFAULT_PHONE_KEYWORDS),
                ColumnRule::new(ColumnRole::Name, &DEFAULT_NAME_KEYWORDS),
            ],
        }
    }
}

impl ColumnRules {
    pub fn new<S: AsRef<str>>(phone_keywords: &[S], name_keywords: &[S]) -> Result<Self, CoreError> {
        let phone = ColumnRule::new(ColumnRole::Phone, phone_keywords);
        if phone.keywords.is_empty() {
            return Err(CoreError::EmptyColumnKeywords("phone"));
        }
        let name = ColumnRule::new(ColumnRole::Name, name_keywords);
        if name.keywords.is_empty() {
            return Err(CoreError::EmptyColumnKeywords("name"));
        }
        Ok(Self {
            rules: vec![phone, name],
        })
    }

    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }

    /// Highest-ranked role whose rule matches `column`.
    pub fn role_of(&self, column: &str) -> ColumnRole {
        let lowered = column.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.role)
            .unwrap_or(ColumnRole::Unknown)
    }

    pub fn guess_roles<S: AsRef<str>>(&self, columns: &[S]) -> Vec<ColumnRoleGuess> {
        columns
            .iter()
            .map(|column| ColumnRoleGuess {
                column: column.as_ref().to_string(),
                role: self.role_of(column.as_ref()),
            })
            .collect()
    }

    pub fn classify<S: AsRef<str>>(&self, columns: &[S]) -> ColumnSelection {
        let (phone_index, name_index) = self.positions(columns);
        ColumnSelection {
            phone_column: phone_index.map(|index| columns[index].as_ref().to_string()),
            name_column: name_index.map(|index| columns[index].as_ref().to_string()),
        }
    }

    /// Column positions behind [`ColumnRules::classify`]; each column counts only for its ranked role.
    pub(crate) fn positions<S: AsRef<str>>(&self, columns: &[S]) -> (Option<usize>, Option<usize>) {
        let phone_index = self
            .first_match(columns, ColumnRole::Phone)
            .or(if columns.is_empty() { None } else { Some(0) });
        let name_index = self
            .first_match(columns, ColumnRole::Name)
            .or(if columns.len() > 1 { Some(1) } else { None });
        (phone_index, name_index)
    }

    /// First column whose highest-ranked role is `role`.
    fn first_match<S: AsRef<str>>(&self, columns: &[S], role: ColumnRole) -> Option<usize> {
        columns
            .iter()
            .position(|column| self.role_of(column.as_ref()) == role)
    }
}

/// Picks phone and name columns with the default keyword rules.
pub fn classify<S: AsRef<str>>(columns: &[S]) -> ColumnSelection {
    ColumnRules::default().classify(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_picks_keyword_columns() {
        let selection = classify(&["Mobile", "Email", "Contact Name"]);
        assert_eq!(selection.phone_column.as_deref(), Some("Mobile"));
        assert_eq!(selection.name_column.as_deref(), Some("Contact Name"));
    }

    #[test]
    fn classify_is_case_insensitive() {
        let selection = classify(&["id", "TELEPHONE", "full NAME"]);
        assert_eq!(selection.phone_column.as_deref(), Some("TELEPHONE"));
        assert_eq!(selection.name_column.as_deref(), Some("full NAME"));
    }

    #[test]
    fn classify_falls_back_to_positions() {
        let selection = classify(&["a", "b", "c"]);
        assert_eq!(selection.phone_column.as_deref(), Some("a"));
        assert_eq!(selection.name_column.as_deref(), Some("b"));

        let single = classify(&["only"]);
        assert_eq!(single.phone_column.as_deref(), Some("only"));
        assert_eq!(single.name_column, None);

        let empty = classify::<&str>(&[]);
        assert_eq!(empty, ColumnSelection::default());
    }

    #[test]
    fn classify_prefers_first_occurrence() {
        let selection = classify(&["Work Phone", "Home Phone", "Name", "Person"]);
        assert_eq!(selection.phone_column.as_deref(), Some("Work Phone"));
        assert_eq!(selection.name_column.as_deref(), Some("Name"));
    }

    #[test]
    fn classify_skips_chosen_phone_column_for_name() {
        let selection = classify(&["Contact Number", "Nickname"]);
        assert_eq!(selection.phone_column.as_deref(), Some("Contact Number"));
        assert_eq!(selection.name_column.as_deref(), Some("Nickname"));
    }

    #[test]
    fn classify_never_names_a_phone_keyword_column() {
        let selection = classify(&["Mobile", "Contact Number", "Full Name"]);
        assert_eq!(selection.phone_column.as_deref(), Some("Mobile"));
        assert_eq!(selection.name_column.as_deref(), Some("Full Name"));
    }

    #[test]
    fn guess_roles_ranks_phone_above_name() {
        let guesses = ColumnRules::default().guess_roles(&["Contact Number", "Name", "Email"]);
        let roles: Vec<ColumnRole> = guesses.iter().map(|guess| guess.role).collect();
        assert_eq!(
            roles,
            vec![ColumnRole::Phone, ColumnRole::Name, ColumnRole::Unknown]
        );
    }

    #[test]
    fn custom_rules_replace_keywords() {
        let rules = ColumnRules::new(&["whatsapp"], &["alias"]).unwrap();
        let selection = rules.classify(&["Phone", "WhatsApp", "Alias"]);
        assert_eq!(selection.phone_column.as_deref(), Some("WhatsApp"));
        assert_eq!(selection.name_column.as_deref(), Some("Alias"));
    }

    #[test]
    fn custom_rules_reject_empty_keywords() {
        let err = ColumnRules::new(&["  "], &["name"]).unwrap_err();
        assert_eq!(err, CoreError::EmptyColumnKeywords("phone"));
    }
}
