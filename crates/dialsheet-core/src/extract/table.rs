use crate::columns::ColumnRules;
use crate::domain::{normalize_with, CellValue, Contact, PhonePolicy, Table};
use crate::extract::Accepted;

/// Keeps table rows whose tag cell carries every requested tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    column: String,
    tags: Vec<String>,
}

impl RowFilter {
    pub fn new<S: AsRef<str>>(column: impl Into<String>, tags: &[S]) -> Self {
        Self {
            column: column.into(),
            tags: tags
                .iter()
                .map(|tag| tag.as_ref().trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn column_index(&self, table: &Table) -> Option<usize> {
        let wanted = self.column.trim();
        table
            .columns
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(wanted))
    }

    fn accepts(&self, cell: &CellValue) -> bool {
        let Some(text) = cell.trimmed() else {
            return false;
        };
        let lowered = text.to_lowercase();
        let present: Vec<&str> = lowered
            .split([',', ';'])
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect();
        self.tags.iter().all(|tag| present.contains(&tag.as_str()))
    }
}

/// Reads contacts out of a decoded spreadsheet.
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    policy: PhonePolicy,
    rules: ColumnRules,
    row_filter: Option<RowFilter>,
}

impl TableExtractor {
    pub fn new(policy: PhonePolicy, rules: ColumnRules) -> Self {
        Self {
            policy,
            rules,
            row_filter: None,
        }
    }

    pub fn with_row_filter(mut self, filter: RowFilter) -> Self {
        self.row_filter = if filter.is_empty() { None } else { Some(filter) };
        self
    }

    pub fn extract(&self, table: &Table) -> Vec<Contact> {
        let (phone_index, name_index) = self.rules.positions(&table.columns);
        let Some(phone_index) = phone_index else {
            return Vec::new();
        };

        let tag_filter = match &self.row_filter {
            Some(filter) => match filter.column_index(table) {
                Some(index) => Some((filter, index)),
                None => return Vec::new(),
            },
            None => None,
        };

        let mut accepted = Accepted::default();
        for row in 0..table.rows.len() {
            if let Some((filter, index)) = tag_filter {
                if !filter.accepts(table.cell(row, index)) {
                    continue;
                }
            }

            let Some(number) = normalize_with(table.cell(row, phone_index), &self.policy) else {
                continue;
            };
            let name = name_index.and_then(|index| table.cell(row, index).trimmed());
            accepted.push(number, name.as_deref());
        }
        accepted.into_contacts()
    }
}

/// Extracts with the default phone policy and column rules.
pub fn extract_table(table: &Table) -> Vec<Contact> {
    TableExtractor::default().extract(table)
}
