use crate::domain::phone::PhoneInput;
use std::borrow::Cow;

/// A decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Text cell, or `Empty` when the field is blank.
    pub fn from_field(raw: &str) -> Self {
        if raw.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(value) => Some(Cow::Borrowed(value.as_str())),
            CellValue::Int(value) => Some(Cow::Owned(value.to_string())),
            CellValue::Float(value) => format_float(*value).map(Cow::Owned),
            CellValue::Bool(value) => Some(Cow::Owned(value.to_string())),
        }
    }

    /// Trimmed text, `None` when blank.
    pub fn trimmed(&self) -> Option<String> {
        let text = self.as_text()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl PhoneInput for CellValue {
    fn phone_text(&self) -> Option<Cow<'_, str>> {
        self.as_text()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::from_field(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// Rows of positional cells under an ordered header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Cell at `row`/`column`; short rows read as empty.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&EMPTY)
    }
}

/// Integral floats print without a fraction so spreadsheet numbers keep their digits.
pub(crate) fn format_float(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return Some(format!("{}", value as i64));
    }
    Some(value.to_string())
}
