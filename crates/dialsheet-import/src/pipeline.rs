use crate::error::{ImportError, Result};
use crate::excel::read_workbook;
use crate::source::{extension_of, SourceKind};
use crate::tabular::{read_csv, read_csv_positional};
use crate::vcf::parse_vcf;
use dialsheet_config::AppConfig;
use dialsheet_core::{
    contacts_from_pairs, validate_with, Contact, ContactFilter, ContactsResponse, LineExtractor,
    ManualParser, RowFilter, Table, TableExtractor, Validation,
};
use std::path::Path;
use tracing::{debug, warn};

/// Routes each input to its extractor and wraps the result for the boundary.
#[derive(Debug, Clone)]
pub struct ContactPipeline {
    config: AppConfig,
    filter: Option<ContactFilter>,
}

impl ContactPipeline {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: ContactFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Kind for `path`, provided its extension is allowed.
    pub fn source_kind(&self, path: &Path) -> Result<SourceKind> {
        let ext = extension_of(path).ok_or_else(|| ImportError::MissingExtension(path.into()))?;
        let unsupported = || ImportError::UnsupportedExtension {
            ext: ext.clone(),
            allowed: self.config.allowed_extensions.join(", "),
        };
        if !self.config.is_allowed_extension(&ext) {
            return Err(unsupported());
        }
        SourceKind::from_extension(&ext).ok_or_else(unsupported)
    }

    pub fn extract_file(&self, path: &Path) -> Result<ContactsResponse> {
        let kind = self.source_kind(path)?;
        let bytes = std::fs::read(path).map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), kind = kind.label(), bytes = bytes.len(), "read source");
        self.extract_bytes(kind, &bytes)
    }

    pub fn extract_bytes(&self, kind: SourceKind, bytes: &[u8]) -> Result<ContactsResponse> {
        let contacts = match kind {
            SourceKind::Csv => self.csv_contacts(bytes),
            SourceKind::Excel => self.excel_contacts(bytes)?,
            SourceKind::Text => self.line_contacts(&String::from_utf8_lossy(bytes)),
            SourceKind::Vcf => self.vcf_contacts(&String::from_utf8_lossy(bytes)),
        };
        debug!(kind = kind.label(), count = contacts.len(), "extracted contacts");
        Ok(ContactsResponse::extracted(self.apply_filter(contacts)))
    }

    pub fn extract_table(&self, table: &Table) -> ContactsResponse {
        ContactsResponse::extracted(self.apply_filter(self.table_contacts(table)))
    }

    pub fn extract_text(&self, text: &str) -> ContactsResponse {
        ContactsResponse::extracted(self.apply_filter(self.line_contacts(text)))
    }

    pub fn parse_manual(&self, text: &str) -> Result<ContactsResponse> {
        if text.trim().is_empty() {
            return Err(ImportError::EmptyInput);
        }
        let contacts = ManualParser::new(self.config.phone).parse(text);
        debug!(count = contacts.len(), "parsed manual entries");
        Ok(ContactsResponse::parsed(self.apply_filter(contacts)))
    }

    pub fn validate(&self, input: &str) -> Validation {
        validate_with(input, &self.config.phone)
    }

    fn table_contacts(&self, table: &Table) -> Vec<Contact> {
        let mut extractor = TableExtractor::new(self.config.phone, self.config.columns.clone());
        if let Some(filter) = &self.filter {
            let tags = filter.tags();
            if !tags.is_empty() {
                let row_filter = RowFilter::new(self.config.tag_column.as_str(), &tags);
                extractor = extractor.with_row_filter(row_filter);
            }
        }
        debug!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            "extracting table"
        );
        extractor.extract(table)
    }

    fn line_contacts(&self, text: &str) -> Vec<Contact> {
        LineExtractor::new(self.config.phone).extract_text(text)
    }

    fn csv_contacts(&self, bytes: &[u8]) -> Vec<Contact> {
        match read_csv(bytes) {
            Ok(table) => return self.table_contacts(&table),
            Err(err) => warn!(error = %err, "csv is not a regular table; reading positionally"),
        }
        match read_csv_positional(bytes) {
            Ok(table) => return self.table_contacts(&table),
            Err(err) => warn!(error = %err, "positional csv read failed; reading lines"),
        }
        self.line_contacts(&String::from_utf8_lossy(bytes))
    }

    fn excel_contacts(&self, bytes: &[u8]) -> Result<Vec<Contact>> {
        match read_workbook(bytes) {
            Ok(table) => Ok(self.table_contacts(&table)),
            Err(ImportError::ExcelUnavailable) => Err(ImportError::ExcelUnavailable),
            Err(err) => {
                warn!(error = %err, "workbook could not be decoded");
                Ok(Vec::new())
            }
        }
    }

    fn vcf_contacts(&self, text: &str) -> Vec<Contact> {
        let parsed = parse_vcf(text);
        for warning in &parsed.warnings {
            warn!(warning = %warning, "vcard");
        }
        debug!(
            cards = parsed.entries.len(),
            skipped = parsed.skipped,
            "parsed vcards"
        );
        let pairs = parsed
            .entries
            .into_iter()
            .map(|entry| (entry.phone, entry.name));
        contacts_from_pairs(pairs, &self.config.phone)
    }

    fn apply_filter(&self, contacts: Vec<Contact>) -> Vec<Contact> {
        match &self.filter {
            Some(filter) => contacts
                .into_iter()
                .filter(|contact| filter.matches(contact))
                .collect(),
            None => contacts,
        }
    }
}
