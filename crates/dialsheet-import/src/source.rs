use serde::Serialize;
use std::path::Path;

/// Decoder family picked from a declared file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Excel,
    Text,
    Vcf,
}

impl SourceKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Some(SourceKind::Csv),
            "xlsx" | "xls" => Some(SourceKind::Excel),
            "txt" => Some(SourceKind::Text),
            "vcf" => Some(SourceKind::Vcf),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Csv => "csv",
            SourceKind::Excel => "excel",
            SourceKind::Text => "text",
            SourceKind::Vcf => "vcf",
        }
    }
}

/// Lowercased extension of `path`, without the dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}
