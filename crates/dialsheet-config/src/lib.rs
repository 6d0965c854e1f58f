use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dialsheet_core::{ColumnRules, PhonePolicy};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "dialsheet";
const CONFIG_FILENAME: &str = "config.toml";

/// Extensions the import pipeline knows how to decode.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["txt", "csv", "xlsx", "xls", "vcf"];
pub const DEFAULT_COUNTRY_CODE: &str = "91";
pub const DEFAULT_TAG_COLUMN: &str = "Tag";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub allowed_extensions: Vec<String>,
    pub default_country_code: String,
    pub tag_column: String,
    pub phone: PhonePolicy,
    pub columns: ColumnRules,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: SUPPORTED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            tag_column: DEFAULT_TAG_COLUMN.to_string(),
            phone: PhonePolicy::default(),
            columns: ColumnRules::default(),
        }
    }
}

impl AppConfig {
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid phone settings: {0}")]
    InvalidPhonePolicy(String),
    #[error("invalid column keywords: {0}")]
    InvalidColumnKeywords(String),
    #[error("unsupported extension in allowed_extensions: {0}")]
    UnsupportedExtension(String),
    #[error("invalid default_country_code value: {0}")]
    InvalidCountryCode(String),
    #[error("tag_column cannot be empty")]
    EmptyTagColumn,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    allowed_extensions: Option<Vec<String>>,
    default_country_code: Option<String>,
    tag_column: Option<String>,
    phone: Option<PhoneFile>,
    columns: Option<ColumnsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhoneFile {
    min_digits: Option<usize>,
    max_digits: Option<usize>,
    international_threshold: Option<usize>,
    prefix_plus: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnsFile {
    phone_keywords: Option<Vec<String>>,
    name_keywords: Option<Vec<String>>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(extensions) = parsed.allowed_extensions {
        let mut allowed = Vec::with_capacity(extensions.len());
        for raw in extensions {
            let ext = raw.trim().trim_start_matches('.').to_ascii_lowercase();
            if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
                return Err(ConfigError::UnsupportedExtension(raw));
            }
            if !allowed.contains(&ext) {
                allowed.push(ext);
            }
        }
        config.allowed_extensions = allowed;
    }

    if let Some(code) = parsed.default_country_code {
        let trimmed = code.trim().trim_start_matches('+');
        if trimmed.is_empty() || trimmed.len() > 4 || !trimmed.chars().all(|ch| ch.is_ascii_digit())
        {
            return Err(ConfigError::InvalidCountryCode(code));
        }
        config.default_country_code = trimmed.to_string();
    }

    if let Some(column) = parsed.tag_column {
        if column.trim().is_empty() {
            return Err(ConfigError::EmptyTagColumn);
        }
        config.tag_column = column.trim().to_string();
    }

    if let Some(phone) = parsed.phone {
        let mut policy = config.phone;
        if let Some(value) = phone.min_digits {
            policy.min_digits = value;
        }
        if let Some(value) = phone.max_digits {
            policy.max_digits = value;
        }
        if let Some(value) = phone.international_threshold {
            policy.international_threshold = value;
        }
        if let Some(value) = phone.prefix_plus {
            policy.prefix_plus = value;
        }
        policy
            .validate()
            .map_err(|err| ConfigError::InvalidPhonePolicy(err.to_string()))?;
        config.phone = policy;
    }

    if let Some(columns) = parsed.columns {
        let defaults = ColumnRules::default();
        let current = |index: usize| -> Vec<String> {
            defaults
                .rules()
                .get(index)
                .map(|rule| rule.keywords().to_vec())
                .unwrap_or_default()
        };
        let phone = columns.phone_keywords.unwrap_or_else(|| current(0));
        let name = columns.name_keywords.unwrap_or_else(|| current(1));
        config.columns = ColumnRules::new(&phone, &name)
            .map_err(|err| ConfigError::InvalidColumnKeywords(err.to_string()))?;
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ColumnsFile, ConfigError, ConfigFile, PhoneFile};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            allowed_extensions: Some(vec![".CSV".to_string(), "txt".to_string()]),
            default_country_code: Some("+44".to_string()),
            tag_column: Some(" Group ".to_string()),
            phone: Some(PhoneFile {
                min_digits: Some(8),
                prefix_plus: Some(false),
                ..PhoneFile::default()
            }),
            columns: Some(ColumnsFile {
                phone_keywords: Some(vec!["whatsapp".to_string()]),
                name_keywords: None,
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.allowed_extensions, vec!["csv", "txt"]);
        assert_eq!(merged.default_country_code, "44");
        assert_eq!(merged.tag_column, "Group");
        assert_eq!(merged.phone.min_digits, 8);
        assert_eq!(merged.phone.max_digits, 15);
        assert!(!merged.phone.prefix_plus);
        let selection = merged.columns.classify(&["Phone", "WhatsApp", "Name"]);
        assert_eq!(selection.phone_column.as_deref(), Some("WhatsApp"));
        assert_eq!(selection.name_column.as_deref(), Some("Name"));
        assert!(merged.is_allowed_extension("CSV"));
        assert!(!merged.is_allowed_extension("xlsx"));
    }

    #[test]
    fn merge_config_rejects_unknown_extension() {
        let parsed = ConfigFile {
            allowed_extensions: Some(vec!["pdf".to_string()]),
            ..ConfigFile::default()
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedExtension(ext) if ext == "pdf"));
    }

    #[test]
    fn merge_config_rejects_inverted_phone_bounds() {
        let parsed = ConfigFile {
            phone: Some(PhoneFile {
                min_digits: Some(16),
                ..PhoneFile::default()
            }),
            ..ConfigFile::default()
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(err.to_string().contains("invalid phone settings"));
    }

    #[test]
    fn merge_config_rejects_bad_country_code() {
        let parsed = ConfigFile {
            default_country_code: Some("uk".to_string()),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::InvalidCountryCode(_)
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "default_country_code = \"1\"\n[phone]\ninternational_threshold = 11\n[columns]\nname_keywords = [\"alias\"]\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.default_country_code, "1");
        assert_eq!(config.phone.international_threshold, 11);
        let selection = config.columns.classify(&["Mobile", "Alias"]);
        assert_eq!(selection.name_column.as_deref(), Some("Alias"));
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "upload_folder = \"uploads\"\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_files() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "tag_column = \"Tag\"\n").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
