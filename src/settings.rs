use directories::{BaseDirs, ProjectDirs};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const ACCOUNTS_FILE: &str = "accounts.json";
const PHONEBOOK_FILE: &str = "phonebook_data.json";

/// Optional overrides read from `recordbook.toml` in the user config dir.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub accounts_file: Option<PathBuf>,
    pub phonebook_file: Option<PathBuf>,
}

impl Settings {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("recordbook.toml"))
    }

    fn data_dir() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "Recordbook")?;
        Some(proj.data_dir().to_path_buf())
    }

    pub fn load() -> Self {
        match Self::toml_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Reads settings from `path`; a missing or invalid file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                warn!("could not read {}: {err}", path.display());
                return Self::default();
            }
        };
        match Self::parse(&text) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("ignoring invalid settings in {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.accounts_file
            .clone()
            .unwrap_or_else(|| Self::default_path(ACCOUNTS_FILE))
    }

    pub fn phonebook_path(&self) -> PathBuf {
        self.phonebook_file
            .clone()
            .unwrap_or_else(|| Self::default_path(PHONEBOOK_FILE))
    }

    // Without a home directory the stores live in the working directory.
    fn default_path(file: &str) -> PathBuf {
        Self::data_dir()
            .map(|dir| dir.join(file))
            .unwrap_or_else(|| PathBuf::from(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_store_overrides() {
        let settings = Settings::parse(
            r#"
            accounts_file = "/srv/records/accounts.json"
            phonebook_file = "book.json"
            "#,
        )
        .unwrap();
        assert_eq!(settings.accounts_path(), PathBuf::from("/srv/records/accounts.json"));
        assert_eq!(settings.phonebook_path(), PathBuf::from("book.json"));
    }

    #[test]
    fn empty_settings_use_default_file_names() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.accounts_path().ends_with(ACCOUNTS_FILE));
        assert!(settings.phonebook_path().ends_with(PHONEBOOK_FILE));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load_from(&dir.path().join("nope.toml")), Settings::default());
    }

    #[test]
    fn invalid_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recordbook.toml");
        fs::write(&path, "accounts_file = [1, 2").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn load_from_reads_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recordbook.toml");
        fs::write(&path, "phonebook_file = \"contacts.json\"\n").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.accounts_file, None);
        assert_eq!(settings.phonebook_file, Some(PathBuf::from("contacts.json")));
    }
}
