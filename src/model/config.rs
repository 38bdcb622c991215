use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key of the storage slot holding the whole document
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// File name used for exported backups
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            file_name: default_export_file_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Title of the board synthesized on first start
    #[serde(default = "default_board_title")]
    pub board_title: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            board_title: default_board_title(),
        }
    }
}

pub const DEFAULT_STORAGE_KEY: &str = "trello-clone-data";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "task-manager-backup.json";
pub const DEFAULT_BOARD_TITLE: &str = "My First Board";

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

fn default_board_title() -> String {
    DEFAULT_BOARD_TITLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.key, "trello-clone-data");
        assert_eq!(config.export.file_name, "task-manager-backup.json");
        assert_eq!(config.defaults.board_title, "My First Board");
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: Config = toml::from_str("[storage]\nkey = \"work\"\n").unwrap();
        assert_eq!(config.storage.key, "work");
        assert_eq!(config.export.file_name, DEFAULT_EXPORT_FILE_NAME);
    }
}
