use crate::error::Error;
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;

pub const DEFAULT_SIDECAR_EXTENSION: &str = "rfmeta";
pub const DEFAULT_SKIP_LOG_NAME: &str = "skipped_files_detailed.log";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    /// Staging root used when none is passed on the command line.
    pub root_path: Option<String>,
    pub sidecar_extension: String,
    pub skip_log_name: String,
    /// Glob patterns for candidate names that are neither restored nor reported.
    pub ignore_patterns: Vec<String>,
    pub wait_for_exit: bool,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            sidecar_extension: DEFAULT_SIDECAR_EXTENSION.to_string(),
            skip_log_name: DEFAULT_SKIP_LOG_NAME.to_string(),
            ignore_patterns: Vec::new(),
            wait_for_exit: true,
        }
    }
}

pub fn load_configuration() -> Result<RestoreConfig, Error> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("DTEMP")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ignore_patterns"),
        )
        .build()?;
    Ok(builder.try_deserialize::<RestoreConfig>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_when_no_sources() {
        let config: RestoreConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.sidecar_extension, "rfmeta");
        assert_eq!(config.skip_log_name, "skipped_files_detailed.log");
        assert!(config.ignore_patterns.is_empty());
        assert!(config.root_path.is_none());
        assert!(config.wait_for_exit);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml = r#"
            root_path = "D:/temp"
            wait_for_exit = false
            ignore_patterns = ["LOCK*"]
        "#;
        let config: RestoreConfig = Config::builder()
            .add_source(ConfigFile::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.root_path.as_deref(), Some("D:/temp"));
        assert!(!config.wait_for_exit);
        assert_eq!(config.ignore_patterns, vec!["LOCK*".to_string()]);
        assert_eq!(config.sidecar_extension, "rfmeta");
    }
}
