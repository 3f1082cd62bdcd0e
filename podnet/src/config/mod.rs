use std::{fs, io::ErrorKind, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;

pub const DEFAULT_CONFIG_FILENAME: &str = "podnet-config";

#[derive(Debug, Error)]
pub enum PodnetConfigError {
    #[error("Io error: {}", .0)]
    IoError(std::io::Error),
    #[error("Deserialization error: {}", .0)]
    DeserializationError(serde_yaml::Error),
}

/// Defaults applied when the matching command line flag is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PodnetConfig {
    pub field_manager: Option<String>,
    pub namespace: Option<String>,
    pub output: Option<OutputFormat>,
}

impl PodnetConfig {
    /// A missing or empty file yields the default config.
    pub fn load_or_default(path: &Path) -> Result<Self, PodnetConfigError> {
        debug!("Used config path: {path:?}");

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("Config file doesn't exist, using defaults...");
                return Ok(Self::default());
            }
            Err(error) => return Err(PodnetConfigError::IoError(error)),
        };

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents).map_err(PodnetConfigError::DeserializationError)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{PodnetConfig, PodnetConfigError};
    use crate::cli::OutputFormat;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(
            PodnetConfig::load_or_default(&dir.path().join("podnet-config")).unwrap(),
            PodnetConfig::default()
        );
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();

        assert_eq!(
            PodnetConfig::load_or_default(file.path()).unwrap(),
            PodnetConfig::default()
        );
    }

    #[test]
    fn reads_camel_case_yaml() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "fieldManager: ci\nnamespace: team-a\noutput: yaml\n",
        )
        .unwrap();

        let config = PodnetConfig::load_or_default(file.path()).unwrap();

        assert_eq!(config.field_manager.as_deref(), Some("ci"));
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
        assert_eq!(config.output, Some(OutputFormat::Yaml));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "output: [yaml\n").unwrap();

        assert!(matches!(
            PodnetConfig::load_or_default(file.path()),
            Err(PodnetConfigError::DeserializationError(_))
        ));
    }
}
