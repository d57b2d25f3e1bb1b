use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Files looked up in the working directory when `--config` is not given,
/// in priority order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["benchpro.toml", "benchpro.json"];

/// Config file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> AppResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            })),
            None => Err(AppError::config(ConfigError::MissingExtension)),
        }
    }

    fn parse(self, path: &Path, content: &str) -> AppResult<ConfigFile> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|source| {
                AppError::config(ConfigError::ParseToml {
                    path: path.to_path_buf(),
                    source,
                })
            }),
            Self::Json => serde_json::from_str(content).map_err(|source| {
                AppError::config(ConfigError::ParseJson {
                    path: path.to_path_buf(),
                    source,
                })
            }),
        }
    }
}

/// First default config file present in `dir`.
pub fn find_default_config(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Loads `path` when given, otherwise the first default file in the working
/// directory. `None` means no config file is in play.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => match find_default_config(Path::new(".")) {
            Some(found) => found,
            None => return Ok(None),
        },
    };
    load_config_file(&path).map(Some)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })
    })?;
    format.parse(path, &content)
}
