use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file {path:?}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {reason}")]
    Validation { path: PathBuf, reason: String },
}

impl ConfigError {
    pub fn validation<S: Into<String>>(path: &std::path::Path, reason: S) -> ConfigError {
        ConfigError::Validation {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
