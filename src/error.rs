use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Invalid JSON on line {line_number} of jj output ({source}): {line}")]
    InvalidEntry {
        line_number: usize,
        line: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{program} printed invalid UTF-8: {source}")]
    InvalidUtf8 {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Unexpected config key shape: {name}")]
    SchemeShape { name: String },

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("Unknown ansi color index: {0}")]
    AnsiIndex(String),

    #[error("Color value for {name} is not a string: {value}")]
    NonStringColor { name: String, value: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read settings file {}: {source}", path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in settings file {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Which stage of the conversion the error came from.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Spawn { .. }
            | Error::CommandFailed { .. }
            | Error::InvalidUtf8 { .. }
            | Error::InvalidEntry { .. } => "collection",
            Error::SchemeShape { .. } => "scheme shape",
            Error::UnknownColor(_) | Error::AnsiIndex(_) | Error::NonStringColor { .. } => {
                "color format"
            }
            Error::Write { .. } | Error::Serialize { .. } => "write",
            Error::SettingsRead { .. } | Error::SettingsParse { .. } => "config",
        }
    }
}
