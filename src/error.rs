use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Main error type for linesplice
#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("IO error: {source}")]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[error("File is not valid UTF-8: {path}")]
    Encoding {
        path: PathBuf,
        source: FromUtf8Error,
    },

    #[error("Line range {start}..{end} is invalid for a file with {line_count} lines")]
    InvalidRange {
        start: usize,
        end: usize,
        line_count: usize,
    },

    #[error("Checksum mismatch for {path}: expected {expected}, found {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

impl SpliceError {
    /// Create a new IO error with path context
    pub fn io_error(err: std::io::Error, path: Option<impl Into<PathBuf>>) -> Self {
        Self::Io {
            source: err,
            path: path.map(|p| p.into()),
        }
    }

    pub fn encoding_error(err: FromUtf8Error, path: impl Into<PathBuf>) -> Self {
        Self::Encoding {
            path: path.into(),
            source: err,
        }
    }

    pub fn invalid_range(start: usize, end: usize, line_count: usize) -> Self {
        Self::InvalidRange {
            start,
            end,
            line_count,
        }
    }

    pub fn checksum_mismatch(
        path: impl Into<PathBuf>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ChecksumMismatch {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SpliceError {
    fn from(error: std::io::Error) -> Self {
        SpliceError::io_error(error, None::<PathBuf>)
    }
}

impl From<serde_json::Error> for SpliceError {
    fn from(error: serde_json::Error) -> Self {
        SpliceError::parse_error(error.to_string())
    }
}

impl From<serde_yaml::Error> for SpliceError {
    fn from(error: serde_yaml::Error) -> Self {
        SpliceError::parse_error(error.to_string())
    }
}

impl From<toml::de::Error> for SpliceError {
    fn from(error: toml::de::Error) -> Self {
        SpliceError::parse_error(error.to_string())
    }
}

impl From<toml::ser::Error> for SpliceError {
    fn from(error: toml::ser::Error) -> Self {
        SpliceError::parse_error(error.to_string())
    }
}

/// Result type alias using SpliceError
pub type SpliceResult<T> = Result<T, SpliceError>;

/// Contextual error mapping function
pub fn map_io_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> SpliceError {
    let path = path.into();
    move |err| SpliceError::io_error(err, Some(path))
}
