use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

use crate::properties::SyntaxError;

#[derive(Debug, Error)]
pub enum PropconfError {
    #[error("Unable to list files in directory {path}: {source}")]
    Discovery {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError { path: PathBuf, source: SyntaxError },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid integer for '{key}': '{value}' ({source})")]
    InvalidInteger {
        key: String,
        value: String,
        source: ParseIntError,
    },

    #[error("Invalid float for '{key}': '{value}' ({source})")]
    InvalidFloat {
        key: String,
        value: String,
        source: ParseFloatError,
    },

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("Invalid base name '{0}': expected a non-empty file name token without '.', '/' or '\\'")]
    InvalidBaseName(String),

    #[error("Could not initialize configuration: {source}")]
    Construction { source: Box<PropconfError> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_integer_formats_correctly() {
        let source = "abc".parse::<i32>().unwrap_err();
        let err = PropconfError::InvalidInteger {
            key: "server.port".into(),
            value: "abc".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("server.port"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn discovery_names_the_directory() {
        let err = PropconfError::Discovery {
            path: "/etc/rhn".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/etc/rhn"));
    }

    #[test]
    fn construction_wraps_inner_message() {
        let inner = PropconfError::InvalidBaseName(String::new());
        let err = PropconfError::Construction {
            source: Box::new(inner),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Could not initialize configuration"));
        assert!(msg.contains("Invalid base name"));
    }
}
