//! Error types for transcript parsing.

use std::net::AddrParseError;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Failure to turn one transcript line into a `Route`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line does not match the traceroute hop format: `{line}`")]
    MalformedLine { line: String },

    #[error("error parsing hop `{text}`: {source}")]
    Hop {
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("error parsing IP address `{text}`: {source}")]
    Ip {
        text: String,
        #[source]
        source: AddrParseError,
    },

    #[error("error parsing RTT {probe} of 3 `{text}`: {source}")]
    Rtt {
        /// 1-based probe position within the line.
        probe: usize,
        text: String,
        #[source]
        source: RttError,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RttError {
    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("value out of range")]
    OutOfRange,
}

/// Category of a `ParseError`, without the offending text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedLine,
    Hop,
    Ip,
    Rtt,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedLine { .. } => ErrorKind::MalformedLine,
            Self::Hop { .. } => ErrorKind::Hop,
            Self::Ip { .. } => ErrorKind::Ip,
            Self::Rtt { .. } => ErrorKind::Rtt,
        }
    }

    /// The input text the error refers to: the whole line for
    /// `MalformedLine`, the field otherwise.
    pub fn text(&self) -> &str {
        match self {
            Self::MalformedLine { line } => line,
            Self::Hop { text, .. } | Self::Ip { text, .. } | Self::Rtt { text, .. } => text,
        }
    }
}

/// Result type alias for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_text() {
        let err = ParseError::MalformedLine {
            line: " 1  host  0.1 ms".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line does not match the traceroute hop format: ` 1  host  0.1 ms`"
        );

        let err = ParseError::Rtt {
            probe: 2,
            text: "1.5".to_string(),
            source: RttError::OutOfRange,
        };
        assert_eq!(err.to_string(), "error parsing RTT 2 of 3 `1.5`: value out of range");
        assert_eq!(err.kind(), ErrorKind::Rtt);
        assert_eq!(err.text(), "1.5");
    }

    #[test]
    fn hop_error_keeps_integer_source() {
        let source = "99999999999".parse::<u32>().unwrap_err();
        let err = ParseError::Hop {
            text: "99999999999".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.kind(), ErrorKind::Hop);
    }
}
