//! Traceroute transcript parsing.
//!
//! Parsing emits `tracing` events (TRACE per hop, DEBUG per transcript) and
//! never writes to stdout or stderr itself.

pub mod error;
pub mod header;
pub mod parser;

pub use error::{ErrorKind, ParseError, ParseResult, RttError};
pub use header::{parse_header, split_header};
pub use parser::{parse_line, parse_output};
