//! Shared data structures for trparse.

pub mod rtt;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

/// One hop of a traceroute transcript.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub hop: u32,
    pub hostname: String,
    pub ip: Ipv4Addr,
    #[serde(rename = "rtt_ms", with = "rtt::serde_ms")]
    pub rtt: [Duration; 3],
}

impl fmt::Display for Route {
    /// Writes the hop in traceroute's own line layout, which parses back to
    /// an equal `Route`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2}  {} ({})", self.hop, self.hostname, self.ip)?;
        for sample in &self.rtt {
            write!(f, "  {} ms", rtt::format_ms(*sample))?;
        }
        Ok(())
    }
}

/// Destination named in the `traceroute to ...` header line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceTarget {
    pub host: String,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportFile {
    pub version: u32,
    pub source: String,
    pub parsed_at_utc: String,
    pub target: Option<TraceTarget>,
    pub routes: Vec<Route>,
}
