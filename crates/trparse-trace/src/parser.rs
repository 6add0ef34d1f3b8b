use crate::error::{ParseError, ParseResult, RttError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, trace};
use trparse_model::{rtt, Route};

// ASCII classes only: `\d` and `\s` are Unicode-aware in `regex`.
static HOP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[[:space:]]?([0-9]+)",
        r"[[:space:]]+([A-Za-z0-9.\-]+)",
        r"[[:space:]]+\(([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})\)",
        r"[[:space:]]+([0-9]+(?:\.[0-9]+)?) ?ms",
        r"[[:space:]]+([0-9]+(?:\.[0-9]+)?) ?ms",
        r"[[:space:]]+([0-9]+(?:\.[0-9]+)?) ?ms",
        r"[[:space:]]?$",
    ))
    .unwrap()
});

const FIRST_RTT_GROUP: usize = 4;

/// Parses a whole transcript, one hop per `'\n'`-separated line.
///
/// Every line must be a hop line, including the empty line after a final
/// newline. The first failing line aborts the call.
pub fn parse_output(output: &str) -> ParseResult<Vec<Route>> {
    let mut routes = Vec::new();

    for (index, line) in output.split('\n').enumerate() {
        match parse_line(line) {
            Ok(route) => routes.push(route),
            Err(err) => {
                debug!(line = index + 1, error = %err, "rejecting traceroute output");
                return Err(err);
            }
        }
    }

    debug!(routes = routes.len(), "parsed traceroute output");
    Ok(routes)
}

/// Parses a single hop line such as
/// ` 1  host.example.net (203.50.77.49)  0.235 ms  0.285 ms  0.245 ms`.
pub fn parse_line(line: &str) -> ParseResult<Route> {
    let caps = HOP_LINE
        .captures(line)
        .ok_or_else(|| ParseError::MalformedLine {
            line: line.to_string(),
        })?;

    let hop_text = &caps[1];
    let hop: u32 = hop_text.parse().map_err(|source| ParseError::Hop {
        text: hop_text.to_string(),
        source,
    })?;

    let ip_text = &caps[3];
    let ip: Ipv4Addr = ip_text.parse().map_err(|source| ParseError::Ip {
        text: ip_text.to_string(),
        source,
    })?;

    let mut samples = [Duration::ZERO; 3];
    for (index, slot) in samples.iter_mut().enumerate() {
        let text = &caps[FIRST_RTT_GROUP + index];
        *slot = parse_ms(text).map_err(|source| ParseError::Rtt {
            probe: index + 1,
            text: text.to_string(),
            source,
        })?;
    }

    trace!(hop, %ip, "parsed hop line");

    Ok(Route {
        hop,
        hostname: caps[2].to_string(),
        ip,
        rtt: samples,
    })
}

fn parse_ms(text: &str) -> Result<Duration, RttError> {
    let value: f64 = text.parse()?;
    rtt::from_ms(value).ok_or(RttError::OutOfRange)
}
