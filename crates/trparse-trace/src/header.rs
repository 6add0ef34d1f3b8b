use trparse_model::TraceTarget;

const HEADER_PREFIX: &str = "traceroute to ";

/// Recognizes `traceroute to HOST (IP), 30 hops max, ...`.
pub fn parse_header(line: &str) -> Option<TraceTarget> {
    let line = line.trim();
    if !line.to_ascii_lowercase().starts_with(HEADER_PREFIX) {
        return None;
    }

    let rest = &line[HEADER_PREFIX.len()..];
    let host = rest
        .split(|c: char| c.is_whitespace() || c == ',' || c == '(')
        .next()?
        .trim();
    if host.is_empty() {
        return None;
    }

    Some(TraceTarget {
        host: host.to_string(),
        ip: parenthesised(rest),
    })
}

/// Splits a leading header line off a transcript. Returns the text
/// unchanged when the first line is not a header.
pub fn split_header(text: &str) -> (Option<TraceTarget>, &str) {
    let (first, body) = text.split_once('\n').unwrap_or((text, ""));
    match parse_header(first) {
        Some(target) => (Some(target), body),
        None => (None, text),
    }
}

fn parenthesised(text: &str) -> Option<String> {
    let start = text.find('(')?;
    let end = text[start + 1..].find(')')?;
    let inside = text[start + 1..start + 1 + end].trim();
    if inside.is_empty() {
        None
    } else {
        Some(inside.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_with_address() {
        let target =
            parse_header("traceroute to www.google.com (142.250.70.196), 30 hops max, 60 byte packets")
                .unwrap();
        assert_eq!(target.host, "www.google.com");
        assert_eq!(target.ip.as_deref(), Some("142.250.70.196"));
    }

    #[test]
    fn parse_header_without_address() {
        let target = parse_header("Traceroute to 1.1.1.1, 64 hops max").unwrap();
        assert_eq!(target.host, "1.1.1.1");
        assert_eq!(target.ip, None);
    }

    #[test]
    fn hop_lines_are_not_headers() {
        assert_eq!(
            parse_header(" 1  router.lan (192.168.1.1)  0.512 ms  0.498 ms  0.470 ms"),
            None
        );
        assert_eq!(parse_header("traceroute to "), None);
    }

    #[test]
    fn split_header_keeps_body() {
        let text = "traceroute to example.com (93.184.216.34), 30 hops max\r\n 1  a (10.0.0.1)  1 ms  1 ms  1 ms";
        let (target, body) = split_header(text);
        assert_eq!(target.unwrap().host, "example.com");
        assert_eq!(body, " 1  a (10.0.0.1)  1 ms  1 ms  1 ms");

        let (target, body) = split_header(body);
        assert!(target.is_none());
        assert_eq!(body, " 1  a (10.0.0.1)  1 ms  1 ms  1 ms");
    }
}
