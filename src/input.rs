//! Access-log input collaborator.
//!
//! Access logs are newline-delimited JSON records carrying the client address
//! in a `remote_addr` field. A line either yields an address, parses but lacks
//! a usable field, or is not valid JSON at all; the outcome is explicit per
//! line so malformed input never aborts a read and never silently disappears.

use std::io::{self, BufRead};

use serde_json::Value;

/// JSON field holding the client address.
const ADDRESS_FIELD: &str = "remote_addr";

/// Classification of a single log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Well-formed record with a non-empty address field.
    Address(String),
    /// Valid JSON without a usable address field.
    Skipped,
    /// Not a JSON record.
    Malformed,
}

/// Addresses extracted from a log, with counts of the lines that yielded none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedAddresses {
    pub addresses: Vec<String>,
    pub skipped: usize,
    pub malformed: usize,
}

/// Classify one log line.
pub fn classify_line(line: &str) -> LineOutcome {
    match serde_json::from_str::<Value>(line) {
        Ok(record) => match record.get(ADDRESS_FIELD).and_then(Value::as_str) {
            Some(addr) if !addr.is_empty() => LineOutcome::Address(addr.to_owned()),
            _ => LineOutcome::Skipped,
        },
        Err(_) => LineOutcome::Malformed,
    }
}

/// Drain a log reader, collecting addresses and counting unusable lines.
///
/// # Errors
/// Propagates I/O errors from the underlying reader; content-level problems
/// are counted, not raised.
pub fn load_addresses<R: BufRead>(reader: R) -> io::Result<LoadedAddresses> {
    let mut loaded = LoadedAddresses::default();
    for line in reader.lines() {
        match classify_line(&line?) {
            LineOutcome::Address(addr) => loaded.addresses.push(addr),
            LineOutcome::Skipped => loaded.skipped += 1,
            LineOutcome::Malformed => loaded.malformed += 1,
        }
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_case::test_case;

    #[test_case(r#"{"remote_addr": "192.0.2.44", "status": 200}"# => LineOutcome::Address("192.0.2.44".to_owned()); "well formed")]
    #[test_case(r#"{"status": 200}"# => LineOutcome::Skipped; "missing field")]
    #[test_case(r#"{"remote_addr": ""}"# => LineOutcome::Skipped; "empty address")]
    #[test_case(r#"{"remote_addr": null}"# => LineOutcome::Skipped; "null address")]
    #[test_case(r#"{"remote_addr": 42}"# => LineOutcome::Skipped; "non string address")]
    #[test_case(r#"{"remote_addr": "10.0.0.1""# => LineOutcome::Malformed; "truncated json")]
    #[test_case("not json at all" => LineOutcome::Malformed; "plain text")]
    #[test_case("" => LineOutcome::Malformed; "empty line")]
    fn test_classify_line(line: &str) -> LineOutcome {
        classify_line(line)
    }

    #[test]
    fn test_load_addresses() {
        let log = concat!(
            "{\"remote_addr\": \"10.0.0.1\", \"status\": 200}\n",
            "{\"remote_addr\": \"10.0.0.2\", \"status\": 404}\n",
            "garbage line\n",
            "{\"status\": 500}\n",
            "{\"remote_addr\": \"10.0.0.1\", \"status\": 200}\n",
        );

        let loaded = load_addresses(Cursor::new(log)).unwrap();
        assert_eq!(loaded.addresses, vec!["10.0.0.1", "10.0.0.2", "10.0.0.1"]);
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.malformed, 1);
    }

    #[test]
    fn test_load_empty_reader() {
        let loaded = load_addresses(Cursor::new("")).unwrap();
        assert_eq!(loaded, LoadedAddresses::default());
    }
}
