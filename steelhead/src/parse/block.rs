//! Generic `Label: value` block parser.

use std::net::Ipv4Addr;

use indexmap::IndexMap;

use super::value::{IpInterface, Value, coerce};
use crate::error::ParseError;

/// Normalised field name to typed value, in first-seen order.
pub type Fields = IndexMap<String, Value>;

/// Parse indented `Label: value` lines into typed fields.
///
/// Each line is split on its first colon; the label is trimmed and
/// lower-cased to form the key. Blank lines and lines without a colon are
/// skipped. Later duplicates overwrite earlier values. When both
/// `ip address` and `netmask` are present they are merged into a single
/// prefixed address and `netmask` is removed.
pub fn parse_block(text: &str) -> Result<Fields, ParseError> {
    let mut fields = Fields::new();

    for line in text.lines() {
        let Some((label, raw)) = line.split_once(':') else {
            continue;
        };
        let key = label.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        let value = coerce(raw, &key)?;
        fields.insert(key, value);
    }

    merge_netmask(&mut fields);
    Ok(fields)
}

fn merge_netmask(fields: &mut Fields) {
    let Some(Value::Interface(iface)) = fields.get("ip address") else {
        return;
    };
    let Some(mask) = fields
        .get("netmask")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Ipv4Addr>().ok())
    else {
        return;
    };

    if let Some(merged) = IpInterface::with_netmask(iface.addr(), mask) {
        fields.insert("ip address".to_string(), Value::Interface(merged));
        fields.shift_remove("netmask");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_SERVICE: &str = "
Optimization Service: Running
";

    #[test]
    fn test_keys_are_normalised() {
        let fields = parse_block(SHOW_SERVICE).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["optimization service"], Value::from("Running"));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let fields = parse_block("Build date:        2014-11-19 17:07:32\n").unwrap();
        assert_eq!(fields["build date"], Value::from("2014-11-19 17:07:32"));
    }

    #[test]
    fn test_skips_lines_without_colon() {
        let text = "Interface aux state\n\n   Up:   yes\nrandom banner\n";
        let fields = parse_block(text).unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["up"]);
    }

    #[test]
    fn test_duplicate_label_last_wins() {
        let fields = parse_block("MTU: 1500\nmtu: 9000\n").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["mtu"], Value::Integer(9000));
    }

    #[test]
    fn test_empty_value_is_kept() {
        let fields = parse_block("IPv6 address:\nSpeed: auto\n").unwrap();
        assert_eq!(fields["ipv6 address"], Value::NoData);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_netmask_merge() {
        let fields = parse_block("IP address: 10.11.100.4\nNetmask: 255.255.255.0\n").unwrap();
        assert_eq!(fields["ip address"].to_string(), "10.11.100.4/24");
        assert!(!fields.contains_key("netmask"));
    }

    #[test]
    fn test_bad_date_fails_block() {
        let err = parse_block("Counters cleared date: never\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidTimestamp {
                field: "counters cleared date".to_string(),
                value: "never".to_string(),
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Product name: rbt_sh\nNumber of CPUs: 4\n";
        assert_eq!(parse_block(text).unwrap(), parse_block(text).unwrap());
    }
}
