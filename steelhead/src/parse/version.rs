//! Parser for `show version` output.

use super::block::{Fields, parse_block};
use super::value::Value;
use crate::error::ParseError;

/// Fields that change between runs and are not reported.
const VOLATILE: &[&str] = &["uptime", "cpu load averages", "system memory", "build date"];

/// Fields whose values stay text even when they look numeric.
const TEXT_ONLY: &[&str] = &["product model"];

const REQUIRED: &[&str] = &["product name", "product release"];

/// Parsed `show version`; always has `product name` and `product release`.
pub type VersionInfo = Fields;

/// Parse the output of `show version`.
pub fn parse_version(text: &str) -> Result<VersionInfo, ParseError> {
    let mut info = parse_block(text)?;

    for key in VOLATILE {
        info.shift_remove(*key);
    }

    for key in TEXT_ONLY {
        if let Some(value) = info.get_mut(*key) {
            if !matches!(value, Value::Text(_) | Value::NoData) {
                *value = Value::Text(value.to_string());
            }
        }
    }

    for key in REQUIRED {
        if !info.contains_key(*key) {
            return Err(ParseError::MissingField {
                field: key.to_string(),
            });
        }
    }

    Ok(info)
}
