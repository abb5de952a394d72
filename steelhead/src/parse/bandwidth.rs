//! Parser for `show stats bandwidth` output.

use std::sync::LazyLock;

use regex::Regex;

use super::block::{Fields, parse_block};
use super::value::Value;
use crate::error::ParseError;

static MAGNITUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:%|[xX])$").expect("valid magnitude regex")
});

/// Bandwidth summary: data volumes stay display strings (`5.4 GB`),
/// percentages and multipliers become floats, empty cells become
/// [`Value::NoData`].
pub type BandwidthStats = Fields;

/// Parse the output of `show stats bandwidth <port> [type] [period]`.
pub fn parse_bandwidth(text: &str) -> Result<BandwidthStats, ParseError> {
    let mut stats = parse_block(text)?;
    for value in stats.values_mut() {
        if let Some(number) = value.as_str().and_then(magnitude) {
            *value = Value::Float(number);
        }
    }
    Ok(stats)
}

/// Numeric part of `93 %` or `15.4 X`.
fn magnitude(text: &str) -> Option<f64> {
    MAGNITUDE
        .captures(text.trim())
        .and_then(|caps| caps[1].parse().ok())
}
