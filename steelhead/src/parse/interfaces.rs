//! Parser for `show interfaces` output.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::block::{Fields, parse_block};
use super::value::Value;
use crate::error::ParseError;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Interface (\S+)").expect("valid interface header regex"));

/// One interface block from `show interfaces`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceRecord {
    /// Interface name from the block header, e.g. `inpath0_0`.
    pub name: String,

    /// Every other reported field.
    #[serde(flatten)]
    pub fields: Fields,
}

impl InterfaceRecord {
    /// Look up a field. `"name"` resolves to the header name.
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == "name" {
            return Some(Value::Text(self.name.clone()));
        }
        self.fields.get(key).cloned()
    }
}

/// Parse the output of `show interfaces [<name>] [brief|configured]`.
///
/// Blocks are separated by a blank line followed by a line starting with
/// `Interface`. Records come back in the order they were printed.
pub fn parse_interfaces(text: &str) -> Result<Vec<InterfaceRecord>, ParseError> {
    split_blocks(text.trim())
        .into_iter()
        .map(parse_interface)
        .collect()
}

fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    if text.is_empty() {
        return blocks;
    }

    let mut current = String::new();
    let mut previous_blank = false;
    for line in text.lines() {
        if previous_blank && line.starts_with("Interface") && !current.trim().is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
        previous_blank = line.trim().is_empty();
        current.push_str(line);
        current.push('\n');
    }
    blocks.push(current);
    blocks
}

fn parse_interface(block: String) -> Result<InterfaceRecord, ParseError> {
    let mut lines = block.lines().skip_while(|l| l.trim().is_empty());
    let name = lines
        .next()
        .and_then(|header| HEADER.captures(header))
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ParseError::MissingInterfaceHeader {
            block: block.clone(),
        })?;

    let body: Vec<&str> = lines.collect();
    let mut fields = parse_block(&body.join("\n"))?;
    fields.shift_remove("name");

    Ok(InterfaceRecord { name, fields })
}
