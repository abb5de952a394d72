//! Feature name to parser dispatch.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ConfigurationError, Result};
use crate::parse::{
    BandwidthStats, Fields, Flows, InterfaceRecord, VersionInfo, parse_bandwidth, parse_block,
    parse_flows, parse_interfaces, parse_version,
};

/// Logical feature groups of appliance commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Common,
    Networking,
    Flows,
    Stats,
    Optimization,
}

impl Feature {
    /// Every registered feature.
    pub const ALL: [Feature; 5] = [
        Feature::Common,
        Feature::Networking,
        Feature::Flows,
        Feature::Stats,
        Feature::Optimization,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::Common => "common",
            Feature::Networking => "networking",
            Feature::Flows => "flows",
            Feature::Stats => "stats",
            Feature::Optimization => "optimization",
        }
    }

    /// The parser registered for this feature.
    pub fn parser(&self) -> ParserHandle {
        let parse: fn(&str) -> Result<Parsed> = match self {
            Feature::Common => version,
            Feature::Networking => interfaces,
            Feature::Flows => flows,
            Feature::Stats => bandwidth,
            Feature::Optimization => fields,
        };
        ParserHandle {
            feature: *self,
            parse,
        }
    }
}

fn version(text: &str) -> Result<Parsed> {
    Ok(Parsed::Version(parse_version(text)?))
}

fn interfaces(text: &str) -> Result<Parsed> {
    Ok(Parsed::Interfaces(parse_interfaces(text)?))
}

fn flows(text: &str) -> Result<Parsed> {
    Ok(Parsed::Flows(parse_flows(text)))
}

fn bandwidth(text: &str) -> Result<Parsed> {
    Ok(Parsed::Bandwidth(parse_bandwidth(text)?))
}

fn fields(text: &str) -> Result<Parsed> {
    Ok(Parsed::Fields(parse_block(text)?))
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownFeature {
                name: s.to_string(),
            })
    }
}

/// Output of whichever parser a feature resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parsed {
    Version(VersionInfo),
    Interfaces(Vec<InterfaceRecord>),
    Flows(Flows),
    Bandwidth(BandwidthStats),
    Fields(Fields),
}

/// A resolved parser for one feature.
#[derive(Clone, Copy)]
pub struct ParserHandle {
    feature: Feature,
    parse: fn(&str) -> Result<Parsed>,
}

impl ParserHandle {
    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// Parse raw command output.
    pub fn parse(&self, text: &str) -> Result<Parsed> {
        (self.parse)(text)
    }
}

impl fmt::Debug for ParserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserHandle")
            .field("feature", &self.feature)
            .finish()
    }
}

/// Resolve the parser registered for a feature name.
pub fn resolve_parser(feature: &str) -> Result<ParserHandle> {
    let feature: Feature = feature.parse()?;
    Ok(feature.parser())
}
