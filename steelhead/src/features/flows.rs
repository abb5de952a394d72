//! Connection table and flow counters.

use std::fmt;
use std::str::FromStr;

use crate::cli::CommandSource;
use crate::error::{ConfigurationError, Result};
use crate::parse::{Flows, parse_flows};

/// Connection subset selected by `show flows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlowFilter {
    #[default]
    All,
    Optimized,
    Passthrough,
    PacketMode,
    TcpTerm,
}

impl FlowFilter {
    pub const ALL: [FlowFilter; 5] = [
        FlowFilter::All,
        FlowFilter::Optimized,
        FlowFilter::Passthrough,
        FlowFilter::PacketMode,
        FlowFilter::TcpTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowFilter::All => "all",
            FlowFilter::Optimized => "optimized",
            FlowFilter::Passthrough => "passthrough",
            FlowFilter::PacketMode => "packet-mode",
            FlowFilter::TcpTerm => "tcp-term",
        }
    }
}

impl fmt::Display for FlowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowFilter {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FlowFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| ConfigurationError::InvalidOption {
                option: "flow type",
                value: s.to_string(),
            })
    }
}

/// Commands of the `flows` feature.
pub struct FlowsModel<'a, C> {
    cli: &'a mut C,
}

impl<'a, C: CommandSource> FlowsModel<'a, C> {
    pub fn new(cli: &'a mut C) -> Self {
        Self { cli }
    }

    /// Parsed `show flows <filter>`.
    pub async fn show_flows(&mut self, filter: FlowFilter) -> Result<Flows> {
        let output = self
            .cli
            .exec_expect_output(&format!("show flows {filter}"))
            .await?;
        Ok(parse_flows(&output))
    }

    pub async fn show_flows_optimized(&mut self) -> Result<Flows> {
        self.show_flows(FlowFilter::Optimized).await
    }

    pub async fn show_flows_passthrough(&mut self) -> Result<Flows> {
        self.show_flows(FlowFilter::Passthrough).await
    }
}
