//! Bandwidth statistics.

use std::fmt;
use std::str::FromStr;

use crate::cli::CommandSource;
use crate::error::{ConfigurationError, Result};
use crate::parse::{BandwidthStats, parse_bandwidth};

/// Traffic direction summarized by `show stats bandwidth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficDirection {
    BiDirectional,
    LanToWan,
    WanToLan,
}

impl TrafficDirection {
    pub const ALL: [TrafficDirection; 3] = [
        TrafficDirection::BiDirectional,
        TrafficDirection::LanToWan,
        TrafficDirection::WanToLan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficDirection::BiDirectional => "bi-directional",
            TrafficDirection::LanToWan => "lan-to-wan",
            TrafficDirection::WanToLan => "wan-to-lan",
        }
    }
}

/// Look-back window for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Minute,
    FiveMinutes,
    Hour,
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Minute,
        Period::FiveMinutes,
        Period::Hour,
        Period::Day,
        Period::Week,
        Period::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Minute => "1min",
            Period::FiveMinutes => "5min",
            Period::Hour => "hour",
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

macro_rules! keyword_traits {
    ($ty:ty, $option:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ConfigurationError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| ConfigurationError::InvalidOption {
                        option: $option,
                        value: s.to_string(),
                    })
            }
        }
    };
}

keyword_traits!(TrafficDirection, "traffic direction");
keyword_traits!(Period, "period");

/// Commands of the `stats` feature.
pub struct StatsModel<'a, C> {
    cli: &'a mut C,
}

impl<'a, C: CommandSource> StatsModel<'a, C> {
    pub fn new(cli: &'a mut C) -> Self {
        Self { cli }
    }

    /// Parsed `show stats bandwidth <port> [<direction>] [<period>]`.
    ///
    /// `port` is a port number or `all`. Percentages and `X` multipliers come
    /// back as floats:
    ///
    /// ```text
    /// WAN Data:                 5.4 GB
    /// Data Reduction:           10 %
    /// Capacity Increase:        1.1 X
    /// ```
    pub async fn show_stats_bandwidth(
        &mut self,
        port: &str,
        direction: Option<TrafficDirection>,
        period: Option<Period>,
    ) -> Result<BandwidthStats> {
        let mut cmd = format!("show stats bandwidth {port}");
        if let Some(direction) = direction {
            cmd.push(' ');
            cmd.push_str(direction.as_str());
        }
        if let Some(period) = period {
            cmd.push(' ');
            cmd.push_str(period.as_str());
        }

        let output = self.cli.exec_expect_output(&cmd).await?;
        Ok(parse_bandwidth(&output)?)
    }
}
