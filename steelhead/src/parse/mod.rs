//! Parsers that turn SteelHead CLI output into typed records.
//!
//! All parsers are pure functions over the command text: no I/O, no shared
//! state, identical input gives identical output.

mod bandwidth;
mod block;
pub mod flows;
mod interfaces;
pub mod value;
mod version;

pub use bandwidth::{BandwidthStats, parse_bandwidth};
pub use block::{Fields, parse_block};
pub use flows::{
    Counts, Endpoint, FlowRecord, FlowSummary, Flows, Since, SinceTime, SummaryCategory,
    parse_flows,
};
pub use interfaces::{InterfaceRecord, parse_interfaces};
pub use value::{IpInterface, MacAddr, Value, coerce};
pub use version::{VersionInfo, parse_version};
