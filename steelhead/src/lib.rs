//! # SteelHead
//!
//! Async client for the CLI of Riverbed SteelHead WAN optimization appliances.
//!
//! The crate logs into an appliance over SSH, runs `show` commands and turns
//! their human-oriented output into typed records: IP interfaces, MAC
//! addresses, timestamps, flow tables, percentages.
//!
//! ## Features
//!
//! - Async SSH sessions via russh, with prompt detection over a tail-searched buffer
//! - Pure parsers for `show version`, `show interfaces`, `show flows`,
//!   `show stats bandwidth` and generic `Key: value` blocks
//! - Feature models (`common`, `networking`, `flows`, `stats`, `optimization`)
//!   usable against any [`CommandSource`]
//! - Serde serialization of every parsed record
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use steelhead::{CliAuth, FlowFilter, SteelHead};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), steelhead::Error> {
//!     let mut sh = SteelHead::new("sh1.example.com", CliAuth::new("admin", "password"));
//!
//!     let flows = sh.flows().await?.show_flows(FlowFilter::Optimized).await?;
//!     for flow in &flows.flows_list {
//!         println!("{} {} -> {}", flow.kind, flow.source, flow.destination);
//!     }
//!
//!     sh.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! Output captured some other way can be parsed directly:
//!
//! ```rust
//! let parser = steelhead::resolve_parser("stats").unwrap();
//! let parsed = parser.parse("Data Reduction:  93 %\n").unwrap();
//! assert!(matches!(parsed, steelhead::Parsed::Bandwidth(_)));
//! ```

pub mod appliance;
pub mod channel;
pub mod cli;
pub mod error;
pub mod features;
pub mod parse;
pub mod transport;

// Re-export main types for convenience
pub use appliance::{CliAuth, SteelHead};
pub use cli::{CliBuilder, CommandSource, RvbdCli};
pub use error::{Error, Result};
pub use features::{
    CommonModel, Feature, FlowFilter, FlowsModel, NetworkingModel, OptimizationModel, Parsed,
    ParserHandle, Period, ProductInfo, StatsModel, TrafficDirection, resolve_parser,
};
pub use parse::{Fields, Flows, InterfaceRecord, Value};
pub use transport::{HostKeyVerification, SshConfig};
