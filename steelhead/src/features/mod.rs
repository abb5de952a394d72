//! Feature models: one per group of appliance commands.
//!
//! Each model borrows a [`CommandSource`](crate::cli::CommandSource), runs
//! the commands of its feature and hands the output to the matching parser.
//! [`resolve_parser`] gives the parser alone, for output obtained elsewhere.

mod common;
mod flows;
mod networking;
mod optimization;
mod registry;
mod stats;

pub use common::{CommonModel, ProductInfo};
pub use flows::{FlowFilter, FlowsModel};
pub use networking::NetworkingModel;
pub use optimization::OptimizationModel;
pub use registry::{Feature, Parsed, ParserHandle, resolve_parser};
pub use stats::{Period, StatsModel, TrafficDirection};
