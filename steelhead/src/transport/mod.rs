//! SSH transport layer wrapping russh.
//!
//! Connection setup, password login and shell channel creation. Everything
//! above this layer sees only a [`CommandSource`](crate::cli::CommandSource).

pub mod config;
mod ssh;

pub use config::{HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
