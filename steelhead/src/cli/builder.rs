//! Builder for appliance CLI sessions.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::rvbd::RvbdCli;
use crate::error::{ConfigurationError, Result};
use crate::transport::{HostKeyVerification, SshConfig};

/// Builder for [`RvbdCli`] sessions.
///
/// # Example
///
/// ```rust,no_run
/// use steelhead::cli::CliBuilder;
///
/// # async fn example() -> Result<(), steelhead::Error> {
/// let mut cli = CliBuilder::new("sh1.example.com")
///     .username("admin")
///     .password("password")
///     .build()?;
/// cli.open().await?;
/// # Ok(())
/// # }
/// ```
pub struct CliBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    password: SecretString,
    timeout: Duration,
    terminal_width: u32,
    terminal_height: u32,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
}

impl CliBuilder {
    /// Create a new builder for the specified appliance.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            password: SecretString::from(String::new()),
            timeout: Duration::from_secs(30),
            terminal_width: 511,
            terminal_height: 24,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the login user.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the login password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = SecretString::from(password.into());
        self
    }

    /// Set the connect and per-command timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set terminal dimensions.
    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Set host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Use a known_hosts file other than `~/.ssh/known_hosts`.
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Build the session. Does not connect; call [`RvbdCli::open`].
    pub fn build(self) -> Result<RvbdCli> {
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or(ConfigurationError::MissingUsername)?;

        Ok(RvbdCli::new(SshConfig {
            host: self.host,
            port: self.port,
            username,
            password: self.password,
            timeout: self.timeout,
            terminal_width: self.terminal_width,
            terminal_height: self.terminal_height,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        }))
    }
}
