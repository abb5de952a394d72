//! Handle to one SteelHead appliance.

use std::fmt;

use log::debug;
use secrecy::{ExposeSecret, SecretString};

use crate::cli::{CliBuilder, RvbdCli};
use crate::error::Result;
use crate::features::{
    CommonModel, FlowsModel, NetworkingModel, OptimizationModel, StatsModel,
};
use crate::transport::HostKeyVerification;

/// Login credentials for the appliance CLI.
#[derive(Clone)]
pub struct CliAuth {
    pub username: String,
    pub password: SecretString,
}

impl CliAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for CliAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliAuth")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// A SteelHead and its (lazily opened) CLI session.
///
/// ```rust,no_run
/// use steelhead::{CliAuth, SteelHead};
///
/// # async fn example() -> Result<(), steelhead::Error> {
/// let mut sh = SteelHead::new("sh1.example.com", CliAuth::new("admin", "password"));
/// let version = sh.common().await?.show_version().await?;
/// println!("{}", version["product release"]);
/// sh.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct SteelHead {
    host: String,
    auth: CliAuth,
    port: u16,
    host_key_verification: HostKeyVerification,
    cli: Option<RvbdCli>,
}

impl SteelHead {
    pub fn new(host: impl Into<String>, auth: CliAuth) -> Self {
        Self {
            host: host.into(),
            auth,
            port: 22,
            host_key_verification: HostKeyVerification::default(),
            cli: None,
        }
    }

    /// Connect on a port other than 22.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn auth(&self) -> &CliAuth {
        &self.auth
    }

    /// The CLI session, opened on first use.
    pub async fn cli(&mut self) -> Result<&mut RvbdCli> {
        let cli = match self.cli.take() {
            Some(cli) => cli,
            None => {
                debug!("opening CLI session to {}", self.host);
                let mut cli = CliBuilder::new(self.host.as_str())
                    .port(self.port)
                    .username(self.auth.username.as_str())
                    .password(self.auth.password.expose_secret())
                    .host_key_verification(self.host_key_verification.clone())
                    .build()?;
                cli.open().await?;
                cli
            }
        };
        Ok(self.cli.insert(cli))
    }

    pub async fn common(&mut self) -> Result<CommonModel<'_, RvbdCli>> {
        Ok(CommonModel::new(self.cli().await?))
    }

    pub async fn networking(&mut self) -> Result<NetworkingModel<'_, RvbdCli>> {
        Ok(NetworkingModel::new(self.cli().await?))
    }

    pub async fn flows(&mut self) -> Result<FlowsModel<'_, RvbdCli>> {
        Ok(FlowsModel::new(self.cli().await?))
    }

    pub async fn stats(&mut self) -> Result<StatsModel<'_, RvbdCli>> {
        Ok(StatsModel::new(self.cli().await?))
    }

    pub async fn optimization(&mut self) -> Result<OptimizationModel<'_, RvbdCli>> {
        Ok(OptimizationModel::new(self.cli().await?))
    }

    /// Close the CLI session if one was opened.
    pub async fn close(&mut self) -> Result<()> {
        match self.cli.take() {
            Some(mut cli) => cli.close().await,
            None => Ok(()),
        }
    }

    /// Check if a CLI session is open.
    pub fn is_connected(&self) -> bool {
        self.cli.as_ref().is_some_and(RvbdCli::is_open)
    }
}

impl fmt::Debug for SteelHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteelHead")
            .field("host", &self.host)
            .field("auth", &self.auth)
            .field("port", &self.port)
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_debug_masks_password() {
        let auth = CliAuth::new("admin", "hunter2");
        let debug = format!("{auth:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
        assert_eq!(auth.password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_new_is_not_connected() {
        let sh = SteelHead::new("sh1", CliAuth::new("admin", "hunter2")).port(2222);
        assert_eq!(sh.host(), "sh1");
        assert_eq!(sh.auth().username, "admin");
        assert!(!sh.is_connected());
        assert!(!format!("{sh:?}").contains("hunter2"));
    }

    #[test]
    fn test_close_without_session() {
        let mut sh = SteelHead::new("sh1", CliAuth::new("admin", "password"));
        tokio_test::block_on(sh.close()).unwrap();
    }

    #[test]
    fn test_missing_username_fails_before_connecting() {
        let mut sh = SteelHead::new("sh1", CliAuth::new("", "password"));
        let err = tokio_test::block_on(sh.cli()).err().unwrap();
        assert!(matches!(
            err,
            crate::Error::Configuration(crate::error::ConfigurationError::MissingUsername)
        ));
        assert!(!sh.is_connected());
    }
}
