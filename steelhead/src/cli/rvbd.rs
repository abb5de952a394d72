//! SSH-backed CLI session for RiOS appliances.

use std::sync::LazyLock;
use std::time::Instant;

use log::{debug, trace, warn};
use regex::bytes::Regex;

use super::CommandSource;
use super::output::{detect_failure, normalize_output};
use crate::channel::{PtyChannel, PtyConfig};
use crate::error::{CliError, Result};
use crate::transport::{SshConfig, SshTransport};

/// Matches `host >`, `host #` and `host (config) #` at the end of output.
pub const PROMPT_PATTERN: &str = r"(?:^|\n)[\w.\-]+ (?:\([\w\-]+\) )?[>#] ?$";

static PROMPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROMPT_PATTERN).expect("valid prompt regex"));

/// Commands sent once after login.
const ON_OPEN_COMMANDS: &[&str] = &["enable", "no cli session paging enable"];

struct Session {
    transport: SshTransport,
    channel: PtyChannel,
}

impl Session {
    async fn close(self) -> Result<()> {
        self.channel.close().await?;
        self.transport.close().await
    }
}

impl CommandSource for Session {
    async fn execute(&mut self, command: &str) -> Result<String> {
        let start = Instant::now();
        self.channel.send_line(command).await?;
        let data = self.channel.read_until(&PROMPT).await?;
        let raw = String::from_utf8_lossy(&data);
        trace!("raw output of {command:?}: {raw:?}");

        let output = normalize_output(&raw, command);
        debug!("{command:?} completed in {:?}", start.elapsed());

        if let Some(message) = detect_failure(&output) {
            return Err(CliError::CommandFailed {
                command: command.to_string(),
                message,
            }
            .into());
        }

        Ok(output)
    }
}

/// Run the post-login commands, stopping at the first failure.
async fn prepare_session<C: CommandSource>(cli: &mut C) -> Result<()> {
    for command in ON_OPEN_COMMANDS {
        cli.execute(command).await?;
    }
    Ok(())
}

/// Interactive CLI session to a SteelHead.
///
/// Build with [`CliBuilder`](super::CliBuilder), then call [`open`](Self::open).
pub struct RvbdCli {
    config: SshConfig,
    session: Option<Session>,
}

impl RvbdCli {
    pub(crate) fn new(config: SshConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Log in, enter enable mode and turn off paging.
    ///
    /// The session only counts as open once every post-login command has
    /// succeeded; on failure the connection is closed again.
    pub async fn open(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(CliError::AlreadyConnected.into());
        }

        let transport = SshTransport::connect(self.config.clone()).await?;
        let shell = transport.open_shell().await?;
        let mut channel = PtyChannel::new(
            shell,
            PtyConfig {
                timeout: self.config.timeout,
                ..Default::default()
            },
        );

        // Login banner and first prompt
        channel.read_until(&PROMPT).await?;
        let mut session = Session { transport, channel };

        if let Err(e) = prepare_session(&mut session).await {
            if let Err(close_err) = session.close().await {
                warn!("closing {} after failed login setup: {close_err}", self.config.host);
            }
            return Err(e);
        }

        self.session = Some(session);
        debug!("CLI session open on {}", self.config.host);
        Ok(())
    }

    /// Close the session.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            session.close().await?;
            debug!("CLI session closed on {}", self.config.host);
        }
        Ok(())
    }

    /// Check if the session has been opened.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Check if the underlying SSH session is still alive.
    pub fn is_alive(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.transport.is_alive())
    }

    /// Appliance this session targets.
    pub fn host(&self) -> &str {
        &self.config.host
    }
}

impl CommandSource for RvbdCli {
    async fn execute(&mut self, command: &str) -> Result<String> {
        let session = self.session.as_mut().ok_or(CliError::NotConnected)?;
        session.execute(command).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cli::CliBuilder;
    use crate::cli::testing::CannedCli;
    use crate::transport::HostKeyVerification;

    #[test]
    fn test_prompt_levels() {
        assert!(PROMPT.is_match(b"amnesiac > "));
        assert!(PROMPT.is_match(b"output\r\nsh-lab-1 # "));
        assert!(PROMPT.is_match(b"output\nsh-lab-1 (config) # "));
        assert!(PROMPT.is_match(b"sh1.example.com #"));
    }

    #[test]
    fn test_prompt_not_in_output() {
        assert!(!PROMPT.is_match(b"Data Reduction:           93 %\n"));
        assert!(!PROMPT.is_match(b"amnesiac # show version\nProduct name: rbt_sh"));
        assert!(!PROMPT.is_match(b"TCP Proxy (TP):   1   2   3"));
    }

    #[test]
    fn test_prepare_session_commands() {
        let mut cli = CannedCli::new()
            .reply("enable", "")
            .reply("no cli session paging enable", "");
        tokio_test::block_on(prepare_session(&mut cli)).unwrap();
        assert_eq!(cli.sent, vec!["enable", "no cli session paging enable"]);
    }

    #[test]
    fn test_prepare_session_stops_on_rejected_enable() {
        // No reply registered for `enable`: the appliance rejects it.
        let mut cli = CannedCli::new().reply("no cli session paging enable", "");
        let err = tokio_test::block_on(prepare_session(&mut cli)).unwrap_err();

        assert!(matches!(
            err,
            crate::Error::Cli(CliError::CommandFailed { ref command, .. }) if command == "enable"
        ));
        assert_eq!(cli.sent, vec!["enable"]);
    }

    #[test]
    fn test_failed_open_leaves_session_closed() {
        let mut cli = CliBuilder::new("127.0.0.1")
            .port(1)
            .username("admin")
            .timeout(Duration::from_secs(2))
            .host_key_verification(HostKeyVerification::Disabled)
            .build()
            .unwrap();

        assert!(tokio_test::block_on(cli.open()).is_err());
        assert!(!cli.is_open());

        let err = tokio_test::block_on(cli.execute("show version")).unwrap_err();
        assert!(matches!(err, crate::Error::Cli(CliError::NotConnected)));
    }
}
