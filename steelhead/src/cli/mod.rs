//! Command channel to the appliance CLI.
//!
//! Parsers never talk to the network; feature models obtain raw text from a
//! [`CommandSource`]. [`RvbdCli`] is the SSH-backed implementation.

mod builder;
mod output;
mod rvbd;

pub use builder::CliBuilder;
pub use output::{detect_failure, normalize_output};
pub use rvbd::{PROMPT_PATTERN, RvbdCli};

use std::future::Future;

use crate::error::{CliError, Result};

/// Anything that can run a CLI command and hand back its full text output.
pub trait CommandSource: Send {
    /// Run `command` and return its output once the command has completed.
    fn execute(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send;

    /// Run a command that must print something.
    fn exec_expect_output(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send {
        async move {
            let output = self.execute(command).await?;
            if output.trim().is_empty() {
                return Err(CliError::UnexpectedOutput {
                    command: command.to_string(),
                    output,
                }
                .into());
            }
            Ok(output)
        }
    }

    /// Run a command that must print nothing.
    fn exec_expect_silent(&mut self, command: &str) -> impl Future<Output = Result<()>> + Send {
        async move {
            let output = self.execute(command).await?;
            if !output.trim().is_empty() {
                return Err(CliError::UnexpectedOutput {
                    command: command.to_string(),
                    output,
                }
                .into());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory command source for model tests.

    use std::collections::HashMap;

    use super::*;

    /// Replies with canned output and records every command it was sent.
    #[derive(Debug, Default)]
    pub struct CannedCli {
        replies: HashMap<String, String>,
        pub sent: Vec<String>,
    }

    impl CannedCli {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(mut self, command: &str, output: &str) -> Self {
            self.replies.insert(command.to_string(), output.to_string());
            self
        }
    }

    impl CommandSource for CannedCli {
        async fn execute(&mut self, command: &str) -> Result<String> {
            self.sent.push(command.to_string());
            match self.replies.get(command) {
                Some(output) => Ok(output.clone()),
                None => Err(CliError::CommandFailed {
                    command: command.to_string(),
                    message: "% Unrecognized command".to_string(),
                }
                .into()),
            }
        }
    }

    #[test]
    fn test_expect_output() {
        let mut cli = CannedCli::new().reply("show service", "").reply("service enable", "");
        let err = tokio_test::block_on(cli.exec_expect_output("show service")).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Cli(CliError::UnexpectedOutput { .. })
        ));
        tokio_test::block_on(cli.exec_expect_silent("service enable")).unwrap();
        assert_eq!(cli.sent, vec!["show service", "service enable"]);
    }
}
