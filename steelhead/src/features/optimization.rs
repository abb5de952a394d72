//! Optimization service control.

use std::time::Duration;

use log::{debug, info};

use crate::cli::CommandSource;
use crate::error::{Result, VerificationError};
use crate::parse::{Fields, Value, parse_block};

const INTERCEPT_READY: &str = "intercept module ready";

/// Commands of the `optimization` feature.
pub struct OptimizationModel<'a, C> {
    cli: &'a mut C,
}

impl<'a, C: CommandSource> OptimizationModel<'a, C> {
    pub fn new(cli: &'a mut C) -> Self {
        Self { cli }
    }

    /// `service enable`
    pub async fn enable(&mut self) -> Result<String> {
        self.cli.execute("service enable").await
    }

    /// `no service enable`
    pub async fn disable(&mut self) -> Result<String> {
        self.cli.execute("no service enable").await
    }

    /// `service restart`. Returns once the command is accepted, not when the
    /// service is back up; see [`wait_for_intercept_ready`](Self::wait_for_intercept_ready).
    pub async fn restart(&mut self) -> Result<String> {
        self.cli.execute("service restart").await
    }

    /// Parsed `show service`.
    pub async fn show(&mut self) -> Result<Fields> {
        let output = self.cli.exec_expect_output("show service").await?;
        Ok(parse_block(&output)?)
    }

    /// Parsed `show sport intercept ready`:
    ///
    /// ```text
    /// Intercept Module Ready: yes
    /// ```
    pub async fn show_sport_intercept(&mut self) -> Result<Fields> {
        let output = self
            .cli
            .exec_expect_output("show sport intercept ready")
            .await?;
        Ok(parse_block(&output)?)
    }

    /// Poll `show sport intercept ready` until the intercept module reports
    /// ready, at most `max_retries` times, `min_interval` apart.
    pub async fn wait_for_intercept_ready(
        &mut self,
        max_retries: u32,
        min_interval: Duration,
    ) -> Result<()> {
        for attempt in 1..=max_retries {
            let status = self.show_sport_intercept().await?;
            if status.get(INTERCEPT_READY) == Some(&Value::Bool(true)) {
                info!("intercept module ready after {attempt} poll(s)");
                return Ok(());
            }

            debug!("intercept module not ready ({attempt}/{max_retries})");
            if attempt < max_retries {
                tokio::time::sleep(min_interval).await;
            }
        }

        Err(VerificationError {
            description: "Intercept module was not ready by the end of the polling period"
                .to_string(),
            expected: "true".to_string(),
            actual: "false".to_string(),
        }
        .into())
    }

    /// [`wait_for_intercept_ready`](Self::wait_for_intercept_ready) with 20
    /// polls, 3 seconds apart.
    pub async fn wait_for_intercept_ready_default(&mut self) -> Result<()> {
        self.wait_for_intercept_ready(20, Duration::from_secs(3))
            .await
    }
}
