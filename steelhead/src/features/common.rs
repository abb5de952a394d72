//! Product and software version information.

use serde::Serialize;

use crate::cli::CommandSource;
use crate::error::{ParseError, Result};
use crate::parse::{VersionInfo, parse_version};

/// Basic product identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductInfo {
    pub name: String,
    pub model: String,
    pub release: String,
}

/// Commands of the `common` feature.
pub struct CommonModel<'a, C> {
    cli: &'a mut C,
}

impl<'a, C: CommandSource> CommonModel<'a, C> {
    pub fn new(cli: &'a mut C) -> Self {
        Self { cli }
    }

    /// Parsed `show version`.
    ///
    /// ```text
    /// Product name:      rbt_sh
    /// Product release:   9.0.1
    /// Build ID:          #19
    /// Product model:     CX1555
    /// Number of CPUs:    4
    /// ```
    ///
    /// Uptime, load averages, memory and build date are not reported.
    pub async fn show_version(&mut self) -> Result<VersionInfo> {
        let output = self.cli.exec_expect_output("show version").await?;
        Ok(parse_version(&output)?)
    }

    /// Product name, model and release.
    pub async fn get_product_info(&mut self) -> Result<ProductInfo> {
        let version = self.show_version().await?;
        let field = |key: &str| -> Result<String> {
            version
                .get(key)
                .map(ToString::to_string)
                .ok_or_else(|| {
                    ParseError::MissingField {
                        field: key.to_string(),
                    }
                    .into()
                })
        };

        Ok(ProductInfo {
            name: "SteelHead".to_string(),
            model: field("product model")?,
            release: field("product release")?,
        })
    }
}
