//! Interface state and configuration.

use crate::cli::CommandSource;
use crate::error::Result;
use crate::parse::{InterfaceRecord, parse_interfaces};

/// Commands of the `networking` feature.
pub struct NetworkingModel<'a, C> {
    cli: &'a mut C,
}

impl<'a, C: CommandSource> NetworkingModel<'a, C> {
    pub fn new(cli: &'a mut C) -> Self {
        Self { cli }
    }

    /// Parsed `show interfaces [<interface>] [brief]`.
    ///
    /// ```text
    /// Interface inpath0_0 state
    ///    Up:                 yes
    ///    IP address:         10.11.100.2
    ///    Netmask:            255.255.255.0
    ///    HW address:         52:54:00:10:3F:E9
    ///    Counters cleared date:  2014/01/31 14:28:28
    /// ```
    ///
    /// The address and netmask come back merged as `10.11.100.2/24`.
    pub async fn show_interfaces(
        &mut self,
        interface: Option<&str>,
        brief: bool,
    ) -> Result<Vec<InterfaceRecord>> {
        let mut cmd = vec!["show interfaces"];
        cmd.extend(interface);
        if brief {
            cmd.push("brief");
        }
        self.run(&cmd.join(" ")).await
    }

    /// Parsed `show interfaces [<interface>] configured`.
    pub async fn show_interfaces_configured(
        &mut self,
        interface: Option<&str>,
    ) -> Result<Vec<InterfaceRecord>> {
        let mut cmd = vec!["show interfaces"];
        cmd.extend(interface);
        cmd.push("configured");
        self.run(&cmd.join(" ")).await
    }

    async fn run(&mut self, command: &str) -> Result<Vec<InterfaceRecord>> {
        let output = self.cli.exec_expect_output(command).await?;
        Ok(parse_interfaces(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::CannedCli;
    use crate::parse::Value;

    const SHOW_INTERFACE_PRIMARY: &str = "
Interface primary state
   Up:                 yes
   Interface type:     ethernet
   IP address:         10.11.140.3
   Netmask:            255.255.0.0
   MTU:                1500
   HW address:         00:0E:B6:03:6B:18
   Link:               yes
";

    const SHOW_INTERFACE_CONFIGURED: &str = "
Interface aux configuration
   Enabled:            yes
   DHCP:               no
   IP address:         10.3.2.54
   Netmask:            255.255.248.0
   IPv6 address:
   MTU:                1500
";

    #[test]
    fn test_show_interfaces_commands() {
        let mut cli = CannedCli::new()
            .reply("show interfaces", SHOW_INTERFACE_PRIMARY)
            .reply("show interfaces primary brief", SHOW_INTERFACE_PRIMARY);

        let mut model = NetworkingModel::new(&mut cli);
        let all = tokio_test::block_on(model.show_interfaces(None, false)).unwrap();
        let brief = tokio_test::block_on(model.show_interfaces(Some("primary"), true)).unwrap();
        assert_eq!(all, brief);
        assert_eq!(all[0].name, "primary");
        assert_eq!(all[0].fields["ip address"].to_string(), "10.11.140.3/16");

        assert_eq!(cli.sent, vec!["show interfaces", "show interfaces primary brief"]);
    }

    #[test]
    fn test_show_interfaces_configured() {
        let mut cli = CannedCli::new().reply("show interfaces aux configured", SHOW_INTERFACE_CONFIGURED);
        let records = tokio_test::block_on(
            NetworkingModel::new(&mut cli).show_interfaces_configured(Some("aux")),
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields["enabled"], Value::Bool(true));
        assert_eq!(records[0].fields["dhcp"], Value::Bool(false));
        assert_eq!(records[0].fields["ipv6 address"], Value::NoData);
    }
}
