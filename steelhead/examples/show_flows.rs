//! Print the current connections (flows) of a SteelHead.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example show_flows -- --host sh1 --user admin --password password
//! cargo run --example show_flows -- --host sh1 --user admin --password password --type passthrough
//! ```

use std::env;

use steelhead::{CliAuth, FlowFilter, SteelHead};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let filter: FlowFilter = args.filter.parse()?;

    let mut sh = SteelHead::new(&args.host, CliAuth::new(&args.user, &args.password))
        .port(args.port);

    let flows = sh.flows().await?.show_flows(filter).await?;
    println!("{}", serde_json::to_string_pretty(&flows)?);

    println!(
        "{} connections, {} summary categories",
        flows.flows_list.len(),
        flows.flows_summary.len()
    );

    sh.close().await?;
    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: String,
    filter: String,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = None;
        let mut port = 22u16;
        let mut user = None;
        let mut password = None;
        let mut filter = "all".to_string();

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-H" => host = value,
                "--port" => port = value.and_then(|v| v.parse().ok()).unwrap_or(22),
                "--user" | "-u" => user = value,
                "--password" | "-p" => password = value,
                "--type" | "-t" => filter = value.unwrap_or(filter),
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {other}");
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        let (Some(host), Some(user), Some(password)) = (host, user, password) else {
            Self::print_help();
            std::process::exit(1);
        };

        Self {
            host,
            port,
            user,
            password,
            filter,
        }
    }

    fn print_help() {
        println!(
            r#"steelhead show_flows example

USAGE:
    cargo run --example show_flows -- [OPTIONS]

OPTIONS:
    -H, --host <HOST>        Appliance hostname or IP address
        --port <PORT>        SSH port [default: 22]
    -u, --user <USER>        Username to connect with
    -p, --password <PASS>    Password to use
    -t, --type <TYPE>        all, optimized, passthrough, packet-mode or tcp-term [default: all]
    --help                   Print this help message
"#
        );
    }
}
