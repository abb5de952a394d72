//! Print bandwidth statistics of a SteelHead.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example show_stats -- --host sh1 --user admin --password password \
//!     --port-filter 443 --direction lan-to-wan --period hour
//! ```

use std::env;

use steelhead::{CliAuth, Period, SteelHead, TrafficDirection};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let direction = args
        .direction
        .as_deref()
        .map(str::parse::<TrafficDirection>)
        .transpose()?;
    let period = args.period.as_deref().map(str::parse::<Period>).transpose()?;

    let mut sh = SteelHead::new(&args.host, CliAuth::new(&args.user, &args.password))
        .port(args.port);

    let stats = sh
        .stats()
        .await?
        .show_stats_bandwidth(&args.traffic_port, direction, period)
        .await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    sh.close().await?;
    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: String,
    traffic_port: String,
    direction: Option<String>,
    period: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = None;
        let mut port = 22u16;
        let mut user = None;
        let mut password = None;
        let mut traffic_port = "all".to_string();
        let mut direction = None;
        let mut period = None;

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-H" => host = value,
                "--port" => port = value.and_then(|v| v.parse().ok()).unwrap_or(22),
                "--user" | "-u" => user = value,
                "--password" | "-p" => password = value,
                "--port-filter" => traffic_port = value.unwrap_or(traffic_port),
                "--direction" | "-d" => direction = value,
                "--period" | "-f" => period = value,
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
            traffic_port,
            direction,
            period,
        }
    }

    fn print_help() {
        println!(
            r#"steelhead show_stats example

USAGE:
    cargo run --example show_stats -- [OPTIONS]

OPTIONS:
    -H, --host <HOST>          Appliance hostname or IP address
        --port <PORT>          SSH port [default: 22]
    -u, --user <USER>          Username to connect with
    -p, --password <PASS>      Password to use
        --port-filter <PORT>   Traffic port to summarize [default: all]
    -d, --direction <DIR>      bi-directional, lan-to-wan or wan-to-lan
    -f, --period <PERIOD>      1min, 5min, hour, day, week or month
    --help                     Print this help message
"#
        );
    }
}
