//! Log into a SteelHead and print its version and product information.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example show_version -- --host sh1 --user admin --password password
//! ```

use std::env;

use steelhead::{CliAuth, SteelHead};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut sh = SteelHead::new(&args.host, CliAuth::new(&args.user, &args.password))
        .port(args.port);

    let mut common = sh.common().await?;
    let version = common.show_version().await?;
    let product = common.get_product_info().await?;

    println!("{}", serde_json::to_string_pretty(&version)?);
    println!("{}", serde_json::to_string_pretty(&product)?);

    sh.close().await?;
    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: String,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = None;
        let mut port = 22u16;
        let mut user = None;
        let mut password = None;

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-H" => host = value,
                "--port" => port = value.and_then(|v| v.parse().ok()).unwrap_or(22),
                "--user" | "-u" => user = value,
                "--password" | "-p" => password = value,
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
        }
    }

    fn print_help() {
        println!(
            r#"steelhead show_version example

USAGE:
    cargo run --example show_version -- [OPTIONS]

OPTIONS:
    -H, --host <HOST>        Appliance hostname or IP address
        --port <PORT>        SSH port [default: 22]
    -u, --user <USER>        Username to connect with
    -p, --password <PASS>    Password to use
    --help                   Print this help message
"#
        );
    }
}
