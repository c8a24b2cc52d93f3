//! Reading and writing INI files through Serde.
//!
//! Run with: cargo run --example typed_config

use serde::{Deserialize, Serialize};
use serde_ini::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    workers: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Level {
    Error,
    Warn,
    Info,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Logging {
    level: Level,
    targets: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    server: Server,
    logging: Logging,
}

fn main() -> Result<(), Box<dyn Error>> {
    let text = "\
name = gateway ; shown in dashboards

[server]
host: 0.0.0.0
port = 8080
workers = none

[logging]
level = warn
targets = ('stderr', 'file')
";

    let config: Config = from_str(text)?;
    println!("parsed: {:#?}\n", config);

    let written = to_string(&config)?;
    println!("written back:\n{}\n", written);

    let again: Config = from_str(&written)?;
    assert_eq!(again, config);
    println!("round trip ok");

    Ok(())
}
