//! Treating an INI file as nested maps of typed values.
//!
//! Run with: cargo run --example mapping_view

use serde_ini::{dumps_map, ini, loads_map, IniValue};

fn describe(value: &IniValue) -> String {
    match value {
        IniValue::List(items) => format!("{} ({} items)", value.type_name(), items.len()),
        other => format!("{} = {}", other.type_name(), other),
    }
}

fn main() {
    let map = loads_map(
        "\
verbose = yes
retries = 3

[limits]
sizes = [1, 2, 4, 8]
ratio = 0.75
huge = 123456789012345678901234567890
",
    );

    for (key, value) in &map {
        match value {
            IniValue::Map(section) => {
                println!("[{}]", key);
                for (name, value) in section {
                    println!("  {}: {}", name, describe(value));
                }
            }
            other => println!("{}: {}", key, describe(other)),
        }
    }

    let built = ini!({
        "title": "generated",
        "paths": { "roots": ["/srv", "/opt"], "depth": 2 }
    });

    if let Some(map) = built.as_map() {
        println!("\n{}", dumps_map(map));
    }
}
