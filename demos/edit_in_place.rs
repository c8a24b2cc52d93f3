//! Editing a hand-written INI file without losing its comments.
//!
//! Run with: RUST_LOG=serde_ini=debug cargo run --example edit_in_place

use serde_ini::{dump, loads, IniValue};
use std::error::Error;
use std::io;

const ORIGINAL: &str = "\
; last modified 1 April 2001 by John Doe
[owner]
name = John Doe
organization = Acme Widgets Inc.

[database]
# use IP address in case network name resolution is not working
server = 192.0.2.62
port = 143 ; standard IMAP port
file = \"payroll.dat\"

[owner]
email = john@example.com
";

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    // The repeated [owner] header is merged into the first one
    let mut doc = loads(ORIGINAL);

    let database = doc.get_section_mut("Database")?;
    if let IniValue::Number(port) = database.get_value("port")? {
        println!("old port: {}", port);
    }
    database.set_value("port", 993);
    database.delete("file")?;

    let audit = doc.create_section("audit")?;
    audit.append_comment(" added by edit_in_place");
    audit.set_value("enabled", true);
    audit.set_value("targets", IniValue::List(vec!["syslog".into(), "file".into()]));

    println!("sections: {:?}\n", doc.section_names().collect::<Vec<_>>());

    dump(&doc, io::stdout().lock())?;
    println!();

    Ok(())
}
