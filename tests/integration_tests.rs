use serde::{Deserialize, Serialize};
use serde_ini::{
    dump, dumps, from_reader, from_str, load, loads, loads_map, to_string, to_value, Document,
    Entry, Error, IniValue, Lookup, Number, StreamMode, DEFAULT_SECTION,
};
use std::io::{self, Write};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Server {
    host: String,
    port: u16,
    tls: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Limits {
    sizes: Vec<u32>,
    ratio: f64,
    label: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Config {
    name: String,
    server: Server,
    limits: Limits,
}

const SAMPLE: &str = "\
; last modified 1 April 2001 by John Doe
[owner]
name = John Doe
organization = Acme Widgets Inc.

[database]
# use IP address in case network name resolution is not working
server = 192.0.2.62
port = 143
file = \"payroll.dat\"
";

#[test]
fn test_sample_round_trip() {
    let doc = loads(SAMPLE);
    assert_eq!(dumps(&doc), SAMPLE);
}

#[test]
fn test_sample_structure() {
    let doc = loads(SAMPLE);

    let names: Vec<_> = doc.section_names().collect();
    assert_eq!(names, vec![DEFAULT_SECTION, "owner", "database"]);

    let owner = doc.get_section("Owner").unwrap();
    assert_eq!(owner.get("name").unwrap(), "John Doe");
    assert_eq!(owner.entries().last(), Some(&Entry::Blank));

    let database = doc.get_section("database").unwrap();
    assert_eq!(database.get_value("port").unwrap(), IniValue::from(143));
    assert_eq!(database.get("file").unwrap(), "\"payroll.dat\"");
    assert_eq!(database.get_value("file").unwrap(), IniValue::from("payroll.dat"));
}

#[test]
fn test_edit_keeps_layout() {
    let mut doc = loads(SAMPLE);

    doc.get_section_mut("database").unwrap().set("port", "8143");
    doc.get_section_mut("owner").unwrap().delete("organization").unwrap();
    let extra = doc.create_section("extra").unwrap();
    extra.append_comment(" added later");
    extra.set_value("enabled", true);

    let expected = "\
; last modified 1 April 2001 by John Doe
[owner]
name = John Doe

[database]
# use IP address in case network name resolution is not working
server = 192.0.2.62
port = 8143
file = \"payroll.dat\"

[extra]
# added later
enabled = true";

    assert_eq!(doc.to_string(), expected);
}

#[test]
fn test_missing_lookups() {
    let doc = loads("[a]\nx = 1");

    assert_eq!(
        doc.get_section("a").unwrap().get("missing").unwrap_err(),
        Error::NotFound {
            kind: Lookup::Key,
            name: "missing".to_string()
        }
    );
    assert_eq!(
        doc.get_section("b").unwrap_err(),
        Error::NotFound {
            kind: Lookup::Section,
            name: "b".to_string()
        }
    );
}

#[test]
fn test_default_section_capture() {
    let doc = loads("x=1\n[later]\ny=2");

    assert_eq!(doc.default_section().get("x").unwrap(), "1");
    assert!(!doc.get_section("later").unwrap().contains_key("x"));
}

#[test]
fn test_document_from_scratch() {
    let mut doc = Document::new();
    doc.default_section_mut().append_comment_with(';', " generated");

    let section = doc.create_section("paths").unwrap();
    section.set_value("roots", IniValue::List(vec!["/a b".into(), "/c".into()]));
    section.set_value("depth", 3);
    section.append_blank();
    section.append_raw("KEEP THIS");

    assert_eq!(
        dumps(&doc),
        "; generated\n[paths]\nroots = [\"/a b\", \"/c\"]\ndepth = 3\n\nKEEP THIS"
    );

    let back = loads(&dumps(&doc));
    assert_eq!(back, doc);
    assert_eq!(
        back.get_section("paths").unwrap().get_value("roots").unwrap(),
        IniValue::List(vec!["/a b".into(), "/c".into()])
    );
}

#[test]
fn test_struct_round_trip() {
    let config = Config {
        name: "edge".to_string(),
        server: Server {
            host: "example.com".to_string(),
            port: 443,
            tls: true,
        },
        limits: Limits {
            sizes: vec![1, 2, 4],
            ratio: 0.75,
            label: None,
        },
    };

    let text = to_string(&config).unwrap();
    let back: Config = from_str(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_hand_written_config() {
    let text = "\
name = edge   ; shown in logs
[Server]
host: example.com
port = 443
tls = TRUE
[limits]
sizes = (1, 2, 4)
ratio = .75
label = 'primary'";

    #[derive(Deserialize, Debug, PartialEq)]
    struct Loose {
        name: String,
        #[serde(rename = "Server")]
        server: Server,
        limits: Limits,
    }

    let loose: Loose = from_str(text).unwrap();
    assert_eq!(loose.name, "edge");
    assert_eq!(loose.server.port, 443);
    assert!(loose.server.tls);
    assert_eq!(loose.limits.sizes, vec![1, 2, 4]);
    assert_eq!(loose.limits.label.as_deref(), Some("primary"));
}

#[test]
fn test_string_fields_read_text_as_written() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Package {
        version: String,
        zip: String,
        flag: String,
    }

    let text = "version = 1.10\nzip = 007\nflag = None";
    let expected = Package {
        version: "1.10".to_string(),
        zip: "007".to_string(),
        flag: "None".to_string(),
    };

    assert_eq!(from_str::<Package>(text).unwrap(), expected);
    assert_eq!(from_reader::<_, Package>(text.as_bytes()).unwrap(), expected);
}

#[test]
fn test_type_mismatch_reported() {
    let err = from_str::<Config>("name = x\nserver = 1").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_mapping_view_collision() {
    let map = loads_map("dup = 1\n[dup]\nkey = value");
    let dup = map.get("dup").and_then(IniValue::as_map).unwrap();
    assert_eq!(dup.get("key"), Some(&IniValue::from("value")));
}

#[test]
fn test_to_value_struct() {
    let value = to_value(&Server {
        host: "h".to_string(),
        port: 1,
        tls: false,
    })
    .unwrap();

    let map = value.as_map().unwrap();
    assert_eq!(map.get("port"), Some(&IniValue::Number(Number::Integer(1))));
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"host":"h","port":1,"tls":false}"#
    );
}

#[test]
fn test_load_and_dump_in_memory() {
    let doc = load(SAMPLE.as_bytes()).unwrap();

    let mut out = Vec::new();
    dump(&doc, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), SAMPLE);
}

#[test]
fn test_load_invalid_utf8_is_io_error() {
    let bytes: &[u8] = &[b'a', b'=', 0xff, 0xfe];
    assert!(matches!(load(bytes), Err(Error::Io(_))));
}

struct HungUp;

impl Write for HungUp {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_dump_to_closed_resource() {
    let doc = loads("a = 1");
    assert_eq!(dump(&doc, HungUp), Err(Error::ClosedResource));
}

#[cfg(unix)]
mod stream_modes {
    use super::*;
    use std::fs::{self, File, OpenOptions};
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("serde_ini_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_load_from_write_only_file() {
        let path = scratch("write_only");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .unwrap();

        let result = load(&file);
        fs::remove_file(&path).unwrap();

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidStreamMode {
                expected: StreamMode::Read
            }
        );
    }

    #[test]
    fn test_dump_to_read_only_file() {
        let path = scratch("read_only");
        fs::write(&path, "").unwrap();
        let file = File::open(&path).unwrap();

        let result = dump(&loads("a = 1"), &file);
        fs::remove_file(&path).unwrap();

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidStreamMode {
                expected: StreamMode::Write
            }
        );
    }

    #[test]
    fn test_dump_leaves_file_usable() {
        let path = scratch("reuse");
        let mut file = File::create(&path).unwrap();

        dump(&loads("[a]\nb = 1"), &mut file).unwrap();
        file.write_all(b"\nc = 2").unwrap();
        drop(file);

        let doc = load(File::open(&path).unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(doc.get_section("a").unwrap().get("c").unwrap(), "2");
    }
}
