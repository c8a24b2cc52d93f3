//! Property-based tests for the guarantees the format makes on any input:
//! parsing is total and idempotent, and canonical values read back unchanged.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_ini::{coerce, dumps, dumps_map, from_str, loads, loads_map, to_string, IniMap, IniValue};

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~\t\r\n]{0,200}",
        prop::collection::vec("\\PC{0,30}", 0..10).prop_map(|lines| lines.join("\n")),
        prop::collection::vec(
            prop_oneof![
                Just("[s]".to_string()),
                Just("[[deep]]".to_string()),
                Just("; note".to_string()),
                Just(String::new()),
                "[a-z]{1,5} ?[=:] ?[ -~]{0,12}",
                "[a-z]{1,5} = [a-z]{0,5}\\\\",
            ],
            0..20
        )
        .prop_map(|lines| lines.join("\n")),
    ]
}

fn scalar_strategy() -> impl Strategy<Value = IniValue> {
    prop_oneof![
        Just(IniValue::Null),
        any::<bool>().prop_map(IniValue::from),
        any::<i64>().prop_map(IniValue::from),
        (-1.0e6..1.0e6f64).prop_map(IniValue::from),
        "\\PC{0,20}".prop_map(IniValue::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = IniValue> {
    prop_oneof![
        scalar_strategy(),
        prop::collection::vec(scalar_strategy(), 0..5).prop_map(IniValue::List),
    ]
}

fn map_strategy() -> impl Strategy<Value = IniMap> {
    prop::collection::vec(("[a-z][a-z0-9_]{0,8}", value_strategy()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Inner {
    count: i64,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Outer {
    name: String,
    enabled: bool,
    limit: Option<u16>,
    inner: Inner,
}

fn outer_strategy() -> impl Strategy<Value = Outer> {
    (
        "\\PC{0,20}",
        any::<bool>(),
        proptest::option::of(any::<u16>()),
        any::<i64>(),
        prop::collection::vec("\\PC{0,10}", 0..4),
    )
        .prop_map(|(name, enabled, limit, count, tags)| Outer {
            name,
            enabled,
            limit,
            inner: Inner { count, tags },
        })
}

proptest! {
    #[test]
    fn prop_coerce_is_total(raw in "\\PC{0,60}") {
        let _ = coerce(&raw);
    }

    #[test]
    fn prop_parse_is_idempotent(text in text_strategy()) {
        let once = loads(&text);
        let twice = loads(&dumps(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_written_text_is_a_fixed_point(text in text_strategy()) {
        let written = dumps(&loads(&text));
        prop_assert_eq!(dumps(&loads(&written)), written);
    }

    #[test]
    fn prop_canonical_form_reads_back(value in value_strategy()) {
        prop_assert_eq!(coerce(&value.to_string()), value);
    }

    #[test]
    fn prop_mapping_view_round_trip(top in map_strategy(), section in map_strategy()) {
        let mut map = top;
        map.insert("zz_section".to_string(), IniValue::Map(section));

        prop_assert_eq!(loads_map(&dumps_map(&map)), map);
    }

    #[test]
    fn prop_struct_round_trip(value in outer_strategy()) {
        let text = to_string(&value).unwrap();
        let back: Outer = from_str(&text).unwrap();
        prop_assert_eq!(back, value);
    }
}
