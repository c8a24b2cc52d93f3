use serde_ini::{dumps_map, ini, loads_map, IniMap, IniValue, Number};

#[test]
fn test_ini_macro_null() {
    assert_eq!(ini!(null), IniValue::Null);
}

#[test]
fn test_ini_macro_booleans() {
    assert_eq!(ini!(true), IniValue::Bool(true));
    assert_eq!(ini!(false), IniValue::Bool(false));
}

#[test]
fn test_ini_macro_numbers() {
    assert_eq!(ini!(42), IniValue::Number(Number::Integer(42)));
    assert_eq!(ini!(3.5), IniValue::Number(Number::Float(3.5)));
    assert_eq!(ini!(-123), IniValue::Number(Number::Integer(-123)));
    assert!(ini!(u64::MAX).is_bigint());
}

#[test]
fn test_ini_macro_strings() {
    assert_eq!(ini!("hello world"), IniValue::String("hello world".to_string()));
    assert_eq!(ini!(""), IniValue::String(String::new()));
}

#[test]
fn test_ini_macro_lists() {
    assert_eq!(ini!([]), IniValue::List(vec![]));

    let mixed = ini!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        IniValue::List(vec![
            IniValue::Number(Number::Integer(1)),
            IniValue::String("hello".to_string()),
            IniValue::Bool(true),
            IniValue::Null,
        ])
    );
}

#[test]
fn test_ini_macro_maps() {
    assert_eq!(ini!({}), IniValue::Map(IniMap::new()));

    let map = ini!({ "name": "Alice", "age": 30 });
    let map = map.as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("name"), Some(&IniValue::String("Alice".to_string())));
    assert_eq!(map.get("age"), Some(&IniValue::Number(Number::Integer(30))));
}

#[test]
fn test_ini_macro_whole_file() {
    let file = ini!({
        "title": "demo",
        "database": {
            "hosts": ["db1", "db2"],
            "pool": 4,
            "timeouts": { "connect": 1.5 }
        }
    });
    let map = file.as_map().unwrap();

    let text = dumps_map(map);
    assert_eq!(
        text,
        "title = demo\n[database]\nhosts = [\"db1\", \"db2\"]\npool = 4\ntimeouts = {\"connect\": 1.5}"
    );
    assert_eq!(&loads_map(&text), map);
}

#[test]
fn test_value_methods() {
    let null = ini!(null);
    assert!(null.is_null());
    assert!(!null.is_bool());
    assert!(!null.is_number());
    assert!(!null.is_string());
    assert!(!null.is_list());
    assert!(!null.is_map());

    assert_eq!(ini!(true).as_bool(), Some(true));
    assert_eq!(ini!("hello").as_str(), Some("hello"));
    assert_eq!(ini!([1, 2, 3]).as_list().map(Vec::len), Some(3));
    assert_eq!(ini!(7).as_i64(), Some(7));
    assert_eq!(ini!(7).as_f64(), Some(7.0));
}
