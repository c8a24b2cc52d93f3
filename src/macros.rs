/// Builds an [`IniValue`](crate::IniValue) with literal-like syntax.
///
/// Objects become [`IniValue::Map`](crate::IniValue::Map), so a top-level
/// object of objects is a whole file in the mapping view.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{dumps_map, ini};
///
/// let config = ini!({
///     "debug": false,
///     "server": { "hosts": ["a", "b"], "port": 8080 }
/// });
///
/// let text = dumps_map(config.as_map().unwrap());
/// assert_eq!(text, "debug = false\n[server]\nhosts = [\"a\", \"b\"]\nport = 8080");
/// ```
#[macro_export]
macro_rules! ini {
    (null) => {
        $crate::IniValue::Null
    };

    (true) => {
        $crate::IniValue::Bool(true)
    };

    (false) => {
        $crate::IniValue::Bool(false)
    };

    ([]) => {
        $crate::IniValue::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::IniValue::List(vec![$($crate::ini!($elem)),*])
    };

    ({}) => {
        $crate::IniValue::Map($crate::IniMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::IniMap::new();
        $(
            map.insert($key.to_string(), $crate::ini!($value));
        )*
        $crate::IniValue::Map(map)
    }};

    // Anything else goes through Serialize
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::IniValue::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{IniMap, IniValue, Number};

    #[test]
    fn test_ini_macro_primitives() {
        assert_eq!(ini!(null), IniValue::Null);
        assert_eq!(ini!(true), IniValue::Bool(true));
        assert_eq!(ini!(42), IniValue::Number(Number::Integer(42)));
        assert_eq!(ini!(3.5), IniValue::Number(Number::Float(3.5)));
        assert_eq!(ini!("hello"), IniValue::String("hello".to_string()));
    }

    #[test]
    fn test_ini_macro_nested() {
        assert_eq!(ini!({}), IniValue::Map(IniMap::new()));

        let value = ini!({ "section": { "list": [1, [2, 3]] } });
        assert_eq!(value.to_string(), "{\"section\": {\"list\": [1, [2, 3]]}}");
    }
}
