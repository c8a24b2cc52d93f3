//! Ordered map type for the nested-mapping view of a document.
//!
//! [`IniMap`] wraps [`IndexMap`] so that sections and keys come back out in the
//! order they were read. A flattened document is one `IniMap` whose entries are
//! either plain values (keys of the default section) or [`IniValue::Map`]s
//! (explicit sections).
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{loads_map, IniValue};
//!
//! let map = loads_map("debug = true\n[server]\nport = 8080");
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["debug", "server"]);
//! assert_eq!(map.get("debug"), Some(&IniValue::Bool(true)));
//! ```

use crate::IniValue;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to INI values.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{IniMap, IniValue};
///
/// let mut map = IniMap::new();
/// map.insert("first".to_string(), IniValue::from(1));
/// map.insert("second".to_string(), IniValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniMap(IndexMap<String, IniValue>);

impl IniMap {
    #[must_use]
    pub fn new() -> Self {
        IniMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IniMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// An existing key keeps its position and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{IniMap, IniValue};
    ///
    /// let mut map = IniMap::new();
    /// assert!(map.insert("key".to_string(), IniValue::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), IniValue::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: IniValue) -> Option<IniValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&IniValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut IniValue> {
        self.0.get_mut(key)
    }

    /// Removes a key, shifting later entries down so order is kept.
    pub fn remove(&mut self, key: &str) -> Option<IniValue> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, IniValue> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, IniValue> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, IniValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, IniValue>> for IniMap {
    fn from(map: HashMap<String, IniValue>) -> Self {
        IniMap(map.into_iter().collect())
    }
}

impl From<IniMap> for HashMap<String, IniValue> {
    fn from(map: IniMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for IniMap {
    type Item = (String, IniValue);
    type IntoIter = indexmap::map::IntoIter<String, IniValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IniMap {
    type Item = (&'a String, &'a IniValue);
    type IntoIter = indexmap::map::Iter<'a, String, IniValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, IniValue)> for IniMap {
    fn from_iter<T: IntoIterator<Item = (String, IniValue)>>(iter: T) -> Self {
        IniMap(IndexMap::from_iter(iter))
    }
}
