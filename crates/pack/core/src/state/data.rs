//! Opaque per-instance data bags.
//!
//! Items and skills carry a keyed bag of designer/runtime values (`uses`,
//! `charge`, `total_charge`, ...). Components read it freely and write it
//! only through [`crate::action::Action::SetObjData`] or the charge actions.

use std::collections::BTreeMap;

/// A single value stored in a [`DataBag`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataValue {
    Int(i64),
    Bool(bool),
    Text(String),
    List(Vec<DataValue>),
}

impl DataValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for DataValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Keyed data owned by one item or skill instance.
///
/// Ordered by key so that serialized snapshots are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DataBag {
    entries: BTreeMap<String, DataValue>,
}

impl DataBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.entries.get(key)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(DataValue::as_int)
    }

    /// Integer lookup with a fallback for absent or mistyped keys.
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.int(key).unwrap_or(default)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(DataValue::as_bool).unwrap_or(false)
    }

    /// Writes a value and returns the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Option<DataValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Writes a value only when the key is absent; existing saved values win.
    pub fn set_default(&mut self, key: &str, value: impl Into<DataValue>) {
        self.entries
            .entry(key.to_owned())
            .or_insert_with(|| value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<DataValue> {
        self.entries.remove(key)
    }

    /// Restores a previous value (or absence) recorded for undo.
    pub fn restore(&mut self, key: &str, previous: Option<DataValue>) {
        match previous {
            Some(value) => {
                self.entries.insert(key.to_owned(), value);
            }
            None => {
                self.entries.remove(key);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn with(mut self, key: &str, value: impl Into<DataValue>) -> Self {
        self.set(key, value);
        self
    }
}
