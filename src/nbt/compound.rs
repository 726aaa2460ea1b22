use crate::nbt::Tag;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named collection of tags, the compound node of the tree.
///
/// Typed accessors treat a key of the wrong type the same as a missing
/// key, so callers probe presence by name *and* type in one step.
///
/// # Examples
///
/// ```
/// use playerdata::nbt::{Tag, TagCompound};
///
/// let mut root = TagCompound::new();
/// root.insert_string("lastKnownName", "Alex");
/// root.insert_long("lastPlayed", 1000);
///
/// assert_eq!(root.get_string("lastKnownName"), Some("Alex"));
/// assert_eq!(root.get_long("lastPlayed"), Some(1000));
/// // wrong type reads as absent
/// assert_eq!(root.get_int("lastPlayed"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagCompound {
    entries: HashMap<String, Tag>,
}

impl TagCompound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Tag::as_str)
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(Tag::as_i32)
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Tag::as_i64)
    }

    pub fn get_compound(&self, key: &str) -> Option<&TagCompound> {
        self.get(key).and_then(Tag::as_compound)
    }

    /// Inserts a tag, replacing any prior value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, tag: Tag) {
        self.entries.insert(key.into(), tag);
    }

    pub fn insert_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, Tag::String(value.into()));
    }

    pub fn insert_int(&mut self, key: impl Into<String>, value: i32) {
        self.insert(key, Tag::Int(value));
    }

    pub fn insert_long(&mut self, key: impl Into<String>, value: i64) {
        self.insert(key, Tag::Long(value));
    }

    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.remove(key)
    }
}
