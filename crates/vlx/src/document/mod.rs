//! Document tree
//!
//! The in-memory form of a VLX text document. Structures live in an arena
//! owned by the [`Document`] and are referenced by [`StructureKey`]; two values
//! holding the same key refer to the same structure, which is how sharing and
//! cycles are expressed once UID references have been linked.

mod value;

pub use value::{ArrayInteger, ArrayReal, List, RawtextBlock, Value, ValueData, ValueKind};

use crate::foundation::collections::{HandleMap, StructureKey};

/// One `Key = Value` entry of a structure
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    /// Field name
    pub key: String,
    /// Field value
    pub value: Value,
}

impl KeyValue {
    /// Create an entry
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self { key: key.into(), value }
    }
}

/// Tagged, ordered key/value record
///
/// Lookup is a linear scan and the first matching key wins; insertion order
/// is kept so that a document prints back in the order it was built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    tag: String,
    uid: Option<String>,
    line_number: usize,
    entries: Vec<KeyValue>,
}

impl Structure {
    /// Create an empty structure with the given `<Tag>`
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder-style UID assignment
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Builder-style source line
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    /// Type tag, e.g. `<vl::Actor>`
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Document-unique id, `#...`
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Replace the UID
    pub fn set_uid(&mut self, uid: Option<String>) {
        self.uid = uid;
    }

    /// Line of the opening tag
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[KeyValue] {
        &self.entries
    }

    /// Mutable entries
    pub fn entries_mut(&mut self) -> &mut [KeyValue] {
        &mut self.entries
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|entry| entry.key == key).map(|entry| &entry.value)
    }

    /// Append an entry
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push(KeyValue::new(key, value));
    }

    /// Append several entries
    pub fn extend(&mut self, entries: impl IntoIterator<Item = KeyValue>) {
        self.entries.extend(entries);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the structure has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Arena of structures making up one document
#[derive(Debug, Default)]
pub struct Document {
    structures: HandleMap<StructureKey, Structure>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            structures: HandleMap::with_key(),
        }
    }

    /// Add a structure and return its key
    pub fn insert(&mut self, structure: Structure) -> StructureKey {
        self.structures.insert(structure)
    }

    /// Structure stored under `key`
    pub fn structure(&self, key: StructureKey) -> Option<&Structure> {
        self.structures.get(key)
    }

    /// Mutable structure stored under `key`
    pub fn structure_mut(&mut self, key: StructureKey) -> Option<&mut Structure> {
        self.structures.get_mut(key)
    }

    /// Find the structure carrying `uid`
    pub fn find_by_uid(&self, uid: &str) -> Option<StructureKey> {
        self.structures
            .iter()
            .find(|(_, structure)| structure.uid() == Some(uid))
            .map(|(key, _)| key)
    }

    /// Keys of every structure
    pub fn keys(&self) -> impl Iterator<Item = StructureKey> + '_ {
        self.structures.keys()
    }

    /// Iterate over every structure
    pub fn iter(&self) -> impl Iterator<Item = (StructureKey, &Structure)> {
        self.structures.iter()
    }

    /// Number of structures
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    /// True when the document holds no structures
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}
