//! Specialized collection types
//!
//! Both the document tree and the object graph live in slot-map arenas and
//! refer to each other through stable keys. Identity of a structure or an
//! object is identity of its key.

pub use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a domain object inside an [`ObjectStore`](crate::scene::ObjectStore)
    pub struct ObjectHandle;

    /// Stable key of a structure node inside a [`Document`](crate::document::Document)
    pub struct StructureKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;
