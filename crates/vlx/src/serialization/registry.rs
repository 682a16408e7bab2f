//! Codec registry
//!
//! Maps runtime type names to codecs for export and structure tags to codecs
//! for import. A tag is the type name wrapped in angle brackets.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::Result;
use super::session::{ExportSession, ImportSession};
use crate::document::Structure;
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::Object;

/// Converts one family of record types to and from structures
///
/// Codecs are stateless; all traversal state lives in the session.
pub trait Codec: Send + Sync {
    /// Decode the structure at `key` into a new object
    ///
    /// The codec must register the object with
    /// [`ImportSession::register`] before decoding any field that may
    /// reference back to it.
    fn decode(&self, session: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle>;

    /// Encode the object at `handle` into a new structure
    ///
    /// The codec must register the structure with
    /// [`ExportSession::register`] before encoding any field.
    fn encode(&self, session: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey>;
}

/// Build the import tag of a type name
pub fn tag_for(type_name: &str) -> String {
    format!("<{type_name}>")
}

/// Lookup tables from type names and tags to codecs
#[derive(Clone, Default)]
pub struct Registry {
    export_map: HashMap<String, Arc<dyn Codec>>,
    import_map: HashMap<String, Arc<dyn Codec>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in codec
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        super::codecs::register_defaults(&mut registry);
        registry
    }

    /// Register `codec` for `type_name`; a later registration replaces an earlier one
    pub fn register(&mut self, type_name: &str, codec: Arc<dyn Codec>) {
        self.export_map.insert(type_name.to_string(), Arc::clone(&codec));
        self.import_map.insert(tag_for(type_name), codec);
    }

    /// Register one codec for several type names
    pub fn register_all<'a>(&mut self, type_names: impl IntoIterator<Item = &'a str>, codec: &Arc<dyn Codec>) {
        for type_name in type_names {
            self.register(type_name, Arc::clone(codec));
        }
    }

    /// True when `object` has an export codec
    pub fn can_export(&self, object: &Object) -> bool {
        self.export_map.contains_key(object.type_name())
    }

    /// True when `structure` has an import codec
    pub fn can_import(&self, structure: &Structure) -> bool {
        self.import_map.contains_key(structure.tag())
    }

    /// Export codec for `object`
    pub fn resolve_export(&self, object: &Object) -> Option<&dyn Codec> {
        self.export_map.get(object.type_name()).map(AsRef::as_ref)
    }

    /// Import codec for `tag`
    pub fn resolve_import(&self, tag: &str) -> Option<&dyn Codec> {
        self.import_map.get(tag).map(AsRef::as_ref)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.export_map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered type names
    pub fn len(&self) -> usize {
        self.export_map.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.export_map.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("types", &self.type_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Actor, SceneObject, Transform};

    #[test]
    fn test_defaults_cover_builtin_types() {
        let registry = Registry::with_defaults();
        assert!(registry.can_export(&Actor::default().into_object()));
        assert!(registry.can_import(&Structure::new("<vl::ArrayFloat3>")));
        assert!(registry.can_import(&Structure::new("<vl::MultiDrawElementsUByte>")));
        assert!(registry.can_import(&Structure::new("<vl::ResourceDatabase>")));
        assert!(!registry.can_import(&Structure::new("vl::Actor")));
        assert!(registry.resolve_import("<vl::Teapot>").is_none());
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve_export(&Transform::new().into_object()).is_none());
        assert_eq!(tag_for("vl::Transform"), "<vl::Transform>");
    }
}
