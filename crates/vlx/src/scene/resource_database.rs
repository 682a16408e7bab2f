//! Top-level resource container

use crate::foundation::collections::ObjectHandle;

/// Ordered collection of root objects, the unit a document holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDatabase {
    /// Root resources in document order
    pub resources: Vec<ObjectHandle>,
}

impl ResourceDatabase {
    /// Empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource
    pub fn push(&mut self, handle: ObjectHandle) {
        self.resources.push(handle);
    }
}
