//! Transform hierarchy nodes

use crate::foundation::collections::ObjectHandle;
use crate::foundation::math::Mat4;

/// Node of the transform hierarchy
///
/// Children are handles, so a hierarchy may share nodes or even contain a
/// node among its own children; the serializer preserves both.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Optional object name
    pub object_name: String,
    /// Matrix relative to the parent
    pub local_matrix: Mat4,
    /// Child nodes
    pub children: Vec<ObjectHandle>,
}

impl Transform {
    /// Identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform with the given local matrix
    pub fn from_matrix(local_matrix: Mat4) -> Self {
        Self {
            local_matrix,
            ..Self::default()
        }
    }

    /// Append a child
    pub fn add_child(&mut self, child: ObjectHandle) {
        self.children.push(child);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            local_matrix: Mat4::identity(),
            children: Vec::new(),
        }
    }
}
