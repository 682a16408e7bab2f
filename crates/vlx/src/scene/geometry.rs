//! Geometry and vertex attribute records

use std::collections::BTreeMap;

use super::bounds::Bounds;
use super::enums::VertexAttribInterpretation;
use crate::foundation::collections::ObjectHandle;

/// Number of `TexCoordArray{N}` slots
pub const MAX_TEX_COORD_ARRAYS: u32 = 10;

/// Number of `VertexAttribArray{N}` slots
pub const MAX_VERTEX_ATTRIB_ARRAYS: u32 = 16;

/// State shared by every renderable
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    /// Optional object name
    pub object_name: String,
    /// Upload vertex data into buffer objects
    pub buffer_object_enabled: bool,
    /// Compile into a display list
    pub display_list_enabled: bool,
    /// Cached bounds
    pub bounds: Bounds,
}

impl Default for Renderable {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            buffer_object_enabled: true,
            display_list_enabled: false,
            bounds: Bounds::default(),
        }
    }
}

/// Vertex arrays plus the draw calls that consume them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    /// Shared renderable state
    pub renderable: Renderable,
    /// Positions
    pub vertex_array: Option<ObjectHandle>,
    /// Normals
    pub normal_array: Option<ObjectHandle>,
    /// Colors
    pub color_array: Option<ObjectHandle>,
    /// Secondary colors
    pub secondary_color_array: Option<ObjectHandle>,
    /// Fog coordinates
    pub fog_coord_array: Option<ObjectHandle>,
    /// Texture coordinate arrays by unit
    pub tex_coord_arrays: BTreeMap<u32, ObjectHandle>,
    /// Generic attributes by location, each a [`VertexAttribInfo`]
    pub vertex_attrib_arrays: BTreeMap<u32, ObjectHandle>,
    /// Draw calls in submission order
    pub draw_calls: Vec<ObjectHandle>,
}

impl Geometry {
    /// Create an empty geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style object name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.renderable.object_name = name.into();
        self
    }
}

/// Generic vertex attribute binding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexAttribInfo {
    /// Attribute data array
    pub data: Option<ObjectHandle>,
    /// Normalize integer data
    pub normalize: bool,
    /// How the shader sees the data
    pub interpretation: VertexAttribInterpretation,
}
