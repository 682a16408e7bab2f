//! Draw calls and tessellation patch parameters

use super::array::ScalarType;
use super::enums::PrimitiveType;
use crate::foundation::collections::ObjectHandle;
use crate::foundation::math::{Vec2, Vec4};

/// Index width of an indexed draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexWidth {
    /// u32 indices
    UInt,
    /// u16 indices
    UShort,
    /// u8 indices
    UByte,
}

impl IndexWidth {
    /// Scalar type the index buffer must have
    pub fn scalar(self) -> ScalarType {
        match self {
            IndexWidth::UInt => ScalarType::UInt,
            IndexWidth::UShort => ScalarType::UShort,
            IndexWidth::UByte => ScalarType::UByte,
        }
    }

    /// Type name the index buffer must have
    pub fn index_buffer_type(self) -> &'static str {
        match self {
            IndexWidth::UInt => "vl::ArrayUInt1",
            IndexWidth::UShort => "vl::ArrayUShort1",
            IndexWidth::UByte => "vl::ArrayUByte1",
        }
    }
}

/// Variant-specific draw call state
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCallKind {
    /// Non-indexed range of vertices
    Arrays {
        /// First vertex
        start: i32,
        /// Vertex count
        count: i32,
        /// Instance count
        instances: i32,
    },
    /// Indexed draw
    Elements {
        /// Index width
        width: IndexWidth,
        /// Index array
        index_buffer: Option<ObjectHandle>,
        /// Added to every index
        base_vertex: i32,
        /// Primitive restart on the maximum index
        primitive_restart_enabled: bool,
        /// Instance count
        instances: i32,
    },
    /// Several indexed draws sharing one index buffer
    MultiElements {
        /// Index width
        width: IndexWidth,
        /// Index array
        index_buffer: Option<ObjectHandle>,
        /// Index count of each draw
        count_vector: Vec<i32>,
        /// Base vertex of each draw
        base_vertices: Vec<i32>,
        /// Primitive restart on the maximum index
        primitive_restart_enabled: bool,
    },
}

/// One draw command of a geometry
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Primitive assembly mode
    pub primitive_type: PrimitiveType,
    /// Skipped when false
    pub enabled: bool,
    /// Tessellation parameters for `PT_PATCHES`
    pub patch_parameter: Option<ObjectHandle>,
    /// Variant state
    pub kind: DrawCallKind,
}

impl DrawCall {
    /// Non-indexed draw of `count` vertices from `start`
    pub fn arrays(primitive_type: PrimitiveType, start: i32, count: i32) -> Self {
        Self::with_kind(
            primitive_type,
            DrawCallKind::Arrays {
                start,
                count,
                instances: 1,
            },
        )
    }

    /// Indexed draw
    pub fn elements(primitive_type: PrimitiveType, width: IndexWidth, index_buffer: Option<ObjectHandle>) -> Self {
        Self::with_kind(
            primitive_type,
            DrawCallKind::Elements {
                width,
                index_buffer,
                base_vertex: 0,
                primitive_restart_enabled: false,
                instances: 1,
            },
        )
    }

    /// Multi-draw sharing one index buffer
    pub fn multi_elements(primitive_type: PrimitiveType, width: IndexWidth, index_buffer: Option<ObjectHandle>) -> Self {
        Self::with_kind(
            primitive_type,
            DrawCallKind::MultiElements {
                width,
                index_buffer,
                count_vector: Vec::new(),
                base_vertices: Vec::new(),
                primitive_restart_enabled: false,
            },
        )
    }

    fn with_kind(primitive_type: PrimitiveType, kind: DrawCallKind) -> Self {
        Self {
            primitive_type,
            enabled: true,
            patch_parameter: None,
            kind,
        }
    }

    /// Resolve a draw call type name to an empty draw call of that variant
    pub fn for_type_name(type_name: &str) -> Option<Self> {
        let unknown = PrimitiveType::Unknown;
        let draw_call = match type_name {
            "vl::DrawArrays" => Self::arrays(unknown, 0, 0),
            "vl::DrawElementsUInt" => Self::elements(unknown, IndexWidth::UInt, None),
            "vl::DrawElementsUShort" => Self::elements(unknown, IndexWidth::UShort, None),
            "vl::DrawElementsUByte" => Self::elements(unknown, IndexWidth::UByte, None),
            "vl::MultiDrawElementsUInt" => Self::multi_elements(unknown, IndexWidth::UInt, None),
            "vl::MultiDrawElementsUShort" => Self::multi_elements(unknown, IndexWidth::UShort, None),
            "vl::MultiDrawElementsUByte" => Self::multi_elements(unknown, IndexWidth::UByte, None),
            _ => return None,
        };
        Some(draw_call)
    }

    /// Type name of the variant
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            DrawCallKind::Arrays { .. } => "vl::DrawArrays",
            DrawCallKind::Elements { width, .. } => match width {
                IndexWidth::UInt => "vl::DrawElementsUInt",
                IndexWidth::UShort => "vl::DrawElementsUShort",
                IndexWidth::UByte => "vl::DrawElementsUByte",
            },
            DrawCallKind::MultiElements { width, .. } => match width {
                IndexWidth::UInt => "vl::MultiDrawElementsUInt",
                IndexWidth::UShort => "vl::MultiDrawElementsUShort",
                IndexWidth::UByte => "vl::MultiDrawElementsUByte",
            },
        }
    }

    /// Index buffer of an indexed draw call
    pub fn index_buffer(&self) -> Option<ObjectHandle> {
        match &self.kind {
            DrawCallKind::Arrays { .. } => None,
            DrawCallKind::Elements { index_buffer, .. } | DrawCallKind::MultiElements { index_buffer, .. } => {
                *index_buffer
            }
        }
    }
}

/// Every draw call type name
pub const DRAW_CALL_TYPE_NAMES: [&str; 7] = [
    "vl::DrawArrays",
    "vl::DrawElementsUInt",
    "vl::DrawElementsUShort",
    "vl::DrawElementsUByte",
    "vl::MultiDrawElementsUInt",
    "vl::MultiDrawElementsUShort",
    "vl::MultiDrawElementsUByte",
];

/// Tessellation defaults for patch draw calls
#[derive(Debug, Clone, PartialEq)]
pub struct PatchParameter {
    /// Vertices per patch
    pub patch_vertices: i32,
    /// Outer tessellation level used without a control shader
    pub default_outer_level: Vec4,
    /// Inner tessellation level used without a control shader
    pub default_inner_level: Vec2,
}

impl Default for PatchParameter {
    fn default() -> Self {
        Self {
            patch_vertices: 3,
            default_outer_level: Vec4::new(1.0, 1.0, 1.0, 1.0),
            default_inner_level: Vec2::new(1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_match_variants() {
        for name in DRAW_CALL_TYPE_NAMES {
            let draw_call = DrawCall::for_type_name(name).unwrap();
            assert_eq!(draw_call.type_name(), name);
            assert!(draw_call.enabled);
        }
        assert!(DrawCall::for_type_name("vl::DrawPixels").is_none());
    }

    #[test]
    fn test_index_buffer_type() {
        assert_eq!(IndexWidth::UShort.index_buffer_type(), "vl::ArrayUShort1");
        assert_eq!(IndexWidth::UByte.scalar(), ScalarType::UByte);
        assert!(DrawCall::arrays(PrimitiveType::Lines, 0, 2).index_buffer().is_none());
    }
}
