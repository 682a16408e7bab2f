//! Draw calls and patch parameters

use super::type_name_of;
use crate::document::{Structure, Value};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::enums::PrimitiveType;
use crate::scene::{BufferArray, DrawCall, DrawCallKind, IndexWidth, PatchParameter};
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::DrawArrays`, `vl::DrawElements*` and `vl::MultiDrawElements*`
#[derive(Debug, Default)]
pub struct DrawCallCodec;

/// `vl::PatchParameter`
#[derive(Debug, Default)]
pub struct PatchParameterCodec;

/// Import `IndexBuffer` and check its layout against the index width
fn index_buffer(s: &mut ImportSession<'_>, structure: &Structure, width: IndexWidth) -> Result<Option<ObjectHandle>> {
    let Some(handle) = s.read_ref::<BufferArray>(structure, "IndexBuffer")? else {
        return Ok(None);
    };
    let found = s
        .store()
        .get::<BufferArray>(handle)
        .map_or("nothing", BufferArray::type_name);
    if found == width.index_buffer_type() {
        return Ok(Some(handle));
    }
    let line = structure.get("IndexBuffer").map_or(0, Value::line_number);
    s.report(VlxError::WrongReference {
        key: "IndexBuffer".to_string(),
        expected: width.index_buffer_type().to_string(),
        found: found.to_string(),
        line,
    })?;
    Ok(None)
}

impl Codec for DrawCallCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let Some(mut draw_call) = DrawCall::for_type_name(type_name_of(structure.tag())) else {
            return Err(VlxError::UnknownTag {
                tag: structure.tag().to_string(),
                line: structure.line_number(),
            });
        };
        let handle = s.register(key, draw_call.clone());

        match structure.get("PrimitiveType") {
            Some(value) => {
                if let Some(primitive_type) = s.check(fields::required_enumeration::<PrimitiveType>("PrimitiveType", value))? {
                    draw_call.primitive_type = primitive_type;
                }
            }
            None => s.report(VlxError::Check {
                condition: "PrimitiveType present".to_string(),
                line: structure.line_number(),
            })?,
        }
        if let Some(enabled) = s.read(structure, "Enabled", fields::boolean)? {
            draw_call.enabled = enabled;
        }
        draw_call.patch_parameter = s.read_ref::<PatchParameter>(structure, "PatchParameter")?;

        match &mut draw_call.kind {
            DrawCallKind::Arrays { start, count, instances } => {
                if let Some(value) = s.read(structure, "Start", fields::int32)? {
                    *start = value;
                }
                if let Some(value) = s.read(structure, "Count", fields::int32)? {
                    *count = value;
                }
                if let Some(value) = s.read(structure, "Instances", fields::int32)? {
                    *instances = value;
                }
            }
            DrawCallKind::Elements {
                width,
                index_buffer: buffer,
                base_vertex,
                primitive_restart_enabled,
                instances,
            } => {
                *buffer = index_buffer(s, structure, *width)?;
                if let Some(value) = s.read(structure, "BaseVertex", fields::int32)? {
                    *base_vertex = value;
                }
                if let Some(value) = s.read(structure, "PrimitiveRestartEnabled", fields::boolean)? {
                    *primitive_restart_enabled = value;
                }
                if let Some(value) = s.read(structure, "Instances", fields::int32)? {
                    *instances = value;
                }
            }
            DrawCallKind::MultiElements {
                width,
                index_buffer: buffer,
                count_vector,
                base_vertices,
                primitive_restart_enabled,
            } => {
                *buffer = index_buffer(s, structure, *width)?;
                if let Some(value) = s.read(structure, "CountVector", fields::integers32)? {
                    *count_vector = value;
                }
                if let Some(value) = s.read(structure, "BaseVertices", fields::integers32)? {
                    *base_vertices = value;
                }
                if let Some(value) = s.read(structure, "PrimitiveRestartEnabled", fields::boolean)? {
                    *primitive_restart_enabled = value;
                }
            }
        }

        s.finalize(handle, draw_call);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let draw_call = s.object::<DrawCall>(handle)?;
        let key = s.register(handle, draw_call.type_name(), "drawcall_");

        let mut entries = Entries::new();
        entries
            .push("PrimitiveType", fields::enum_value(draw_call.primitive_type))
            .push("Enabled", Value::boolean(draw_call.enabled));
        entries.push_opt("PatchParameter", s.export_field(draw_call.patch_parameter)?);

        match &draw_call.kind {
            DrawCallKind::Arrays { start, count, instances } => {
                entries
                    .push("Start", Value::integer(i64::from(*start)))
                    .push("Count", Value::integer(i64::from(*count)))
                    .push("Instances", Value::integer(i64::from(*instances)));
            }
            DrawCallKind::Elements {
                index_buffer,
                base_vertex,
                primitive_restart_enabled,
                instances,
                ..
            } => {
                entries.push_opt("IndexBuffer", s.export_field(*index_buffer)?);
                entries
                    .push("BaseVertex", Value::integer(i64::from(*base_vertex)))
                    .push("PrimitiveRestartEnabled", Value::boolean(*primitive_restart_enabled))
                    .push("Instances", Value::integer(i64::from(*instances)));
            }
            DrawCallKind::MultiElements {
                index_buffer,
                count_vector,
                base_vertices,
                primitive_restart_enabled,
                ..
            } => {
                entries.push_opt("IndexBuffer", s.export_field(*index_buffer)?);
                entries
                    .push("CountVector", fields::integers_value(count_vector))
                    .push("BaseVertices", fields::integers_value(base_vertices))
                    .push("PrimitiveRestartEnabled", Value::boolean(*primitive_restart_enabled));
            }
        }

        s.fill(key, entries)
    }
}

impl Codec for PatchParameterCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, PatchParameter::default());
        let mut patch = PatchParameter::default();

        if let Some(vertices) = s.read(structure, "PatchVertices", fields::int32)? {
            patch.patch_vertices = vertices;
        }
        if let Some(level) = s.read(structure, "PatchDefaultOuterLevel", fields::vec4)? {
            patch.default_outer_level = level;
        }
        if let Some(level) = s.read(structure, "PatchDefaultInnerLevel", fields::vec2)? {
            patch.default_inner_level = level;
        }

        s.finalize(handle, patch);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let patch = s.object::<PatchParameter>(handle)?;
        let key = s.register(handle, "vl::PatchParameter", "patchparameter_");

        let mut entries = Entries::new();
        entries
            .push("PatchVertices", Value::integer(i64::from(patch.patch_vertices)))
            .push("PatchDefaultOuterLevel", fields::vec4_value(&patch.default_outer_level))
            .push("PatchDefaultInnerLevel", fields::vec2_value(&patch.default_inner_level));

        s.fill(key, entries)
    }
}
