//! Geometries, their renderable base and vertex attribute slots

use crate::document::{Structure, Value};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::geometry::{MAX_TEX_COORD_ARRAYS, MAX_VERTEX_ATTRIB_ARRAYS};
use crate::scene::{BufferArray, DrawCall, Geometry, Renderable, VertexAttribInfo};
use crate::serialization::error::Result;
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Geometry`
#[derive(Debug, Default)]
pub struct GeometryCodec;

/// `vl::VertexAttribInfo`
#[derive(Debug, Default)]
pub struct VertexAttribInfoCodec;

/// Shared renderable fields; decoded bounds are marked clean
pub(super) fn decode_renderable(
    s: &mut ImportSession<'_>,
    structure: &Structure,
    renderable: &mut Renderable,
) -> Result<()> {
    let document = s.document();
    if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
        renderable.object_name = name;
    }
    if let Some(enabled) = s.read(structure, "BufferObjectEnabled", fields::boolean)? {
        renderable.buffer_object_enabled = enabled;
    }
    if let Some(enabled) = s.read(structure, "DisplayListEnabled", fields::boolean)? {
        renderable.display_list_enabled = enabled;
    }
    if let Some(aabb) = s.read(structure, "AABB", |key, value| fields::aabb(document, key, value))? {
        renderable.bounds.set_aabb(aabb);
    }
    if let Some(sphere) = s.read(structure, "BoundingSphere", |key, value| fields::sphere(document, key, value))? {
        renderable.bounds.set_sphere(sphere);
    }
    Ok(())
}

/// Shared renderable fields; dirty bounds are not written
pub(super) fn encode_renderable(
    s: &mut ExportSession<'_>,
    entries: &mut Entries,
    renderable: &Renderable,
    type_name: &str,
) -> Result<()> {
    entries
        .object_name(&renderable.object_name, type_name)
        .push("BufferObjectEnabled", Value::boolean(renderable.buffer_object_enabled))
        .push("DisplayListEnabled", Value::boolean(renderable.display_list_enabled));
    if !renderable.bounds.is_dirty() {
        let aabb = s.new_inline_structure("<vl::AABB>", fields::aabb_entries(renderable.bounds.aabb()))?;
        let sphere = s.new_inline_structure("<vl::Sphere>", fields::sphere_entries(renderable.bounds.sphere()))?;
        entries.push("AABB", aabb).push("BoundingSphere", sphere);
    }
    Ok(())
}

impl Codec for GeometryCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Geometry::new());
        let mut geometry = Geometry::new();

        decode_renderable(s, structure, &mut geometry.renderable)?;
        geometry.vertex_array = s.read_ref::<BufferArray>(structure, "VertexArray")?;
        geometry.normal_array = s.read_ref::<BufferArray>(structure, "NormalArray")?;
        geometry.color_array = s.read_ref::<BufferArray>(structure, "ColorArray")?;
        geometry.secondary_color_array = s.read_ref::<BufferArray>(structure, "SecondaryColorArray")?;
        geometry.fog_coord_array = s.read_ref::<BufferArray>(structure, "FogCoordArray")?;

        for unit in 0..MAX_TEX_COORD_ARRAYS {
            if let Some(array) = s.read_ref::<BufferArray>(structure, &format!("TexCoordArray{unit}"))? {
                geometry.tex_coord_arrays.insert(unit, array);
            }
        }
        for location in 0..MAX_VERTEX_ATTRIB_ARRAYS {
            if let Some(info) = s.read_ref::<VertexAttribInfo>(structure, &format!("VertexAttribArray{location}"))? {
                geometry.vertex_attrib_arrays.insert(location, info);
            }
        }
        if let Some(draw_calls) = s.read_refs::<DrawCall>(structure, "DrawCalls")? {
            geometry.draw_calls = draw_calls;
        }

        s.finalize(handle, geometry);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let geometry = s.object::<Geometry>(handle)?;
        let key = s.register(handle, "vl::Geometry", "geometry_");

        let mut entries = Entries::new();
        encode_renderable(s, &mut entries, &geometry.renderable, "vl::Geometry")?;
        entries.push_opt("VertexArray", s.export_field(geometry.vertex_array)?);
        entries.push_opt("NormalArray", s.export_field(geometry.normal_array)?);
        entries.push_opt("ColorArray", s.export_field(geometry.color_array)?);
        entries.push_opt("SecondaryColorArray", s.export_field(geometry.secondary_color_array)?);
        entries.push_opt("FogCoordArray", s.export_field(geometry.fog_coord_array)?);
        for (unit, array) in &geometry.tex_coord_arrays {
            entries.push_opt(format!("TexCoordArray{unit}"), s.export_field(Some(*array))?);
        }
        for (location, info) in &geometry.vertex_attrib_arrays {
            entries.push_opt(format!("VertexAttribArray{location}"), s.export_field(Some(*info))?);
        }
        entries.push("DrawCalls", s.export_list(&geometry.draw_calls)?);

        s.fill(key, entries)
    }
}

impl Codec for VertexAttribInfoCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, VertexAttribInfo::default());
        let mut info = VertexAttribInfo::default();

        info.data = s.read_ref::<BufferArray>(structure, "Data")?;
        if let Some(normalize) = s.read(structure, "Normalize", fields::boolean)? {
            info.normalize = normalize;
        }
        if let Some(interpretation) = s.read(structure, "Interpretation", fields::enumeration)? {
            info.interpretation = interpretation;
        }

        s.finalize(handle, info);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let info = s.object::<VertexAttribInfo>(handle)?;
        let key = s.register(handle, "vl::VertexAttribInfo", "vertexattribinfo_");

        let mut entries = Entries::new();
        entries.push_opt("Data", s.export_field(info.data)?);
        entries
            .push("Normalize", Value::boolean(info.normalize))
            .push("Interpretation", fields::enum_value(info.interpretation));

        s.fill(key, entries)
    }
}
