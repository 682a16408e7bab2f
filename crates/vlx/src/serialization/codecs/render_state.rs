//! Render states with only enumerated and scalar fields

use super::type_name_of;
use crate::document::{Structure, Value};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::RenderState;
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// Fixed-function states with a handful of scalar fields
///
/// `vl::BlendFunc`, `vl::BlendEquation`, `vl::BlendColor`, `vl::AlphaFunc`,
/// `vl::DepthFunc`, `vl::DepthMask`, `vl::CullFace`, `vl::PolygonMode`,
/// `vl::PolygonOffset`, `vl::ColorMask`, `vl::LineWidth`, `vl::PointSize`.
#[derive(Debug, Default)]
pub struct SimpleStateCodec;

fn decode_fields(s: &mut ImportSession<'_>, structure: &Structure, state: &mut RenderState) -> Result<()> {
    match state {
        RenderState::BlendFunc {
            src_rgb,
            dst_rgb,
            src_alpha,
            dst_alpha,
        } => {
            if let Some(value) = s.read(structure, "SrcRGB", fields::enumeration)? {
                *src_rgb = value;
            }
            if let Some(value) = s.read(structure, "DstRGB", fields::enumeration)? {
                *dst_rgb = value;
            }
            if let Some(value) = s.read(structure, "SrcAlpha", fields::enumeration)? {
                *src_alpha = value;
            }
            if let Some(value) = s.read(structure, "DstAlpha", fields::enumeration)? {
                *dst_alpha = value;
            }
        }
        RenderState::BlendEquation { mode_rgb, mode_alpha } => {
            if let Some(value) = s.read(structure, "ModeRGB", fields::enumeration)? {
                *mode_rgb = value;
            }
            if let Some(value) = s.read(structure, "ModeAlpha", fields::enumeration)? {
                *mode_alpha = value;
            }
        }
        RenderState::BlendColor(color) => {
            if let Some(value) = s.read(structure, "BlendColor", fields::vec4)? {
                *color = value;
            }
        }
        RenderState::AlphaFunc { func, ref_value } => {
            if let Some(value) = s.read(structure, "AlphaFunc", fields::enumeration)? {
                *func = value;
            }
            if let Some(value) = s.read(structure, "RefValue", fields::real32)? {
                *ref_value = value;
            }
        }
        RenderState::DepthFunc(func) => {
            if let Some(value) = s.read(structure, "DepthFunc", fields::enumeration)? {
                *func = value;
            }
        }
        RenderState::DepthMask(mask) => {
            if let Some(value) = s.read(structure, "DepthMask", fields::boolean)? {
                *mask = value;
            }
        }
        RenderState::CullFace(face) => {
            if let Some(value) = s.read(structure, "CullFace", fields::enumeration)? {
                *face = value;
            }
        }
        RenderState::PolygonMode { front, back } => {
            if let Some(value) = s.read(structure, "FrontFace", fields::enumeration)? {
                *front = value;
            }
            if let Some(value) = s.read(structure, "BackFace", fields::enumeration)? {
                *back = value;
            }
        }
        RenderState::PolygonOffset { factor, units } => {
            if let Some(value) = s.read(structure, "Factor", fields::real32)? {
                *factor = value;
            }
            if let Some(value) = s.read(structure, "Units", fields::real32)? {
                *units = value;
            }
        }
        RenderState::ColorMask {
            red,
            green,
            blue,
            alpha,
        } => {
            if let Some(value) = s.read(structure, "Red", fields::boolean)? {
                *red = value;
            }
            if let Some(value) = s.read(structure, "Green", fields::boolean)? {
                *green = value;
            }
            if let Some(value) = s.read(structure, "Blue", fields::boolean)? {
                *blue = value;
            }
            if let Some(value) = s.read(structure, "Alpha", fields::boolean)? {
                *alpha = value;
            }
        }
        RenderState::LineWidth(width) => {
            if let Some(value) = s.read(structure, "LineWidth", fields::real32)? {
                *width = value;
            }
        }
        RenderState::PointSize(size) => {
            if let Some(value) = s.read(structure, "PointSize", fields::real32)? {
                *size = value;
            }
        }
        RenderState::Material(_)
        | RenderState::Light(_)
        | RenderState::ClipPlane(_)
        | RenderState::TextureSampler(_)
        | RenderState::GlslProgram(_) => {}
    }
    Ok(())
}

fn encode_fields(entries: &mut Entries, state: &RenderState) -> Result<()> {
    match state {
        RenderState::BlendFunc {
            src_rgb,
            dst_rgb,
            src_alpha,
            dst_alpha,
        } => {
            entries
                .push("SrcRGB", fields::enum_value(*src_rgb))
                .push("DstRGB", fields::enum_value(*dst_rgb))
                .push("SrcAlpha", fields::enum_value(*src_alpha))
                .push("DstAlpha", fields::enum_value(*dst_alpha));
        }
        RenderState::BlendEquation { mode_rgb, mode_alpha } => {
            entries
                .push("ModeRGB", fields::enum_value(*mode_rgb))
                .push("ModeAlpha", fields::enum_value(*mode_alpha));
        }
        RenderState::BlendColor(color) => {
            entries.push("BlendColor", fields::vec4_value(color));
        }
        RenderState::AlphaFunc { func, ref_value } => {
            entries
                .push("AlphaFunc", fields::enum_value(*func))
                .push("RefValue", fields::real_value(*ref_value));
        }
        RenderState::DepthFunc(func) => {
            entries.push("DepthFunc", fields::enum_value(*func));
        }
        RenderState::DepthMask(mask) => {
            entries.push("DepthMask", Value::boolean(*mask));
        }
        RenderState::CullFace(face) => {
            entries.push("CullFace", fields::enum_value(*face));
        }
        RenderState::PolygonMode { front, back } => {
            entries
                .push("FrontFace", fields::enum_value(*front))
                .push("BackFace", fields::enum_value(*back));
        }
        RenderState::PolygonOffset { factor, units } => {
            entries
                .push("Factor", fields::real_value(*factor))
                .push("Units", fields::real_value(*units));
        }
        RenderState::ColorMask {
            red,
            green,
            blue,
            alpha,
        } => {
            entries
                .push("Red", Value::boolean(*red))
                .push("Green", Value::boolean(*green))
                .push("Blue", Value::boolean(*blue))
                .push("Alpha", Value::boolean(*alpha));
        }
        RenderState::LineWidth(width) => {
            entries.push("LineWidth", fields::real_value(*width));
        }
        RenderState::PointSize(size) => {
            entries.push("PointSize", fields::real_value(*size));
        }
        other => {
            return Err(VlxError::Export {
                type_name: other.type_name().to_string(),
                message: "not a simple render state".to_string(),
            })
        }
    }
    Ok(())
}

impl Codec for SimpleStateCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let Some(mut state) = RenderState::for_type_name(type_name_of(structure.tag())) else {
            return Err(VlxError::UnknownTag {
                tag: structure.tag().to_string(),
                line: structure.line_number(),
            });
        };
        let handle = s.register(key, state.clone());

        decode_fields(s, structure, &mut state)?;

        s.finalize(handle, state);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let state = s.object::<RenderState>(handle)?;
        let mut entries = Entries::new();
        encode_fields(&mut entries, state)?;

        let key = s.register(handle, state.type_name(), "renderstate_");
        s.fill(key, entries)
    }
}
