//! Lights and clip planes, both indexed render states

use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::{ClipPlane, Light, RenderState, Transform};
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Light`
#[derive(Debug, Default)]
pub struct LightCodec;

/// `vl::ClipPlane`
#[derive(Debug, Default)]
pub struct ClipPlaneCodec;

fn wrong_state(type_name: &str) -> VlxError {
    VlxError::Export {
        type_name: type_name.to_string(),
        message: "render state has a different type".to_string(),
    }
}

impl Codec for LightCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, RenderState::Light(Light::default()));
        let mut light = Light::default();

        if let Some(color) = s.read(structure, "Ambient", fields::vec4)? {
            light.ambient = color;
        }
        if let Some(color) = s.read(structure, "Diffuse", fields::vec4)? {
            light.diffuse = color;
        }
        if let Some(color) = s.read(structure, "Specular", fields::vec4)? {
            light.specular = color;
        }
        if let Some(position) = s.read(structure, "Position", fields::vec4)? {
            light.position = position;
        }
        if let Some(direction) = s.read(structure, "SpotDirection", fields::vec3)? {
            light.spot_direction = direction;
        }
        if let Some(exponent) = s.read(structure, "SpotExponent", fields::real32)? {
            light.spot_exponent = exponent;
        }
        if let Some(cutoff) = s.read(structure, "SpotCutoff", fields::real32)? {
            light.spot_cutoff = cutoff;
        }
        if let Some(attenuation) = s.read(structure, "ConstantAttenuation", fields::real32)? {
            light.constant_attenuation = attenuation;
        }
        if let Some(attenuation) = s.read(structure, "LinearAttenuation", fields::real32)? {
            light.linear_attenuation = attenuation;
        }
        if let Some(attenuation) = s.read(structure, "QuadraticAttenuation", fields::real32)? {
            light.quadratic_attenuation = attenuation;
        }
        light.bound_transform = s.read_ref::<Transform>(structure, "BoundTransform")?;

        s.finalize(handle, RenderState::Light(light));
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let RenderState::Light(light) = s.object::<RenderState>(handle)? else {
            return Err(wrong_state("vl::Light"));
        };
        let key = s.register(handle, "vl::Light", "light_");

        let mut entries = Entries::new();
        entries
            .push("Ambient", fields::vec4_value(&light.ambient))
            .push("Diffuse", fields::vec4_value(&light.diffuse))
            .push("Specular", fields::vec4_value(&light.specular))
            .push("Position", fields::vec4_value(&light.position))
            .push("SpotDirection", fields::vec3_value(&light.spot_direction))
            .push("SpotExponent", fields::real_value(light.spot_exponent))
            .push("SpotCutoff", fields::real_value(light.spot_cutoff))
            .push("ConstantAttenuation", fields::real_value(light.constant_attenuation))
            .push("LinearAttenuation", fields::real_value(light.linear_attenuation))
            .push("QuadraticAttenuation", fields::real_value(light.quadratic_attenuation));
        entries.push_opt("BoundTransform", s.export_field(light.bound_transform)?);

        s.fill(key, entries)
    }
}

impl Codec for ClipPlaneCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, RenderState::ClipPlane(ClipPlane::default()));
        let mut plane = ClipPlane::default();

        if let Some(normal) = s.read(structure, "PlaneNormal", fields::vec3)? {
            plane.plane_normal = normal;
        }
        if let Some(origin) = s.read(structure, "PlaneOrigin", fields::real32)? {
            plane.plane_origin = origin;
        }
        plane.bound_transform = s.read_ref::<Transform>(structure, "BoundTransform")?;

        s.finalize(handle, RenderState::ClipPlane(plane));
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let RenderState::ClipPlane(plane) = s.object::<RenderState>(handle)? else {
            return Err(wrong_state("vl::ClipPlane"));
        };
        let key = s.register(handle, "vl::ClipPlane", "clipplane_");

        let mut entries = Entries::new();
        entries
            .push("PlaneNormal", fields::vec3_value(&plane.plane_normal))
            .push("PlaneOrigin", fields::real_value(plane.plane_origin));
        entries.push_opt("BoundTransform", s.export_field(plane.bound_transform)?);

        s.fill(key, entries)
    }
}
