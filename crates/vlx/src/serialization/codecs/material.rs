//! Fixed-function material

use crate::document::{Structure, Value};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::{Material, MaterialFace, RenderState};
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Material`
#[derive(Debug, Default)]
pub struct MaterialCodec;

fn decode_face(s: &mut ImportSession<'_>, structure: &Structure, prefix: &str, face: &mut MaterialFace) -> Result<()> {
    if let Some(color) = s.read(structure, &format!("{prefix}Ambient"), fields::vec4)? {
        face.ambient = color;
    }
    if let Some(color) = s.read(structure, &format!("{prefix}Diffuse"), fields::vec4)? {
        face.diffuse = color;
    }
    if let Some(color) = s.read(structure, &format!("{prefix}Specular"), fields::vec4)? {
        face.specular = color;
    }
    if let Some(color) = s.read(structure, &format!("{prefix}Emission"), fields::vec4)? {
        face.emission = color;
    }
    if let Some(shininess) = s.read(structure, &format!("{prefix}Shininess"), fields::real32)? {
        face.shininess = shininess;
    }
    Ok(())
}

fn encode_face(entries: &mut Entries, prefix: &str, face: &MaterialFace) {
    entries
        .push(format!("{prefix}Ambient"), fields::vec4_value(&face.ambient))
        .push(format!("{prefix}Diffuse"), fields::vec4_value(&face.diffuse))
        .push(format!("{prefix}Specular"), fields::vec4_value(&face.specular))
        .push(format!("{prefix}Emission"), fields::vec4_value(&face.emission))
        .push(format!("{prefix}Shininess"), fields::real_value(face.shininess));
}

impl Codec for MaterialCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, RenderState::Material(Material::default()));
        let mut material = Material::default();

        decode_face(s, structure, "Front", &mut material.front)?;
        decode_face(s, structure, "Back", &mut material.back)?;
        if let Some(mode) = s.read(structure, "ColorMaterial", fields::enumeration)? {
            material.color_material = mode;
        }
        if let Some(face) = s.read(structure, "ColorMaterialFace", fields::enumeration)? {
            material.color_material_face = face;
        }
        if let Some(enabled) = s.read(structure, "ColorMaterialEnabled", fields::boolean)? {
            material.color_material_enabled = enabled;
        }

        s.finalize(handle, RenderState::Material(material));
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let RenderState::Material(material) = s.object::<RenderState>(handle)? else {
            return Err(VlxError::Export {
                type_name: "vl::Material".to_string(),
                message: "object is not a material".to_string(),
            });
        };
        let key = s.register(handle, "vl::Material", "material_");

        let mut entries = Entries::new();
        encode_face(&mut entries, "Front", &material.front);
        encode_face(&mut entries, "Back", &material.back);
        entries
            .push("ColorMaterial", fields::enum_value(material.color_material))
            .push("ColorMaterialFace", fields::enum_value(material.color_material_face))
            .push("ColorMaterialEnabled", Value::boolean(material.color_material_enabled));

        s.fill(key, entries)
    }
}
