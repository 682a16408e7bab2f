//! GLSL programs and shader stages

use super::type_name_of;
use crate::document::{Structure, Value};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::{GlslProgram, GlslShader, RenderState, ShaderStage, Uniform};
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::GLSLProgram`
#[derive(Debug, Default)]
pub struct GlslProgramCodec;

/// `vl::GLSLVertexShader` and the other four stages
#[derive(Debug, Default)]
pub struct GlslShaderCodec;

const ATTRIB_BINDINGS_TAG: &str = "<vl::AttribLocationBindings>";
const FRAG_DATA_BINDINGS_TAG: &str = "<vl::FragDataLocationBindings>";

/// `name = location` pairs of an inline binding structure
fn decode_bindings(
    s: &mut ImportSession<'_>,
    structure: &Structure,
    key: &str,
    tag: &str,
) -> Result<Vec<(String, i32)>> {
    let document = s.document();
    let Some(bindings) = s.read(structure, key, |key, value| fields::inline_structure(document, key, value, tag))?
    else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(bindings.len());
    for entry in bindings.entries() {
        if let Some(location) = s.check(fields::int32(&entry.key, &entry.value))? {
            out.push((entry.key.clone(), location));
        }
    }
    Ok(out)
}

fn encode_bindings(s: &mut ExportSession<'_>, tag: &str, bindings: &[(String, i32)]) -> Result<Value> {
    let mut entries = Entries::new();
    for (name, location) in bindings {
        entries.push(name.as_str(), Value::integer(i64::from(*location)));
    }
    s.new_inline_structure(tag, entries)
}

impl Codec for GlslProgramCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, RenderState::GlslProgram(GlslProgram::default()));
        let mut program = GlslProgram::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            program.object_name = name;
        }
        program.attrib_location_bindings =
            decode_bindings(s, structure, "AttribLocationBindings", ATTRIB_BINDINGS_TAG)?;
        program.frag_data_location_bindings =
            decode_bindings(s, structure, "FragDataLocationBindings", FRAG_DATA_BINDINGS_TAG)?;
        if let Some(uniforms) = s.read_refs::<Uniform>(structure, "Uniforms")? {
            program.uniforms = uniforms;
        }
        if let Some(shaders) = s.read_refs::<GlslShader>(structure, "Shaders")? {
            program.shaders = shaders;
        }

        s.finalize(handle, RenderState::GlslProgram(program));
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let RenderState::GlslProgram(program) = s.object::<RenderState>(handle)? else {
            return Err(VlxError::Export {
                type_name: "vl::GLSLProgram".to_string(),
                message: "render state has a different type".to_string(),
            });
        };
        let key = s.register(handle, "vl::GLSLProgram", "glslprogram_");

        let mut entries = Entries::new();
        entries.object_name(&program.object_name, "vl::GLSLProgram");
        if !program.attrib_location_bindings.is_empty() {
            let bindings = encode_bindings(s, ATTRIB_BINDINGS_TAG, &program.attrib_location_bindings)?;
            entries.push("AttribLocationBindings", bindings);
        }
        if !program.frag_data_location_bindings.is_empty() {
            let bindings = encode_bindings(s, FRAG_DATA_BINDINGS_TAG, &program.frag_data_location_bindings)?;
            entries.push("FragDataLocationBindings", bindings);
        }
        entries.push("Uniforms", s.export_list(&program.uniforms)?);
        entries.push("Shaders", s.export_list(&program.shaders)?);

        s.fill(key, entries)
    }
}

impl Codec for GlslShaderCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let Some(stage) = ShaderStage::from_type_name(type_name_of(structure.tag())) else {
            return Err(VlxError::UnknownTag {
                tag: structure.tag().to_string(),
                line: structure.line_number(),
            });
        };
        let mut shader = GlslShader::new(stage);
        let handle = s.register(key, shader.clone());

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            shader.object_name = name;
        }
        if let Some(path) = s.read(structure, "Path", fields::string)? {
            shader.path = path;
        }
        if let Some(source) = s.read(structure, "Source", fields::text)? {
            shader.source = source;
        }

        s.finalize(handle, shader);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let shader = s.object::<GlslShader>(handle)?;
        let type_name = shader.stage.type_name();
        let key = s.register(handle, type_name, "glslshader_");

        let mut entries = Entries::new();
        entries.object_name(&shader.object_name, type_name);
        if !shader.path.is_empty() {
            entries.push("Path", Value::string(shader.path.as_str()));
        }
        if !shader.source.is_empty() {
            entries.push("Source", Value::rawtext(shader.source.as_str()));
        }

        s.fill(key, entries)
    }
}
