//! Textures and texture samplers

use crate::document::{Structure, Value};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::{BufferArray, RenderState, TexParameter, Texture, TextureSampler, TextureSetup};
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Texture`
#[derive(Debug, Default)]
pub struct TextureCodec;

/// `vl::TextureSampler`
#[derive(Debug, Default)]
pub struct TextureSamplerCodec;

const SETUP_PARAMS_TAG: &str = "<vl::Texture::SetupParams>";
const TEX_PARAMETER_TAG: &str = "<vl::TexParameter>";

/// Inline structure stored under `key`, checked against `tag`
fn read_inline<'a>(s: &mut ImportSession<'a>, structure: &Structure, key: &str, tag: &str) -> Result<Option<&'a Structure>> {
    let document = s.document();
    s.read(structure, key, |key, value| fields::inline_structure(document, key, value, tag))
}

fn decode_tex_parameter(s: &mut ImportSession<'_>, structure: &Structure) -> Result<TexParameter> {
    let mut params = TexParameter::default();
    if let Some(filter) = s.read(structure, "MinFilter", fields::enumeration)? {
        params.min_filter = filter;
    }
    if let Some(filter) = s.read(structure, "MagFilter", fields::enumeration)? {
        params.mag_filter = filter;
    }
    if let Some(wrap) = s.read(structure, "WrapS", fields::enumeration)? {
        params.wrap_s = wrap;
    }
    if let Some(wrap) = s.read(structure, "WrapT", fields::enumeration)? {
        params.wrap_t = wrap;
    }
    if let Some(wrap) = s.read(structure, "WrapR", fields::enumeration)? {
        params.wrap_r = wrap;
    }
    if let Some(mode) = s.read(structure, "CompareMode", fields::enumeration)? {
        params.compare_mode = mode;
    }
    if let Some(func) = s.read(structure, "CompareFunc", fields::enumeration)? {
        params.compare_func = func;
    }
    if let Some(mode) = s.read(structure, "DepthTextureMode", fields::enumeration)? {
        params.depth_texture_mode = mode;
    }
    if let Some(color) = s.read(structure, "BorderColor", fields::vec4)? {
        params.border_color = color;
    }
    if let Some(anisotropy) = s.read(structure, "Anisotropy", fields::real32)? {
        params.anisotropy = anisotropy;
    }
    if let Some(generate) = s.read(structure, "GenerateMipmap", fields::boolean)? {
        params.generate_mipmap = generate;
    }
    Ok(params)
}

fn encode_tex_parameter(s: &mut ExportSession<'_>, params: &TexParameter) -> Result<Value> {
    let mut entries = Entries::new();
    entries
        .push("MinFilter", fields::enum_value(params.min_filter))
        .push("MagFilter", fields::enum_value(params.mag_filter))
        .push("WrapS", fields::enum_value(params.wrap_s))
        .push("WrapT", fields::enum_value(params.wrap_t))
        .push("WrapR", fields::enum_value(params.wrap_r))
        .push("CompareMode", fields::enum_value(params.compare_mode))
        .push("CompareFunc", fields::enum_value(params.compare_func))
        .push("DepthTextureMode", fields::enum_value(params.depth_texture_mode))
        .push("BorderColor", fields::vec4_value(&params.border_color))
        .push("Anisotropy", fields::real_value(params.anisotropy))
        .push("GenerateMipmap", Value::boolean(params.generate_mipmap));
    s.new_inline_structure(TEX_PARAMETER_TAG, entries)
}

fn decode_setup(s: &mut ImportSession<'_>, structure: &Structure) -> Result<TextureSetup> {
    let mut setup = TextureSetup::default();
    if let Some(dimension) = s.read(structure, "Dimension", fields::enumeration)? {
        setup.dimension = dimension;
    }
    if let Some(format) = s.read(structure, "TexFormat", fields::enumeration)? {
        setup.format = format;
    }
    if let Some(path) = s.read(structure, "ImagePath", fields::string)? {
        setup.image_path = path;
    }
    if let Some(width) = s.read(structure, "Width", fields::int32)? {
        setup.width = width;
    }
    if let Some(height) = s.read(structure, "Height", fields::int32)? {
        setup.height = height;
    }
    if let Some(depth) = s.read(structure, "Depth", fields::int32)? {
        setup.depth = depth;
    }
    if let Some(gen_mipmaps) = s.read(structure, "GenMipmaps", fields::boolean)? {
        setup.gen_mipmaps = gen_mipmaps;
    }
    if let Some(samples) = s.read(structure, "Samples", fields::int32)? {
        setup.samples = samples;
    }
    if let Some(fixed) = s.read(structure, "FixedSamplesLocation", fields::boolean)? {
        setup.fixed_samples_location = fixed;
    }
    if let Some(border) = s.read(structure, "BorderTexture", fields::boolean)? {
        setup.border = border;
    }
    setup.buffer_object = s.read_ref::<BufferArray>(structure, "BufferObject")?;
    Ok(setup)
}

fn encode_setup(s: &mut ExportSession<'_>, setup: &TextureSetup) -> Result<Value> {
    let mut entries = Entries::new();
    entries
        .push("Dimension", fields::enum_value(setup.dimension))
        .push("TexFormat", fields::enum_value(setup.format));
    if !setup.image_path.is_empty() {
        entries.push("ImagePath", Value::string(setup.image_path.as_str()));
    }
    entries
        .push("Width", Value::integer(i64::from(setup.width)))
        .push("Height", Value::integer(i64::from(setup.height)))
        .push("Depth", Value::integer(i64::from(setup.depth)))
        .push("GenMipmaps", Value::boolean(setup.gen_mipmaps))
        .push("Samples", Value::integer(i64::from(setup.samples)))
        .push("FixedSamplesLocation", Value::boolean(setup.fixed_samples_location))
        .push("BorderTexture", Value::boolean(setup.border));
    entries.push_opt("BufferObject", s.export_field(setup.buffer_object)?);
    s.new_inline_structure(SETUP_PARAMS_TAG, entries)
}

impl Codec for TextureCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Texture::default());
        let mut texture = Texture::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            texture.object_name = name;
        }
        if let Some(setup) = read_inline(s, structure, "SetupParams", SETUP_PARAMS_TAG)? {
            texture.setup = Some(decode_setup(s, setup)?);
        }
        if let Some(params) = read_inline(s, structure, "TexParameter", TEX_PARAMETER_TAG)? {
            texture.tex_parameter = decode_tex_parameter(s, params)?;
        }

        s.finalize(handle, texture);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let texture = s.object::<Texture>(handle)?;
        let key = s.register(handle, "vl::Texture", "texture_");

        let mut entries = Entries::new();
        entries.object_name(&texture.object_name, "vl::Texture");
        if let Some(setup) = &texture.setup {
            entries.push("SetupParams", encode_setup(s, setup)?);
        }
        entries.push("TexParameter", encode_tex_parameter(s, &texture.tex_parameter)?);

        s.fill(key, entries)
    }
}

impl Codec for TextureSamplerCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, RenderState::TextureSampler(TextureSampler::default()));
        let mut sampler = TextureSampler::default();

        sampler.texture = s.read_ref::<Texture>(structure, "Texture")?;
        if let Some(params) = read_inline(s, structure, "TexParameter", TEX_PARAMETER_TAG)? {
            sampler.tex_parameter = Some(decode_tex_parameter(s, params)?);
        }

        s.finalize(handle, RenderState::TextureSampler(sampler));
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let RenderState::TextureSampler(sampler) = s.object::<RenderState>(handle)? else {
            return Err(VlxError::Export {
                type_name: "vl::TextureSampler".to_string(),
                message: "render state has a different type".to_string(),
            });
        };
        let key = s.register(handle, "vl::TextureSampler", "texturesampler_");

        let mut entries = Entries::new();
        entries.push_opt("Texture", s.export_field(sampler.texture)?);
        if let Some(params) = &sampler.tex_parameter {
            entries.push("TexParameter", encode_tex_parameter(s, params)?);
        }

        s.fill(key, entries)
    }
}
