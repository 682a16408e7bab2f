//! Textures and sampling parameters

use super::enums::{
    DepthTextureMode, TexCompareFunc, TexCompareMode, TexFilter, TexWrap, TextureDimension, TextureFormat,
};
use crate::foundation::collections::ObjectHandle;
use crate::foundation::math::Vec4;

/// Sampling parameters of a texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexParameter {
    /// Minification filter
    pub min_filter: TexFilter,
    /// Magnification filter
    pub mag_filter: TexFilter,
    /// S wrap
    pub wrap_s: TexWrap,
    /// T wrap
    pub wrap_t: TexWrap,
    /// R wrap
    pub wrap_r: TexWrap,
    /// Depth compare mode
    pub compare_mode: TexCompareMode,
    /// Depth compare function
    pub compare_func: TexCompareFunc,
    /// Depth sampling mode
    pub depth_texture_mode: DepthTextureMode,
    /// Border color
    pub border_color: Vec4,
    /// Maximum anisotropy
    pub anisotropy: f32,
    /// Regenerate mipmaps on upload
    pub generate_mipmap: bool,
}

impl Default for TexParameter {
    fn default() -> Self {
        Self {
            min_filter: TexFilter::Linear,
            mag_filter: TexFilter::Linear,
            wrap_s: TexWrap::Repeat,
            wrap_t: TexWrap::Repeat,
            wrap_r: TexWrap::Repeat,
            compare_mode: TexCompareMode::None,
            compare_func: TexCompareFunc::LessEqual,
            depth_texture_mode: DepthTextureMode::Luminance,
            border_color: Vec4::zeros(),
            anisotropy: 1.0,
            generate_mipmap: false,
        }
    }
}

/// How a texture is created when first used
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSetup {
    /// Texture target
    pub dimension: TextureDimension,
    /// Internal format
    pub format: TextureFormat,
    /// Image file to load
    pub image_path: String,
    /// Width in texels
    pub width: i32,
    /// Height in texels
    pub height: i32,
    /// Depth in texels
    pub depth: i32,
    /// Generate mipmaps after loading
    pub gen_mipmaps: bool,
    /// Samples of multisample textures
    pub samples: i32,
    /// Fixed sample locations of multisample textures
    pub fixed_samples_location: bool,
    /// Texture has a one texel border
    pub border: bool,
    /// Source array of buffer textures
    pub buffer_object: Option<ObjectHandle>,
}

impl Default for TextureSetup {
    fn default() -> Self {
        Self {
            dimension: TextureDimension::Unknown,
            format: TextureFormat::Rgba,
            image_path: String::new(),
            width: 0,
            height: 0,
            depth: 0,
            gen_mipmaps: false,
            samples: 0,
            fixed_samples_location: true,
            border: false,
            buffer_object: None,
        }
    }
}

/// Texture record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    /// Optional object name
    pub object_name: String,
    /// Deferred creation parameters
    pub setup: Option<TextureSetup>,
    /// Sampling parameters
    pub tex_parameter: TexParameter,
}

impl Texture {
    /// 2D texture loaded from an image file
    pub fn from_image(path: impl Into<String>) -> Self {
        Self {
            setup: Some(TextureSetup {
                dimension: TextureDimension::Texture2D,
                image_path: path.into(),
                ..TextureSetup::default()
            }),
            ..Self::default()
        }
    }
}
