//! Render states
//!
//! Fixed-function states, lights and clip planes, texture samplers and GLSL
//! programs all bind to a [`Shader`](super::Shader) through the same slot list,
//! so they share one object type.

use super::enums::{
    BlendEquationMode, BlendFactor, ColorMaterial, CompareFunction, PolygonFace, PolygonModeKind,
};
use super::texture::TexParameter;
use crate::foundation::collections::ObjectHandle;
use crate::foundation::math::{Vec3, Vec4};

/// Lighting response of one polygon face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialFace {
    /// Ambient reflectance
    pub ambient: Vec4,
    /// Diffuse reflectance
    pub diffuse: Vec4,
    /// Specular reflectance
    pub specular: Vec4,
    /// Emitted color
    pub emission: Vec4,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for MaterialFace {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            emission: Vec4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 0.0,
        }
    }
}

/// Fixed-function material
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Material {
    /// Front face
    pub front: MaterialFace,
    /// Back face
    pub back: MaterialFace,
    /// Which color follows the vertex color
    pub color_material: ColorMaterial,
    /// Faces affected by color tracking
    pub color_material_face: PolygonFace,
    /// Vertex color tracking
    pub color_material_enabled: bool,
}

/// Fixed-function light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Ambient color
    pub ambient: Vec4,
    /// Diffuse color
    pub diffuse: Vec4,
    /// Specular color
    pub specular: Vec4,
    /// Homogeneous position, `w == 0` for directional lights
    pub position: Vec4,
    /// Spot axis
    pub spot_direction: Vec3,
    /// Spot falloff exponent
    pub spot_exponent: f32,
    /// Spot cone half-angle in degrees, 180 for point lights
    pub spot_cutoff: f32,
    /// Constant attenuation
    pub constant_attenuation: f32,
    /// Linear attenuation
    pub linear_attenuation: f32,
    /// Quadratic attenuation
    pub quadratic_attenuation: f32,
    /// Transform the light follows
    pub bound_transform: Option<ObjectHandle>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.0, 0.0, 0.0, 1.0),
            diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular: Vec4::new(1.0, 1.0, 1.0, 1.0),
            position: Vec4::new(0.0, 0.0, 1.0, 0.0),
            spot_direction: Vec3::new(0.0, 0.0, -1.0),
            spot_exponent: 0.0,
            spot_cutoff: 180.0,
            constant_attenuation: 1.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
            bound_transform: None,
        }
    }
}

/// User clip plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    /// Plane normal
    pub plane_normal: Vec3,
    /// Signed distance of the plane from the origin
    pub plane_origin: f32,
    /// Transform the plane follows
    pub bound_transform: Option<ObjectHandle>,
}

impl Default for ClipPlane {
    fn default() -> Self {
        Self {
            plane_normal: Vec3::new(0.0, 1.0, 0.0),
            plane_origin: 0.0,
            bound_transform: None,
        }
    }
}

/// Texture bound to a texture unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureSampler {
    /// Sampled texture
    pub texture: Option<ObjectHandle>,
    /// Sampler-side parameter override
    pub tex_parameter: Option<TexParameter>,
}

/// Linked GLSL program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlslProgram {
    /// Optional object name
    pub object_name: String,
    /// Vertex attribute name to location, in binding order
    pub attrib_location_bindings: Vec<(String, i32)>,
    /// Fragment output name to location, in binding order
    pub frag_data_location_bindings: Vec<(String, i32)>,
    /// Program uniforms
    pub uniforms: Vec<ObjectHandle>,
    /// Attached shader stages
    pub shaders: Vec<ObjectHandle>,
}

/// Any state that can be bound to a shader
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    /// `vl::Material`
    Material(Material),
    /// `vl::Light`, indexed
    Light(Light),
    /// `vl::ClipPlane`, indexed
    ClipPlane(ClipPlane),
    /// `vl::TextureSampler`, indexed by texture unit
    TextureSampler(TextureSampler),
    /// `vl::GLSLProgram`
    GlslProgram(GlslProgram),
    /// `vl::BlendFunc`
    BlendFunc {
        /// Source RGB factor
        src_rgb: BlendFactor,
        /// Destination RGB factor
        dst_rgb: BlendFactor,
        /// Source alpha factor
        src_alpha: BlendFactor,
        /// Destination alpha factor
        dst_alpha: BlendFactor,
    },
    /// `vl::BlendEquation`
    BlendEquation {
        /// RGB equation
        mode_rgb: BlendEquationMode,
        /// Alpha equation
        mode_alpha: BlendEquationMode,
    },
    /// `vl::BlendColor`
    BlendColor(Vec4),
    /// `vl::AlphaFunc`
    AlphaFunc {
        /// Comparison
        func: CompareFunction,
        /// Reference alpha
        ref_value: f32,
    },
    /// `vl::DepthFunc`
    DepthFunc(CompareFunction),
    /// `vl::DepthMask`
    DepthMask(bool),
    /// `vl::CullFace`
    CullFace(PolygonFace),
    /// `vl::PolygonMode`
    PolygonMode {
        /// Front face mode
        front: PolygonModeKind,
        /// Back face mode
        back: PolygonModeKind,
    },
    /// `vl::PolygonOffset`
    PolygonOffset {
        /// Slope factor
        factor: f32,
        /// Constant units
        units: f32,
    },
    /// `vl::ColorMask`
    ColorMask {
        /// Red writes
        red: bool,
        /// Green writes
        green: bool,
        /// Blue writes
        blue: bool,
        /// Alpha writes
        alpha: bool,
    },
    /// `vl::LineWidth`
    LineWidth(f32),
    /// `vl::PointSize`
    PointSize(f32),
}

/// Every render state type name
pub const RENDER_STATE_TYPE_NAMES: [&str; 17] = [
    "vl::Material",
    "vl::Light",
    "vl::ClipPlane",
    "vl::TextureSampler",
    "vl::GLSLProgram",
    "vl::BlendFunc",
    "vl::BlendEquation",
    "vl::BlendColor",
    "vl::AlphaFunc",
    "vl::DepthFunc",
    "vl::DepthMask",
    "vl::CullFace",
    "vl::PolygonMode",
    "vl::PolygonOffset",
    "vl::ColorMask",
    "vl::LineWidth",
    "vl::PointSize",
];

impl RenderState {
    /// Default state for a type name
    pub fn for_type_name(type_name: &str) -> Option<Self> {
        let state = match type_name {
            "vl::Material" => RenderState::Material(Material::default()),
            "vl::Light" => RenderState::Light(Light::default()),
            "vl::ClipPlane" => RenderState::ClipPlane(ClipPlane::default()),
            "vl::TextureSampler" => RenderState::TextureSampler(TextureSampler::default()),
            "vl::GLSLProgram" => RenderState::GlslProgram(GlslProgram::default()),
            "vl::BlendFunc" => RenderState::BlendFunc {
                src_rgb: BlendFactor::SrcAlpha,
                dst_rgb: BlendFactor::OneMinusSrcAlpha,
                src_alpha: BlendFactor::SrcAlpha,
                dst_alpha: BlendFactor::OneMinusSrcAlpha,
            },
            "vl::BlendEquation" => RenderState::BlendEquation {
                mode_rgb: BlendEquationMode::Add,
                mode_alpha: BlendEquationMode::Add,
            },
            "vl::BlendColor" => RenderState::BlendColor(Vec4::zeros()),
            "vl::AlphaFunc" => RenderState::AlphaFunc {
                func: CompareFunction::Always,
                ref_value: 0.0,
            },
            "vl::DepthFunc" => RenderState::DepthFunc(CompareFunction::Less),
            "vl::DepthMask" => RenderState::DepthMask(true),
            "vl::CullFace" => RenderState::CullFace(PolygonFace::Back),
            "vl::PolygonMode" => RenderState::PolygonMode {
                front: PolygonModeKind::Fill,
                back: PolygonModeKind::Fill,
            },
            "vl::PolygonOffset" => RenderState::PolygonOffset { factor: 0.0, units: 0.0 },
            "vl::ColorMask" => RenderState::ColorMask {
                red: true,
                green: true,
                blue: true,
                alpha: true,
            },
            "vl::LineWidth" => RenderState::LineWidth(1.0),
            "vl::PointSize" => RenderState::PointSize(1.0),
            _ => return None,
        };
        Some(state)
    }

    /// Type name of the variant
    pub fn type_name(&self) -> &'static str {
        match self {
            RenderState::Material(_) => "vl::Material",
            RenderState::Light(_) => "vl::Light",
            RenderState::ClipPlane(_) => "vl::ClipPlane",
            RenderState::TextureSampler(_) => "vl::TextureSampler",
            RenderState::GlslProgram(_) => "vl::GLSLProgram",
            RenderState::BlendFunc { .. } => "vl::BlendFunc",
            RenderState::BlendEquation { .. } => "vl::BlendEquation",
            RenderState::BlendColor(_) => "vl::BlendColor",
            RenderState::AlphaFunc { .. } => "vl::AlphaFunc",
            RenderState::DepthFunc(_) => "vl::DepthFunc",
            RenderState::DepthMask(_) => "vl::DepthMask",
            RenderState::CullFace(_) => "vl::CullFace",
            RenderState::PolygonMode { .. } => "vl::PolygonMode",
            RenderState::PolygonOffset { .. } => "vl::PolygonOffset",
            RenderState::ColorMask { .. } => "vl::ColorMask",
            RenderState::LineWidth(_) => "vl::LineWidth",
            RenderState::PointSize(_) => "vl::PointSize",
        }
    }

    /// True for states bound at an index
    pub fn is_indexed(&self) -> bool {
        matches!(
            self,
            RenderState::Light(_) | RenderState::ClipPlane(_) | RenderState::TextureSampler(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_match_variants() {
        for name in RENDER_STATE_TYPE_NAMES {
            let state = RenderState::for_type_name(name).unwrap();
            assert_eq!(state.type_name(), name);
        }
        assert!(RenderState::for_type_name("vl::Fog").is_none());
    }

    #[test]
    fn test_indexed_states() {
        assert!(RenderState::Light(Light::default()).is_indexed());
        assert!(RenderState::TextureSampler(TextureSampler::default()).is_indexed());
        assert!(!RenderState::DepthMask(false).is_indexed());
    }
}
