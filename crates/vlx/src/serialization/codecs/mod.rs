//! Built-in codecs
//!
//! One codec per record family. Codecs that serve several type names (arrays,
//! draw calls, simple render states, GLSL stages) recover the concrete type
//! from the structure tag.

mod actor;
mod array;
mod camera;
mod draw_call;
mod effect;
mod geometry;
mod glsl;
mod light;
mod material;
mod render_state;
mod resource_database;
mod texture;
mod transform;
mod uniform;

use std::sync::Arc;

pub use actor::{ActorCodec, DepthSortCallbackCodec};
pub use array::ArrayCodec;
pub use camera::{CameraCodec, ViewportCodec};
pub use draw_call::{DrawCallCodec, PatchParameterCodec};
pub use effect::{EffectCodec, LodEvaluatorCodec, ShaderCodec};
pub use geometry::{GeometryCodec, VertexAttribInfoCodec};
pub use glsl::{GlslProgramCodec, GlslShaderCodec};
pub use light::{ClipPlaneCodec, LightCodec};
pub use material::MaterialCodec;
pub use render_state::SimpleStateCodec;
pub use resource_database::ResourceDatabaseCodec;
pub use texture::{TextureCodec, TextureSamplerCodec};
pub use transform::TransformCodec;
pub use uniform::UniformCodec;

use super::registry::{Codec, Registry};
use crate::scene::array::array_type_names;
use crate::scene::draw_call::DRAW_CALL_TYPE_NAMES;
use crate::scene::glsl::ShaderStage;

/// Render states handled by [`SimpleStateCodec`]
pub const SIMPLE_STATE_TYPE_NAMES: [&str; 12] = [
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

/// Register every built-in codec
pub fn register_defaults(registry: &mut Registry) {
    let arrays: Arc<dyn Codec> = Arc::new(ArrayCodec);
    registry.register_all(array_type_names(), &arrays);

    let draw_calls: Arc<dyn Codec> = Arc::new(DrawCallCodec);
    registry.register_all(DRAW_CALL_TYPE_NAMES, &draw_calls);

    let simple_states: Arc<dyn Codec> = Arc::new(SimpleStateCodec);
    registry.register_all(SIMPLE_STATE_TYPE_NAMES, &simple_states);

    let glsl_shaders: Arc<dyn Codec> = Arc::new(GlslShaderCodec);
    registry.register_all(ShaderStage::ALL.map(ShaderStage::type_name), &glsl_shaders);

    let lod_evaluators: Arc<dyn Codec> = Arc::new(LodEvaluatorCodec);
    registry.register_all(["vl::DistanceLODEvaluator", "vl::PixelLODEvaluator"], &lod_evaluators);

    registry.register("vl::Geometry", Arc::new(GeometryCodec));
    registry.register("vl::VertexAttribInfo", Arc::new(VertexAttribInfoCodec));
    registry.register("vl::PatchParameter", Arc::new(PatchParameterCodec));
    registry.register("vl::Effect", Arc::new(EffectCodec));
    registry.register("vl::Shader", Arc::new(ShaderCodec));
    registry.register("vl::Material", Arc::new(MaterialCodec));
    registry.register("vl::Light", Arc::new(LightCodec));
    registry.register("vl::ClipPlane", Arc::new(ClipPlaneCodec));
    registry.register("vl::TextureSampler", Arc::new(TextureSamplerCodec));
    registry.register("vl::Texture", Arc::new(TextureCodec));
    registry.register("vl::GLSLProgram", Arc::new(GlslProgramCodec));
    registry.register("vl::Uniform", Arc::new(UniformCodec));
    registry.register("vl::Actor", Arc::new(ActorCodec));
    registry.register("vl::DepthSortCallback", Arc::new(DepthSortCallbackCodec));
    registry.register("vl::Transform", Arc::new(TransformCodec));
    registry.register("vl::Camera", Arc::new(CameraCodec));
    registry.register("vl::Viewport", Arc::new(ViewportCodec));
    registry.register("vl::ResourceDatabase", Arc::new(ResourceDatabaseCodec));

    log::debug!("registered {} built-in serializers", registry.len());
}

/// Type name inside a `<...>` tag
pub(crate) fn type_name_of(tag: &str) -> &str {
    tag.strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_of_tag() {
        assert_eq!(type_name_of("<vl::ArrayFloat3>"), "vl::ArrayFloat3");
        assert_eq!(type_name_of("vl::Actor"), "vl::Actor");
    }

    #[test]
    fn test_every_type_name_registered() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.len(), 32 + 7 + 12 + 5 + 2 + 18);
        for name in crate::scene::render_state::RENDER_STATE_TYPE_NAMES {
            assert!(registry.type_names().contains(&name), "{name} missing");
        }
    }
}
