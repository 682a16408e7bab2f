//! Render states, textures, uniforms and LOD selection through VLX text

use std::sync::Arc;

use crate::config::{ErrorPolicy, SerializerConfig};
use crate::foundation::math::{Vec3, Vec4};
use crate::scene::enums::{ColorMaterial, PolygonFace, SortMode, TexFilter, TexWrap, TextureDimension, UniformType};
use crate::scene::{
    Actor, DepthSortCallback, Effect, LodEvaluator, ObjectStore, RenderState, SceneObject, Shader, Texture, Uniform,
    UniformData,
};
use crate::serialization::{Imported, Registry, Serializer, VlxError};

fn document(resources: &str) -> String {
    format!(
        "VLX version=100 encoding=ascii\n\n<vl::ResourceDatabase>\n{{\n    SerializerVersion = 100\n    Resources = [\n{resources}\n    ]\n}}\n"
    )
}

fn all<T: SceneObject>(store: &ObjectStore) -> Vec<&T> {
    store.iter().filter_map(|(_, object)| T::from_object(object)).collect()
}

fn reimport(serializer: &Serializer, imported: &Imported) -> Imported {
    let text = serializer.export_text(&imported.store, imported.database).unwrap();
    serializer.import_text(&text).unwrap()
}

const LIT_SHADER: &str = r#"
        <vl::Shader>
        {
            RenderStates = [
                <vl::Material>
                {
                    FrontDiffuse = ( 1.0 0.0 0.0 1.0 )
                    FrontShininess = 32.0
                    BackEmission = ( 0.0 0.0 0.25 1.0 )
                    ColorMaterial = CM_DIFFUSE
                    ColorMaterialFace = PF_FRONT
                    ColorMaterialEnabled = true
                }
                1 <vl::Light>
                {
                    Position = ( 0.0 10.0 0.0 1.0 )
                    SpotDirection = ( 0.0 -1.0 0.0 )
                    SpotCutoff = 45.0
                    LinearAttenuation = 0.5
                }
                0 <vl::ClipPlane>
                {
                    PlaneNormal = ( 1.0 0.0 0.0 )
                    PlaneOrigin = 2.5
                }
                <vl::BlendFunc>
                {
                    SrcRGB = BF_SRC_ALPHA
                    DstRGB = BF_ONE_MINUS_SRC_ALPHA
                    SrcAlpha = BF_ONE
                    DstAlpha = BF_ZERO
                }
                2 <vl::TextureSampler> { Texture = #texture_id1 }
            ]
            Enables = [ EN_LIGHTING EN_BLEND ]
        }
        <vl::Texture>
        {
            ID = #texture_id1
            ObjectName = "bricks"
            SetupParams = <vl::Texture::SetupParams>
            {
                Dimension = TD_TEXTURE_2D
                ImagePath = "bricks.png"
                GenMipmaps = true
            }
            TexParameter = <vl::TexParameter>
            {
                MinFilter = TPF_LINEAR_MIPMAP_LINEAR
                WrapS = TPW_CLAMP_TO_EDGE
                Anisotropy = 4.0
            }
        }"#;

const LOD_ACTOR: &str = r#"
        <vl::Actor>
        {
            Effect = <vl::Effect>
            {
                Lods = [ ]
                LODEvaluator = <vl::PixelLODEvaluator> { PixelRangeSet = ( 100.0 20.0 ) }
            }
            LODEvaluator = <vl::DistanceLODEvaluator> { DistanceRangeSet = ( 10.0 50.0 ) }
            ActorEventCallbacks = [
                <vl::DepthSortCallback> { SortMode = SM_SortFrontToBack Enabled = false }
            ]
        }"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn check_lit_shader(store: &ObjectStore) {
        let shader = all::<Shader>(store)[0];
        let indices: Vec<_> = shader.render_states.iter().map(|slot| slot.index).collect();
        assert_eq!(indices, vec![None, Some(1), Some(0), None, Some(2)]);
        assert_eq!(shader.enables.len(), 2);

        let states: Vec<_> = shader
            .render_states
            .iter()
            .map(|slot| store.get::<RenderState>(slot.state).unwrap())
            .collect();

        let RenderState::Material(material) = states[0] else {
            panic!("expected a material, got {:?}", states[0]);
        };
        assert_eq!(material.front.diffuse, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(material.front.shininess, 32.0);
        assert_eq!(material.back.emission, Vec4::new(0.0, 0.0, 0.25, 1.0));
        assert_eq!(material.color_material, ColorMaterial::Diffuse);
        assert_eq!(material.color_material_face, PolygonFace::Front);
        assert!(material.color_material_enabled);

        let RenderState::Light(light) = states[1] else {
            panic!("expected a light, got {:?}", states[1]);
        };
        assert_eq!(light.position, Vec4::new(0.0, 10.0, 0.0, 1.0));
        assert_eq!(light.spot_direction, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(light.spot_cutoff, 45.0);
        assert_eq!(light.linear_attenuation, 0.5);
        assert_eq!(light.constant_attenuation, 1.0);
        assert!(light.bound_transform.is_none());

        let RenderState::ClipPlane(plane) = states[2] else {
            panic!("expected a clip plane, got {:?}", states[2]);
        };
        assert_eq!(plane.plane_normal, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(plane.plane_origin, 2.5);

        assert!(matches!(states[3], RenderState::BlendFunc { .. }));

        let RenderState::TextureSampler(sampler) = states[4] else {
            panic!("expected a sampler, got {:?}", states[4]);
        };
        let texture = store.get::<Texture>(sampler.texture.unwrap()).unwrap();
        assert_eq!(texture.object_name, "bricks");
        let setup = texture.setup.as_ref().unwrap();
        assert_eq!(setup.dimension, TextureDimension::Texture2D);
        assert_eq!(setup.image_path, "bricks.png");
        assert!(setup.gen_mipmaps);
        assert_eq!(texture.tex_parameter.min_filter, TexFilter::LinearMipmapLinear);
        assert_eq!(texture.tex_parameter.mag_filter, TexFilter::Linear);
        assert_eq!(texture.tex_parameter.wrap_s, TexWrap::ClampToEdge);
        assert_eq!(texture.tex_parameter.anisotropy, 4.0);
    }

    #[test]
    fn test_render_states_import() {
        let imported = Serializer::with_defaults().import_text(&document(LIT_SHADER)).unwrap();
        assert!(imported.diagnostics.is_empty());
        assert_eq!(imported.resources().len(), 2);
        check_lit_shader(&imported.store);

        // The sampler and the database share the one texture
        assert_eq!(all::<Texture>(&imported.store).len(), 1);
    }

    #[test]
    fn test_render_states_round_trip() {
        let serializer = Serializer::with_defaults();
        let imported = serializer.import_text(&document(LIT_SHADER)).unwrap();
        let again = reimport(&serializer, &imported);

        assert_eq!(again.store.count_by_type(), imported.store.count_by_type());
        check_lit_shader(&again.store);
    }

    #[test]
    fn test_lod_evaluators_and_callbacks() {
        let serializer = Serializer::with_defaults();
        let imported = serializer.import_text(&document(LOD_ACTOR)).unwrap();
        let again = reimport(&serializer, &imported);

        for store in [&imported.store, &again.store] {
            let actor = all::<Actor>(store)[0];
            let distance = store.get::<LodEvaluator>(actor.lod_evaluator.unwrap()).unwrap();
            assert_eq!(distance.ranges, vec![10.0, 50.0]);
            assert_eq!(distance.evaluate(5.0), 0);
            assert_eq!(distance.evaluate(20.0), 1);
            assert_eq!(distance.evaluate(100.0), 2);

            let effect = store.get::<Effect>(actor.effect.unwrap()).unwrap();
            let pixel = store.get::<LodEvaluator>(effect.lod_evaluator.unwrap()).unwrap();
            assert_eq!(pixel.type_name(), "vl::PixelLODEvaluator");
            assert_eq!(pixel.evaluate(150.0), 0);
            assert_eq!(pixel.evaluate(50.0), 1);
            assert_eq!(pixel.evaluate(10.0), 2);

            assert_eq!(actor.event_callbacks.len(), 1);
            let callback = store.get::<DepthSortCallback>(actor.event_callbacks[0]).unwrap();
            assert!(!callback.enabled);
            assert_eq!(callback.sort_mode, SortMode::FrontToBack);
        }
    }

    #[test]
    fn test_uniform_data_follows_type() {
        let text = document(
            r#"
        <vl::Uniform> { Name = "offsets" Type = UT_INT_VEC2 Count = 2 Data = ( 1 2 3 4 ) }
        <vl::Uniform> { Name = "scale" Type = UT_DOUBLE Data = 0.5 }"#,
        );
        let serializer = Serializer::with_defaults();
        let imported = serializer.import_text(&text).unwrap();
        let again = reimport(&serializer, &imported);

        for store in [&imported.store, &again.store] {
            let uniforms = all::<Uniform>(store);
            let offsets = uniforms.iter().find(|uniform| uniform.name == "offsets").unwrap();
            assert_eq!(offsets.uniform_type, UniformType::IntVec2);
            assert_eq!(offsets.count, 2);
            assert_eq!(offsets.data, UniformData::Int(vec![1, 2, 3, 4]));

            let scale = uniforms.iter().find(|uniform| uniform.name == "scale").unwrap();
            assert_eq!(scale.count, 1);
            assert_eq!(scale.data, UniformData::Double(vec![0.5]));
        }
    }

    #[test]
    fn test_uniform_errors() {
        let serializer = Serializer::with_defaults();

        let short = document(r#"<vl::Uniform> { Name = "tint" Type = UT_FLOAT_VEC3 Data = ( 1.0 2.0 ) }"#);
        let error = serializer.import_text(&short).unwrap_err();
        assert!(matches!(error, VlxError::Arity { ref key, found: 2, .. } if key == "Data"));

        let unknown = document(r#"<vl::Uniform> { Name = "tint" Type = UT_BOGUS }"#);
        let error = serializer.import_text(&unknown).unwrap_err();
        assert!(matches!(error, VlxError::UnknownEnum { ref value, .. } if value == "UT_BOGUS"));

        let untyped = document(r#"<vl::Uniform> { Name = "tint" Data = 1.0 }"#);
        let error = serializer.import_text(&untyped).unwrap_err();
        assert!(matches!(error, VlxError::Check { .. }));

        let config = SerializerConfig::new().with_error_policy(ErrorPolicy::Collect);
        let collecting = Serializer::new(Arc::new(Registry::with_defaults()), config);
        let imported = collecting.import_text(&short).unwrap();
        assert_eq!(imported.diagnostics.len(), 1);
        let uniform = all::<Uniform>(&imported.store)[0];
        assert_eq!(uniform.name, "tint");
        assert!(uniform.data.is_empty());
    }

    #[test]
    fn test_oversized_uniform_count_is_a_field_error() {
        let text = document(
            r#"<vl::Uniform> { Name = "m" Type = UT_FLOAT_MAT4 Count = 9223372036854775807 Data = ( 1.0 ) }"#,
        );
        let error = Serializer::with_defaults().import_text(&text).unwrap_err();
        assert!(matches!(error, VlxError::Check { .. }));

        let config = SerializerConfig::new().with_error_policy(ErrorPolicy::Collect);
        let collecting = Serializer::new(Arc::new(Registry::with_defaults()), config);
        let imported = collecting.import_text(&text).unwrap();
        assert_eq!(imported.diagnostics.len(), 1);
        assert!(!imported.diagnostics[0].is_fatal());
        let uniform = all::<Uniform>(&imported.store)[0];
        assert_eq!(uniform.expected_len(), None);
        assert!(uniform.data.is_empty());

        let exported = collecting.export_document(&imported.store, imported.database).unwrap();
        assert_eq!(exported.diagnostics.len(), 1);
        assert!(matches!(exported.diagnostics[0], VlxError::Export { .. }));
    }

    #[test]
    fn test_inconsistent_uniform_is_refused_on_export() {
        let serializer = Serializer::with_defaults();
        let text = document(r#"<vl::Uniform> { Name = "tint" Type = UT_FLOAT Data = 1.0 }"#);
        let mut imported = serializer.import_text(&text).unwrap();

        let handle = imported.resources()[0];
        imported.store.get_mut::<Uniform>(handle).unwrap().count = 3;
        let error = serializer.export_document(&imported.store, imported.database).unwrap_err();
        assert!(matches!(error, VlxError::Export { ref type_name, .. } if type_name == "vl::Uniform"));
    }
}
