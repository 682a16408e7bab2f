//! Object graphs written to text and read back

use crate::config::{PrinterConfig, SerializerConfig};
use crate::foundation::collections::ObjectHandle;
use crate::foundation::math::{Mat4Ext, Vec3, Vec4};
use crate::scene::enums::{PrimitiveType, TexFilter, TexWrap, TextureDimension, TextureFormat};
use crate::scene::{
    Aabb, BufferArray, Camera, DrawCall, DrawCallKind, Geometry, GlslProgram, GlslShader, IndexWidth, ObjectStore,
    RenderState, ResourceDatabase, ScalarType, ShaderStage, Sphere, Texture, TextureSetup, Uniform, Viewport,
};
use crate::serialization::{Imported, Serializer, VlxError};

const VERTEX_SOURCE: &str = "void main()\n{\n    gl_Position = ftransform();\n}";

/// Two geometries sharing one vertex array, a program and a camera
fn sample_store() -> (ObjectStore, ObjectHandle) {
    let mut store = ObjectStore::new();

    let mut vertices = BufferArray::new(ScalarType::Float, 3);
    vertices.set_from_reals(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    let vertices = store.insert(vertices);
    let mut indices = BufferArray::new(ScalarType::UInt, 1);
    indices.set_from_integers(&[0, 1, 2]);
    let indices = store.insert(indices);

    let elements = store.insert(DrawCall::elements(PrimitiveType::Triangles, IndexWidth::UInt, Some(indices)));
    let arrays = store.insert(DrawCall::arrays(PrimitiveType::Triangles, 0, 3));

    let mut indexed = Geometry::new().with_name("indexed");
    indexed.vertex_array = Some(vertices);
    indexed.draw_calls.push(elements);
    let indexed = store.insert(indexed);

    let mut plain = Geometry::new().with_name("plain");
    plain.vertex_array = Some(vertices);
    plain.draw_calls.push(arrays);
    let plain = store.insert(plain);

    let mut vertex_shader = GlslShader::new(ShaderStage::Vertex);
    vertex_shader.source = VERTEX_SOURCE.to_string();
    let vertex_shader = store.insert(vertex_shader);
    let tint = store.insert(Uniform::vec4("tint", [1.0, 0.5, 0.25, 1.0]));
    let program = store.insert(RenderState::GlslProgram(GlslProgram {
        object_name: "flat".to_string(),
        attrib_location_bindings: vec![("position".to_string(), 0)],
        frag_data_location_bindings: Vec::new(),
        uniforms: vec![tint],
        shaders: vec![vertex_shader],
    }));

    let mut viewport = Viewport::new(0, 0, 640, 480);
    viewport.clear_color = Vec4::new(0.1, 0.2, 0.3, 1.0);
    let viewport = store.insert(viewport);
    let mut camera = Camera::new();
    camera.viewport = Some(viewport);
    camera.look_at(Vec3::new(3.0, 2.0, 5.0), Vec3::zeros(), Vec3::y());
    let camera = store.insert(camera);

    let mut database = ResourceDatabase::new();
    for resource in [indexed, plain, program, camera] {
        database.push(resource);
    }
    let database = store.insert(database);
    (store, database)
}

/// A bounded multi-draw geometry, an unbounded one and a texture
fn detail_store() -> (ObjectStore, ObjectHandle) {
    let mut store = ObjectStore::new();

    let mut indices = BufferArray::new(ScalarType::UShort, 1);
    indices.set_from_integers(&[0, 1, 2, 0, 2, 3]);
    let indices = store.insert(indices);
    let mut strips = DrawCall::multi_elements(PrimitiveType::Triangles, IndexWidth::UShort, Some(indices));
    if let DrawCallKind::MultiElements {
        count_vector,
        base_vertices,
        ..
    } = &mut strips.kind
    {
        *count_vector = vec![3, 3];
        *base_vertices = vec![0, 4];
    }
    let strips = store.insert(strips);

    let mut bounded = Geometry::new().with_name("bounded");
    bounded.renderable.bounds.set_aabb(Aabb::new(Vec3::new(-1.0, 0.0, -0.5), Vec3::new(1.0, 2.0, 0.5)));
    bounded.renderable.bounds.set_sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.5));
    bounded.draw_calls.push(strips);
    let bounded = store.insert(bounded);
    let unbounded = store.insert(Geometry::new().with_name("unbounded"));

    let mut texture = Texture::from_image("stone.png");
    if let Some(setup) = texture.setup.as_mut() {
        setup.format = TextureFormat::Luminance;
        setup.width = 256;
        setup.gen_mipmaps = true;
    }
    texture.tex_parameter.min_filter = TexFilter::NearestMipmapLinear;
    texture.tex_parameter.wrap_t = TexWrap::MirroredRepeat;
    texture.tex_parameter.border_color = Vec4::new(0.0, 0.0, 0.0, 1.0);
    texture.tex_parameter.anisotropy = 8.0;
    let texture = store.insert(texture);

    let mut database = ResourceDatabase::new();
    for resource in [bounded, unbounded, texture] {
        database.push(resource);
    }
    let database = store.insert(database);
    (store, database)
}

fn round_trip(serializer: &Serializer) -> (ObjectStore, Imported) {
    let (store, database) = sample_store();
    let text = serializer.export_text(&store, database).unwrap();
    let imported = serializer.import_text(&text).unwrap();
    (store, imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip_keeps_object_counts() {
        let (store, imported) = round_trip(&Serializer::with_defaults());
        assert_eq!(imported.store.count_by_type(), store.count_by_type());
        assert_eq!(imported.resources().len(), 4);
        assert!(imported.diagnostics.is_empty());
    }

    #[test]
    fn test_shared_array_stays_shared() {
        let (_, imported) = round_trip(&Serializer::with_defaults());
        let resources = imported.resources();
        let indexed = imported.store.get::<Geometry>(resources[0]).unwrap();
        let plain = imported.store.get::<Geometry>(resources[1]).unwrap();

        assert_eq!(indexed.renderable.object_name, "indexed");
        assert_eq!(plain.renderable.object_name, "plain");
        assert!(indexed.vertex_array.is_some());
        assert_eq!(indexed.vertex_array, plain.vertex_array);

        let vertices = imported.store.get::<BufferArray>(indexed.vertex_array.unwrap()).unwrap();
        assert_eq!(vertices.type_name(), "vl::ArrayFloat3");
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices.to_reals()[3], 1.0);
    }

    #[test]
    fn test_draw_calls_and_index_buffer() {
        let (_, imported) = round_trip(&Serializer::with_defaults());
        let indexed = imported.store.get::<Geometry>(imported.resources()[0]).unwrap();
        let draw_call = imported.store.get::<DrawCall>(indexed.draw_calls[0]).unwrap();
        assert_eq!(draw_call.type_name(), "vl::DrawElementsUInt");
        assert_eq!(draw_call.primitive_type, PrimitiveType::Triangles);

        let indices = imported.store.get::<BufferArray>(draw_call.index_buffer().unwrap()).unwrap();
        assert_eq!(indices.to_integers(), vec![0, 1, 2]);
    }

    #[test]
    fn test_program_source_and_uniforms() {
        let (_, imported) = round_trip(&Serializer::with_defaults());
        let Some(RenderState::GlslProgram(program)) = imported.store.get::<RenderState>(imported.resources()[2]) else {
            panic!("expected a GLSL program");
        };
        assert_eq!(program.object_name, "flat");
        assert_eq!(program.attrib_location_bindings, vec![("position".to_string(), 0)]);
        assert!(program.frag_data_location_bindings.is_empty());

        let shader = imported.store.get::<GlslShader>(program.shaders[0]).unwrap();
        assert_eq!(shader.stage, ShaderStage::Vertex);
        assert_eq!(shader.source, VERTEX_SOURCE);

        let tint = imported.store.get::<Uniform>(program.uniforms[0]).unwrap();
        assert_eq!(tint, &Uniform::vec4("tint", [1.0, 0.5, 0.25, 1.0]));
    }

    #[test]
    fn test_camera_and_viewport() {
        let (store, imported) = round_trip(&Serializer::with_defaults());
        let original = store
            .iter()
            .find_map(|(_, object)| <Camera as crate::scene::SceneObject>::from_object(object))
            .unwrap();
        let camera = imported.store.get::<Camera>(imported.resources()[3]).unwrap();

        assert_relative_eq!(camera.view_matrix, original.view_matrix, epsilon = 1e-6);
        assert_relative_eq!(camera.fov, original.fov);
        let viewport = imported.store.get::<Viewport>(camera.viewport.unwrap()).unwrap();
        assert_eq!((viewport.width, viewport.height), (640, 480));
        assert_relative_eq!(viewport.clear_color, Vec4::new(0.1, 0.2, 0.3, 1.0));
        assert!(!camera.view_matrix.is_translation_only());
    }

    #[test]
    fn test_second_round_trip_prints_same_text() {
        let config = SerializerConfig::new().with_printer(PrinterConfig::new().with_indent_width(2));
        let serializer = Serializer::new(std::sync::Arc::new(crate::serialization::Registry::with_defaults()), config);
        let (store, database) = sample_store();
        let first = serializer.export_text(&store, database).unwrap();
        let imported = serializer.import_text(&first).unwrap();
        let second = serializer.export_text(&imported.store, imported.database).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_and_load_through_io() {
        let serializer = Serializer::with_defaults();
        let (store, database) = sample_store();
        let mut bytes = Vec::new();
        let diagnostics = serializer.write_vlx(&mut bytes, &store, database).unwrap();
        assert!(diagnostics.is_empty());

        let imported = serializer.load_vlx(bytes.as_slice()).unwrap();
        assert_eq!(imported.store.len(), store.len());
    }

    #[test]
    fn test_clean_bounds_survive_and_dirty_bounds_stay_dirty() {
        let serializer = Serializer::with_defaults();
        let (store, database) = detail_store();
        let exported = serializer.export_document(&store, database).unwrap();
        let aabbs = exported.document.iter().filter(|(_, structure)| structure.tag() == "<vl::AABB>").count();
        assert_eq!(aabbs, 1);

        let imported = serializer.import_text(&exported.to_text(&PrinterConfig::default())).unwrap();
        let original = store.get::<Geometry>(store.get::<ResourceDatabase>(database).unwrap().resources[0]).unwrap();
        let bounded = imported.store.get::<Geometry>(imported.resources()[0]).unwrap();
        assert!(!bounded.renderable.bounds.is_dirty());
        assert_eq!(bounded.renderable.bounds, original.renderable.bounds);
        assert_eq!(bounded.renderable.bounds.sphere().radius, 1.5);

        let unbounded = imported.store.get::<Geometry>(imported.resources()[1]).unwrap();
        assert_eq!(unbounded.renderable.object_name, "unbounded");
        assert!(unbounded.renderable.bounds.is_dirty());
    }

    #[test]
    fn test_multi_draw_elements_round_trip() {
        let serializer = Serializer::with_defaults();
        let (store, database) = detail_store();
        let imported = serializer.import_text(&serializer.export_text(&store, database).unwrap()).unwrap();

        let bounded = imported.store.get::<Geometry>(imported.resources()[0]).unwrap();
        let draw_call = imported.store.get::<DrawCall>(bounded.draw_calls[0]).unwrap();
        assert_eq!(draw_call.type_name(), "vl::MultiDrawElementsUShort");
        let DrawCallKind::MultiElements {
            count_vector,
            base_vertices,
            primitive_restart_enabled,
            ..
        } = &draw_call.kind
        else {
            panic!("expected a multi draw, got {:?}", draw_call.kind);
        };
        assert_eq!(count_vector, &vec![3, 3]);
        assert_eq!(base_vertices, &vec![0, 4]);
        assert!(!primitive_restart_enabled);

        let indices = imported.store.get::<BufferArray>(draw_call.index_buffer().unwrap()).unwrap();
        assert_eq!(indices.type_name(), "vl::ArrayUShort1");
        assert_eq!(indices.to_integers(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_texture_setup_and_parameters_round_trip() {
        let serializer = Serializer::with_defaults();
        let (store, database) = detail_store();
        let text = serializer.export_text(&store, database).unwrap();
        assert!(text.contains("<vl::Texture::SetupParams>"));
        assert!(text.contains("<vl::TexParameter>"));

        let imported = serializer.import_text(&text).unwrap();
        let original = store.get::<Texture>(store.get::<ResourceDatabase>(database).unwrap().resources[2]).unwrap();
        let texture = imported.store.get::<Texture>(imported.resources()[2]).unwrap();
        assert_eq!(texture, original);

        let setup: &TextureSetup = texture.setup.as_ref().unwrap();
        assert_eq!(setup.dimension, TextureDimension::Texture2D);
        assert_eq!(setup.image_path, "stone.png");
        assert_eq!(setup.width, 256);
        assert_eq!(texture.tex_parameter.min_filter, TexFilter::NearestMipmapLinear);
        assert_eq!(texture.tex_parameter.anisotropy, 8.0);
    }

    #[test]
    fn test_infinite_far_plane_is_not_written() {
        let mut store = ObjectStore::new();
        let mut camera = Camera::new();
        camera.far_plane = f32::INFINITY;
        let camera = store.insert(camera);
        let mut database = ResourceDatabase::new();
        database.push(camera);
        let database = store.insert(database);

        let error = Serializer::with_defaults().export_text(&store, database).unwrap_err();
        match error {
            VlxError::Export { type_name, message } => {
                assert_eq!(type_name, "vl::Camera");
                assert!(message.contains("FarPlane"));
            }
            other => panic!("unexpected error {other}"),
        }

        let config = SerializerConfig::new().with_error_policy(crate::config::ErrorPolicy::Collect);
        let serializer = Serializer::new(std::sync::Arc::new(crate::serialization::Registry::with_defaults()), config);
        let exported = serializer.export_document(&store, database).unwrap();
        assert_eq!(exported.diagnostics.len(), 1);
        let text = exported.to_text(&PrinterConfig::default());
        assert!(!text.contains("FarPlane"));

        let imported = serializer.import_text(&text).unwrap();
        assert!(imported.diagnostics.is_empty());
        let camera = imported.store.get::<Camera>(imported.resources()[0]).unwrap();
        assert!(camera.far_plane.is_finite());
    }
}
