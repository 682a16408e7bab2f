//! Fatal and field errors under both error policies

use std::sync::Arc;

use crate::config::{ErrorPolicy, SerializerConfig};
use crate::scene::{BufferArray, DrawCall, ObjectStore, ResourceDatabase, Transform};
use crate::serialization::codecs::ResourceDatabaseCodec;
use crate::serialization::{Registry, Serializer, VlxError};

fn document(resources: &str) -> String {
    format!(
        "VLX version=100 encoding=ascii\n\n<vl::ResourceDatabase>\n{{\n    SerializerVersion = 100\n    Resources = [\n{resources}\n    ]\n}}\n"
    )
}

fn collecting() -> Serializer {
    let config = SerializerConfig::new().with_error_policy(ErrorPolicy::Collect);
    Serializer::new(Arc::new(Registry::with_defaults()), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEVEN_REALS: &str = "<vl::ArrayFloat3> { Value = ( 1.0 2.0 3.0 4.0 5.0 6.0 7.0 ) }";

    #[test]
    fn test_other_serializer_version_is_rejected() {
        let text = document("").replace("SerializerVersion = 100", "SerializerVersion = 99");
        let error = Serializer::with_defaults().import_text(&text).unwrap_err();
        assert!(matches!(error, VlxError::Version { found: 99, expected: 100, .. }));

        let error = collecting().import_text(&text).unwrap_err();
        assert!(matches!(error, VlxError::Version { found: 99, .. }));
    }

    #[test]
    fn test_header_version_is_checked() {
        let text = document("").replace("version=100", "version=101");
        let error = Serializer::with_defaults().import_text(&text).unwrap_err();
        assert!(matches!(error, VlxError::Version { found: 101, .. }));
    }

    #[test]
    fn test_version_must_come_first() {
        let text = "VLX version=100 encoding=ascii\n<vl::ResourceDatabase>\n{\n    Resources = [ ]\n    SerializerVersion = 100\n}\n";
        let error = Serializer::with_defaults().import_text(text).unwrap_err();
        assert!(matches!(error, VlxError::DocumentShape { .. }));
    }

    #[test]
    fn test_unknown_tag_aborts_import() {
        let text = document("<vl::Transform> { }\n<vl::Teapot> { Spout = 1 }");
        let error = Serializer::with_defaults().import_text(&text).unwrap_err();
        match error {
            VlxError::UnknownTag { tag, .. } => assert_eq!(tag, "<vl::Teapot>"),
            other => panic!("unexpected error {other}"),
        }

        let error = collecting().import_text(&text).unwrap_err();
        assert!(error.to_string().contains("<vl::Teapot>"));
    }

    #[test]
    fn test_array_arity_fails_first_error_policy() {
        let error = Serializer::with_defaults().import_text(&document(SEVEN_REALS)).unwrap_err();
        match error {
            VlxError::Arity { key, found, .. } => {
                assert_eq!(key, "Value");
                assert_eq!(found, 7);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_array_arity_is_collected() {
        let imported = collecting().import_text(&document(SEVEN_REALS)).unwrap();
        assert_eq!(imported.diagnostics.len(), 1);
        assert!(matches!(imported.diagnostics[0], VlxError::Arity { found: 7, .. }));

        let array = imported.store.get::<BufferArray>(imported.resources()[0]).unwrap();
        assert!(array.is_empty());
    }

    #[test]
    fn test_bad_field_keeps_earlier_fields() {
        let text = document("<vl::Transform> { ObjectName = \"arm\" LocalMatrix = 5 }");
        let imported = collecting().import_text(&text).unwrap();
        assert_eq!(imported.diagnostics.len(), 1);
        assert!(!imported.diagnostics[0].is_fatal());

        let transform = imported.store.get::<Transform>(imported.resources()[0]).unwrap();
        assert_eq!(transform.object_name, "arm");
        assert_eq!(transform.children.len(), 0);
    }

    #[test]
    fn test_wrong_reference_kind_is_field_error() {
        let text = document("<vl::Transform> { Children = [ <vl::ArrayFloat1> { Value = ( 1.0 ) } ] }");
        let error = Serializer::with_defaults().import_text(&text).unwrap_err();
        assert!(matches!(error, VlxError::WrongReference { .. }));

        let imported = collecting().import_text(&text).unwrap();
        let transform = imported.store.get::<Transform>(imported.resources()[0]).unwrap();
        assert!(transform.children.is_empty());
    }

    #[test]
    fn test_index_buffer_width_must_match_draw_call() {
        let text = document(
            "<vl::DrawElementsUInt> { PrimitiveType = PT_TRIANGLES IndexBuffer = <vl::ArrayUShort1> { Value = ( 0 1 2 ) } }\n\
             <vl::MultiDrawElementsUByte> { PrimitiveType = PT_POINTS IndexBuffer = <vl::ArrayUInt1> { Value = ( 0 1 2 ) } CountVector = ( 3 ) }",
        );
        let error = Serializer::with_defaults().import_text(&text).unwrap_err();
        match error {
            VlxError::WrongReference { key, expected, found, .. } => {
                assert_eq!(key, "IndexBuffer");
                assert_eq!(expected, "vl::ArrayUInt1");
                assert_eq!(found, "vl::ArrayUShort1");
            }
            other => panic!("unexpected error {other}"),
        }

        let imported = collecting().import_text(&text).unwrap();
        assert_eq!(imported.diagnostics.len(), 2);
        for handle in imported.resources() {
            let draw_call = imported.store.get::<DrawCall>(*handle).unwrap();
            assert!(draw_call.index_buffer().is_none());
        }
    }

    #[test]
    fn test_unresolved_uid_fails_link() {
        let text = document("<vl::Transform> { Children = [ #nowhere ] }");
        let error = Serializer::with_defaults().import_text(&text).unwrap_err();
        assert!(matches!(error, VlxError::Link { .. }));
    }

    #[test]
    fn test_root_must_be_resource_database() {
        let text = "VLX version=100 encoding=ascii\n<vl::Transform> { }\n";
        let error = Serializer::with_defaults().import_text(text).unwrap_err();
        assert!(matches!(error, VlxError::DocumentShape { .. }));
    }

    #[test]
    fn test_unsupported_resource_is_skipped_on_export() {
        let mut store = ObjectStore::new();
        let transform = store.insert(Transform::new());
        let mut database = ResourceDatabase::new();
        database.push(transform);
        let database = store.insert(database);

        let mut registry = Registry::new();
        registry.register("vl::ResourceDatabase", Arc::new(ResourceDatabaseCodec));
        let serializer = Serializer::new(Arc::new(registry), SerializerConfig::default());

        let exported = serializer.export_document(&store, database).unwrap();
        assert_eq!(exported.document.len(), 1);
        let root = exported.document.structure(exported.root).unwrap();
        assert_eq!(root.get("Resources").and_then(|value| value.as_list()).map(|list| list.len()), Some(0));
    }

    #[test]
    fn test_nested_unknown_type_fails_export() {
        let mut store = ObjectStore::new();
        let child = store.insert(BufferArray::new(crate::scene::ScalarType::Float, 3));
        let mut parent = Transform::new();
        parent.add_child(child);
        let parent = store.insert(parent);
        let mut database = ResourceDatabase::new();
        database.push(parent);
        let database = store.insert(database);

        let mut registry = Registry::new();
        registry.register("vl::ResourceDatabase", Arc::new(ResourceDatabaseCodec));
        registry.register("vl::Transform", Arc::new(crate::serialization::codecs::TransformCodec));
        let serializer = Serializer::new(Arc::new(registry), SerializerConfig::default());

        let error = serializer.export_document(&store, database).unwrap_err();
        match error {
            VlxError::UnknownType { type_name } => assert_eq!(type_name, "vl::ArrayFloat3"),
            other => panic!("unexpected error {other}"),
        }
    }
}
