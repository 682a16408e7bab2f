//! Actor, effect, shader and a self-referencing transform hierarchy

use crate::document::{Document, Structure, ValueData};
use crate::scene::{Actor, Effect, ObjectStore, RenderState, Shader, Transform};
use crate::serialization::Serializer;

const SCENE: &str = r#"VLX version=100 encoding=ascii

<vl::ResourceDatabase>
{
    SerializerVersion = 100
    Resources = [
        <vl::Actor>
        {
            ObjectName = "ship"
            Effect = <vl::Effect>
            {
                Lods = [
                    <vl::ShaderPasses> [
                        <vl::Shader>
                        {
                            RenderStates = [
                                <vl::DepthFunc> { DepthFunc = FU_LEQUAL }
                                0 <vl::TextureSampler> { }
                            ]
                            Enables = [ EN_DEPTH_TEST ]
                        }
                    ]
                ]
            }
            Transform = #transform_id1
        }
        <vl::Transform>
        {
            ID = #transform_id1
            Children = [
                <vl::Transform> { }
                #transform_id1
            ]
        }
    ]
}
"#;

fn find_structure<'d>(document: &'d Document, tag: &str) -> Option<&'d Structure> {
    document.iter().map(|(_, structure)| structure).find(|structure| structure.tag() == tag)
}

fn only<T: crate::scene::SceneObject>(store: &ObjectStore) -> &T {
    let mut found = store.iter().filter_map(|(_, object)| T::from_object(object));
    let first = found.next().unwrap();
    assert!(found.next().is_none());
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_imports_expected_objects() {
        let imported = Serializer::with_defaults().import_text(SCENE).unwrap();
        let store = &imported.store;
        assert!(imported.diagnostics.is_empty());

        let counts = store.count_by_type();
        assert_eq!(counts.get("vl::Actor"), Some(&1));
        assert_eq!(counts.get("vl::Effect"), Some(&1));
        assert_eq!(counts.get("vl::Shader"), Some(&1));
        assert_eq!(counts.get("vl::Transform"), Some(&2));
        assert_eq!(imported.resources().len(), 2);

        let actor = only::<Actor>(store);
        assert_eq!(actor.object_name, "ship");
        let effect = store.get::<Effect>(actor.effect.unwrap()).unwrap();
        assert_eq!(effect.lods.len(), 1);
        assert_eq!(effect.lods[0].len(), 1);

        let shader = only::<Shader>(store);
        assert_eq!(shader.render_states.len(), 2);
        assert_eq!(shader.render_states[0].index, None);
        assert_eq!(shader.render_states[1].index, Some(0));
        assert!(matches!(
            store.get::<RenderState>(shader.render_states[1].state),
            Some(RenderState::TextureSampler(_))
        ));

        let root = imported.resources()[1];
        assert_eq!(actor.transform, Some(root));
        let transform = store.get::<Transform>(root).unwrap();
        assert_eq!(transform.children.len(), 2);
        assert_ne!(transform.children[0], root);
        assert_eq!(transform.children[1], root);
    }

    #[test]
    fn test_scene_exports_index_before_state() {
        let serializer = Serializer::with_defaults();
        let imported = serializer.import_text(SCENE).unwrap();
        let exported = serializer.export_document(&imported.store, imported.database).unwrap();

        let shader = find_structure(&exported.document, "<vl::Shader>").unwrap();
        let states = shader.get("RenderStates").and_then(|value| value.as_list()).unwrap();
        assert_eq!(states.len(), 3);
        assert!(matches!(states.values[0].data(), ValueData::Structure(_)));
        assert_eq!(states.values[1].as_integer(), Some(0));
        assert!(matches!(states.values[2].data(), ValueData::Structure(_)));

        let transforms: Vec<_> = exported
            .document
            .iter()
            .filter(|(_, structure)| structure.tag() == "<vl::Transform>")
            .collect();
        assert_eq!(transforms.len(), 2);
    }

    #[test]
    fn test_scene_survives_text_round_trip() {
        let serializer = Serializer::with_defaults();
        let imported = serializer.import_text(SCENE).unwrap();
        let text = serializer.export_text(&imported.store, imported.database).unwrap();
        let again = serializer.import_text(&text).unwrap();

        assert_eq!(again.store.count_by_type(), imported.store.count_by_type());

        let actor = only::<Actor>(&again.store);
        let root = actor.transform.unwrap();
        let transform = again.store.get::<Transform>(root).unwrap();
        assert_eq!(transform.children[1], root);

        let shader = only::<Shader>(&again.store);
        let indices: Vec<_> = shader.render_states.iter().map(|slot| slot.index).collect();
        assert_eq!(indices, vec![None, Some(0)]);
        assert_eq!(shader.enables.len(), 1);
    }
}
