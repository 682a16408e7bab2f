//! Transform matrices through composition lists

use crate::document::{Value, ValueData};
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::{ObjectStore, ResourceDatabase, Transform};
use crate::serialization::Serializer;

fn transform_with(local_matrix: &str) -> String {
    format!(
        "VLX version=100 encoding=ascii\n<vl::ResourceDatabase>\n{{\n    SerializerVersion = 100\n    Resources = [ <vl::Transform> {{ LocalMatrix = {local_matrix} }} ]\n}}\n"
    )
}

fn import_matrix(local_matrix: &str) -> Mat4 {
    let imported = Serializer::with_defaults().import_text(&transform_with(local_matrix)).unwrap();
    imported.store.get::<Transform>(imported.resources()[0]).unwrap().local_matrix
}

/// The single tagged entry written for `matrix`
fn export_matrix(matrix: Mat4) -> (String, Vec<f64>) {
    let mut store = ObjectStore::new();
    let transform = store.insert(Transform::from_matrix(matrix));
    let mut database = ResourceDatabase::new();
    database.push(transform);
    let database = store.insert(database);

    let exported = Serializer::with_defaults().export_document(&store, database).unwrap();
    let (_, structure) = exported
        .document
        .iter()
        .find(|(_, structure)| structure.tag() == "<vl::Transform>")
        .unwrap();
    let entries = structure.get("LocalMatrix").and_then(Value::as_list).unwrap();
    assert_eq!(entries.len(), 1);
    match entries.values[0].data() {
        ValueData::ArrayReal(array) => (array.tag.clone().unwrap_or_default(), array.values.clone()),
        other => panic!("unexpected matrix entry {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_composition_multiplies_left_to_right() {
        let matrix = import_matrix("[ <Translate> ( 1 2 3 ) <Scale> ( 2 2 2 ) ]");
        let expected = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(matrix, expected);

        let point = matrix.transform_point(&crate::foundation::math::Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(point.coords, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_row_major_matrix_entry() {
        let matrix = import_matrix(
            "[ <Matrix> ( 1.0 0.0 0.0 5.0  0.0 1.0 0.0 6.0  0.0 0.0 1.0 7.0  0.0 0.0 0.0 1.0 ) ]",
        );
        assert_relative_eq!(matrix, Mat4::new_translation(&Vec3::new(5.0, 6.0, 7.0)));
    }

    #[test]
    fn test_skew_entry_is_ignored() {
        let matrix = import_matrix("[ <Skew> ( 1.0 2.0 3.0 ) <Translate> ( 1.0 0.0 0.0 ) ]");
        assert_relative_eq!(matrix, Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_pure_translation_exports_translate() {
        let (tag, values) = export_matrix(Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(tag, "<Translate>");
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pure_scale_exports_scale() {
        let (tag, values) = export_matrix(Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 3.0, 4.0)));
        assert_eq!(tag, "<Scale>");
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rotation_exports_row_major_matrix() {
        let rotation = Mat4::new_rotation(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        let matrix = Mat4::new_translation(&Vec3::new(4.0, 5.0, 6.0)) * rotation;
        let (tag, values) = export_matrix(matrix);
        assert_eq!(tag, "<Matrix>");
        assert_eq!(values.len(), 16);
        assert_relative_eq!(values[3], 4.0);
        assert_relative_eq!(values[7], 5.0);
        assert_relative_eq!(values[11], 6.0);
        assert_relative_eq!(values[15], 1.0);

        let again = import_matrix(&format!(
            "[ <Matrix> ( {} ) ]",
            values.iter().map(|v| format!("{v:?}")).collect::<Vec<_>>().join(" ")
        ));
        assert_relative_eq!(again, matrix, epsilon = 1e-6);
    }
}
