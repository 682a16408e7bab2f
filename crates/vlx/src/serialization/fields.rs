//! Field decoders and encoders shared by the codecs
//!
//! Decoders have the shape `fn(key, value) -> Result<T>` so they can be handed
//! to [`ImportSession::read`](super::ImportSession::read); every failure is a
//! field-level error carrying the line of the offending value.

use crate::document::{Document, KeyValue, List, Structure, Value, ValueData, ValueKind};
use crate::foundation::math::{Mat4, Mat4Ext, Vec2, Vec3, Vec4};
use crate::scene::bounds::{Aabb, Sphere};
use crate::scene::SymbolicEnum;

use super::error::{Result, VlxError};

/// Return a [`VlxError::Check`] naming the condition when it does not hold
#[macro_export]
macro_rules! import_check {
    ($cond:expr, $line:expr) => {
        if !($cond) {
            return Err($crate::serialization::VlxError::Check {
                condition: stringify!($cond).to_string(),
                line: $line,
            });
        }
    };
}

pub use crate::import_check;

/// Ordered entries of a structure being encoded
#[derive(Debug, Default)]
pub struct Entries {
    entries: Vec<KeyValue>,
}

impl Entries {
    /// No entries yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key = value`
    pub fn push(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.entries.push(KeyValue::new(key, value));
        self
    }

    /// Append `key = value` when a value is present
    pub fn push_opt(&mut self, key: impl Into<String>, value: Option<Value>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append `ObjectName`, unless it is empty or just repeats the type name
    pub fn object_name(&mut self, name: &str, type_name: &str) -> &mut Self {
        if !name.is_empty() && name != type_name {
            self.push("ObjectName", Value::string(name));
        }
        self
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was appended
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries in order
    pub fn into_vec(self) -> Vec<KeyValue> {
        self.entries
    }
}

/// Error for a value of the wrong kind
pub fn kind_mismatch(key: &str, expected: ValueKind, value: &Value) -> VlxError {
    VlxError::KindMismatch {
        key: key.to_string(),
        expected,
        found: value.kind(),
        line: value.line_number(),
    }
}

fn arity(key: &str, expected: impl Into<String>, found: usize, value: &Value) -> VlxError {
    VlxError::Arity {
        key: key.to_string(),
        expected: expected.into(),
        found,
        line: value.line_number(),
    }
}

/// `Integer`
pub fn integer(key: &str, value: &Value) -> Result<i64> {
    value
        .as_integer()
        .ok_or_else(|| kind_mismatch(key, ValueKind::Integer, value))
}

/// `Integer` in `i32` range
#[allow(clippy::cast_possible_truncation)]
pub fn int32(key: &str, value: &Value) -> Result<i32> {
    let number = integer(key, value)?;
    import_check!(i32::try_from(number).is_ok(), value.line_number());
    Ok(number as i32)
}

/// `Integer` in `u32` range
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn uint32(key: &str, value: &Value) -> Result<u32> {
    let number = integer(key, value)?;
    import_check!(u32::try_from(number).is_ok(), value.line_number());
    Ok(number as u32)
}

/// Non-negative `Integer`
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn count(key: &str, value: &Value) -> Result<usize> {
    let number = integer(key, value)?;
    import_check!(number >= 0, value.line_number());
    Ok(number as usize)
}

/// `Real`, or an `Integer` widened to real
pub fn real(key: &str, value: &Value) -> Result<f64> {
    value.as_real().ok_or_else(|| kind_mismatch(key, ValueKind::Real, value))
}

/// `Real` narrowed to `f32`
#[allow(clippy::cast_possible_truncation)]
pub fn real32(key: &str, value: &Value) -> Result<f32> {
    real(key, value).map(|number| number as f32)
}

/// `Bool`
pub fn boolean(key: &str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| kind_mismatch(key, ValueKind::Bool, value))
}

/// `String`
pub fn string(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| kind_mismatch(key, ValueKind::String, value))
}

/// `RawtextBlock`, or a `String`
pub fn text(key: &str, value: &Value) -> Result<String> {
    match value.data() {
        ValueData::RawtextBlock(block) => Ok(block.text.clone()),
        ValueData::String(text) => Ok(text.clone()),
        _ => Err(kind_mismatch(key, ValueKind::RawtextBlock, value)),
    }
}

/// `Identifier`
pub fn identifier<'v>(key: &str, value: &'v Value) -> Result<&'v str> {
    value
        .as_identifier()
        .ok_or_else(|| kind_mismatch(key, ValueKind::Identifier, value))
}

/// `List`
pub fn list<'v>(key: &str, value: &'v Value) -> Result<&'v List> {
    value.as_list().ok_or_else(|| kind_mismatch(key, ValueKind::List, value))
}

/// `Structure` tagged `tag`, looked up in `document`
pub fn inline_structure<'d>(document: &'d Document, key: &str, value: &Value, tag: &str) -> Result<&'d Structure> {
    let structure_key = value
        .as_structure()
        .ok_or_else(|| kind_mismatch(key, ValueKind::Structure, value))?;
    let structure = document.structure(structure_key).ok_or(VlxError::DanglingStructure)?;
    import_check!(structure.tag() == tag, value.line_number());
    Ok(structure)
}

/// `ArrayReal`, or an `ArrayInteger` widened to reals
#[allow(clippy::cast_precision_loss)]
pub fn reals(key: &str, value: &Value) -> Result<Vec<f64>> {
    match value.data() {
        ValueData::ArrayReal(array) => Ok(array.values.clone()),
        ValueData::ArrayInteger(array) => Ok(array.values.iter().map(|v| *v as f64).collect()),
        _ => Err(kind_mismatch(key, ValueKind::ArrayReal, value)),
    }
}

/// [`reals`] narrowed to `f32`
#[allow(clippy::cast_possible_truncation)]
pub fn reals32(key: &str, value: &Value) -> Result<Vec<f32>> {
    reals(key, value).map(|values| values.into_iter().map(|v| v as f32).collect())
}

/// `ArrayInteger`
pub fn integers(key: &str, value: &Value) -> Result<Vec<i64>> {
    value
        .as_array_integer()
        .map(|array| array.values.clone())
        .ok_or_else(|| kind_mismatch(key, ValueKind::ArrayInteger, value))
}

/// `ArrayInteger` with every value in `i32` range
pub fn integers32(key: &str, value: &Value) -> Result<Vec<i32>> {
    let values = integers(key, value)?;
    values
        .into_iter()
        .map(|number| {
            i32::try_from(number).map_err(|_| VlxError::Check {
                condition: format!("{number} fits in i32"),
                line: value.line_number(),
            })
        })
        .collect()
}

fn fixed<const N: usize>(key: &str, value: &Value) -> Result<[f32; N]> {
    let values = reals32(key, value)?;
    let found = values.len();
    values
        .try_into()
        .map_err(|_| arity(key, N.to_string(), found, value))
}

/// 2-component real vector
pub fn vec2(key: &str, value: &Value) -> Result<Vec2> {
    fixed::<2>(key, value).map(Vec2::from)
}

/// 3-component real vector
pub fn vec3(key: &str, value: &Value) -> Result<Vec3> {
    fixed::<3>(key, value).map(Vec3::from)
}

/// 4-component real vector
pub fn vec4(key: &str, value: &Value) -> Result<Vec4> {
    fixed::<4>(key, value).map(Vec4::from)
}

/// 4-component integer vector
pub fn ivec4(key: &str, value: &Value) -> Result<[i32; 4]> {
    let values = integers32(key, value)?;
    let found = values.len();
    values.try_into().map_err(|_| arity(key, "4", found, value))
}

/// 4-component unsigned vector
pub fn uvec4(key: &str, value: &Value) -> Result<[u32; 4]> {
    let values = integers(key, value)?;
    let found = values.len();
    let values: Vec<u32> = values
        .into_iter()
        .map(|number| {
            u32::try_from(number).map_err(|_| VlxError::Check {
                condition: format!("{number} fits in u32"),
                line: value.line_number(),
            })
        })
        .collect::<Result<_>>()?;
    values.try_into().map_err(|_| arity(key, "4", found, value))
}

/// Symbolic enumeration; unknown names decode to the fallback value
pub fn enumeration<E: SymbolicEnum>(key: &str, value: &Value) -> Result<E> {
    let name = identifier(key, value)?;
    Ok(E::from_identifier(name).unwrap_or_else(|| {
        log::warn!("line {}: unknown value '{name}' for '{key}'", value.line_number());
        E::FALLBACK
    }))
}

/// Symbolic enumeration whose fallback value is illegal
pub fn required_enumeration<E: SymbolicEnum>(key: &str, value: &Value) -> Result<E> {
    let decoded = enumeration::<E>(key, value)?;
    if decoded.is_fallback() {
        return Err(VlxError::UnknownEnum {
            key: key.to_string(),
            value: identifier(key, value)?.to_string(),
            line: value.line_number(),
        });
    }
    Ok(decoded)
}

fn tagged_reals(value: &Value) -> Option<(Option<&str>, Vec<f64>)> {
    match value.data() {
        ValueData::ArrayReal(array) => Some((array.tag.as_deref(), array.values.clone())),
        #[allow(clippy::cast_precision_loss)]
        ValueData::ArrayInteger(array) => Some((
            array.tag.as_deref(),
            array.values.iter().map(|v| *v as f64).collect(),
        )),
        _ => None,
    }
}

/// Matrix written as a composition list
///
/// Entries are post-multiplied left to right: `<Translate>` (3 values),
/// `<Scale>` (3), `<Matrix>` (16, row-major) and `<LookAt>` (eye, look, up).
/// `<Skew>` is not supported and is skipped.
#[allow(clippy::cast_possible_truncation)]
pub fn matrix(key: &str, value: &Value) -> Result<Mat4> {
    let items = list(key, value)?;
    let mut matrix = Mat4::identity();
    for item in items.iter() {
        let (tag, values) = tagged_reals(item).ok_or_else(|| kind_mismatch(key, ValueKind::ArrayReal, item))?;
        let values: Vec<f32> = values.into_iter().map(|v| v as f32).collect();
        let expect = |count: usize| -> Result<()> {
            if values.len() == count {
                Ok(())
            } else {
                Err(arity(key, count.to_string(), values.len(), item))
            }
        };
        let step = match tag {
            Some("<Translate>") => {
                expect(3)?;
                Mat4::new_translation(&Vec3::new(values[0], values[1], values[2]))
            }
            Some("<Scale>") => {
                expect(3)?;
                Mat4::new_nonuniform_scaling(&Vec3::new(values[0], values[1], values[2]))
            }
            Some("<Matrix>") => {
                let row_major: [f32; 16] = values
                    .as_slice()
                    .try_into()
                    .map_err(|_| arity(key, "16", values.len(), item))?;
                Mat4::from_row_major(&row_major)
            }
            Some("<LookAt>") => {
                expect(9)?;
                Mat4::look_at(
                    Vec3::new(values[0], values[1], values[2]),
                    Vec3::new(values[3], values[4], values[5]),
                    Vec3::new(values[6], values[7], values[8]),
                )
            }
            Some("<Skew>") => {
                log::error!("line {}: <Skew> matrix entries are not supported, ignored", item.line_number());
                continue;
            }
            other => {
                return Err(VlxError::Check {
                    condition: format!("known matrix entry tag, found {}", other.unwrap_or("none")),
                    line: item.line_number(),
                })
            }
        };
        matrix *= step;
    }
    Ok(matrix)
}

/// `<vl::AABB>` with `MinCorner` and `MaxCorner`
pub fn aabb(document: &Document, key: &str, value: &Value) -> Result<Aabb> {
    let structure = inline_structure(document, key, value, "<vl::AABB>")?;
    let corner = |name: &str| -> Result<Vec3> {
        let corner = structure.get(name).ok_or_else(|| VlxError::Check {
            condition: format!("'{name}' present"),
            line: structure.line_number(),
        })?;
        vec3(name, corner)
    };
    Ok(Aabb::new(corner("MinCorner")?, corner("MaxCorner")?))
}

/// `<vl::Sphere>` with `Center` and `Radius`
pub fn sphere(document: &Document, key: &str, value: &Value) -> Result<Sphere> {
    let structure = inline_structure(document, key, value, "<vl::Sphere>")?;
    let missing = |name: &str| VlxError::Check {
        condition: format!("'{name}' present"),
        line: structure.line_number(),
    };
    let center = structure.get("Center").ok_or_else(|| missing("Center"))?;
    let radius = structure.get("Radius").ok_or_else(|| missing("Radius"))?;
    Ok(Sphere::new(vec3("Center", center)?, real32("Radius", radius)?))
}

/// Real from `f32`
pub fn real_value(number: f32) -> Value {
    Value::real(f64::from(number))
}

/// `ArrayReal` from `f32` scalars
pub fn reals_value(values: &[f32]) -> Value {
    Value::array_real(None, values.iter().map(|v| f64::from(*v)).collect())
}

/// `ArrayInteger` from `i32` scalars
pub fn integers_value(values: &[i32]) -> Value {
    Value::array_integer(None, values.iter().map(|v| i64::from(*v)).collect())
}

/// 2-component vector
pub fn vec2_value(vector: &Vec2) -> Value {
    reals_value(vector.as_slice())
}

/// 3-component vector
pub fn vec3_value(vector: &Vec3) -> Value {
    reals_value(vector.as_slice())
}

/// 4-component vector
pub fn vec4_value(vector: &Vec4) -> Value {
    reals_value(vector.as_slice())
}

/// Symbolic name of an enumeration
pub fn enum_value<E: SymbolicEnum>(value: E) -> Value {
    Value::identifier(value.as_str())
}

/// Matrix as a single-entry composition list
///
/// A pure translation is written as `<Translate>`, a pure diagonal scale as
/// `<Scale>`, anything else as a row-major `<Matrix>`.
pub fn matrix_value(matrix: &Mat4) -> Value {
    let entry = if matrix.is_translation_only() {
        reals_tagged("<Translate>", matrix.translation_part().as_slice())
    } else if matrix.is_scaling_only() {
        reals_tagged("<Scale>", matrix.scaling_part().as_slice())
    } else {
        reals_tagged("<Matrix>", &matrix.to_row_major())
    };
    let mut list = List::new();
    list.push(entry);
    Value::list(list)
}

fn reals_tagged(tag: &str, values: &[f32]) -> Value {
    Value::array_real(Some(tag), values.iter().map(|v| f64::from(*v)).collect())
}

/// Entries of a `<vl::AABB>`
pub fn aabb_entries(aabb: &Aabb) -> Entries {
    let mut entries = Entries::new();
    entries
        .push("MinCorner", vec3_value(&aabb.min))
        .push("MaxCorner", vec3_value(&aabb.max));
    entries
}

/// Entries of a `<vl::Sphere>`
pub fn sphere_entries(sphere: &Sphere) -> Entries {
    let mut entries = Entries::new();
    entries
        .push("Center", vec3_value(&sphere.center))
        .push("Radius", real_value(sphere.radius));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::enums::{PrimitiveType, TexWrap};
    use approx::assert_relative_eq;

    fn composition(items: Vec<Value>) -> Value {
        let mut list = List::new();
        for item in items {
            list.push(item);
        }
        Value::list(list)
    }

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(integer("Count", &Value::integer(3)).unwrap(), 3);
        assert_relative_eq!(real("FOV", &Value::integer(60)).unwrap(), 60.0);
        assert!(matches!(
            boolean("Enabled", &Value::integer(1).at_line(7)),
            Err(VlxError::KindMismatch { line: 7, .. })
        ));
        assert!(matches!(int32("Start", &Value::integer(i64::MAX)), Err(VlxError::Check { .. })));
        assert!(uint32("EnableMask", &Value::integer(-1)).is_err());
    }

    #[test]
    fn test_vector_arity() {
        let value = Value::array_real(None, vec![1.0, 2.0, 3.0]);
        assert_eq!(vec3("Center", &value).unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert!(matches!(
            vec4("Diffuse", &value),
            Err(VlxError::Arity { found: 3, .. })
        ));
        let ints = Value::array_integer(None, vec![1, 2]);
        assert_eq!(vec2("Level", &ints).unwrap(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_enumerations() {
        let known = Value::identifier("PT_TRIANGLES");
        assert_eq!(required_enumeration::<PrimitiveType>("PrimitiveType", &known).unwrap(), PrimitiveType::Triangles);

        let unknown = Value::identifier("PT_HEXAGONS").at_line(3);
        assert_eq!(enumeration::<PrimitiveType>("PrimitiveType", &unknown).unwrap(), PrimitiveType::Unknown);
        assert!(matches!(
            required_enumeration::<PrimitiveType>("PrimitiveType", &unknown),
            Err(VlxError::UnknownEnum { line: 3, .. })
        ));
        assert_eq!(enumeration::<TexWrap>("WrapS", &Value::identifier("nope")).unwrap(), TexWrap::Repeat);
    }

    #[test]
    fn test_matrix_composition_order() {
        let value = composition(vec![
            Value::array_real(Some("<Translate>"), vec![1.0, 2.0, 3.0]),
            Value::array_real(Some("<Scale>"), vec![2.0, 2.0, 2.0]),
        ]);
        let decoded = matrix("LocalMatrix", &value).unwrap();
        let expected = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(decoded, expected);
    }

    #[test]
    fn test_matrix_skips_skew_and_rejects_bad_arity() {
        let skewed = composition(vec![
            Value::array_real(Some("<Skew>"), vec![0.1, 0.2, 0.3]),
            Value::array_integer(Some("<Translate>"), vec![4, 5, 6]),
        ]);
        assert_relative_eq!(
            matrix("LocalMatrix", &skewed).unwrap(),
            Mat4::new_translation(&Vec3::new(4.0, 5.0, 6.0))
        );

        let short = composition(vec![Value::array_real(Some("<Matrix>"), vec![1.0; 15])]);
        assert!(matches!(matrix("LocalMatrix", &short), Err(VlxError::Arity { found: 15, .. })));
    }

    #[test]
    fn test_matrix_canonical_encoding() {
        let translation = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let value = matrix_value(&translation);
        let entry = &value.as_list().unwrap().values[0];
        let array = entry.as_array_real().unwrap();
        assert_eq!(array.tag.as_deref(), Some("<Translate>"));
        assert_eq!(array.values, vec![1.0, 2.0, 3.0]);

        let rotation = Mat4::from_axis_angle(&Vec3::z_axis(), 0.5) * translation;
        let value = matrix_value(&rotation);
        let list = value.as_list().unwrap();
        assert_eq!(list.len(), 1);
        let array = list.values[0].as_array_real().unwrap();
        assert_eq!(array.tag.as_deref(), Some("<Matrix>"));
        assert_eq!(array.values.len(), 16);
        assert_relative_eq!(matrix("LocalMatrix", &value).unwrap(), rotation, epsilon = 1e-6);
    }

    #[test]
    fn test_object_name_rules() {
        let mut entries = Entries::new();
        entries.object_name("", "vl::Actor").object_name("vl::Actor", "vl::Actor");
        assert!(entries.is_empty());
        entries.object_name("hero", "vl::Actor");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_inline_bounds() {
        let mut document = Document::new();
        let mut structure = Structure::new("<vl::AABB>");
        structure.extend(aabb_entries(&Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0))).into_vec());
        let key = document.insert(structure);

        let decoded = aabb(&document, "AABB", &Value::structure(key)).unwrap();
        assert_eq!(decoded.min, Vec3::new(-1.0, -2.0, -3.0));
        assert!(matches!(
            sphere(&document, "BoundingSphere", &Value::structure(key)),
            Err(VlxError::Check { .. })
        ));
    }
}
