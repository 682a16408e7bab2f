//! Shader uniforms

use crate::document::{Value, ValueData, ValueKind};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::enums::{UniformScalar, UniformType};
use crate::scene::{Uniform, UniformData};
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Uniform`
#[derive(Debug, Default)]
pub struct UniformCodec;

/// Integer scalar or `ArrayInteger`
fn integer_data(key: &str, value: &Value) -> Result<Vec<i64>> {
    match value.data() {
        ValueData::Integer(number) => Ok(vec![*number]),
        ValueData::ArrayInteger(array) => Ok(array.values.clone()),
        _ => Err(fields::kind_mismatch(key, ValueKind::ArrayInteger, value)),
    }
}

/// Real scalar or real array; integers are widened
fn real_data(key: &str, value: &Value) -> Result<Vec<f64>> {
    match value.data() {
        ValueData::Integer(_) | ValueData::Real(_) => fields::real(key, value).map(|number| vec![number]),
        _ => fields::reals(key, value),
    }
}

fn out_of_range(number: i64, target: &str, value: &Value) -> VlxError {
    VlxError::Check {
        condition: format!("{number} fits in {target}"),
        line: value.line_number(),
    }
}

/// Payload of `value` in the scalar family of `uniform_type`
#[allow(clippy::cast_possible_truncation)]
fn decode_data(key: &str, value: &Value, uniform_type: UniformType) -> Result<UniformData> {
    let Some(scalar) = uniform_type.scalar() else {
        return Err(VlxError::Check {
            condition: "uniform type is set before its data".to_string(),
            line: value.line_number(),
        });
    };
    let data = match scalar {
        UniformScalar::Int => UniformData::Int(
            integer_data(key, value)?
                .into_iter()
                .map(|number| i32::try_from(number).map_err(|_| out_of_range(number, "i32", value)))
                .collect::<Result<_>>()?,
        ),
        UniformScalar::UInt => UniformData::UInt(
            integer_data(key, value)?
                .into_iter()
                .map(|number| u32::try_from(number).map_err(|_| out_of_range(number, "u32", value)))
                .collect::<Result<_>>()?,
        ),
        UniformScalar::Float => {
            UniformData::Float(real_data(key, value)?.into_iter().map(|number| number as f32).collect())
        }
        UniformScalar::Double => UniformData::Double(real_data(key, value)?),
    };
    Ok(data)
}

/// Single scalar for one value, array otherwise
fn encode_data(data: &UniformData) -> Value {
    match data {
        UniformData::Int(values) => match values.as_slice() {
            [single] => Value::integer(i64::from(*single)),
            _ => fields::integers_value(values),
        },
        UniformData::UInt(values) => match values.as_slice() {
            [single] => Value::integer(i64::from(*single)),
            _ => Value::array_integer(None, values.iter().map(|v| i64::from(*v)).collect()),
        },
        UniformData::Float(values) => match values.as_slice() {
            [single] => fields::real_value(*single),
            _ => fields::reals_value(values),
        },
        UniformData::Double(values) => match values.as_slice() {
            [single] => Value::real(*single),
            _ => Value::array_real(None, values.clone()),
        },
    }
}

impl Codec for UniformCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Uniform::default());
        let mut uniform = Uniform {
            count: 1,
            ..Uniform::default()
        };

        if let Some(name) = s.read(structure, "Name", fields::string)? {
            uniform.name = name;
        }
        if let Some(uniform_type) = s.read(structure, "Type", fields::required_enumeration)? {
            uniform.uniform_type = uniform_type;
        }
        if let Some(count) = s.read(structure, "Count", fields::count)? {
            uniform.count = count;
        }
        let uniform_type = uniform.uniform_type;
        if let Some(data) = s.read(structure, "Data", |key, value| decode_data(key, value, uniform_type))? {
            let line = structure.get("Data").map_or(structure.line_number(), Value::line_number);
            match uniform.expected_len() {
                Some(expected) if expected == data.len() => uniform.data = data,
                Some(_) => {
                    s.report(VlxError::Arity {
                        key: "Data".to_string(),
                        expected: format!("{} x {}", uniform.count, uniform_type.components()),
                        found: data.len(),
                        line,
                    })?;
                }
                None => {
                    s.report(VlxError::Check {
                        condition: format!("{} x {} does not overflow", uniform.count, uniform_type.components()),
                        line,
                    })?;
                }
            }
        }

        s.finalize(handle, uniform);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let uniform = s.object::<Uniform>(handle)?;
        let expected = uniform.expected_len();
        if expected != Some(uniform.data.len()) {
            return Err(VlxError::Export {
                type_name: "vl::Uniform".to_string(),
                message: format!(
                    "'{}' holds {} values, its type calls for {}",
                    uniform.name,
                    uniform.data.len(),
                    expected.map_or_else(|| "more than fit in memory".to_string(), |len| len.to_string())
                ),
            });
        }
        let key = s.register(handle, "vl::Uniform", "uniform_");

        let mut entries = Entries::new();
        entries
            .push("Name", Value::string(uniform.name.as_str()))
            .push("Type", fields::enum_value(uniform.uniform_type))
            .push("Count", Value::integer(i64::try_from(uniform.count).unwrap_or(i64::MAX)))
            .push("Data", encode_data(&uniform.data));

        s.fill(key, entries)
    }
}
