//! Buffer arrays, `vl::Array*` in every scalar type and arity

use super::type_name_of;
use crate::document::{Value, ValueData, ValueKind};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::BufferArray;
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Array{Byte,UByte,Short,UShort,Int,UInt,Float,Double}{1..4}`
#[derive(Debug, Default)]
pub struct ArrayCodec;

fn decode_values(array: &mut BufferArray, key: &str, value: &Value) -> Result<()> {
    let count = match value.data() {
        ValueData::ArrayReal(reals) => reals.values.len(),
        ValueData::ArrayInteger(integers) => integers.values.len(),
        _ => return Err(fields::kind_mismatch(key, ValueKind::ArrayReal, value)),
    };
    if count % array.components() != 0 {
        return Err(VlxError::Arity {
            key: key.to_string(),
            expected: format!("a multiple of {}", array.components()),
            found: count,
            line: value.line_number(),
        });
    }
    match value.data() {
        ValueData::ArrayReal(reals) => array.set_from_reals(&reals.values),
        ValueData::ArrayInteger(integers) => array.set_from_integers(&integers.values),
        _ => {}
    }
    Ok(())
}

impl Codec for ArrayCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let Some((scalar, components)) = BufferArray::layout_for(type_name_of(structure.tag())) else {
            return Err(VlxError::UnknownTag {
                tag: structure.tag().to_string(),
                line: structure.line_number(),
            });
        };
        let mut array = BufferArray::new(scalar, components);
        let handle = s.register(key, array.clone());

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            array.object_name = name;
        }
        if let Some(value) = structure.get("Value") {
            s.check(decode_values(&mut array, "Value", value))?;
        }

        s.finalize(handle, array);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let array = s.object::<BufferArray>(handle)?;
        let key = s.register(handle, array.type_name(), "array_");

        let mut entries = Entries::new();
        entries.object_name(&array.object_name, array.type_name());
        let value = if array.scalar().is_real() {
            Value::array_real(None, array.to_reals())
        } else {
            Value::array_integer(None, array.to_integers())
        };
        entries.push("Value", value);

        s.fill(key, entries)
    }
}
