//! Document values
//!
//! A closed set of value kinds. Every value remembers the source line it was
//! parsed from so that diagnostics can point back into the text.

use std::fmt;

use crate::foundation::collections::StructureKey;

/// The kind of a [`Value`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `NULL`
    Null,
    /// `true` / `false`
    Bool,
    /// 64-bit signed integer
    Integer,
    /// Double precision real
    Real,
    /// Quoted string
    String,
    /// Bare identifier, used for enumerations
    Identifier,
    /// Unresolved `#uid` reference
    Uid,
    /// `{< ... >}` raw text
    RawtextBlock,
    /// `( 1 2 3 )`
    ArrayInteger,
    /// `( 1.0 2.0 )`
    ArrayReal,
    /// `<Tag> { ... }`
    Structure,
    /// `[ ... ]`
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "Null",
            ValueKind::Bool => "Bool",
            ValueKind::Integer => "Integer",
            ValueKind::Real => "Real",
            ValueKind::String => "String",
            ValueKind::Identifier => "Identifier",
            ValueKind::Uid => "UID",
            ValueKind::RawtextBlock => "RawtextBlock",
            ValueKind::ArrayInteger => "ArrayInteger",
            ValueKind::ArrayReal => "ArrayReal",
            ValueKind::Structure => "Structure",
            ValueKind::List => "List",
        };
        f.write_str(name)
    }
}

/// Integer array with an optional sub-variant tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayInteger {
    /// Tag such as `<Translate>`
    pub tag: Option<String>,
    /// Flat values
    pub values: Vec<i64>,
}

/// Real array with an optional sub-variant tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayReal {
    /// Tag such as `<Matrix>`
    pub tag: Option<String>,
    /// Flat values
    pub values: Vec<f64>,
}

/// Verbatim text block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawtextBlock {
    /// Optional tag
    pub tag: Option<String>,
    /// Text between `{<` and `>}`
    pub text: String,
}

/// Ordered sequence of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    /// Optional tag
    pub tag: Option<String>,
    /// Optional document-unique id
    pub uid: Option<String>,
    /// Items in order
    pub values: Vec<Value>,
}

impl List {
    /// Create an empty untagged list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tagged list
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Append an item
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the list has no items
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the items
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}

/// Payload of a [`Value`]
#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
    /// `NULL`
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Real
    Real(f64),
    /// Quoted string
    String(String),
    /// Enumeration-style identifier
    Identifier(String),
    /// Reference by UID, replaced by `Structure` once the document is linked
    Uid(String),
    /// Raw text block
    RawtextBlock(RawtextBlock),
    /// Integer array
    ArrayInteger(ArrayInteger),
    /// Real array
    ArrayReal(ArrayReal),
    /// Shared structure node
    Structure(StructureKey),
    /// Inline list
    List(List),
}

/// A document value and the line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    data: ValueData,
    line_number: usize,
}

impl Value {
    /// Wrap a payload
    pub fn new(data: ValueData) -> Self {
        Self { data, line_number: 0 }
    }

    /// `NULL`
    pub fn null() -> Self {
        Self::new(ValueData::Null)
    }

    /// Boolean value
    pub fn boolean(value: bool) -> Self {
        Self::new(ValueData::Bool(value))
    }

    /// Integer value
    pub fn integer(value: i64) -> Self {
        Self::new(ValueData::Integer(value))
    }

    /// Real value
    pub fn real(value: f64) -> Self {
        Self::new(ValueData::Real(value))
    }

    /// String value
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ValueData::String(value.into()))
    }

    /// Identifier value
    pub fn identifier(value: impl Into<String>) -> Self {
        Self::new(ValueData::Identifier(value.into()))
    }

    /// Unresolved UID reference
    pub fn uid(value: impl Into<String>) -> Self {
        Self::new(ValueData::Uid(value.into()))
    }

    /// Reference to a structure node
    pub fn structure(key: StructureKey) -> Self {
        Self::new(ValueData::Structure(key))
    }

    /// List value
    pub fn list(list: List) -> Self {
        Self::new(ValueData::List(list))
    }

    /// Real array, optionally tagged
    pub fn array_real(tag: Option<&str>, values: Vec<f64>) -> Self {
        Self::new(ValueData::ArrayReal(ArrayReal {
            tag: tag.map(str::to_string),
            values,
        }))
    }

    /// Integer array, optionally tagged
    pub fn array_integer(tag: Option<&str>, values: Vec<i64>) -> Self {
        Self::new(ValueData::ArrayInteger(ArrayInteger {
            tag: tag.map(str::to_string),
            values,
        }))
    }

    /// Raw text block
    pub fn rawtext(text: impl Into<String>) -> Self {
        Self::new(ValueData::RawtextBlock(RawtextBlock {
            tag: None,
            text: text.into(),
        }))
    }

    /// Set the source line
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    /// Source line, 0 for values built in memory
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The payload
    pub fn data(&self) -> &ValueData {
        &self.data
    }

    /// Mutable payload, used by the linker
    pub fn data_mut(&mut self) -> &mut ValueData {
        &mut self.data
    }

    /// Kind of the payload
    pub fn kind(&self) -> ValueKind {
        match &self.data {
            ValueData::Null => ValueKind::Null,
            ValueData::Bool(_) => ValueKind::Bool,
            ValueData::Integer(_) => ValueKind::Integer,
            ValueData::Real(_) => ValueKind::Real,
            ValueData::String(_) => ValueKind::String,
            ValueData::Identifier(_) => ValueKind::Identifier,
            ValueData::Uid(_) => ValueKind::Uid,
            ValueData::RawtextBlock(_) => ValueKind::RawtextBlock,
            ValueData::ArrayInteger(_) => ValueKind::ArrayInteger,
            ValueData::ArrayReal(_) => ValueKind::ArrayReal,
            ValueData::Structure(_) => ValueKind::Structure,
            ValueData::List(_) => ValueKind::List,
        }
    }

    /// Boolean payload
    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            ValueData::Bool(value) => Some(value),
            _ => None,
        }
    }

    /// Integer payload
    pub fn as_integer(&self) -> Option<i64> {
        match self.data {
            ValueData::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Real payload; integers are widened
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(&self) -> Option<f64> {
        match self.data {
            ValueData::Real(value) => Some(value),
            ValueData::Integer(value) => Some(value as f64),
            _ => None,
        }
    }

    /// String payload
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(value) => Some(value),
            _ => None,
        }
    }

    /// Identifier payload
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.data {
            ValueData::Identifier(value) => Some(value),
            _ => None,
        }
    }

    /// Structure key payload
    pub fn as_structure(&self) -> Option<StructureKey> {
        match self.data {
            ValueData::Structure(key) => Some(key),
            _ => None,
        }
    }

    /// List payload
    pub fn as_list(&self) -> Option<&List> {
        match &self.data {
            ValueData::List(list) => Some(list),
            _ => None,
        }
    }

    /// Real array payload
    pub fn as_array_real(&self) -> Option<&ArrayReal> {
        match &self.data {
            ValueData::ArrayReal(array) => Some(array),
            _ => None,
        }
    }

    /// Integer array payload
    pub fn as_array_integer(&self) -> Option<&ArrayInteger> {
        match &self.data {
            ValueData::ArrayInteger(array) => Some(array),
            _ => None,
        }
    }

    /// Raw text payload
    pub fn as_rawtext(&self) -> Option<&RawtextBlock> {
        match &self.data {
            ValueData::RawtextBlock(block) => Some(block),
            _ => None,
        }
    }

    /// False when a real, directly or inside an array or list, is NaN or infinite
    pub fn is_finite(&self) -> bool {
        match &self.data {
            ValueData::Real(number) => number.is_finite(),
            ValueData::ArrayReal(array) => array.values.iter().all(|number| number.is_finite()),
            ValueData::List(list) => list.values.iter().all(Value::is_finite),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_and_accessors() {
        let value = Value::integer(7).at_line(12);
        assert_eq!(value.kind(), ValueKind::Integer);
        assert_eq!(value.line_number(), 12);
        assert_eq!(value.as_integer(), Some(7));
        assert_eq!(value.as_real(), Some(7.0));
        assert!(value.as_bool().is_none());

        let array = Value::array_real(Some("<Translate>"), vec![1.0, 2.0, 3.0]);
        assert_eq!(array.kind(), ValueKind::ArrayReal);
        assert_eq!(array.as_array_real().and_then(|a| a.tag.as_deref()), Some("<Translate>"));

        let ident = Value::identifier("PT_TRIANGLES");
        assert_eq!(ident.as_identifier(), Some("PT_TRIANGLES"));
        assert!(ident.as_str().is_none());
    }

    #[test]
    fn test_non_finite_reals() {
        assert!(Value::real(1.5).is_finite());
        assert!(!Value::real(f64::INFINITY).is_finite());
        assert!(!Value::array_real(None, vec![0.0, f64::NAN]).is_finite());

        let mut list = List::new();
        list.push(Value::integer(3));
        list.push(Value::real(f64::NEG_INFINITY));
        assert!(!Value::list(list).is_finite());
        assert!(Value::identifier("inf").is_finite());
    }

    #[test]
    fn test_list_keeps_order() {
        let mut list = List::tagged("<vl::ShaderPasses>");
        list.push(Value::integer(0));
        list.push(Value::string("a"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.values[0].kind(), ValueKind::Integer);
        assert_eq!(list.values[1].kind(), ValueKind::String);
        assert_eq!(ValueKind::Uid.to_string(), "UID");
    }
}
