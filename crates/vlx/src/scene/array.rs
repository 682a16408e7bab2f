//! Typed buffer arrays
//!
//! One record type covers every scalar width and 1 to 4 components per
//! element. Values are stored in their native width.

/// Scalar type of a buffer array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// i8
    Byte,
    /// u8
    UByte,
    /// i16
    Short,
    /// u16
    UShort,
    /// i32
    Int,
    /// u32
    UInt,
    /// f32
    Float,
    /// f64
    Double,
}

impl ScalarType {
    /// Every scalar type, in type-name table order
    pub const ALL: [ScalarType; 8] = [
        ScalarType::Byte,
        ScalarType::UByte,
        ScalarType::Short,
        ScalarType::UShort,
        ScalarType::Int,
        ScalarType::UInt,
        ScalarType::Float,
        ScalarType::Double,
    ];

    /// True for the floating point types
    pub fn is_real(self) -> bool {
        matches!(self, ScalarType::Float | ScalarType::Double)
    }

    fn table_row(self) -> usize {
        match self {
            ScalarType::Byte => 0,
            ScalarType::UByte => 1,
            ScalarType::Short => 2,
            ScalarType::UShort => 3,
            ScalarType::Int => 4,
            ScalarType::UInt => 5,
            ScalarType::Float => 6,
            ScalarType::Double => 7,
        }
    }
}

const ARRAY_TYPE_NAMES: [[&str; 4]; 8] = [
    ["vl::ArrayByte1", "vl::ArrayByte2", "vl::ArrayByte3", "vl::ArrayByte4"],
    ["vl::ArrayUByte1", "vl::ArrayUByte2", "vl::ArrayUByte3", "vl::ArrayUByte4"],
    ["vl::ArrayShort1", "vl::ArrayShort2", "vl::ArrayShort3", "vl::ArrayShort4"],
    ["vl::ArrayUShort1", "vl::ArrayUShort2", "vl::ArrayUShort3", "vl::ArrayUShort4"],
    ["vl::ArrayInt1", "vl::ArrayInt2", "vl::ArrayInt3", "vl::ArrayInt4"],
    ["vl::ArrayUInt1", "vl::ArrayUInt2", "vl::ArrayUInt3", "vl::ArrayUInt4"],
    ["vl::ArrayFloat1", "vl::ArrayFloat2", "vl::ArrayFloat3", "vl::ArrayFloat4"],
    ["vl::ArrayDouble1", "vl::ArrayDouble2", "vl::ArrayDouble3", "vl::ArrayDouble4"],
];

/// Every array type name
pub fn array_type_names() -> impl Iterator<Item = &'static str> {
    ARRAY_TYPE_NAMES.iter().flat_map(|row| row.iter().copied())
}

/// Storage of a buffer array
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    /// i8 scalars
    Byte(Vec<i8>),
    /// u8 scalars
    UByte(Vec<u8>),
    /// i16 scalars
    Short(Vec<i16>),
    /// u16 scalars
    UShort(Vec<u16>),
    /// i32 scalars
    Int(Vec<i32>),
    /// u32 scalars
    UInt(Vec<u32>),
    /// f32 scalars
    Float(Vec<f32>),
    /// f64 scalars
    Double(Vec<f64>),
}

impl ArrayData {
    fn empty(scalar: ScalarType) -> Self {
        match scalar {
            ScalarType::Byte => ArrayData::Byte(Vec::new()),
            ScalarType::UByte => ArrayData::UByte(Vec::new()),
            ScalarType::Short => ArrayData::Short(Vec::new()),
            ScalarType::UShort => ArrayData::UShort(Vec::new()),
            ScalarType::Int => ArrayData::Int(Vec::new()),
            ScalarType::UInt => ArrayData::UInt(Vec::new()),
            ScalarType::Float => ArrayData::Float(Vec::new()),
            ScalarType::Double => ArrayData::Double(Vec::new()),
        }
    }
}

/// Flat array of 1 to 4 component elements
#[derive(Debug, Clone, PartialEq)]
pub struct BufferArray {
    /// Optional object name
    pub object_name: String,
    scalar: ScalarType,
    components: usize,
    data: ArrayData,
}

impl BufferArray {
    /// Create an empty array; `components` is clamped to 1..=4
    pub fn new(scalar: ScalarType, components: usize) -> Self {
        Self {
            object_name: String::new(),
            scalar,
            components: components.clamp(1, 4),
            data: ArrayData::empty(scalar),
        }
    }

    /// Resolve a type name such as `vl::ArrayFloat3`
    pub fn layout_for(type_name: &str) -> Option<(ScalarType, usize)> {
        ScalarType::ALL.iter().find_map(|scalar| {
            ARRAY_TYPE_NAMES[scalar.table_row()]
                .iter()
                .position(|name| *name == type_name)
                .map(|index| (*scalar, index + 1))
        })
    }

    /// Type name of this layout
    pub fn type_name(&self) -> &'static str {
        ARRAY_TYPE_NAMES[self.scalar.table_row()][self.components - 1]
    }

    /// Scalar type
    pub fn scalar(&self) -> ScalarType {
        self.scalar
    }

    /// Components per element
    pub fn components(&self) -> usize {
        self.components
    }

    /// Native storage
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Total number of scalars
    pub fn scalar_count(&self) -> usize {
        match &self.data {
            ArrayData::Byte(v) => v.len(),
            ArrayData::UByte(v) => v.len(),
            ArrayData::Short(v) => v.len(),
            ArrayData::UShort(v) => v.len(),
            ArrayData::Int(v) => v.len(),
            ArrayData::UInt(v) => v.len(),
            ArrayData::Float(v) => v.len(),
            ArrayData::Double(v) => v.len(),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.scalar_count() / self.components
    }

    /// True when the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.scalar_count() == 0
    }

    /// Replace the contents, narrowing each scalar to the native width
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_from_reals(&mut self, values: &[f64]) {
        self.data = match self.scalar {
            ScalarType::Byte => ArrayData::Byte(values.iter().map(|v| *v as i8).collect()),
            ScalarType::UByte => ArrayData::UByte(values.iter().map(|v| *v as u8).collect()),
            ScalarType::Short => ArrayData::Short(values.iter().map(|v| *v as i16).collect()),
            ScalarType::UShort => ArrayData::UShort(values.iter().map(|v| *v as u16).collect()),
            ScalarType::Int => ArrayData::Int(values.iter().map(|v| *v as i32).collect()),
            ScalarType::UInt => ArrayData::UInt(values.iter().map(|v| *v as u32).collect()),
            ScalarType::Float => ArrayData::Float(values.iter().map(|v| *v as f32).collect()),
            ScalarType::Double => ArrayData::Double(values.to_vec()),
        };
    }

    /// Replace the contents from integers
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn set_from_integers(&mut self, values: &[i64]) {
        self.data = match self.scalar {
            ScalarType::Byte => ArrayData::Byte(values.iter().map(|v| *v as i8).collect()),
            ScalarType::UByte => ArrayData::UByte(values.iter().map(|v| *v as u8).collect()),
            ScalarType::Short => ArrayData::Short(values.iter().map(|v| *v as i16).collect()),
            ScalarType::UShort => ArrayData::UShort(values.iter().map(|v| *v as u16).collect()),
            ScalarType::Int => ArrayData::Int(values.iter().map(|v| *v as i32).collect()),
            ScalarType::UInt => ArrayData::UInt(values.iter().map(|v| *v as u32).collect()),
            ScalarType::Float => ArrayData::Float(values.iter().map(|v| *v as f32).collect()),
            ScalarType::Double => ArrayData::Double(values.iter().map(|v| *v as f64).collect()),
        };
    }

    /// Every scalar widened to f64
    pub fn to_reals(&self) -> Vec<f64> {
        match &self.data {
            ArrayData::Byte(v) => v.iter().map(|x| f64::from(*x)).collect(),
            ArrayData::UByte(v) => v.iter().map(|x| f64::from(*x)).collect(),
            ArrayData::Short(v) => v.iter().map(|x| f64::from(*x)).collect(),
            ArrayData::UShort(v) => v.iter().map(|x| f64::from(*x)).collect(),
            ArrayData::Int(v) => v.iter().map(|x| f64::from(*x)).collect(),
            ArrayData::UInt(v) => v.iter().map(|x| f64::from(*x)).collect(),
            ArrayData::Float(v) => v.iter().map(|x| f64::from(*x)).collect(),
            ArrayData::Double(v) => v.clone(),
        }
    }

    /// Every scalar widened to i64; reals are truncated
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_integers(&self) -> Vec<i64> {
        match &self.data {
            ArrayData::Byte(v) => v.iter().map(|x| i64::from(*x)).collect(),
            ArrayData::UByte(v) => v.iter().map(|x| i64::from(*x)).collect(),
            ArrayData::Short(v) => v.iter().map(|x| i64::from(*x)).collect(),
            ArrayData::UShort(v) => v.iter().map(|x| i64::from(*x)).collect(),
            ArrayData::Int(v) => v.iter().map(|x| i64::from(*x)).collect(),
            ArrayData::UInt(v) => v.iter().map(|x| i64::from(*x)).collect(),
            ArrayData::Float(v) => v.iter().map(|x| *x as i64).collect(),
            ArrayData::Double(v) => v.iter().map(|x| *x as i64).collect(),
        }
    }
}

impl Default for BufferArray {
    fn default() -> Self {
        Self::new(ScalarType::Float, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_resolve_to_layouts() {
        assert_eq!(BufferArray::layout_for("vl::ArrayFloat3"), Some((ScalarType::Float, 3)));
        assert_eq!(BufferArray::layout_for("vl::ArrayUByte1"), Some((ScalarType::UByte, 1)));
        assert_eq!(BufferArray::layout_for("vl::ArrayFloat5"), None);
        assert_eq!(array_type_names().count(), 32);

        for name in array_type_names() {
            let (scalar, components) = BufferArray::layout_for(name).unwrap();
            assert_eq!(BufferArray::new(scalar, components).type_name(), name);
        }
    }

    #[test]
    fn test_native_width_conversion() {
        let mut array = BufferArray::new(ScalarType::UShort, 2);
        array.set_from_integers(&[1, 2, 3, 65535]);
        assert_eq!(array.len(), 2);
        assert_eq!(array.data(), &ArrayData::UShort(vec![1, 2, 3, 65535]));
        assert_eq!(array.to_integers(), vec![1, 2, 3, 65535]);

        let mut floats = BufferArray::new(ScalarType::Float, 3);
        floats.set_from_reals(&[0.5, 1.0, 1.5]);
        assert_eq!(floats.len(), 1);
        assert_eq!(floats.to_reals(), vec![0.5, 1.0, 1.5]);
    }
}
