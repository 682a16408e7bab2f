//! Shader uniforms

use super::enums::{UniformScalar, UniformType};

/// Uniform payload in its scalar family
#[derive(Debug, Clone, PartialEq)]
pub enum UniformData {
    /// Signed integers
    Int(Vec<i32>),
    /// Unsigned integers
    UInt(Vec<u32>),
    /// Floats
    Float(Vec<f32>),
    /// Doubles
    Double(Vec<f64>),
}

impl UniformData {
    /// Number of scalars
    pub fn len(&self) -> usize {
        match self {
            UniformData::Int(v) => v.len(),
            UniformData::UInt(v) => v.len(),
            UniformData::Float(v) => v.len(),
            UniformData::Double(v) => v.len(),
        }
    }

    /// True when no scalars are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalar family of the payload
    pub fn scalar(&self) -> UniformScalar {
        match self {
            UniformData::Int(_) => UniformScalar::Int,
            UniformData::UInt(_) => UniformScalar::UInt,
            UniformData::Float(_) => UniformScalar::Float,
            UniformData::Double(_) => UniformScalar::Double,
        }
    }
}

impl Default for UniformData {
    fn default() -> Self {
        UniformData::Float(Vec::new())
    }
}

/// Named, typed shader uniform
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uniform {
    /// GLSL name
    pub name: String,
    /// GLSL type
    pub uniform_type: UniformType,
    /// Array length, 1 for non-arrays
    pub count: usize,
    /// Values, `count * components` scalars
    pub data: UniformData,
}

impl Uniform {
    /// Single `float`
    pub fn float(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            uniform_type: UniformType::Float,
            count: 1,
            data: UniformData::Float(vec![value]),
        }
    }

    /// Single `vec4`
    pub fn vec4(name: impl Into<String>, value: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            uniform_type: UniformType::FloatVec4,
            count: 1,
            data: UniformData::Float(value.to_vec()),
        }
    }

    /// Single `int`
    pub fn int(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            uniform_type: UniformType::Int,
            count: 1,
            data: UniformData::Int(vec![value]),
        }
    }

    /// Scalars the type and count call for, `None` if that overflows
    pub fn expected_len(&self) -> Option<usize> {
        self.count.checked_mul(self.uniform_type.components())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_len() {
        let uniform = Uniform::vec4("tint", [1.0, 0.5, 0.25, 1.0]);
        assert_eq!(uniform.expected_len(), Some(4));
        assert_eq!(uniform.data.len(), 4);
        assert_eq!(uniform.data.scalar(), UniformScalar::Float);
        assert_eq!(Uniform::int("unit", 0).data.scalar(), UniformScalar::Int);

        let huge = Uniform {
            uniform_type: UniformType::FloatMat4,
            count: usize::MAX,
            ..uniform
        };
        assert_eq!(huge.expected_len(), None);
    }
}
