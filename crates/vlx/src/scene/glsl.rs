//! GLSL shader stages

/// Pipeline stage of a GLSL shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
    /// Geometry shader
    Geometry,
    /// Tessellation control shader
    TessControl,
    /// Tessellation evaluation shader
    TessEvaluation,
}

impl ShaderStage {
    /// Every stage
    pub const ALL: [ShaderStage; 5] = [
        ShaderStage::Vertex,
        ShaderStage::Fragment,
        ShaderStage::Geometry,
        ShaderStage::TessControl,
        ShaderStage::TessEvaluation,
    ];

    /// Type name of a shader of this stage
    pub fn type_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vl::GLSLVertexShader",
            ShaderStage::Fragment => "vl::GLSLFragmentShader",
            ShaderStage::Geometry => "vl::GLSLGeometryShader",
            ShaderStage::TessControl => "vl::GLSLTessControlShader",
            ShaderStage::TessEvaluation => "vl::GLSLTessEvaluationShader",
        }
    }

    /// Stage for a type name
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.type_name() == type_name)
    }
}

/// One GLSL shader stage, from a file or inline source
#[derive(Debug, Clone, PartialEq)]
pub struct GlslShader {
    /// Pipeline stage
    pub stage: ShaderStage,
    /// Optional object name
    pub object_name: String,
    /// Source file path
    pub path: String,
    /// Inline source
    pub source: String,
}

impl GlslShader {
    /// Empty shader of a stage
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            object_name: String::new(),
            path: String::new(),
            source: String::new(),
        }
    }
}

impl Default for GlslShader {
    fn default() -> Self {
        Self::new(ShaderStage::Vertex)
    }
}
