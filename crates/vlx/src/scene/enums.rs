//! Symbolic enumerations
//!
//! Every enumeration is written to documents as an identifier holding its
//! symbolic name (`PT_TRIANGLES`) and read back by exact table lookup.

use bitflags::bitflags;

/// An enumeration that round-trips through its symbolic name
pub trait SymbolicEnum: Copy + Sized + 'static {
    /// Value an unknown name decodes to
    const FALLBACK: Self;

    /// Symbolic name of the value
    fn as_str(self) -> &'static str;

    /// Exact lookup of a symbolic name
    fn from_identifier(name: &str) -> Option<Self>;

    /// Whether the value is the fallback sentinel
    fn is_fallback(self) -> bool;
}

macro_rules! symbolic_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
        fallback = $fallback:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every value, in table order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$fallback
            }
        }

        impl SymbolicEnum for $name {
            const FALLBACK: Self = $name::$fallback;

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            fn from_identifier(name: &str) -> Option<Self> {
                match name {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn is_fallback(self) -> bool {
                self == $name::$fallback
            }
        }
    };
}

symbolic_enum! {
    /// Primitive assembly mode of a draw call
    pub enum PrimitiveType {
        /// Not a legal draw mode
        Unknown => "PT_UNKNOWN",
        /// Points
        Points => "PT_POINTS",
        /// Lines
        Lines => "PT_LINES",
        /// Line loop
        LineLoop => "PT_LINE_LOOP",
        /// Line strip
        LineStrip => "PT_LINE_STRIP",
        /// Triangles
        Triangles => "PT_TRIANGLES",
        /// Triangle strip
        TriangleStrip => "PT_TRIANGLE_STRIP",
        /// Triangle fan
        TriangleFan => "PT_TRIANGLE_FAN",
        /// Quads
        Quads => "PT_QUADS",
        /// Quad strip
        QuadStrip => "PT_QUAD_STRIP",
        /// Polygon
        Polygon => "PT_POLYGON",
        /// Lines with adjacency
        LinesAdjacency => "PT_LINES_ADJACENCY",
        /// Line strip with adjacency
        LineStripAdjacency => "PT_LINE_STRIP_ADJACENCY",
        /// Triangles with adjacency
        TrianglesAdjacency => "PT_TRIANGLES_ADJACENCY",
        /// Triangle strip with adjacency
        TriangleStripAdjacency => "PT_TRIANGLE_STRIP_ADJACENCY",
        /// Tessellation patches
        Patches => "PT_PATCHES",
    }
    fallback = Unknown;
}

symbolic_enum! {
    /// How a camera's projection matrix was produced
    pub enum ProjectionType {
        /// Set directly by the user
        User => "PMT_UserProjection",
        /// Orthographic
        Orthographic => "PMT_OrthographicProjection",
        /// Perspective from field of view
        Perspective => "PMT_PerspectiveProjection",
        /// Perspective from frustum planes
        PerspectiveFrustum => "PMT_PerspectiveProjectionFrustum",
    }
    fallback = User;
}

symbolic_enum! {
    /// Which clear color a viewport uses
    pub enum ClearColorMode {
        /// Floating point color
        Float => "CCM_Float",
        /// Signed integer color
        Int => "CCM_Int",
        /// Unsigned integer color
        UInt => "CCM_UInt",
    }
    fallback = Float;
}

symbolic_enum! {
    /// Which material color tracks the vertex color
    pub enum ColorMaterial {
        /// Ambient and diffuse
        AmbientAndDiffuse => "CM_AMBIENT_AND_DIFFUSE",
        /// Emission
        Emission => "CM_EMISSION",
        /// Ambient
        Ambient => "CM_AMBIENT",
        /// Diffuse
        Diffuse => "CM_DIFFUSE",
        /// Specular
        Specular => "CM_SPECULAR",
    }
    fallback = AmbientAndDiffuse;
}

symbolic_enum! {
    /// Polygon face selector
    pub enum PolygonFace {
        /// Both faces
        FrontAndBack => "PF_FRONT_AND_BACK",
        /// Front face
        Front => "PF_FRONT",
        /// Back face
        Back => "PF_BACK",
    }
    fallback = FrontAndBack;
}

symbolic_enum! {
    /// Polygon rasterization mode
    pub enum PolygonModeKind {
        /// Filled
        Fill => "PM_FILL",
        /// Wireframe
        Line => "PM_LINE",
        /// Vertices only
        Point => "PM_POINT",
    }
    fallback = Fill;
}

symbolic_enum! {
    /// Blending factor
    pub enum BlendFactor {
        /// 0
        Zero => "BF_ZERO",
        /// 1
        One => "BF_ONE",
        /// Source color
        SrcColor => "BF_SRC_COLOR",
        /// 1 - source color
        OneMinusSrcColor => "BF_ONE_MINUS_SRC_COLOR",
        /// Destination color
        DstColor => "BF_DST_COLOR",
        /// 1 - destination color
        OneMinusDstColor => "BF_ONE_MINUS_DST_COLOR",
        /// Source alpha
        SrcAlpha => "BF_SRC_ALPHA",
        /// 1 - source alpha
        OneMinusSrcAlpha => "BF_ONE_MINUS_SRC_ALPHA",
        /// Destination alpha
        DstAlpha => "BF_DST_ALPHA",
        /// 1 - destination alpha
        OneMinusDstAlpha => "BF_ONE_MINUS_DST_ALPHA",
        /// Constant color
        ConstantColor => "BF_CONSTANT_COLOR",
        /// 1 - constant color
        OneMinusConstantColor => "BF_ONE_MINUS_CONSTANT_COLOR",
        /// Constant alpha
        ConstantAlpha => "BF_CONSTANT_ALPHA",
        /// 1 - constant alpha
        OneMinusConstantAlpha => "BF_ONE_MINUS_CONSTANT_ALPHA",
        /// Saturated source alpha
        SrcAlphaSaturate => "BF_SRC_ALPHA_SATURATE",
    }
    fallback = One;
}

symbolic_enum! {
    /// Blend equation
    pub enum BlendEquationMode {
        /// Add
        Add => "BE_FUNC_ADD",
        /// Subtract
        Subtract => "BE_FUNC_SUBTRACT",
        /// Reverse subtract
        ReverseSubtract => "BE_FUNC_REVERSE_SUBTRACT",
        /// Minimum
        Min => "BE_MIN",
        /// Maximum
        Max => "BE_MAX",
    }
    fallback = Add;
}

symbolic_enum! {
    /// Comparison function used by depth and alpha tests
    pub enum CompareFunction {
        /// Never passes
        Never => "FU_NEVER",
        /// Less
        Less => "FU_LESS",
        /// Equal
        Equal => "FU_EQUAL",
        /// Less or equal
        LessEqual => "FU_LEQUAL",
        /// Greater
        Greater => "FU_GREATER",
        /// Not equal
        NotEqual => "FU_NOTEQUAL",
        /// Greater or equal
        GreaterEqual => "FU_GEQUAL",
        /// Always passes
        Always => "FU_ALWAYS",
    }
    fallback = Less;
}

symbolic_enum! {
    /// Fixed-function capability toggled by a shader
    pub enum EnableFlag {
        /// Not a legal capability
        Unknown => "EN_UnknownEnable",
        /// Blending
        Blend => "EN_BLEND",
        /// Face culling
        CullFace => "EN_CULL_FACE",
        /// Depth test
        DepthTest => "EN_DEPTH_TEST",
        /// Stencil test
        StencilTest => "EN_STENCIL_TEST",
        /// Dithering
        Dither => "EN_DITHER",
        /// Polygon offset for filled polygons
        PolygonOffsetFill => "EN_POLYGON_OFFSET_FILL",
        /// Polygon offset for lines
        PolygonOffsetLine => "EN_POLYGON_OFFSET_LINE",
        /// Polygon offset for points
        PolygonOffsetPoint => "EN_POLYGON_OFFSET_POINT",
        /// Color logic op
        ColorLogicOp => "EN_COLOR_LOGIC_OP",
        /// Multisampling
        Multisample => "EN_MULTISAMPLE",
        /// Point smoothing
        PointSmooth => "EN_POINT_SMOOTH",
        /// Line smoothing
        LineSmooth => "EN_LINE_SMOOTH",
        /// Polygon smoothing
        PolygonSmooth => "EN_POLYGON_SMOOTH",
        /// Line stipple
        LineStipple => "EN_LINE_STIPPLE",
        /// Polygon stipple
        PolygonStipple => "EN_POLYGON_STIPPLE",
        /// Point sprites
        PointSprite => "EN_POINT_SPRITE",
        /// Shader-controlled point size
        ProgramPointSize => "EN_PROGRAM_POINT_SIZE",
        /// Alpha test
        AlphaTest => "EN_ALPHA_TEST",
        /// Fixed-function lighting
        Lighting => "EN_LIGHTING",
        /// Secondary color sum
        ColorSum => "EN_COLOR_SUM",
        /// Fog
        Fog => "EN_FOG",
        /// Normal normalization
        Normalize => "EN_NORMALIZE",
        /// Normal rescaling
        RescaleNormal => "EN_RESCALE_NORMAL",
        /// Seamless cube maps
        TextureCubeMapSeamless => "EN_TEXTURE_CUBE_MAP_SEAMLESS",
        /// Alpha to coverage
        SampleAlphaToCoverage => "EN_SAMPLE_ALPHA_TO_COVERAGE",
        /// Alpha to one
        SampleAlphaToOne => "EN_SAMPLE_ALPHA_TO_ONE",
        /// Sample coverage
        SampleCoverage => "EN_SAMPLE_COVERAGE",
    }
    fallback = Unknown;
}

symbolic_enum! {
    /// Texture target
    pub enum TextureDimension {
        /// Not a legal target
        Unknown => "TD_TEXTURE_UNKNOWN",
        /// 1D
        Texture1D => "TD_TEXTURE_1D",
        /// 2D
        Texture2D => "TD_TEXTURE_2D",
        /// 3D
        Texture3D => "TD_TEXTURE_3D",
        /// Cube map
        CubeMap => "TD_TEXTURE_CUBE_MAP",
        /// Rectangle
        Rectangle => "TD_TEXTURE_RECTANGLE",
        /// 1D array
        Texture1DArray => "TD_TEXTURE_1D_ARRAY",
        /// 2D array
        Texture2DArray => "TD_TEXTURE_2D_ARRAY",
        /// Buffer texture
        Buffer => "TD_TEXTURE_BUFFER",
        /// Multisampled 2D
        Texture2DMultisample => "TD_TEXTURE_2D_MULTISAMPLE",
        /// Multisampled 2D array
        Texture2DMultisampleArray => "TD_TEXTURE_2D_MULTISAMPLE_ARRAY",
    }
    fallback = Unknown;
}

symbolic_enum! {
    /// Texture internal format
    pub enum TextureFormat {
        /// Unknown format
        Unknown => "TF_UNKNOWN",
        /// Alpha
        Alpha => "TF_ALPHA",
        /// Luminance
        Luminance => "TF_LUMINANCE",
        /// Luminance + alpha
        LuminanceAlpha => "TF_LUMINANCE_ALPHA",
        /// Intensity
        Intensity => "TF_INTENSITY",
        /// RGB
        Rgb => "TF_RGB",
        /// RGBA
        Rgba => "TF_RGBA",
        /// 8-bit RGB
        Rgb8 => "TF_RGB8",
        /// 8-bit RGBA
        Rgba8 => "TF_RGBA8",
        /// 16-bit float RGBA
        Rgba16F => "TF_RGBA16F",
        /// 32-bit float RGBA
        Rgba32F => "TF_RGBA32F",
        /// Single channel
        Red => "TF_RED",
        /// Two channels
        Rg => "TF_RG",
        /// sRGB
        Srgb8 => "TF_SRGB8",
        /// sRGB with alpha
        Srgb8Alpha8 => "TF_SRGB8_ALPHA8",
        /// Depth
        DepthComponent => "TF_DEPTH_COMPONENT",
        /// 16-bit depth
        DepthComponent16 => "TF_DEPTH_COMPONENT16",
        /// 24-bit depth
        DepthComponent24 => "TF_DEPTH_COMPONENT24",
        /// 32-bit depth
        DepthComponent32 => "TF_DEPTH_COMPONENT32",
        /// 32-bit float depth
        DepthComponent32F => "TF_DEPTH_COMPONENT32F",
        /// Packed depth + stencil
        Depth24Stencil8 => "TF_DEPTH24_STENCIL8",
        /// DXT1 compressed RGB
        CompressedRgbS3tcDxt1 => "TF_COMPRESSED_RGB_S3TC_DXT1_EXT",
        /// DXT5 compressed RGBA
        CompressedRgbaS3tcDxt5 => "TF_COMPRESSED_RGBA_S3TC_DXT5_EXT",
    }
    fallback = Unknown;
}

symbolic_enum! {
    /// Texture minification/magnification filter
    pub enum TexFilter {
        /// Nearest
        Nearest => "TPF_NEAREST",
        /// Linear
        Linear => "TPF_LINEAR",
        /// Nearest texel, nearest mipmap
        NearestMipmapNearest => "TPF_NEAREST_MIPMAP_NEAREST",
        /// Linear texel, nearest mipmap
        LinearMipmapNearest => "TPF_LINEAR_MIPMAP_NEAREST",
        /// Nearest texel, linear mipmap
        NearestMipmapLinear => "TPF_NEAREST_MIPMAP_LINEAR",
        /// Trilinear
        LinearMipmapLinear => "TPF_LINEAR_MIPMAP_LINEAR",
    }
    fallback = Linear;
}

symbolic_enum! {
    /// Texture coordinate wrap mode
    pub enum TexWrap {
        /// Clamp
        Clamp => "TPW_CLAMP",
        /// Clamp to border color
        ClampToBorder => "TPW_CLAMP_TO_BORDER",
        /// Clamp to edge texel
        ClampToEdge => "TPW_CLAMP_TO_EDGE",
        /// Mirrored repeat
        MirroredRepeat => "TPW_MIRRORED_REPEAT",
        /// Repeat
        Repeat => "TPW_REPEAT",
    }
    fallback = Repeat;
}

symbolic_enum! {
    /// Depth texture compare mode
    pub enum TexCompareMode {
        /// No comparison
        None => "TCM_NONE",
        /// Compare R to texture
        CompareRToTexture => "TCM_COMPARE_R_TO_TEXTURE",
        /// Compare reference depth to texture
        CompareRefDepthToTexture => "TCM_COMPARE_REF_DEPTH_TO_TEXTURE",
    }
    fallback = None;
}

symbolic_enum! {
    /// Depth texture compare function
    pub enum TexCompareFunc {
        /// Less or equal
        LessEqual => "TCF_LEQUAL",
        /// Greater or equal
        GreaterEqual => "TCF_GEQUAL",
        /// Less
        Less => "TCF_LESS",
        /// Greater
        Greater => "TCF_GREATER",
        /// Equal
        Equal => "TCF_EQUAL",
        /// Not equal
        NotEqual => "TCF_NOTEQUAL",
        /// Always
        Always => "TCF_ALWAYS",
        /// Never
        Never => "TCF_NEVER",
    }
    fallback = LessEqual;
}

symbolic_enum! {
    /// How depth textures are sampled
    pub enum DepthTextureMode {
        /// Luminance
        Luminance => "DTM_LUMINANCE",
        /// Intensity
        Intensity => "DTM_INTENSITY",
        /// Alpha
        Alpha => "DTM_ALPHA",
        /// Red channel
        Red => "DTM_RED",
    }
    fallback = Luminance;
}

symbolic_enum! {
    /// How integer vertex attributes reach the shader
    pub enum VertexAttribInterpretation {
        /// Converted to float
        Normal => "VAI_NORMAL",
        /// Kept as integers
        Integer => "VAI_INTEGER",
        /// Kept as doubles
        Double => "VAI_DOUBLE",
    }
    fallback = Normal;
}

symbolic_enum! {
    /// Sort order of a depth-sort callback
    pub enum SortMode {
        /// Farthest first
        BackToFront => "SM_SortBackToFront",
        /// Nearest first
        FrontToBack => "SM_SortFrontToBack",
    }
    fallback = BackToFront;
}

/// Scalar family of a uniform type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformScalar {
    /// Signed 32-bit integers
    Int,
    /// Unsigned 32-bit integers
    UInt,
    /// 32-bit floats
    Float,
    /// 64-bit floats
    Double,
}

symbolic_enum! {
    /// GLSL uniform type
    pub enum UniformType {
        /// Not a legal type
        None => "UT_NONE",
        /// int
        Int => "UT_INT",
        /// ivec2
        IntVec2 => "UT_INT_VEC2",
        /// ivec3
        IntVec3 => "UT_INT_VEC3",
        /// ivec4
        IntVec4 => "UT_INT_VEC4",
        /// uint
        UInt => "UT_UNSIGNED_INT",
        /// uvec2
        UIntVec2 => "UT_UNSIGNED_INT_VEC2",
        /// uvec3
        UIntVec3 => "UT_UNSIGNED_INT_VEC3",
        /// uvec4
        UIntVec4 => "UT_UNSIGNED_INT_VEC4",
        /// float
        Float => "UT_FLOAT",
        /// vec2
        FloatVec2 => "UT_FLOAT_VEC2",
        /// vec3
        FloatVec3 => "UT_FLOAT_VEC3",
        /// vec4
        FloatVec4 => "UT_FLOAT_VEC4",
        /// mat2
        FloatMat2 => "UT_FLOAT_MAT2",
        /// mat3
        FloatMat3 => "UT_FLOAT_MAT3",
        /// mat4
        FloatMat4 => "UT_FLOAT_MAT4",
        /// double
        Double => "UT_DOUBLE",
        /// dvec2
        DoubleVec2 => "UT_DOUBLE_VEC2",
        /// dvec3
        DoubleVec3 => "UT_DOUBLE_VEC3",
        /// dvec4
        DoubleVec4 => "UT_DOUBLE_VEC4",
        /// dmat4
        DoubleMat4 => "UT_DOUBLE_MAT4",
    }
    fallback = None;
}

impl UniformType {
    /// Scalars per element
    pub fn components(self) -> usize {
        match self {
            UniformType::None => 0,
            UniformType::Int | UniformType::UInt | UniformType::Float | UniformType::Double => 1,
            UniformType::IntVec2 | UniformType::UIntVec2 | UniformType::FloatVec2 | UniformType::DoubleVec2 => 2,
            UniformType::IntVec3 | UniformType::UIntVec3 | UniformType::FloatVec3 | UniformType::DoubleVec3 => 3,
            UniformType::IntVec4
            | UniformType::UIntVec4
            | UniformType::FloatVec4
            | UniformType::DoubleVec4
            | UniformType::FloatMat2 => 4,
            UniformType::FloatMat3 => 9,
            UniformType::FloatMat4 | UniformType::DoubleMat4 => 16,
        }
    }

    /// Scalar family, `None` for [`UniformType::None`]
    pub fn scalar(self) -> Option<UniformScalar> {
        match self {
            UniformType::None => None,
            UniformType::Int | UniformType::IntVec2 | UniformType::IntVec3 | UniformType::IntVec4 => {
                Some(UniformScalar::Int)
            }
            UniformType::UInt | UniformType::UIntVec2 | UniformType::UIntVec3 | UniformType::UIntVec4 => {
                Some(UniformScalar::UInt)
            }
            UniformType::Float
            | UniformType::FloatVec2
            | UniformType::FloatVec3
            | UniformType::FloatVec4
            | UniformType::FloatMat2
            | UniformType::FloatMat3
            | UniformType::FloatMat4 => Some(UniformScalar::Float),
            UniformType::Double
            | UniformType::DoubleVec2
            | UniformType::DoubleVec3
            | UniformType::DoubleVec4
            | UniformType::DoubleMat4 => Some(UniformScalar::Double),
        }
    }
}

bitflags! {
    /// Buffers cleared by a viewport
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color buffer
        const COLOR = 0b001;
        /// Depth buffer
        const DEPTH = 0b010;
        /// Stencil buffer
        const STENCIL = 0b100;
    }
}

const CLEAR_FLAG_NAMES: [(&str, ClearFlags); 8] = [
    ("CF_DO_NOT_CLEAR", ClearFlags::empty()),
    ("CF_CLEAR_COLOR", ClearFlags::COLOR),
    ("CF_CLEAR_DEPTH", ClearFlags::DEPTH),
    ("CF_CLEAR_STENCIL", ClearFlags::STENCIL),
    ("CF_CLEAR_COLOR_DEPTH", ClearFlags::COLOR.union(ClearFlags::DEPTH)),
    ("CF_CLEAR_COLOR_STENCIL", ClearFlags::COLOR.union(ClearFlags::STENCIL)),
    ("CF_CLEAR_DEPTH_STENCIL", ClearFlags::DEPTH.union(ClearFlags::STENCIL)),
    ("CF_CLEAR_COLOR_DEPTH_STENCIL", ClearFlags::all()),
];

impl Default for ClearFlags {
    fn default() -> Self {
        ClearFlags::COLOR | ClearFlags::DEPTH
    }
}

impl SymbolicEnum for ClearFlags {
    const FALLBACK: Self = ClearFlags::COLOR.union(ClearFlags::DEPTH);

    fn as_str(self) -> &'static str {
        CLEAR_FLAG_NAMES
            .iter()
            .find(|(_, flags)| *flags == self)
            .map_or("CF_CLEAR_COLOR_DEPTH", |(name, _)| name)
    }

    fn from_identifier(name: &str) -> Option<Self> {
        CLEAR_FLAG_NAMES
            .iter()
            .find(|(text, _)| *text == name)
            .map(|(_, flags)| *flags)
    }

    fn is_fallback(self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbolic_round_trip() {
        for value in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_identifier(value.as_str()), Some(*value));
        }
        for value in EnableFlag::ALL {
            assert_eq!(EnableFlag::from_identifier(value.as_str()), Some(*value));
        }
    }

    #[test]
    fn test_unknown_names_have_no_match() {
        assert_eq!(PrimitiveType::from_identifier("PT_HEXAGONS"), None);
        assert!(PrimitiveType::default().is_fallback());
        assert!(!PrimitiveType::Triangles.is_fallback());
        assert_eq!(TexWrap::default(), TexWrap::Repeat);
    }

    #[test]
    fn test_clear_flag_names_cover_every_combination() {
        for bits in 0..8 {
            let flags = ClearFlags::from_bits_truncate(bits);
            let name = flags.as_str();
            assert_eq!(ClearFlags::from_identifier(name), Some(flags));
        }
        assert_eq!(ClearFlags::default().as_str(), "CF_CLEAR_COLOR_DEPTH");
    }

    #[test]
    fn test_uniform_type_shape() {
        assert_eq!(UniformType::FloatMat4.components(), 16);
        assert_eq!(UniformType::FloatVec3.scalar(), Some(UniformScalar::Float));
        assert_eq!(UniformType::UIntVec2.scalar(), Some(UniformScalar::UInt));
        assert_eq!(UniformType::None.scalar(), None);
    }
}
