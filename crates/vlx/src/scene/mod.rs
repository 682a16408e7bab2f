//! Scene-graph domain records
//!
//! Plain data records for everything a VLX document can describe. Records
//! refer to each other through [`ObjectHandle`](crate::foundation::collections::ObjectHandle)s
//! into an [`ObjectStore`]; they carry no rendering behaviour.

pub mod actor;
pub mod array;
pub mod bounds;
pub mod camera;
pub mod draw_call;
pub mod effect;
pub mod enums;
pub mod geometry;
pub mod glsl;
pub mod render_state;
pub mod resource_database;
pub mod texture;
pub mod transform;
pub mod uniform;

mod store;

pub use actor::{Actor, DepthSortCallback};
pub use array::{ArrayData, BufferArray, ScalarType};
pub use bounds::{Aabb, Bounds, Sphere};
pub use camera::{Camera, Viewport};
pub use draw_call::{DrawCall, DrawCallKind, IndexWidth, PatchParameter};
pub use effect::{Effect, LodEvaluator, LodMetric, RenderStateSlot, Shader};
pub use enums::SymbolicEnum;
pub use geometry::{Geometry, Renderable, VertexAttribInfo};
pub use glsl::{GlslShader, ShaderStage};
pub use render_state::{ClipPlane, GlslProgram, Light, Material, MaterialFace, RenderState, TextureSampler};
pub use resource_database::ResourceDatabase;
pub use store::{Object, ObjectKind, ObjectStore, SceneObject};
pub use texture::{TexParameter, Texture, TextureSetup};
pub use transform::Transform;
pub use uniform::{Uniform, UniformData};
