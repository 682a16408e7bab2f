//! Object arena
//!
//! Every domain record lives in one [`ObjectStore`] as an [`Object`] and is
//! referenced by [`ObjectHandle`]. Handle equality is object identity.

use std::collections::BTreeMap;
use std::fmt;

use super::actor::{Actor, DepthSortCallback};
use super::array::BufferArray;
use super::camera::{Camera, Viewport};
use super::draw_call::{DrawCall, PatchParameter};
use super::effect::{Effect, LodEvaluator, Shader};
use super::geometry::{Geometry, VertexAttribInfo};
use super::glsl::GlslShader;
use super::render_state::RenderState;
use super::resource_database::ResourceDatabase;
use super::texture::Texture;
use super::transform::Transform;
use super::uniform::Uniform;
use crate::foundation::collections::{HandleMap, ObjectHandle};

/// Category of an [`Object`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// [`BufferArray`]
    Array,
    /// [`Geometry`]
    Geometry,
    /// [`VertexAttribInfo`]
    VertexAttribInfo,
    /// [`DrawCall`]
    DrawCall,
    /// [`PatchParameter`]
    PatchParameter,
    /// [`Effect`]
    Effect,
    /// [`Shader`]
    Shader,
    /// [`LodEvaluator`]
    LodEvaluator,
    /// [`RenderState`]
    RenderState,
    /// [`GlslShader`]
    GlslShader,
    /// [`Texture`]
    Texture,
    /// [`Uniform`]
    Uniform,
    /// [`Actor`]
    Actor,
    /// [`DepthSortCallback`]
    DepthSortCallback,
    /// [`Transform`]
    Transform,
    /// [`Camera`]
    Camera,
    /// [`Viewport`]
    Viewport,
    /// [`ResourceDatabase`]
    ResourceDatabase,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Any domain record
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Buffer array
    Array(BufferArray),
    /// Geometry
    Geometry(Geometry),
    /// Vertex attribute binding
    VertexAttribInfo(VertexAttribInfo),
    /// Draw call
    DrawCall(DrawCall),
    /// Patch parameters
    PatchParameter(PatchParameter),
    /// Effect
    Effect(Effect),
    /// Shader pass
    Shader(Shader),
    /// LOD evaluator
    LodEvaluator(LodEvaluator),
    /// Render state
    RenderState(RenderState),
    /// GLSL shader stage
    GlslShader(GlslShader),
    /// Texture
    Texture(Texture),
    /// Uniform
    Uniform(Uniform),
    /// Actor
    Actor(Actor),
    /// Depth sort callback
    DepthSortCallback(DepthSortCallback),
    /// Transform node
    Transform(Transform),
    /// Camera
    Camera(Camera),
    /// Viewport
    Viewport(Viewport),
    /// Resource database
    ResourceDatabase(ResourceDatabase),
}

impl Object {
    /// Category of the record
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Array(_) => ObjectKind::Array,
            Object::Geometry(_) => ObjectKind::Geometry,
            Object::VertexAttribInfo(_) => ObjectKind::VertexAttribInfo,
            Object::DrawCall(_) => ObjectKind::DrawCall,
            Object::PatchParameter(_) => ObjectKind::PatchParameter,
            Object::Effect(_) => ObjectKind::Effect,
            Object::Shader(_) => ObjectKind::Shader,
            Object::LodEvaluator(_) => ObjectKind::LodEvaluator,
            Object::RenderState(_) => ObjectKind::RenderState,
            Object::GlslShader(_) => ObjectKind::GlslShader,
            Object::Texture(_) => ObjectKind::Texture,
            Object::Uniform(_) => ObjectKind::Uniform,
            Object::Actor(_) => ObjectKind::Actor,
            Object::DepthSortCallback(_) => ObjectKind::DepthSortCallback,
            Object::Transform(_) => ObjectKind::Transform,
            Object::Camera(_) => ObjectKind::Camera,
            Object::Viewport(_) => ObjectKind::Viewport,
            Object::ResourceDatabase(_) => ObjectKind::ResourceDatabase,
        }
    }

    /// Runtime type name, the key codecs are registered under
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Array(array) => array.type_name(),
            Object::Geometry(_) => "vl::Geometry",
            Object::VertexAttribInfo(_) => "vl::VertexAttribInfo",
            Object::DrawCall(draw_call) => draw_call.type_name(),
            Object::PatchParameter(_) => "vl::PatchParameter",
            Object::Effect(_) => "vl::Effect",
            Object::Shader(_) => "vl::Shader",
            Object::LodEvaluator(evaluator) => evaluator.type_name(),
            Object::RenderState(state) => state.type_name(),
            Object::GlslShader(shader) => shader.stage.type_name(),
            Object::Texture(_) => "vl::Texture",
            Object::Uniform(_) => "vl::Uniform",
            Object::Actor(_) => "vl::Actor",
            Object::DepthSortCallback(_) => "vl::DepthSortCallback",
            Object::Transform(_) => "vl::Transform",
            Object::Camera(_) => "vl::Camera",
            Object::Viewport(_) => "vl::Viewport",
            Object::ResourceDatabase(_) => "vl::ResourceDatabase",
        }
    }
}

/// A record type that can be stored in an [`ObjectStore`]
pub trait SceneObject: Sized + 'static {
    /// Category of the record type
    const KIND: ObjectKind;

    /// Borrow the record out of an object of the right kind
    fn from_object(object: &Object) -> Option<&Self>;

    /// Mutably borrow the record out of an object of the right kind
    fn from_object_mut(object: &mut Object) -> Option<&mut Self>;

    /// Wrap the record
    fn into_object(self) -> Object;
}

macro_rules! scene_object {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl SceneObject for $ty {
                const KIND: ObjectKind = ObjectKind::$variant;

                fn from_object(object: &Object) -> Option<&Self> {
                    match object {
                        Object::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_object_mut(object: &mut Object) -> Option<&mut Self> {
                    match object {
                        Object::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn into_object(self) -> Object {
                    Object::$variant(self)
                }
            }
        )+
    };
}

scene_object! {
    BufferArray => Array,
    Geometry => Geometry,
    VertexAttribInfo => VertexAttribInfo,
    DrawCall => DrawCall,
    PatchParameter => PatchParameter,
    Effect => Effect,
    Shader => Shader,
    LodEvaluator => LodEvaluator,
    RenderState => RenderState,
    GlslShader => GlslShader,
    Texture => Texture,
    Uniform => Uniform,
    Actor => Actor,
    DepthSortCallback => DepthSortCallback,
    Transform => Transform,
    Camera => Camera,
    Viewport => Viewport,
    ResourceDatabase => ResourceDatabase,
}

/// Arena owning every domain object of a scene
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: HandleMap<ObjectHandle, Object>,
}

impl ObjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            objects: HandleMap::with_key(),
        }
    }

    /// Add a record and return its handle
    pub fn insert<T: SceneObject>(&mut self, value: T) -> ObjectHandle {
        self.objects.insert(value.into_object())
    }

    /// Add an already wrapped object
    pub fn insert_object(&mut self, object: Object) -> ObjectHandle {
        self.objects.insert(object)
    }

    /// Object behind `handle`
    pub fn object(&self, handle: ObjectHandle) -> Option<&Object> {
        self.objects.get(handle)
    }

    /// Record behind `handle`, if it has type `T`
    pub fn get<T: SceneObject>(&self, handle: ObjectHandle) -> Option<&T> {
        self.objects.get(handle).and_then(T::from_object)
    }

    /// Mutable record behind `handle`, if it has type `T`
    pub fn get_mut<T: SceneObject>(&mut self, handle: ObjectHandle) -> Option<&mut T> {
        self.objects.get_mut(handle).and_then(T::from_object_mut)
    }

    /// Overwrite the object behind `handle`, keeping the handle
    ///
    /// Returns `false` when the handle is stale.
    pub fn replace(&mut self, handle: ObjectHandle, object: Object) -> bool {
        match self.objects.get_mut(handle) {
            Some(slot) => {
                *slot = object;
                true
            }
            None => false,
        }
    }

    /// True when `handle` is live
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.objects.contains_key(handle)
    }

    /// Iterate over every object
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &Object)> {
        self.objects.iter()
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the store is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object count per type name, sorted by name
    pub fn count_by_type(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for object in self.objects.values() {
            *counts.entry(object.type_name()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::array::ScalarType;
    use crate::scene::render_state::Light;

    #[test]
    fn test_typed_access() {
        let mut store = ObjectStore::new();
        let transform = store.insert(Transform::new());
        let actor = store.insert(Actor::new(None, None, Some(transform)));

        assert!(store.get::<Transform>(transform).is_some());
        assert!(store.get::<Actor>(transform).is_none());
        assert_eq!(store.get::<Actor>(actor).unwrap().transform, Some(transform));

        store.get_mut::<Actor>(actor).unwrap().render_rank = 4;
        assert_eq!(store.get::<Actor>(actor).unwrap().render_rank, 4);
    }

    #[test]
    fn test_replace_keeps_identity() {
        let mut store = ObjectStore::new();
        let handle = store.insert(Camera::new());
        let mut camera = Camera::new();
        camera.fov = 45.0;
        assert!(store.replace(handle, camera.into_object()));
        assert_eq!(store.get::<Camera>(handle).unwrap().fov, 45.0);
    }

    #[test]
    fn test_type_names() {
        let mut store = ObjectStore::new();
        store.insert(BufferArray::new(ScalarType::Float, 3));
        store.insert(BufferArray::new(ScalarType::Float, 3));
        store.insert(RenderState::Light(Light::default()));
        store.insert(GlslShader::default());

        let counts = store.count_by_type();
        assert_eq!(counts.get("vl::ArrayFloat3"), Some(&2));
        assert_eq!(counts.get("vl::Light"), Some(&1));
        assert_eq!(counts.get("vl::GLSLVertexShader"), Some(&1));
        assert_eq!(RenderState::KIND, ObjectKind::RenderState);
    }
}
