//! Actors and their event callbacks

use super::enums::SortMode;
use crate::foundation::collections::ObjectHandle;

/// A renderable placed in the scene with an effect and a transform
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Optional object name
    pub object_name: String,
    /// Bitmask matched against the rendering enable mask
    pub enable_mask: u32,
    /// Coarse ordering block
    pub render_block: i32,
    /// Ordering within a block
    pub render_rank: i32,
    /// Participates in occlusion culling
    pub is_occludee: bool,
    /// Renderable of each LOD
    pub lods: Vec<ObjectHandle>,
    /// Shading
    pub effect: Option<ObjectHandle>,
    /// Placement
    pub transform: Option<ObjectHandle>,
    /// Per-actor uniforms
    pub uniforms: Vec<ObjectHandle>,
    /// LOD selection
    pub lod_evaluator: Option<ObjectHandle>,
    /// Callbacks run before rendering
    pub event_callbacks: Vec<ObjectHandle>,
}

impl Actor {
    /// Actor drawing `renderable` with `effect` at `transform`
    pub fn new(
        renderable: Option<ObjectHandle>,
        effect: Option<ObjectHandle>,
        transform: Option<ObjectHandle>,
    ) -> Self {
        Self {
            lods: renderable.into_iter().collect(),
            effect,
            transform,
            ..Self::default()
        }
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            enable_mask: u32::MAX,
            render_block: 0,
            render_rank: 0,
            is_occludee: true,
            lods: Vec::new(),
            effect: None,
            transform: None,
            uniforms: Vec::new(),
            lod_evaluator: None,
            event_callbacks: Vec::new(),
        }
    }
}

/// Sorts the actor's primitives by depth before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthSortCallback {
    /// Optional object name
    pub object_name: String,
    /// Run only when true
    pub enabled: bool,
    /// Sort order
    pub sort_mode: SortMode,
}

impl Default for DepthSortCallback {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            enabled: true,
            sort_mode: SortMode::BackToFront,
        }
    }
}
