//! Cameras and viewports

use super::enums::{ClearColorMode, ClearFlags, ProjectionType};
use crate::foundation::collections::ObjectHandle;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3, Vec4};

/// Camera with view and projection matrices
///
/// The projection parameters are kept next to the matrix so that a
/// perspective or orthographic projection can be rebuilt after resizing.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Optional object name
    pub object_name: String,
    /// World to view matrix
    pub view_matrix: Mat4,
    /// View to clip matrix
    pub projection_matrix: Mat4,
    /// How the projection was built
    pub projection_type: ProjectionType,
    /// Target viewport
    pub viewport: Option<ObjectHandle>,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near_plane: f32,
    /// Far clipping plane
    pub far_plane: f32,
    /// Left frustum plane
    pub left: f32,
    /// Right frustum plane
    pub right: f32,
    /// Bottom frustum plane
    pub bottom: f32,
    /// Top frustum plane
    pub top: f32,
    /// Transform the camera follows
    pub bound_transform: Option<ObjectHandle>,
}

impl Camera {
    /// Create a camera at the origin looking down -Z
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the camera from `eye` at `target`
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.view_matrix = Mat4::look_at(eye, target, up);
    }

    /// Rebuild a perspective projection from `fov` and the clip planes
    pub fn set_perspective(&mut self, aspect: f32) {
        self.projection_type = ProjectionType::Perspective;
        self.projection_matrix =
            Mat4::new_perspective(aspect, self.fov.to_radians(), self.near_plane, self.far_plane);
    }

    /// Rebuild an orthographic projection from the frustum planes
    pub fn set_orthographic(&mut self) {
        self.projection_type = ProjectionType::Orthographic;
        self.projection_matrix = Mat4::new_orthographic(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near_plane,
            self.far_plane,
        );
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            view_matrix: Mat4::identity(),
            projection_matrix: Mat4::identity(),
            projection_type: ProjectionType::User,
            viewport: None,
            fov: 60.0,
            near_plane: 0.05,
            far_plane: 10000.0,
            left: 0.0,
            right: 0.0,
            bottom: 0.0,
            top: 0.0,
            bound_transform: None,
        }
    }
}

/// Rectangle of the render target plus clear settings
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Optional object name
    pub object_name: String,
    /// Float clear color
    pub clear_color: Vec4,
    /// Integer clear color
    pub clear_color_int: [i32; 4],
    /// Unsigned clear color
    pub clear_color_uint: [u32; 4],
    /// Clear depth
    pub clear_depth: f32,
    /// Clear stencil value
    pub clear_stencil: i32,
    /// Which clear color is used
    pub clear_color_mode: ClearColorMode,
    /// Buffers cleared
    pub clear_flags: ClearFlags,
    /// Left edge in pixels
    pub x: i32,
    /// Bottom edge in pixels
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Restrict clears to the rectangle
    pub scissor_enabled: bool,
}

impl Viewport {
    /// Viewport covering the given rectangle
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    /// Width over height
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            clear_color_int: [0, 0, 0, 1],
            clear_color_uint: [0, 0, 0, 1],
            clear_depth: 1.0,
            clear_stencil: 0,
            clear_color_mode: ClearColorMode::Float,
            clear_flags: ClearFlags::default(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            scissor_enabled: true,
        }
    }
}
