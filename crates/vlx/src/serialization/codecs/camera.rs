//! Cameras and viewports

use crate::document::Value;
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::{Camera, Transform, Viewport};
use crate::serialization::error::Result;
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Camera`
#[derive(Debug, Default)]
pub struct CameraCodec;

/// `vl::Viewport`
#[derive(Debug, Default)]
pub struct ViewportCodec;

impl Codec for CameraCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Camera::default());
        let mut camera = Camera::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            camera.object_name = name;
        }
        if let Some(matrix) = s.read(structure, "ViewMatrix", fields::matrix)? {
            camera.view_matrix = matrix;
        }
        if let Some(matrix) = s.read(structure, "ProjectionMatrix", fields::matrix)? {
            camera.projection_matrix = matrix;
        }
        if let Some(projection) = s.read(structure, "ProjectionType", fields::enumeration)? {
            camera.projection_type = projection;
        }
        camera.viewport = s.read_ref::<Viewport>(structure, "Viewport")?;
        if let Some(fov) = s.read(structure, "FOV", fields::real32)? {
            camera.fov = fov;
        }
        if let Some(near) = s.read(structure, "NearPlane", fields::real32)? {
            camera.near_plane = near;
        }
        if let Some(far) = s.read(structure, "FarPlane", fields::real32)? {
            camera.far_plane = far;
        }
        if let Some(left) = s.read(structure, "Left", fields::real32)? {
            camera.left = left;
        }
        if let Some(right) = s.read(structure, "Right", fields::real32)? {
            camera.right = right;
        }
        if let Some(bottom) = s.read(structure, "Bottom", fields::real32)? {
            camera.bottom = bottom;
        }
        if let Some(top) = s.read(structure, "Top", fields::real32)? {
            camera.top = top;
        }
        camera.bound_transform = s.read_ref::<Transform>(structure, "BoundTransform")?;

        s.finalize(handle, camera);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let camera = s.object::<Camera>(handle)?;
        let key = s.register(handle, "vl::Camera", "camera_");

        let mut entries = Entries::new();
        entries
            .object_name(&camera.object_name, "vl::Camera")
            .push("ViewMatrix", fields::matrix_value(&camera.view_matrix))
            .push("ProjectionMatrix", fields::matrix_value(&camera.projection_matrix))
            .push("ProjectionType", fields::enum_value(camera.projection_type));
        entries.push_opt("Viewport", s.export_field(camera.viewport)?);
        entries
            .push("FOV", fields::real_value(camera.fov))
            .push("NearPlane", fields::real_value(camera.near_plane))
            .push("FarPlane", fields::real_value(camera.far_plane))
            .push("Left", fields::real_value(camera.left))
            .push("Right", fields::real_value(camera.right))
            .push("Bottom", fields::real_value(camera.bottom))
            .push("Top", fields::real_value(camera.top));
        entries.push_opt("BoundTransform", s.export_field(camera.bound_transform)?);

        s.fill(key, entries)
    }
}

impl Codec for ViewportCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Viewport::default());
        let mut viewport = Viewport::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            viewport.object_name = name;
        }
        if let Some(color) = s.read(structure, "ClearColor", fields::vec4)? {
            viewport.clear_color = color;
        }
        if let Some(color) = s.read(structure, "ClearColorInt", fields::ivec4)? {
            viewport.clear_color_int = color;
        }
        if let Some(color) = s.read(structure, "ClearColorUInt", fields::uvec4)? {
            viewport.clear_color_uint = color;
        }
        if let Some(depth) = s.read(structure, "ClearDepth", fields::real32)? {
            viewport.clear_depth = depth;
        }
        if let Some(stencil) = s.read(structure, "ClearStencil", fields::int32)? {
            viewport.clear_stencil = stencil;
        }
        if let Some(mode) = s.read(structure, "ClearColorMode", fields::enumeration)? {
            viewport.clear_color_mode = mode;
        }
        if let Some(flags) = s.read(structure, "ClearFlags", fields::enumeration)? {
            viewport.clear_flags = flags;
        }
        if let Some(x) = s.read(structure, "X", fields::int32)? {
            viewport.x = x;
        }
        if let Some(y) = s.read(structure, "Y", fields::int32)? {
            viewport.y = y;
        }
        if let Some(width) = s.read(structure, "Width", fields::int32)? {
            viewport.width = width;
        }
        if let Some(height) = s.read(structure, "Height", fields::int32)? {
            viewport.height = height;
        }
        if let Some(enabled) = s.read(structure, "ScissorEnabled", fields::boolean)? {
            viewport.scissor_enabled = enabled;
        }

        s.finalize(handle, viewport);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let viewport = s.object::<Viewport>(handle)?;
        let key = s.register(handle, "vl::Viewport", "viewport_");

        let mut entries = Entries::new();
        entries
            .object_name(&viewport.object_name, "vl::Viewport")
            .push("ClearColor", fields::vec4_value(&viewport.clear_color))
            .push(
                "ClearColorInt",
                Value::array_integer(None, viewport.clear_color_int.iter().map(|v| i64::from(*v)).collect()),
            )
            .push(
                "ClearColorUInt",
                Value::array_integer(None, viewport.clear_color_uint.iter().map(|v| i64::from(*v)).collect()),
            )
            .push("ClearDepth", fields::real_value(viewport.clear_depth))
            .push("ClearStencil", Value::integer(i64::from(viewport.clear_stencil)))
            .push("ClearColorMode", fields::enum_value(viewport.clear_color_mode))
            .push("ClearFlags", fields::enum_value(viewport.clear_flags))
            .push("X", Value::integer(i64::from(viewport.x)))
            .push("Y", Value::integer(i64::from(viewport.y)))
            .push("Width", Value::integer(i64::from(viewport.width)))
            .push("Height", Value::integer(i64::from(viewport.height)))
            .push("ScissorEnabled", Value::boolean(viewport.scissor_enabled));

        s.fill(key, entries)
    }
}
