//! Transform hierarchies

use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::Transform;
use crate::serialization::error::Result;
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Transform`
///
/// Children may point back at the transform itself; the identity maps make
/// such cycles decode to the same handle.
#[derive(Debug, Default)]
pub struct TransformCodec;

impl Codec for TransformCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Transform::default());
        let mut transform = Transform::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            transform.object_name = name;
        }
        if let Some(matrix) = s.read(structure, "LocalMatrix", fields::matrix)? {
            transform.local_matrix = matrix;
        }
        if let Some(children) = s.read_refs::<Transform>(structure, "Children")? {
            transform.children = children;
        }

        s.finalize(handle, transform);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let transform = s.object::<Transform>(handle)?;
        let key = s.register(handle, "vl::Transform", "transform_");

        let mut entries = Entries::new();
        entries
            .object_name(&transform.object_name, "vl::Transform")
            .push("LocalMatrix", fields::matrix_value(&transform.local_matrix));
        if !transform.children.is_empty() {
            entries.push("Children", s.export_list(&transform.children)?);
        }

        s.fill(key, entries)
    }
}
