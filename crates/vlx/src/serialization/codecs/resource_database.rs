//! The document root

use crate::document::{List, Structure, Value, ValueData};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::ResourceDatabase;
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::Entries;
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};
use crate::serialization::SERIALIZER_VERSION;

/// `vl::ResourceDatabase`, the document root
///
/// Decoding is strict: the first entry must be `SerializerVersion` holding the
/// supported version and the second `Resources` holding a list of structures.
/// Any deviation aborts the import.
#[derive(Debug, Default)]
pub struct ResourceDatabaseCodec;

fn shape(message: impl Into<String>, line: usize) -> VlxError {
    VlxError::DocumentShape {
        message: message.into(),
        line,
    }
}

/// The `Resources` list, after checking the version entry before it
fn resources(structure: &Structure) -> Result<&List> {
    let line = structure.line_number();
    let [version, resources, ..] = structure.entries() else {
        return Err(shape("expected SerializerVersion and Resources", line));
    };

    if version.key != "SerializerVersion" {
        return Err(shape(
            format!("first entry must be 'SerializerVersion', found '{}'", version.key),
            version.value.line_number(),
        ));
    }
    let Some(found) = version.value.as_integer() else {
        return Err(shape("'SerializerVersion' must be an integer", version.value.line_number()));
    };
    if found != SERIALIZER_VERSION {
        return Err(VlxError::Version {
            found,
            expected: SERIALIZER_VERSION,
            line: version.value.line_number(),
        });
    }

    if resources.key != "Resources" {
        return Err(shape(
            format!("second entry must be 'Resources', found '{}'", resources.key),
            resources.value.line_number(),
        ));
    }
    resources
        .value
        .as_list()
        .ok_or_else(|| shape("'Resources' must be a list", resources.value.line_number()))
}

impl Codec for ResourceDatabaseCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let list = resources(structure)?;
        s.set_version(SERIALIZER_VERSION);
        let handle = s.register(key, ResourceDatabase::default());
        let mut database = ResourceDatabase::new();

        for item in list.iter() {
            let ValueData::Structure(resource) = item.data() else {
                return Err(shape(
                    format!("resources must be structures, found {}", item.kind()),
                    item.line_number(),
                ));
            };
            database.push(s.import_structure(*resource)?);
        }

        log::debug!("imported {} resources", database.resources.len());
        s.finalize(handle, database);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let database = s.object::<ResourceDatabase>(handle)?;
        let key = s.register(handle, "vl::ResourceDatabase", "resourcedatabase_");

        let mut resources = List::new();
        for resource in &database.resources {
            if !s.can_export(*resource) {
                let type_name = s.store().object(*resource).map_or("nothing", |object| object.type_name());
                log::warn!("skipping resource of type '{type_name}': no serializer registered");
                continue;
            }
            if let Some(value) = s.export_field(Some(*resource))? {
                resources.push(value);
            }
        }

        let mut entries = Entries::new();
        entries
            .push("SerializerVersion", Value::integer(SERIALIZER_VERSION))
            .push("Resources", Value::list(resources));

        s.fill(key, entries)
    }
}
