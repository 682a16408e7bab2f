//! Object-graph serialization
//!
//! Converts between a linked [`Document`](crate::document::Document) and an
//! [`ObjectStore`](crate::scene::ObjectStore) of scene records. The
//! [`Registry`] maps tags and type names to [`Codec`]s; sessions carry the
//! identity maps that keep shared and cyclic references intact.

pub mod codecs;
mod driver;
pub mod error;
pub mod fields;
pub mod registry;
pub mod session;

#[cfg(test)]
mod tests;

pub use driver::{load_vlx, load_vlx_file, write_vlx, write_vlx_file, Exported, Imported, Serializer};
pub use error::{ErrorKind, ErrorState, Result, Severity, VlxError};
pub use registry::{Codec, Registry};
pub use session::{ExportSession, ImportSession};

/// Version written to and required from `SerializerVersion`
pub const SERIALIZER_VERSION: i64 = 100;
