//! # VLX
//!
//! Object-graph serialization for VLX scene documents.
//!
//! ## Features
//!
//! - **Text Syntax**: Lexer, parser, UID linker and printer for `.vlx` files
//! - **Codec Registry**: Pluggable per-type codecs keyed by tag and type name
//! - **Identity Preservation**: Shared and cyclic references survive a round trip
//! - **Error Policies**: Fail on the first error or collect field diagnostics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vlx::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let serializer = Serializer::with_defaults();
//!     let imported = serializer.load_vlx_file("scene.vlx")?;
//!     for handle in imported.resources() {
//!         println!("{:?}", imported.store.object(*handle).map(Object::kind));
//!     }
//!     serializer.write_vlx_file("copy.vlx", &imported.store, imported.database)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod document;
pub mod foundation;
pub mod scene;
pub mod serialization;
pub mod syntax;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ErrorPolicy, PrinterConfig, SerializerConfig},
        document::{Document, Structure, Value, ValueKind},
        foundation::{
            collections::{ObjectHandle, StructureKey},
            math::{Mat4, Vec3, Vec4},
        },
        scene::{Object, ObjectKind, ObjectStore, ResourceDatabase, SceneObject},
        serialization::{
            load_vlx, load_vlx_file, write_vlx, write_vlx_file, Codec, Imported, Registry, Serializer, VlxError,
        },
    };
}
