//! Top-level import and export
//!
//! The [`Serializer`] owns a shared registry and a configuration. Every call
//! runs a fresh session, applies the configured [`ErrorPolicy`] to what the
//! session recorded, and returns either a populated result or the error.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use super::error::{Result, VlxError};
use super::registry::{tag_for, Registry};
use super::session::{ExportSession, ImportSession, SessionOutcome};
use super::SERIALIZER_VERSION;
use crate::config::{ErrorPolicy, PrinterConfig, SerializerConfig};
use crate::document::Document;
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::{ObjectStore, ResourceDatabase};
use crate::syntax;

/// Objects decoded from a document
#[derive(Debug)]
pub struct Imported {
    /// Every decoded object
    pub store: ObjectStore,
    /// Handle of the root [`ResourceDatabase`]
    pub database: ObjectHandle,
    /// Field errors recorded under [`ErrorPolicy::Collect`]
    pub diagnostics: Vec<VlxError>,
}

impl Imported {
    /// The root database
    pub fn database(&self) -> Option<&ResourceDatabase> {
        self.store.get::<ResourceDatabase>(self.database)
    }

    /// Handles of the root resources, in document order
    pub fn resources(&self) -> &[ObjectHandle] {
        self.database().map_or(&[], |database| database.resources.as_slice())
    }
}

/// Document encoded from objects
#[derive(Debug)]
pub struct Exported {
    /// Every encoded structure
    pub document: Document,
    /// The `<vl::ResourceDatabase>` structure
    pub root: StructureKey,
    /// Field errors recorded under [`ErrorPolicy::Collect`]
    pub diagnostics: Vec<VlxError>,
}

impl Exported {
    /// Lay the document out as text
    pub fn to_text(&self, config: &PrinterConfig) -> String {
        syntax::print(&self.document, self.root, config)
    }
}

/// Entry point for reading and writing VLX documents
#[derive(Debug, Clone)]
pub struct Serializer {
    registry: Arc<Registry>,
    config: SerializerConfig,
}

impl Serializer {
    /// Serializer over `registry`
    pub fn new(registry: Arc<Registry>, config: SerializerConfig) -> Self {
        Self { registry, config }
    }

    /// Built-in codecs and the default configuration
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(Registry::with_defaults()), SerializerConfig::default())
    }

    /// The codec registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The configuration
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Apply the error policy to a finished session
    fn settle<T>(&self, result: Result<T>, outcome: SessionOutcome) -> Result<(T, Vec<VlxError>)> {
        let mut diagnostics = outcome.diagnostics;
        match (result, self.config.error_policy) {
            (Err(fatal), ErrorPolicy::FirstErrorWins) => {
                Err(if diagnostics.is_empty() { fatal } else { diagnostics.remove(0) })
            }
            (Err(fatal), ErrorPolicy::Collect) => Err(fatal),
            (Ok(_), ErrorPolicy::FirstErrorWins) if !diagnostics.is_empty() => Err(diagnostics.remove(0)),
            (Ok(value), _) => Ok((value, diagnostics)),
        }
    }

    /// Decode the `<vl::ResourceDatabase>` at `root` of a linked document
    pub fn import_document(&self, document: &Document, root: StructureKey) -> Result<Imported> {
        let structure = document.structure(root).ok_or(VlxError::DanglingStructure)?;
        let expected = tag_for("vl::ResourceDatabase");
        if structure.tag() != expected {
            return Err(VlxError::DocumentShape {
                message: format!("root must be {expected}, found {}", structure.tag()),
                line: structure.line_number(),
            });
        }

        let mut session = ImportSession::new(&self.registry, document);
        let result = session.import_structure(root);
        if let Err(error) = &result {
            if !matches!(error, VlxError::Aborted) {
                session.abort(error);
            }
        }
        let (store, outcome) = session.finish();
        log::debug!(
            "import finished: {} objects, {} errors, state {:?}",
            store.len(),
            outcome.diagnostics.len(),
            outcome.error_state
        );

        let (database, diagnostics) = self.settle(result, outcome)?;
        if store.get::<ResourceDatabase>(database).is_none() {
            return Err(VlxError::DocumentShape {
                message: "root did not decode to a resource database".to_string(),
                line: structure.line_number(),
            });
        }
        Ok(Imported {
            store,
            database,
            diagnostics,
        })
    }

    /// Encode the [`ResourceDatabase`] at `database` and everything it reaches
    pub fn export_document(&self, store: &ObjectStore, database: ObjectHandle) -> Result<Exported> {
        if store.get::<ResourceDatabase>(database).is_none() {
            return Err(VlxError::DanglingObject);
        }

        let mut session = ExportSession::new(&self.registry, store);
        let result = session.export_object(database);
        if let Err(error) = &result {
            if !matches!(error, VlxError::Aborted) {
                session.abort(error);
            }
        }
        let (document, outcome) = session.finish();
        log::debug!(
            "export finished: {} structures, {} errors, state {:?}",
            document.len(),
            outcome.diagnostics.len(),
            outcome.error_state
        );

        let (root, diagnostics) = self.settle(result, outcome)?;
        Ok(Exported {
            document,
            root,
            diagnostics,
        })
    }

    /// Parse, link and import VLX text
    pub fn import_text(&self, source: &str) -> Result<Imported> {
        let parsed = syntax::parse_linked(source)?;
        if parsed.version != SERIALIZER_VERSION {
            return Err(VlxError::Version {
                found: parsed.version,
                expected: SERIALIZER_VERSION,
                line: 1,
            });
        }
        self.import_document(&parsed.document, parsed.root)
    }

    /// Export and print as VLX text
    pub fn export_text(&self, store: &ObjectStore, database: ObjectHandle) -> Result<String> {
        let exported = self.export_document(store, database)?;
        Ok(exported.to_text(&self.config.printer))
    }

    /// Read a whole VLX text document from `reader`
    pub fn load_vlx(&self, mut reader: impl Read) -> Result<Imported> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        self.import_text(&source)
    }

    /// Read a VLX text file
    pub fn load_vlx_file(&self, path: impl AsRef<Path>) -> Result<Imported> {
        let path = path.as_ref();
        log::info!("loading {}", path.display());
        let file = File::open(path)?;
        self.load_vlx(BufReader::new(file))
    }

    /// Write the database at `database` as VLX text; returns the diagnostics
    pub fn write_vlx(
        &self,
        mut writer: impl Write,
        store: &ObjectStore,
        database: ObjectHandle,
    ) -> Result<Vec<VlxError>> {
        let exported = self.export_document(store, database)?;
        writer.write_all(exported.to_text(&self.config.printer).as_bytes())?;
        writer.flush()?;
        Ok(exported.diagnostics)
    }

    /// Write the database at `database` to a VLX text file
    pub fn write_vlx_file(
        &self,
        path: impl AsRef<Path>,
        store: &ObjectStore,
        database: ObjectHandle,
    ) -> Result<Vec<VlxError>> {
        let path = path.as_ref();
        log::info!("writing {}", path.display());
        let file = File::create(path)?;
        self.write_vlx(BufWriter::new(file), store, database)
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// [`Serializer::load_vlx`] with the built-in codecs
pub fn load_vlx(reader: impl Read) -> Result<Imported> {
    Serializer::with_defaults().load_vlx(reader)
}

/// [`Serializer::load_vlx_file`] with the built-in codecs
pub fn load_vlx_file(path: impl AsRef<Path>) -> Result<Imported> {
    Serializer::with_defaults().load_vlx_file(path)
}

/// [`Serializer::write_vlx`] with the built-in codecs
pub fn write_vlx(writer: impl Write, store: &ObjectStore, database: ObjectHandle) -> Result<Vec<VlxError>> {
    Serializer::with_defaults().write_vlx(writer, store, database)
}

/// [`Serializer::write_vlx_file`] with the built-in codecs
pub fn write_vlx_file(path: impl AsRef<Path>, store: &ObjectStore, database: ObjectHandle) -> Result<Vec<VlxError>> {
    Serializer::with_defaults().write_vlx_file(path, store, database)
}
