//! Import and export sessions
//!
//! A session owns everything one traversal needs: the identity map that makes
//! shared and cyclic references decode (or encode) exactly once, the error
//! state, and on export the UID counter. Sessions are created by the
//! [`Serializer`](super::Serializer) and handed to codecs.

use std::collections::HashMap;

use super::codecs::type_name_of;
use super::error::{ErrorState, Result, Severity, VlxError};
use super::fields::Entries;
use super::registry::{tag_for, Registry};
use crate::document::{Document, KeyValue, List, Structure, Value, ValueKind};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::{Object, ObjectStore, SceneObject};

/// Error bookkeeping shared by both session directions
#[derive(Debug)]
struct SessionState {
    failure: ErrorState,
    error_state: ErrorState,
    aborted: bool,
    diagnostics: Vec<VlxError>,
}

impl SessionState {
    fn new(failure: ErrorState) -> Self {
        Self {
            failure,
            error_state: ErrorState::NoError,
            aborted: false,
            diagnostics: Vec::new(),
        }
    }

    fn mark(&mut self) {
        if self.error_state == ErrorState::NoError {
            self.error_state = self.failure;
        }
    }

    fn record(&mut self, error: VlxError) {
        log::error!("{error}");
        self.mark();
        self.diagnostics.push(error);
    }

    fn abort(&mut self, error: &VlxError) {
        if !self.aborted {
            log::error!("{error}");
        }
        self.mark();
        self.aborted = true;
    }

    fn check<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.severity() == Severity::Field => {
                self.record(error);
                Ok(None)
            }
            Err(error) => {
                self.abort(&error);
                Err(error)
            }
        }
    }
}

/// Result of a finished session: what was recorded along the way
#[derive(Debug)]
pub(crate) struct SessionOutcome {
    pub(crate) error_state: ErrorState,
    pub(crate) diagnostics: Vec<VlxError>,
}

/// State of one document-to-objects traversal
pub struct ImportSession<'a> {
    registry: &'a Registry,
    document: &'a Document,
    store: ObjectStore,
    import_map: HashMap<StructureKey, ObjectHandle>,
    state: SessionState,
    version: i64,
}

impl<'a> ImportSession<'a> {
    /// Start importing from `document`
    pub fn new(registry: &'a Registry, document: &'a Document) -> Self {
        Self {
            registry,
            document,
            store: ObjectStore::new(),
            import_map: HashMap::new(),
            state: SessionState::new(ErrorState::ImportError),
            version: 0,
        }
    }

    /// The document being imported
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Structure stored under `key`
    pub fn structure(&self, key: StructureKey) -> Result<&'a Structure> {
        self.document.structure(key).ok_or(VlxError::DanglingStructure)
    }

    /// Objects decoded so far
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Serializer version read from the document, 0 before it is read
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Remember the version read from the document
    pub fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    /// Current error state
    pub fn error_state(&self) -> ErrorState {
        self.state.error_state
    }

    /// True once a fatal error was raised
    pub fn is_aborted(&self) -> bool {
        self.state.aborted
    }

    /// Field errors recorded so far
    pub fn diagnostics(&self) -> &[VlxError] {
        &self.state.diagnostics
    }

    /// Decode the structure at `key`, or return the object it already decoded to
    pub fn import_structure(&mut self, key: StructureKey) -> Result<ObjectHandle> {
        if self.state.aborted {
            return Err(VlxError::Aborted);
        }
        if let Some(handle) = self.import_map.get(&key) {
            return Ok(*handle);
        }

        let structure = self.structure(key)?;
        let registry = self.registry;
        let Some(codec) = registry.resolve_import(structure.tag()) else {
            let error = VlxError::UnknownTag {
                tag: structure.tag().to_string(),
                line: structure.line_number(),
            };
            self.state.abort(&error);
            return Err(error);
        };

        log::trace!("decoding {} at line {}", structure.tag(), structure.line_number());
        codec.decode(self, key)
    }

    /// Allocate `value` for the structure at `key` and map the two together
    ///
    /// Must be called before any field is decoded so that references back to
    /// the structure resolve to the new handle.
    pub fn register<T: SceneObject>(&mut self, key: StructureKey, value: T) -> ObjectHandle {
        let handle = self.store.insert(value);
        self.import_map.insert(key, handle);
        handle
    }

    /// Store the fully decoded `value` under `handle`
    pub fn finalize<T: SceneObject>(&mut self, handle: ObjectHandle, value: T) {
        self.store.replace(handle, value.into_object());
    }

    /// Record a field error and continue, or abort on a fatal one
    pub fn check<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        self.state.check(result)
    }

    /// Record an error that does not come from a decoder
    pub fn report(&mut self, error: VlxError) -> Result<()> {
        self.check::<()>(Err(error)).map(|_| ())
    }

    /// Decode `key` of `structure` with `decode`, if present
    pub fn read<T>(
        &mut self,
        structure: &Structure,
        key: &str,
        decode: impl FnOnce(&str, &Value) -> Result<T>,
    ) -> Result<Option<T>> {
        match structure.get(key) {
            Some(value) => self.check(decode(key, value)),
            None => Ok(None),
        }
    }

    /// Import a reference to any object
    pub fn import_any(&mut self, key: &str, value: &Value) -> Result<Option<ObjectHandle>> {
        match value.as_structure() {
            Some(structure) => self.import_structure(structure).map(Some),
            None if value.kind() == ValueKind::Null => Ok(None),
            None => self.check::<ObjectHandle>(Err(VlxError::KindMismatch {
                key: key.to_string(),
                expected: ValueKind::Structure,
                found: value.kind(),
                line: value.line_number(),
            })),
        }
    }

    /// Import a reference that must decode to a `T`
    pub fn import_field<T: SceneObject>(&mut self, key: &str, value: &Value) -> Result<Option<ObjectHandle>> {
        let Some(handle) = self.import_any(key, value)? else {
            return Ok(None);
        };
        match self.store.object(handle).map(Object::kind) {
            Some(kind) if kind == T::KIND => Ok(Some(handle)),
            found => self.check::<ObjectHandle>(Err(VlxError::WrongReference {
                key: key.to_string(),
                expected: T::KIND.to_string(),
                found: found.map_or_else(|| "nothing".to_string(), |kind| kind.to_string()),
                line: value.line_number(),
            })),
        }
    }

    /// Import every `T` of a list; bad elements are reported and skipped
    pub fn import_list<T: SceneObject>(&mut self, key: &str, value: &Value) -> Result<Option<Vec<ObjectHandle>>> {
        let Some(list) = self.check(super::fields::list(key, value))? else {
            return Ok(None);
        };
        let mut handles = Vec::with_capacity(list.len());
        for item in list.iter() {
            if let Some(handle) = self.import_field::<T>(key, item)? {
                handles.push(handle);
            }
        }
        Ok(Some(handles))
    }

    /// Import the reference stored under `key`, if present
    pub fn read_ref<T: SceneObject>(&mut self, structure: &Structure, key: &str) -> Result<Option<ObjectHandle>> {
        match structure.get(key) {
            Some(value) => self.import_field::<T>(key, value),
            None => Ok(None),
        }
    }

    /// Import the reference list stored under `key`, if present
    pub fn read_refs<T: SceneObject>(&mut self, structure: &Structure, key: &str) -> Result<Option<Vec<ObjectHandle>>> {
        match structure.get(key) {
            Some(value) => self.import_list::<T>(key, value),
            None => Ok(None),
        }
    }

    /// Mark the session aborted by `error`, raised outside a codec
    pub(crate) fn abort(&mut self, error: &VlxError) {
        self.state.abort(error);
    }

    /// Consume the session
    pub(crate) fn finish(self) -> (ObjectStore, SessionOutcome) {
        let outcome = SessionOutcome {
            error_state: self.state.error_state,
            diagnostics: self.state.diagnostics,
        };
        (self.store, outcome)
    }
}

/// State of one objects-to-document traversal
pub struct ExportSession<'a> {
    registry: &'a Registry,
    store: &'a ObjectStore,
    document: Document,
    export_map: HashMap<ObjectHandle, StructureKey>,
    state: SessionState,
    uid_counter: u64,
}

impl<'a> ExportSession<'a> {
    /// Start exporting objects of `store`
    pub fn new(registry: &'a Registry, store: &'a ObjectStore) -> Self {
        Self {
            registry,
            store,
            document: Document::new(),
            export_map: HashMap::new(),
            state: SessionState::new(ErrorState::ExportError),
            uid_counter: 1,
        }
    }

    /// The store being exported
    pub fn store(&self) -> &'a ObjectStore {
        self.store
    }

    /// Record of type `T` behind `handle`
    pub fn object<T: SceneObject>(&self, handle: ObjectHandle) -> Result<&'a T> {
        self.store.get::<T>(handle).ok_or(VlxError::DanglingObject)
    }

    /// Document built so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current error state
    pub fn error_state(&self) -> ErrorState {
        self.state.error_state
    }

    /// True once a fatal error was raised
    pub fn is_aborted(&self) -> bool {
        self.state.aborted
    }

    /// Errors recorded so far
    pub fn diagnostics(&self) -> &[VlxError] {
        &self.state.diagnostics
    }

    /// True when the registry has a codec for the object behind `handle`
    pub fn can_export(&self, handle: ObjectHandle) -> bool {
        self.store
            .object(handle)
            .is_some_and(|object| self.registry.can_export(object))
    }

    /// Encode the object at `handle`, or return the structure it already encoded to
    pub fn export_object(&mut self, handle: ObjectHandle) -> Result<StructureKey> {
        if self.state.aborted {
            return Err(VlxError::Aborted);
        }
        if let Some(key) = self.export_map.get(&handle) {
            return Ok(*key);
        }

        let store = self.store;
        let object = store.object(handle).ok_or(VlxError::DanglingObject)?;
        let registry = self.registry;
        let Some(codec) = registry.resolve_export(object) else {
            let error = VlxError::UnknownType {
                type_name: object.type_name().to_string(),
            };
            self.state.abort(&error);
            return Err(error);
        };

        log::trace!("encoding {}", object.type_name());
        codec.encode(self, handle)
    }

    /// Allocate the structure of `handle`, tagged `<type_name>` with a fresh UID
    ///
    /// Must be called before any field is encoded so that references back to
    /// the object resolve to the new structure.
    pub fn register(&mut self, handle: ObjectHandle, type_name: &str, prefix: &str) -> StructureKey {
        let uid = self.generate_uid(prefix);
        let key = self.document.insert(Structure::new(tag_for(type_name)).with_uid(uid));
        self.export_map.insert(handle, key);
        key
    }

    /// Next UID, `#` + prefix + `id` + counter
    pub fn generate_uid(&mut self, prefix: &str) -> String {
        let uid = format!("#{prefix}id{}", self.uid_counter);
        self.uid_counter += 1;
        uid
    }

    /// Entries whose reals can be written as text; the others are reported and dropped
    fn printable(&mut self, tag: &str, entries: Entries) -> Result<Vec<KeyValue>> {
        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries.into_vec() {
            if entry.value.is_finite() {
                kept.push(entry);
            } else {
                self.check::<()>(Err(VlxError::Export {
                    type_name: type_name_of(tag).to_string(),
                    message: format!("'{}' holds a NaN or infinite real", entry.key),
                }))?;
            }
        }
        Ok(kept)
    }

    /// Append `entries` to the structure at `key`
    pub fn fill(&mut self, key: StructureKey, entries: Entries) -> Result<StructureKey> {
        let tag = self
            .document
            .structure(key)
            .ok_or(VlxError::DanglingStructure)?
            .tag()
            .to_string();
        let entries = self.printable(&tag, entries)?;
        let structure = self.document.structure_mut(key).ok_or(VlxError::DanglingStructure)?;
        structure.extend(entries);
        Ok(key)
    }

    /// Build a nested structure that is neither identity mapped nor given a UID
    pub fn new_inline_structure(&mut self, tag: &str, entries: Entries) -> Result<Value> {
        let mut structure = Structure::new(tag);
        structure.extend(self.printable(tag, entries)?);
        Ok(Value::structure(self.document.insert(structure)))
    }

    /// Record a field error and continue, or abort on a fatal one
    pub fn check<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        self.state.check(result)
    }

    /// Reference value for `handle`, if set and exportable
    pub fn export_field(&mut self, handle: Option<ObjectHandle>) -> Result<Option<Value>> {
        let Some(handle) = handle else {
            return Ok(None);
        };
        let key = self.export_object(handle);
        Ok(self.check(key)?.map(Value::structure))
    }

    /// List of references; objects that fail to export are reported and skipped
    pub fn export_list(&mut self, handles: &[ObjectHandle]) -> Result<Value> {
        let mut list = List::new();
        for handle in handles {
            if let Some(value) = self.export_field(Some(*handle))? {
                list.push(value);
            }
        }
        Ok(Value::list(list))
    }

    /// Mark the session aborted by `error`, raised outside a codec
    pub(crate) fn abort(&mut self, error: &VlxError) {
        self.state.abort(error);
    }

    /// Consume the session
    pub(crate) fn finish(self) -> (Document, SessionOutcome) {
        let outcome = SessionOutcome {
            error_state: self.state.error_state,
            diagnostics: self.state.diagnostics,
        };
        (self.document, outcome)
    }
}
