//! The config store: two JSON documents behind one lock.
//!
//! `config` holds the live values and is the only document reads are
//! answered from. `defaults` is a ledger: every `get` records the default it
//! was called with, so the defaults file lists every known parameter even
//! when the config file never mentions it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cracon_json_pointer::{parse_json_pointer, validate_json_pointer, validate_path};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::error::StoreError;
use crate::options::FileOptions;
use crate::similarity::is_similar;
use crate::value::ConfigValue;

#[derive(Debug)]
struct Documents {
    config: Value,
    defaults: Value,
    // Set when the in-memory document differs from its file.
    write_config: bool,
    write_defaults: bool,
    config_path: Option<PathBuf>,
    defaults_path: Option<PathBuf>,
}

/// A typed, file-backed configuration store.
///
/// All document access is serialized by one mutex, so a `ConfigFile` can be
/// shared across threads; wrap it in a [`SharedFile`](crate::SharedFile) to
/// derive groups and parameters from it.
///
/// ```no_run
/// use cracon::ConfigFile;
///
/// let config = ConfigFile::new();
/// if !config.init("config.json", "defaults.json") {
///     std::process::exit(1);
/// }
/// let speed: i64 = config.get("/car/speed", 9000);
/// let name = config.get("/car/name", String::from("herbie"));
/// let _ = config.set("/car/speed", speed + 1);
/// if config.should_write() {
///     config.write();
/// }
/// # let _ = name;
/// ```
#[derive(Debug)]
pub struct ConfigFile {
    options: FileOptions,
    state: Mutex<Documents>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigFile {
    /// An uninitialized store: both documents empty, both dirty.
    pub fn new() -> Self {
        Self::with_options(FileOptions::default())
    }

    pub fn with_options(options: FileOptions) -> Self {
        Self {
            options,
            state: Mutex::new(Documents {
                config: empty_document(),
                defaults: empty_document(),
                write_config: true,
                write_defaults: true,
                config_path: None,
                defaults_path: None,
            }),
        }
    }

    /// Create a store and [`try_init`](Self::try_init) it.
    pub fn open(
        config_path: impl AsRef<Path>,
        defaults_path: impl AsRef<Path>,
    ) -> Result<Self, StoreError> {
        let file = Self::new();
        file.try_init(config_path, defaults_path)?;
        Ok(file)
    }

    /// Bind the file pair, load the config file and write both files back.
    ///
    /// Returns `false` if the config file cannot be parsed or either file
    /// cannot be written. The failure is logged.
    pub fn init(&self, config_path: impl AsRef<Path>, defaults_path: impl AsRef<Path>) -> bool {
        match self.try_init(config_path, defaults_path) {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "failed to initialize the configuration files");
                false
            }
        }
    }

    /// Bind the file pair, load the config file and write both files back.
    ///
    /// A missing or blank config file starts an empty document. The
    /// defaults ledger kept in memory survives re-initialization; it is
    /// never read from disk.
    pub fn try_init(
        &self,
        config_path: impl AsRef<Path>,
        defaults_path: impl AsRef<Path>,
    ) -> Result<(), StoreError> {
        {
            let mut docs = self.lock();
            let config_path = config_path.as_ref().to_path_buf();
            docs.defaults_path = Some(defaults_path.as_ref().to_path_buf());
            docs.config = empty_document();
            docs.write_config = true;
            docs.write_defaults = true;
            let loaded = load_document(&config_path);
            docs.config_path = Some(config_path);
            docs.config = loaded?;
        }
        self.try_write()
    }

    /// Read the value at `pointer` as a `T`, or `default` if it cannot be.
    ///
    /// `default` is always recorded in the defaults ledger. The config
    /// document is never modified: an absent, null, malformed or
    /// dissimilar entry yields `default`.
    pub fn get<T: ConfigValue>(&self, pointer: &str, default: T) -> T {
        let Some(path) = parse_pointer(pointer) else {
            return default;
        };
        let default_json = default.to_json();

        let mut docs = self.lock();
        docs.write_defaults = true;
        if let Err(err) = cracon_json_pointer::set(&mut docs.defaults, &path, default_json.clone())
        {
            warn!(pointer, error = %err, "cannot record the default value");
        }

        let node = match cracon_json_pointer::get(&docs.config, &path) {
            Some(node) if !node.is_null() => node,
            _ => {
                info!(pointer, default = %default_json, "key absent, using the default");
                return default;
            }
        };
        if !is_similar::<T>(node) {
            error!(
                pointer,
                expected = %T::kind(),
                found = %node,
                default = %default_json,
                "stored value is not similar to the requested type, using the default"
            );
            return default;
        }
        match T::from_json(node) {
            Some(value) => value,
            None => {
                error!(
                    pointer,
                    expected = %T::kind(),
                    found = %node,
                    default = %default_json,
                    "stored value does not convert to the requested type, using the default"
                );
                default
            }
        }
    }

    /// Write `value` at `pointer`, creating missing parents, and return it.
    pub fn set<T: ConfigValue>(&self, pointer: &str, value: T) -> T {
        self.set_ref(pointer, &value);
        value
    }

    /// [`set`](Self::set) without taking ownership of the value.
    pub fn set_ref<T: ConfigValue>(&self, pointer: &str, value: &T) {
        let Some(path) = parse_pointer(pointer) else {
            return;
        };
        let mut docs = self.lock();
        docs.write_config = true;
        match cracon_json_pointer::set(&mut docs.config, &path, value.to_json()) {
            Ok(node) if node.is_null() => {
                warn!(
                    pointer,
                    expected = %T::kind(),
                    "value has no JSON representation, stored null"
                );
            }
            Ok(node) => {
                if !is_similar::<T>(node) {
                    warn!(
                        pointer,
                        expected = %T::kind(),
                        found = %node,
                        "stored value is not similar to its own type"
                    );
                }
            }
            Err(err) => {
                error!(pointer, error = %err, "cannot write the value");
            }
        }
    }

    /// Whether either document has changes that are not on disk.
    pub fn should_write(&self) -> bool {
        let docs = self.lock();
        docs.write_config || docs.write_defaults
    }

    /// Persist the dirty documents. Returns `true` once nothing is left to
    /// write; failed documents stay dirty so a later call retries them.
    pub fn write(&self) -> bool {
        self.try_write().is_ok()
    }

    /// Persist the dirty documents, reporting which files failed.
    pub fn try_write(&self) -> Result<(), StoreError> {
        let mut docs = self.lock();
        let Documents {
            config,
            defaults,
            write_config,
            write_defaults,
            config_path,
            defaults_path,
        } = &mut *docs;

        let mut failed = Vec::new();
        let mut unbound = false;
        for (dirty, path, document) in [
            (write_config, config_path.as_deref(), &*config),
            (write_defaults, defaults_path.as_deref(), &*defaults),
        ] {
            if !*dirty {
                continue;
            }
            let Some(path) = path else {
                unbound = true;
                continue;
            };
            match persist(path, document, &self.options) {
                Ok(()) => {
                    debug!(path = %path.display(), "configuration file written");
                    *dirty = false;
                }
                Err(err) => {
                    error!(path = %path.display(), error = %err, "cannot write the configuration file");
                    failed.push(path.to_path_buf());
                }
            }
        }

        if unbound {
            error!("the file paths are not set, call init first");
            return Err(StoreError::NotInitialized);
        }
        if !failed.is_empty() {
            return Err(StoreError::Write { failed });
        }
        Ok(())
    }

    /// A copy of the live config document.
    pub fn config_document(&self) -> Value {
        self.lock().config.clone()
    }

    /// A copy of the defaults ledger.
    pub fn defaults_document(&self) -> Value {
        self.lock().defaults.clone()
    }

    pub fn config_path(&self) -> Option<PathBuf> {
        self.lock().config_path.clone()
    }

    pub fn defaults_path(&self) -> Option<PathBuf> {
        self.lock().defaults_path.clone()
    }

    pub fn options(&self) -> &FileOptions {
        &self.options
    }

    // Every operation leaves both documents consistent, so a panic in
    // another thread does not make the state unusable.
    fn lock(&self) -> MutexGuard<'_, Documents> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn empty_document() -> Value {
    Value::Object(Map::new())
}

/// Validate and split a pointer. The root pointer is rejected: a typed
/// value never replaces a whole document.
fn parse_pointer(pointer: &str) -> Option<Vec<String>> {
    if pointer.is_empty() {
        error!("the document root cannot be addressed, use a pointer such as \"/name\"");
        return None;
    }
    if let Err(err) = validate_json_pointer(pointer) {
        error!(pointer, error = %err, "malformed pointer");
        return None;
    }
    let path = parse_json_pointer(pointer);
    if let Err(err) = validate_path(&path) {
        error!(pointer, error = %err, "malformed pointer");
        return None;
    }
    Some(path)
}

fn load_document(path: &Path) -> Result<Value, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file absent, starting empty");
            return Ok(empty_document());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if text.trim().is_empty() {
        return Ok(empty_document());
    }
    let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if value.is_null() {
        return Ok(empty_document());
    }
    Ok(value)
}

fn persist(path: &Path, document: &Value, options: &FileOptions) -> Result<(), StoreError> {
    if options.create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let bytes = render(document, options.indent)?;
    fs::write(path, bytes).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print with `indent` spaces and a trailing newline.
fn render(document: &Value, indent: usize) -> Result<Vec<u8>, StoreError> {
    let indent = vec![b' '; indent];
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
    document.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}
