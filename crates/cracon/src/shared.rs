use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use crate::error::StoreError;
use crate::file::ConfigFile;
use crate::group::Group;
use crate::options::FileOptions;
use crate::param::Param;
use crate::value::ConfigValue;

/// A reference-counted handle to one [`ConfigFile`].
///
/// Cloning is cheap and every clone, [`Group`] and [`Param`] derived from
/// it addresses the same pair of documents. The store lives as long as the
/// longest-lived holder. All [`ConfigFile`] methods are available through
/// `Deref`.
#[derive(Debug, Clone, Default)]
pub struct SharedFile {
    file: Arc<ConfigFile>,
}

impl SharedFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FileOptions) -> Self {
        ConfigFile::with_options(options).into()
    }

    /// Create a shared store and initialize it with the file pair.
    pub fn open(
        config_path: impl AsRef<Path>,
        defaults_path: impl AsRef<Path>,
    ) -> Result<Self, StoreError> {
        ConfigFile::open(config_path, defaults_path).map(Self::from)
    }

    /// A group rooted at `name`.
    pub fn get_group(&self, name: &str) -> Group {
        Group::new(self.clone(), name)
    }

    /// A parameter bound to the absolute `pointer`.
    pub fn get_param<T: ConfigValue + Clone>(&self, pointer: &str, default: T) -> Param<T> {
        Param::new(self.clone(), pointer, default)
    }

    /// Number of live handles (clones, groups and bound parameters).
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.file)
    }
}

impl Deref for SharedFile {
    type Target = ConfigFile;

    fn deref(&self) -> &ConfigFile {
        &self.file
    }
}

impl From<ConfigFile> for SharedFile {
    fn from(file: ConfigFile) -> Self {
        Self {
            file: Arc::new(file),
        }
    }
}
