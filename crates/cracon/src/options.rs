/// How a [`ConfigFile`](crate::ConfigFile) persists its documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOptions {
    /// Spaces per indentation level in the written files.
    pub indent: usize,
    /// Create missing parent directories when writing.
    pub create_dirs: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            create_dirs: false,
        }
    }
}
