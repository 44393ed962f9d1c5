use crate::param::Param;
use crate::shared::SharedFile;
use crate::value::ConfigValue;

/// A namespace inside a shared store.
///
/// Every name passed to a group is resolved below its namespace:
/// `get_group("car").get("speed", 0)` reads `/car/speed`. Groups nest, and
/// hold nothing but the namespace and a store handle.
///
/// Composition is plain string concatenation: a name may contain `/` to
/// step several levels, and an empty namespace or name is an empty key
/// (`get_group("")` resolves `speed` to `//speed`).
#[derive(Debug, Clone)]
pub struct Group {
    file: SharedFile,
    namespace: String,
}

impl Group {
    pub fn new(file: SharedFile, namespace: impl Into<String>) -> Self {
        Self {
            file,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The pointer `name` resolves to inside this group.
    pub fn pointer(&self, name: &str) -> String {
        format!("/{}/{}", self.namespace, name)
    }

    /// A nested group whose namespace is `namespace/name`.
    pub fn get_group(&self, name: &str) -> Group {
        Group::new(self.file.clone(), format!("{}/{}", self.namespace, name))
    }

    pub fn get<T: ConfigValue>(&self, name: &str, default: T) -> T {
        self.file.get(&self.pointer(name), default)
    }

    pub fn set<T: ConfigValue>(&self, name: &str, value: T) -> T {
        self.file.set(&self.pointer(name), value)
    }

    pub fn get_param<T: ConfigValue + Clone>(&self, name: &str, default: T) -> Param<T> {
        Param::new(self.file.clone(), self.pointer(name), default)
    }

    pub fn file(&self) -> &SharedFile {
        &self.file
    }
}
