//! Live parameters: a cached value bound to one pointer of a shared store.

use std::ops::{Deref, DerefMut};

use crate::shared::SharedFile;
use crate::value::ConfigValue;

/// A named value bound to one pointer.
///
/// The value is fetched once, at construction, and cached. Reads never
/// touch the store; writes go through to it. The cache does not observe
/// changes made to the store through other handles, and it is not
/// synchronized: share a `Param` between threads only behind a lock.
///
/// A `Param::default()` is not bound to any store. Its [`get`](Self::get)
/// and [`get_ref`](Self::get_ref) return `T::default()`; every method that
/// needs the store panics.
#[derive(Debug, Clone)]
pub struct Param<T> {
    file: Option<SharedFile>,
    pointer: String,
    default: T,
    data: T,
}

impl<T: Default> Default for Param<T> {
    fn default() -> Self {
        Self {
            file: None,
            pointer: String::new(),
            default: T::default(),
            data: T::default(),
        }
    }
}

impl<T: ConfigValue + Clone> Param<T> {
    /// Bind to `pointer`, reading the current value (or `default`).
    pub fn new(file: SharedFile, pointer: impl Into<String>, default: T) -> Self {
        let pointer = pointer.into();
        let data = file.get(&pointer, default.clone());
        Self {
            file: Some(file),
            pointer,
            default,
            data,
        }
    }

    /// A copy of the cached value.
    pub fn get(&self) -> T {
        self.data.clone()
    }

    pub fn get_ref(&self) -> &T {
        &self.data
    }

    /// Mutable access to the cached value.
    ///
    /// Changes stay local until [`update`](Self::update) is called. Prefer
    /// [`edit`](Self::edit), which pushes them automatically.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Scoped mutable access; the value is written to the store when the
    /// guard is dropped.
    ///
    /// # Panics
    ///
    /// If the parameter is not bound to a store.
    pub fn edit(&mut self) -> ParamGuard<'_, T> {
        self.bound("edit");
        ParamGuard { param: self }
    }

    /// Write `value` to the store and cache it.
    ///
    /// # Panics
    ///
    /// If the parameter is not bound to a store.
    pub fn set(&mut self, value: T) {
        let stored = self.bound("set").set(&self.pointer, value);
        self.data = stored;
    }

    /// Push the cached value to the store.
    ///
    /// # Panics
    ///
    /// If the parameter is not bound to a store.
    pub fn update(&self) {
        self.bound("update").set_ref(&self.pointer, &self.data);
    }

    /// Write the default value back.
    ///
    /// # Panics
    ///
    /// If the parameter is not bound to a store.
    pub fn reset(&mut self) {
        self.set(self.default.clone());
    }

    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn is_bound(&self) -> bool {
        self.file.is_some()
    }

    fn bound(&self, operation: &str) -> &SharedFile {
        match &self.file {
            Some(file) => file,
            None => panic!("Param::{operation} called on a parameter that is not bound to a config file"),
        }
    }
}

/// Mutable view of a [`Param`]'s cached value that writes it back on drop.
///
/// ```
/// use cracon::SharedFile;
///
/// let config = SharedFile::new();
/// let mut curve = config.get_param::<[i32; 4]>("/motor_curve", [0; 4]);
/// {
///     let mut points = curve.edit();
///     points[1] = 10;
///     points[2] = 20;
/// }
/// assert_eq!(config.get::<[i32; 4]>("/motor_curve", [0; 4]), [0, 10, 20, 0]);
/// ```
pub struct ParamGuard<'a, T: ConfigValue + Clone> {
    param: &'a mut Param<T>,
}

impl<T: ConfigValue + Clone> Deref for ParamGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.param.data
    }
}

impl<T: ConfigValue + Clone> DerefMut for ParamGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.param.data
    }
}

impl<T: ConfigValue + Clone> Drop for ParamGuard<'_, T> {
    fn drop(&mut self) {
        self.param.update();
    }
}
