//! Typed, file-backed JSON configuration.
//!
//! A [`ConfigFile`] owns two documents: the live `config` document that
//! values are read from and written to, and a `defaults` ledger that
//! records the default of every `get`. Values are addressed with JSON
//! Pointers (`/car/speed`) and read through a strict similarity check
//! ([`is_similar`]): a stored value is only returned when it can be
//! represented by the requested type, otherwise the default is.
//!
//! [`SharedFile`] shares one store between [`Group`]s (pointer namespaces)
//! and [`Param`]s (cached bindings to one pointer).
//!
//! Diagnostics are emitted through `tracing`; install a subscriber to see
//! them. Nothing in this crate panics on bad input, the only panics are the
//! store-touching methods of an unbound [`Param`].
//!
//! ```no_run
//! use cracon::SharedFile;
//!
//! let config = SharedFile::new();
//! if !config.init("config.json", "defaults.json") {
//!     std::process::exit(1);
//! }
//! let car = config.get_group("car");
//! let mut speed = car.get_param::<i64>("speed", 9000);
//! speed.set(1000);
//! let curve = car.get::<[i32; 4]>("motor_curve", [0; 4]);
//! # let _ = curve;
//! config.write();
//! ```

mod error;
mod file;
mod group;
mod kind;
mod options;
mod param;
mod shared;
mod similarity;
mod value;

pub use error::StoreError;
pub use file::ConfigFile;
pub use group::Group;
pub use kind::ValueKind;
pub use options::FileOptions;
pub use param::{Param, ParamGuard};
pub use serde_json::Value;
pub use shared::SharedFile;
pub use similarity::{is_similar, is_similar_kind};
pub use value::{ConfigValue, EnumRepr};
