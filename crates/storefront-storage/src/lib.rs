//! Key-value storage port for the storefront.
//!
//! The commerce store never touches a concrete storage API. It talks to a
//! [`StoragePort`]: get, set and remove over string keys and text values.
//! This crate provides the port, two implementations and a typed JSON
//! wrapper.
//!
//! # Example
//!
//! ```rust
//! use storefront_storage::{Cache, MemoryStorage};
//!
//! let cache = Cache::new(MemoryStorage::new());
//! cache.set("rc_cart", &vec!["A", "B"]).unwrap();
//!
//! let ids: Option<Vec<String>> = cache.get("rc_cart").unwrap();
//! assert_eq!(ids.unwrap(), vec!["A", "B"]);
//! ```

mod error;
mod file;
mod kv;
mod memory;
mod port;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use kv::Cache;
pub use memory::MemoryStorage;
pub use port::{validate_key, StoragePort};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStorage, MemoryStorage, StorageError, StoragePort};
}
