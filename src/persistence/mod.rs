//! Focus Persistence
//!
//! Durable local storage backends and the bridge that mirrors the
//! dashboard's focus selection into them.

mod bridge;
mod error;
mod storage;

pub use bridge::{FocusBridge, FOCUS_KEY};
pub use error::{StorageError, StorageResult};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
