//! Type aliases for shared configuration state.
//!
//! The configurator has exactly one writer path (the store setters) and many
//! readers (renderer, panels, persistence). Multi-threaded hosts hand the
//! store out as `ThreadSafe<T>` (`Arc<Mutex<T>>`), which serialises every
//! read-modify-write setter behind one lock.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carportkit_core::types::*;
//!
//! let store: ThreadSafe<ConfigStore> = thread_safe(ConfigStore::new());
//! store.lock().set_width(5.0);
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
/// Id counters and storage-panel replacement are read-modify-write, so every
/// mutation must go through this lock.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
