//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Shared-state alias for `Arc<Mutex<T>>`.

pub mod aliases;

pub use aliases::*;
