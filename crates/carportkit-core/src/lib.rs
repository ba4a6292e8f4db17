//! # Carportkit Core
//!
//! Core types shared by every carportkit crate.
//! Provides the error hierarchy, configuration change events with their
//! dispatcher, and the shared-state aliases used to hand a single
//! configuration store to many readers.

pub mod error;
pub mod event;
pub mod types;

pub use error::{Error, LayoutError, Result, ShareError};

pub use event::{ChangeKind, ConfigEvent, EventDispatcher, EventReceiver};

// Re-export type aliases for convenience
pub use types::{thread_safe, ThreadSafe};
