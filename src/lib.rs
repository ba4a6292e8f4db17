//! # Carportkit
//!
//! Structural layout engine and configurator backend for freestanding
//! carports. It derives support posts and wall panels from a handful of
//! parameters and keeps user-placed posts, panels, windows and doors
//! consistent while the layout is edited.
//!
//! ## Architecture
//!
//! Carportkit is organized as a workspace with multiple crates:
//!
//! 1. **carportkit-core** - Error types, change events, shared-state aliases
//! 2. **carportkit-layout** - Configuration model, post derivation, store,
//!    placement and drag handling, share links
//! 3. **carportkit-settings** - Application settings and local persistence
//! 4. **carportkit** - Startup sequence, clipboard glue and the CLI binary
//!
//! ## Features
//!
//! - **Structural Posts**: corner, intermediate and storage posts derived from
//!   width, depth and the storage room
//! - **Custom Layout**: user posts on the perimeter, panels between any two
//!   posts, windows and doors on solid panels
//! - **Storage Room**: four reserved walls that follow the room's position
//! - **Sharing**: the whole configuration in a single URL parameter
//! - **Persistence**: the active configuration survives restarts

pub mod clipboard;
pub mod startup;

pub use carportkit_core::{ChangeKind, ConfigEvent, Error, LayoutError, Result, ShareError};
pub use carportkit_layout::{
    derive_posts, ConfigStore, Configuration, DragController, PlacementController, Post,
    SharedStore,
};
pub use carportkit_settings::{Config, ConfigPersistence};

pub use clipboard::copy_to_clipboard;
pub use startup::{restore, ConfigSource, Restored};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - INFO as the default level
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging as one JSON object per line, for log collectors.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
