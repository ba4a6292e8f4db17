//! Error handling for carportkit
//!
//! Provides error types for all layers of the configurator:
//! - Layout errors (posts, panels, features, dimensions)
//! - Share errors (decoding a configuration from a shared link)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Layout error type
///
/// Represents rejected edits to the structural layout: references to posts,
/// panels or features that do not exist, degenerate spans and dimensions
/// outside the supported range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A post id resolved to neither a custom nor a structural post
    #[error("Unknown post: {id}")]
    UnknownPost {
        /// The post id that failed to resolve.
        id: String,
    },

    /// A panel id did not match any panel
    #[error("Unknown panel: {id}")]
    UnknownPanel {
        /// The panel id that failed to resolve.
        id: String,
    },

    /// A feature id did not match any feature on its panel
    #[error("Unknown feature {feature_id} on panel {panel_id}")]
    UnknownFeature {
        /// The owning panel id.
        panel_id: String,
        /// The feature id that failed to resolve.
        feature_id: String,
    },

    /// A panel would connect a post to itself or to a coincident post
    #[error("Degenerate panel between {start} and {end}")]
    DegeneratePanel {
        /// Start post id.
        start: String,
        /// End post id.
        end: String,
    },

    /// A dimension is outside its supported range
    #[error("Invalid {name}: {value} (expected {min}..={max})")]
    InvalidDimension {
        /// The dimension name (width, depth, height, storage depth).
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Share error type
///
/// Represents failures while decoding a configuration from a shared link.
/// Callers at the UI boundary turn these into "no configuration".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShareError {
    /// The link carried no configuration parameter
    #[error("No '{param}' parameter in link")]
    MissingParameter {
        /// The expected query parameter name.
        param: String,
    },

    /// The parameter is not valid base64
    #[error("Invalid encoding: {reason}")]
    InvalidEncoding {
        /// The decoder message.
        reason: String,
    },

    /// The decoded bytes are not JSON
    #[error("Invalid JSON: {reason}")]
    InvalidJson {
        /// The parser message.
        reason: String,
    },

    /// A required field is missing or has the wrong primitive type
    #[error("Invalid configuration: field '{field}' {reason}")]
    InvalidShape {
        /// The offending field name as it appears on the wire.
        field: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The configuration could not be encoded
    #[error("Failed to encode configuration: {reason}")]
    EncodeFailed {
        /// The serializer message.
        reason: String,
    },
}

/// Main error type for carportkit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Share error
    #[error(transparent)]
    Share(#[from] ShareError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    /// Check if this is a share error
    pub fn is_share_error(&self) -> bool {
        matches!(self, Error::Share(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
