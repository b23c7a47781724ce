//! # Error Types
//!
//! ## Overview
//!
//! Building hint text and bindings never fails; the only failures come from the overlay that
//! the layers are handed to.
use crate::layers::Mode;

/// Errors returned while setting up layers.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum LayerError {
    /// The overlay could not build the layer for a mode.
    #[error("Failed to build {layer} layer: {reason}")]
    Build {
        /// The mode whose layer failed to build.
        layer: Mode,

        /// Why the overlay refused.
        reason: String,
    },
}

/// Common result type for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;
