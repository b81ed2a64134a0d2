// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for rill stream combinators.
//!
//! The root [`RillError`] distinguishes where in a flattened pipeline an
//! error originated: on the source sequence, on one of the inner sequences
//! produced by the projection, or inside plain stream processing. Flattening
//! operators wrap upstream errors in [`RillError::SourceSequence`] /
//! [`RillError::InnerSequence`] so a subscriber can tell the two apart
//! without inspecting the payload.

/// Root error type for all rill operations.
///
/// The type is `Clone` so terminal markers can be replayed by test feeds;
/// nested causes are boxed `RillError`s rather than opaque trait objects.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RillError {
    /// Stream processing encountered an error.
    ///
    /// General-purpose variant for failures that don't fit a more specific
    /// category, and for errors injected through marble `#` markers.
    #[error("stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// The source sequence of a flattening operator errored.
    #[error("source sequence error: {source}")]
    SourceSequence {
        /// The underlying error emitted by the source sequence
        #[source]
        source: Box<RillError>,
    },

    /// An inner sequence of a flattening operator errored.
    ///
    /// `index` is the ordinal of the source value whose projection produced
    /// the failing inner sequence, counting from zero in source order.
    #[error("inner sequence {index} error: {source}")]
    InnerSequence {
        /// Ordinal of the source value that spawned the inner sequence
        index: usize,
        /// The underlying error emitted by the inner sequence
        #[source]
        source: Box<RillError>,
    },

    /// Error raised by user code (a projection function or a subscriber).
    #[error("user error: {context}")]
    UserError {
        /// Description of the user-side failure
        context: String,
    },
}

impl RillError {
    /// Create a stream processing error with the given context.
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap an error that was emitted by the source sequence.
    pub fn source_error(source: RillError) -> Self {
        Self::SourceSequence {
            source: Box::new(source),
        }
    }

    /// Wrap an error that was emitted by the inner sequence spawned by the
    /// source value with the given ordinal.
    pub fn inner_error(index: usize, source: RillError) -> Self {
        Self::InnerSequence {
            index,
            source: Box::new(source),
        }
    }

    /// Create a user error with the given context.
    pub fn user_error(context: impl Into<String>) -> Self {
        Self::UserError {
            context: context.into(),
        }
    }
}

/// Convenience alias for results with a [`RillError`].
pub type Result<T, E = RillError> = core::result::Result<T, E>;
