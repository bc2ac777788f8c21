// Errors raised by runtime introspection sources

use thiserror::Error;

/// Failure reported by a [`RuntimeIntrospector`](crate::introspector::RuntimeIntrospector).
///
/// The snapshot collector never propagates these; it absorbs them per item or
/// per facility and keeps going.
#[derive(Debug, Error)]
pub enum IntrospectError {
    /// The whole facility is not available on this host or runtime.
    #[error("not supported: {0}")]
    Unsupported(String),

    /// A single memory pool could not be read right now.
    #[error("memory pool '{pool}' unavailable: {reason}")]
    PoolUnavailable { pool: String, reason: String },
}
