//! # Host Errors
//!
//! This module defines the error type surfaced by the host runtime. Every
//! registration call and every phase firing reports failures through
//! [`HostError`], so plugins see one error vocabulary no matter which host
//! service rejected them.

use crate::phase::Phase;

/// Errors raised by the host runtime.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Entity type already registered: {0}")]
    DuplicateEntityType(String),
    #[error("Invalid definition for {key}: {reason}")]
    InvalidDefinition { key: String, reason: String },
    #[error("Phase {phase} cannot fire: {reason}")]
    PhaseOrder { phase: Phase, reason: String },
    #[error("Extension point {name} is a {expected} point, not {found}")]
    PointMismatch {
        name: String,
        expected: String,
        found: String,
    },
    #[error("Callback error: {0}")]
    Callback(Box<dyn std::error::Error + Send + Sync>),
}

impl HostError {
    /// Wraps an error raised by plugin code inside a phase callback.
    pub fn callback(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        HostError::Callback(Box::new(err))
    }
}
