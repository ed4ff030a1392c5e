//! Error type shared by every fallible operation in the core.

use thiserror::Error;

/// Errors raised while building or driving a simulation
#[derive(Debug, Error)]
pub enum SimError {
    #[error("body mass must be finite and greater than zero, got {0}")]
    InvalidMass(f64),

    #[error("{field} must be finite, got ({x}, {y}, {z})")]
    NonFiniteVector {
        field: &'static str,
        x: f64,
        y: f64,
        z: f64,
    },

    #[error("invalid simulation constants: {0}")]
    InvalidConstants(String),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("no body with id {0}")]
    UnknownBody(u64),

    #[error("body '{name}' produced a non-finite state and was stalled")]
    NonFiniteState { name: String },

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario: {0}")]
    Config(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;

/// Reject a vector with a NaN or infinite component
pub(crate) fn ensure_finite(field: &'static str, v: glam::DVec3) -> SimResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SimError::NonFiniteVector {
            field,
            x: v.x,
            y: v.y,
            z: v.z,
        })
    }
}
