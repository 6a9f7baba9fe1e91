//! Emulation error types

use thiserror::Error;

/// Errors surfaced by the emulation engine.
///
/// The engine performs no local recovery: target-resolution failures and
/// actor-side rejections propagate to the caller immediately, untranslated.
#[derive(Error, Debug)]
pub enum EmulationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Actor primitive failed: {0}")]
    ActorPrimitive(String),
}
