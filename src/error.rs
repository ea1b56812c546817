//! The error taxonomy (§7) for table initialization.
//!
//! Only `PrecomputedMagicInvalid` is a real `Err` a caller can receive:
//! `MagicSearchExhausted` is always handled internally by falling back to
//! the compiled-in magics (the spec's own recovery rule), so it never
//! escapes the initializer as a public error type. `ContractViolation` has
//! no type at all — each query asserts its precondition with
//! `debug_assert!` and relies on undefined behavior in release, exactly as
//! specified.

use crate::{Piece, Square};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Fatal initialization failures: init cannot proceed and `init_engine_tables`
/// returns this as `Err`.
pub enum TableInitError {
    /// A compiled-in magic constant failed the verification pass against the
    /// reference ray generator. This means the constant itself is wrong —
    /// a build-time defect, not a runtime condition — so init aborts rather
    /// than attempting any further recovery.
    #[error("precomputed magic for {piece} at {square} failed verification against the reference generator")]
    PrecomputedMagicInvalid { piece: Piece, square: Square },
}

/// Internal-only signal that the randomized search exhausted its retry
/// ceiling for one (piece, square) pair. Never returned to callers: the
/// loader that sees this always falls back to the compiled-in magic for
/// that square and keeps going (§7, "never fatal").
#[derive(Debug, Clone, Copy)]
pub(crate) struct MagicSearchExhausted {
    pub piece: Piece,
    pub square: Square,
}
