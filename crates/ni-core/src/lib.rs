//! # ni-core
//!
//! Core types and error definitions for numint.
//!
//! This crate provides the pieces shared by every other crate in the
//! workspace: the primitive type aliases and the error hierarchy with its
//! precondition macros.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_post!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for counts, sizes, and indices.
pub type Size = usize;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, IntegrandError, Result};
