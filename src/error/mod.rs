//! Error types for decode and construction failures.
//!
//! This module provides [`Failure`], the value every decoder returns when its
//! input does not match, and [`BuildError`] for decoders that cannot be
//! constructed at all.

mod build_error;
mod failure;

pub use build_error::BuildError;
pub use failure::{Failure, FailureKind};
