//! Crate-wide error types for homescript-util.
//!
//! The lexer and parser never use these directly — their failure mode is a
//! [`crate::diagnostic::Diagnostic`] (soft, accumulated) or the parse
//! aborting with one (hard). `Error` exists for the handful of genuinely
//! exceptional, non-source-position failures the utility layer itself can
//! hit, e.g. an internal invariant violated in the symbol interner.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
