//! menuPrism core: menu record model, binary record codec, and error types.
//!
//! This crate defines the on-disk menu record contracts and the error surface
//! shared by the session engine and authoring tools. It carries no runtime or
//! terminal dependencies so it can be reused by editors and offline checkers.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `MenuError`/`Result` so a corrupt menu file never crashes a
//! caller's session.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod record;

/// Shared result type.
pub use error::{ErrorKind, MenuError, Result};
pub use record::{
    HelpPolicy, LogMode, MenuFile, MenuHeader, MenuItem, NumericMode, Visibility,
};
