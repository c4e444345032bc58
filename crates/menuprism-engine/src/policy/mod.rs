//! Access policy layer (menu headers and individual items).
//!
//! Pure predicate evaluation over a record and a `Caller` snapshot. Password
//! challenges are returned as a decision instead of prompting here, so the
//! session engine can suspend on terminal input while this layer stays
//! synchronous and side-effect free.

pub mod engine;
pub mod flags;

pub use engine::{AccessDecision, AccessPolicy, DenyReason};
