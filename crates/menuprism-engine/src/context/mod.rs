//! Caller/session context types shared across layers.
//!
//! `Caller` is the pure security snapshot the access policy evaluates;
//! `UserContext` adds the per-connection preferences the session engine reads.

pub mod caller;

pub use caller::{Caller, DisplayCaps, UserContext};
