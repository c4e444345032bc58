//! Operator-facing audit trail.
//!
//! The sysop log records command usage and menu denials per session. Hosts
//! usually persist it per user; the default implementation forwards to
//! `tracing` under the `menuprism::sysop` target.

pub mod sysop;

pub use sysop::{MemorySysopLog, SysopLog, TracingSysopLog, MENU_LOG_PREFIX};
