//! menuPrism engine library entry.
//!
//! This crate wires the menu store, access policy, renderer, and session
//! driver into a per-caller menu engine. Hosts supply a `Terminal`, an
//! `Interpreter` for actions, and a `SysopLog`, then call
//! `session::run_session` once per connected caller.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod context;
pub mod dispatch;
pub mod obs;
pub mod policy;
pub mod render;
pub mod session;
pub mod state;
pub mod store;
pub mod terminal;

pub use state::EngineState;
