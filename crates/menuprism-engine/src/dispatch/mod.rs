//! Action dispatch: the interpreter contract and a verb-routing dispatcher.
//!
//! The engine only hands execute strings to an `Interpreter` and applies the
//! returned `ActionDelta`; what an action means is up to the registered
//! handlers.

pub mod actions;
pub mod dispatcher;

pub use actions::{register_builtin, SelectAreaAction, SessionAction};
pub use dispatcher::{
    ActionCtx, ActionDelta, ActionHandler, AreaSelection, Dispatcher, Interpreter,
};
