//! Outer session driver.
//!
//! Repeatedly activates the entry-point menu for one caller. Chained menus and
//! reloads are handled iteratively with an explicit menu stack; each
//! activation is an owned value created and dropped by this loop.

use crate::context::UserContext;
use crate::obs::SysopLog;
use crate::state::EngineState;
use crate::terminal::Terminal;

use super::activation::{run_activation, ActivationOutcome};
use super::menu_set::configure_menu_set;
use super::SessionIo;

/// Deepest chain of nested menus kept open at once.
pub const MAX_MENU_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The caller disconnected or an action hung up.
    HungUp,
    /// The entry-point menu could not be used; the connection was dropped.
    EntryUnavailable,
}

/// Drive one caller until the session ends. Never returns an error: every
/// failure below this point ends as a logged denial or a session outcome.
pub async fn run_session(
    engine: &EngineState,
    user: &mut UserContext,
    term: &mut dyn Terminal,
    log: &mut dyn SysopLog,
) -> SessionOutcome {
    let mut io = SessionIo::new(term, log);
    let mut stack: Vec<String> = Vec::new();
    let entry = engine.entry_menu().to_string();

    tracing::info!(user = %user.name, set = %user.menu_set, "session started");

    loop {
        if !io.term.is_connected() {
            return SessionOutcome::HungUp;
        }

        if stack.is_empty() && !engine.store().is_valid_set(&user.menu_set, &entry) {
            if configure_menu_set(engine, user, &mut io).await.is_err() {
                return SessionOutcome::HungUp;
            }
        }

        let set = user.menu_set.clone();
        let name = stack.last().cloned().unwrap_or_else(|| entry.clone());
        let is_entry = name.eq_ignore_ascii_case(&entry);

        match run_activation(engine, user, &mut io, &set, &name).await {
            ActivationOutcome::Finished { reload: true, .. } => {
                tracing::debug!(user = %user.name, "reloading menus");
                stack.clear();
            }
            ActivationOutcome::Finished {
                goto_menu: Some(next),
                ..
            } => {
                if stack.len() + 1 >= MAX_MENU_DEPTH {
                    tracing::warn!(user = %user.name, menu = %next, "menu chain too deep, ignoring");
                } else {
                    if stack.is_empty() {
                        stack.push(name);
                    }
                    stack.push(next);
                }
            }
            ActivationOutcome::Finished { .. } => {
                stack.pop();
            }
            ActivationOutcome::NotStarted | ActivationOutcome::Unavailable(_) if is_entry => {
                tracing::warn!(user = %user.name, set = %set, menu = %name, "entry menu unusable, dropping caller");
                let _ = io.term.hang_up().await;
                return SessionOutcome::EntryUnavailable;
            }
            ActivationOutcome::NotStarted | ActivationOutcome::Unavailable(_) => {
                stack.pop();
            }
            ActivationOutcome::HungUp => {
                tracing::info!(user = %user.name, "session ended");
                return SessionOutcome::HungUp;
            }
        }

        // let other sessions on this worker run between activations
        tokio::task::yield_now().await;
    }
}
