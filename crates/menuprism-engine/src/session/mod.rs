//! Per-session control flow.
//!
//! - `activation`: one menu activation (Opening -> Active loop -> Closing).
//! - `driver`: the outer loop that recreates activations for the entry point,
//!   chained menus, and reloads, without recursion.
//! - `menu_set`: the menu-set selection flow.

pub mod activation;
pub mod driver;
pub mod menu_set;

use menuprism_core::error::Result;

use crate::obs::{SysopLog, MENU_LOG_PREFIX};
use crate::terminal::Terminal;

pub use activation::{run_activation, ActivationOutcome, MenuInstance};
pub use driver::{run_session, SessionOutcome};
pub use menu_set::{configure_menu_set, list_menu_sets};

/// Session-scoped I/O: the caller's terminal, the sysop log, and the inline
/// code rendering switch that actions may turn off until the next prompt.
pub struct SessionIo<'a> {
    pub term: &'a mut dyn Terminal,
    pub log: &'a mut dyn SysopLog,
    pub render_codes: bool,
}

impl<'a> SessionIo<'a> {
    pub fn new(term: &'a mut dyn Terminal, log: &'a mut dyn SysopLog) -> Self {
        Self {
            term,
            log,
            render_codes: true,
        }
    }

    /// Print honoring the current code rendering switch.
    pub async fn print(&mut self, text: &str) -> Result<()> {
        self.term.print(text, self.render_codes).await
    }

    /// Engine notice: goes to the sysop log and is echoed to the caller.
    pub async fn menu_log(&mut self, msg: &str) -> Result<()> {
        let line = format!("{MENU_LOG_PREFIX}{msg}");
        self.log.record(&line);
        self.term.print(&format!("{line}\r\n"), self.render_codes).await
    }
}
