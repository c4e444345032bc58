//! Built-in actions that map directly onto session-control deltas.

use std::sync::Arc;

use async_trait::async_trait;

use menuprism_core::error::{MenuError, Result};

use super::dispatcher::{ActionCtx, ActionDelta, ActionHandler, AreaSelection, Dispatcher};

/// Verb emitted for numeric message-area entry.
pub const SET_MESSAGE_AREA: &str = "SetSubNumber";
/// Verb emitted for numeric file-area entry.
pub const SET_FILE_AREA: &str = "SetDirNumber";

/// `SetSubNumber <n>` / `SetDirNumber <n>`.
pub struct SelectAreaAction {
    file: bool,
}

impl SelectAreaAction {
    pub fn message() -> Self {
        Self { file: false }
    }

    pub fn file() -> Self {
        Self { file: true }
    }
}

#[async_trait]
impl ActionHandler for SelectAreaAction {
    fn verb(&self) -> &'static str {
        if self.file {
            SET_FILE_AREA
        } else {
            SET_MESSAGE_AREA
        }
    }

    async fn handle(&self, ctx: &ActionCtx, args: &str) -> Result<ActionDelta> {
        let n: u32 = args.parse().map_err(|_| {
            MenuError::Malformed(format!("{} expects an area number, got {args:?}", self.verb()))
        })?;
        tracing::debug!(user = ctx.user(), area = n, file = self.file, "area selected");
        let area = if self.file {
            AreaSelection::File(n)
        } else {
            AreaSelection::Message(n)
        };
        Ok(ActionDelta::select(area))
    }
}

/// Session-control verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// `Logoff`: disconnect.
    Logoff,
    /// `Menu <name>`: open another menu on top of this one.
    Menu,
    /// `Return`: leave this menu.
    Return,
    /// `ReloadMenus`: rebuild from the entry point.
    ReloadMenus,
    /// `TurnMciOff`: print the rest of this prompt cycle without code rendering.
    TurnMciOff,
}

impl SessionAction {
    pub const ALL: [SessionAction; 5] = [
        SessionAction::Logoff,
        SessionAction::Menu,
        SessionAction::Return,
        SessionAction::ReloadMenus,
        SessionAction::TurnMciOff,
    ];
}

#[async_trait]
impl ActionHandler for SessionAction {
    fn verb(&self) -> &'static str {
        match self {
            SessionAction::Logoff => "Logoff",
            SessionAction::Menu => "Menu",
            SessionAction::Return => "Return",
            SessionAction::ReloadMenus => "ReloadMenus",
            SessionAction::TurnMciOff => "TurnMciOff",
        }
    }

    async fn handle(&self, ctx: &ActionCtx, args: &str) -> Result<ActionDelta> {
        match self {
            SessionAction::Logoff => Ok(ActionDelta::hangup()),
            SessionAction::Menu => {
                let name = args.split_whitespace().next().ok_or_else(|| {
                    MenuError::Malformed(format!("Menu on {} needs a menu name", ctx.menu()))
                })?;
                Ok(ActionDelta::goto(name))
            }
            SessionAction::Return => Ok(ActionDelta::finish()),
            SessionAction::ReloadMenus => Ok(ActionDelta::reload()),
            SessionAction::TurnMciOff => Ok(ActionDelta {
                suppress_codes: true,
                ..ActionDelta::none()
            }),
        }
    }
}

/// Register the area and session-control verbs.
pub fn register_builtin(dispatcher: &Dispatcher) {
    dispatcher.register(Arc::new(SelectAreaAction::message()));
    dispatcher.register(Arc::new(SelectAreaAction::file()));
    for action in SessionAction::ALL {
        dispatcher.register(Arc::new(action));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::context::Caller;
    use crate::dispatch::Interpreter;

    fn ctx() -> ActionCtx {
        ActionCtx::new("sysop", "wwiv", "main", Caller::default())
    }

    #[tokio::test]
    async fn verbs_route_case_insensitively() {
        let d = Dispatcher::new();
        register_builtin(&d);

        let delta = d.execute(&ctx(), "setsubnumber 7").await.unwrap();
        assert_eq!(delta.select_area, Some(AreaSelection::Message(7)));

        let delta = d.execute(&ctx(), "Menu  files").await.unwrap();
        assert_eq!(delta.goto_menu.as_deref(), Some("files"));

        let delta = d.execute(&ctx(), "LOGOFF").await.unwrap();
        assert!(delta.hangup);
    }

    #[tokio::test]
    async fn unknown_verb_is_a_no_op() {
        let d = Dispatcher::new();
        let delta = d.execute(&ctx(), "Frobnicate now").await.unwrap();
        assert_eq!(delta, ActionDelta::none());
    }

    #[tokio::test]
    async fn bad_area_number_is_an_error() {
        let d = Dispatcher::new();
        register_builtin(&d);
        assert!(d.execute(&ctx(), "SetDirNumber x").await.is_err());
    }

    #[test]
    fn builtin_verbs_are_registered_lowercase() {
        let d = Dispatcher::new();
        register_builtin(&d);
        assert_eq!(
            d.registered_verbs(),
            vec!["logoff", "menu", "reloadmenus", "return", "setdirnumber", "setsubnumber", "turnmcioff"]
        );
    }
}
