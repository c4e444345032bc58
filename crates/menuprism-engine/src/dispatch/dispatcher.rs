use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use menuprism_core::error::Result;

use crate::context::Caller;

/// New current area requested by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaSelection {
    Message(u32),
    File(u32),
}

/// Session-control effects of one executed action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDelta {
    /// Leave the current menu loop.
    pub finished: bool,
    /// Rebuild the session from the entry point (e.g. the menu set changed).
    pub reload: bool,
    /// Disconnect the caller.
    pub hangup: bool,
    pub select_area: Option<AreaSelection>,
    /// Open another menu on top of this one.
    pub goto_menu: Option<String>,
    /// Stop rendering inline formatting codes until the next prompt.
    pub suppress_codes: bool,
}

impl ActionDelta {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn finish() -> Self {
        Self {
            finished: true,
            ..Self::default()
        }
    }

    pub fn reload() -> Self {
        Self {
            finished: true,
            reload: true,
            ..Self::default()
        }
    }

    pub fn hangup() -> Self {
        Self {
            hangup: true,
            ..Self::default()
        }
    }

    pub fn goto(menu: impl Into<String>) -> Self {
        Self {
            goto_menu: Some(menu.into()),
            ..Self::default()
        }
    }

    pub fn select(area: AreaSelection) -> Self {
        Self {
            select_area: Some(area),
            ..Self::default()
        }
    }
}

/// Per-action context passed to handlers (read-only snapshot).
#[derive(Debug, Clone)]
pub struct ActionCtx {
    user: Arc<str>,
    menu_set: Arc<str>,
    menu: Arc<str>,
    caller: Caller,
}

impl ActionCtx {
    pub fn new(
        user: impl Into<Arc<str>>,
        menu_set: impl Into<Arc<str>>,
        menu: impl Into<Arc<str>>,
        caller: Caller,
    ) -> Self {
        Self {
            user: user.into(),
            menu_set: menu_set.into(),
            menu: menu.into(),
            caller,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn menu_set(&self) -> &str {
        &self.menu_set
    }

    pub fn menu(&self) -> &str {
        &self.menu
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }
}

/// External action interpreter. The only component allowed to end a session,
/// and it does so through the returned delta.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn execute(&self, ctx: &ActionCtx, action: &str) -> Result<ActionDelta>;
}

/// One action verb (first word of an execute string).
#[async_trait]
pub trait ActionHandler: Send + Sync {
    fn verb(&self) -> &'static str;
    async fn handle(&self, ctx: &ActionCtx, args: &str) -> Result<ActionDelta>;
}

/// Registry of action handlers keyed by lower-cased verb.
#[derive(Default)]
pub struct Dispatcher {
    handlers: DashMap<String, Arc<dyn ActionHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    pub fn register(&self, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(handler.verb().to_lowercase(), handler);
    }

    pub fn registered_verbs(&self) -> Vec<String> {
        let mut verbs: Vec<String> = self.handlers.iter().map(|e| e.key().clone()).collect();
        verbs.sort();
        verbs
    }
}

#[async_trait]
impl Interpreter for Dispatcher {
    async fn execute(&self, ctx: &ActionCtx, action: &str) -> Result<ActionDelta> {
        let action = action.trim();
        let (verb, args) = action
            .split_once(char::is_whitespace)
            .map(|(v, a)| (v, a.trim()))
            .unwrap_or((action, ""));

        // clone out of the map so no shard lock is held across the await
        let handler = self
            .handlers
            .get(&verb.to_lowercase())
            .map(|e| Arc::clone(e.value()));

        match handler {
            Some(h) => h.handle(ctx, args).await,
            None => {
                tracing::warn!(user = ctx.user(), menu = ctx.menu(), %verb, "unknown action verb");
                Ok(ActionDelta::none())
            }
        }
    }
}
