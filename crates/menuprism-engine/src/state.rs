//! Shared engine state for all sessions.
//!
//! Built once at startup, then cloned into every session (cheap `Arc` clones).
//! Holds only immutable configuration and stateless collaborators; all
//! mutable session state lives in the per-session driver.

use std::sync::Arc;

use menuprism_core::error::Result;

use crate::config::EngineConfig;
use crate::dispatch::Interpreter;
use crate::policy::AccessPolicy;
use crate::render::Renderer;
use crate::store::{MenuSetRegistry, MenuStore};

#[derive(Clone)]
pub struct EngineState {
    inner: Arc<EngineStateInner>,
    interpreter: Arc<dyn Interpreter>,
}

struct EngineStateInner {
    cfg: EngineConfig,
    store: MenuStore,
    policy: AccessPolicy,
}

impl EngineState {
    /// Build engine state.
    /// Returns Result so hosts can report a bad setup instead of panicking.
    pub fn new(cfg: EngineConfig, interpreter: Arc<dyn Interpreter>) -> Result<Self> {
        cfg.validate()?;

        let store = MenuStore::new(cfg.menus.root.clone());
        let policy = AccessPolicy::new(cfg.security.system_password.clone());

        // storage sanity check: a missing default set is survivable (callers
        // get the menu-set flow) but almost always a deployment mistake
        if !store.root().is_dir() {
            tracing::warn!(root = %store.root().display(), "menu storage root does not exist");
        } else if !store.is_valid_set(&cfg.menus.default_set, &cfg.menus.entry_menu) {
            tracing::warn!(
                set = %cfg.menus.default_set,
                entry = %cfg.menus.entry_menu,
                "default menu set has no entry-point menu"
            );
        }

        Ok(Self {
            inner: Arc::new(EngineStateInner { cfg, store, policy }),
            interpreter,
        })
    }

    pub fn cfg(&self) -> &EngineConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &MenuStore {
        &self.inner.store
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.inner.policy
    }

    pub fn interpreter(&self) -> &dyn Interpreter {
        self.interpreter.as_ref()
    }

    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(self.policy(), &self.cfg().session.guest_name)
    }

    /// Fresh view of the menu-set descriptions.
    pub fn registry(&self) -> Result<MenuSetRegistry> {
        MenuSetRegistry::load(self.store().root())
    }

    /// Name of the entry-point menu.
    pub fn entry_menu(&self) -> &str {
        &self.cfg().menus.entry_menu
    }
}
