//! Test doubles shared by the engine integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use menuprism_core::error::{MenuError, Result};
use menuprism_core::record::{encode_menu_file, MenuFile};
use menuprism_engine::config::EngineConfig;
use menuprism_engine::dispatch::{register_builtin, ActionCtx, ActionDelta, Dispatcher, Interpreter};
use menuprism_engine::terminal::{HotkeyMode, Terminal};
use menuprism_engine::EngineState;

/// Terminal fed from a fixed script; running out of input is a hangup.
#[derive(Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<String>,
    pub prints: Vec<(String, bool)>,
    pub hotkey_modes: Vec<HotkeyMode>,
    pub password_prompts: usize,
    pub hung_up: bool,
}

impl ScriptedTerminal {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn output(&self) -> String {
        self.prints.iter().map(|(t, _)| t.as_str()).collect()
    }

    fn next(&mut self) -> Result<String> {
        if self.hung_up {
            return Err(MenuError::Hangup);
        }
        match self.inputs.pop_front() {
            Some(s) => Ok(s),
            None => {
                self.hung_up = true;
                Err(MenuError::Hangup)
            }
        }
    }
}

#[async_trait]
impl Terminal for ScriptedTerminal {
    async fn print(&mut self, text: &str, render_codes: bool) -> Result<()> {
        if self.hung_up {
            return Err(MenuError::Hangup);
        }
        self.prints.push((text.to_string(), render_codes));
        Ok(())
    }

    async fn read_line(&mut self, max_len: usize) -> Result<String> {
        Ok(self.next()?.chars().take(max_len).collect())
    }

    async fn read_hotkey(&mut self, mode: HotkeyMode, _extra: &[char]) -> Result<String> {
        self.hotkey_modes.push(mode);
        self.next()
    }

    async fn read_password(&mut self, _prompt: &str, max_len: usize) -> Result<String> {
        self.password_prompts += 1;
        Ok(self.next()?.chars().take(max_len).collect())
    }

    async fn read_choice(&mut self, allowed: &str) -> Result<char> {
        loop {
            let s = self.next()?;
            if let Some(c) = s.chars().next().map(|c| c.to_ascii_uppercase()) {
                if allowed.contains(c) {
                    return Ok(c);
                }
            }
        }
    }

    async fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(self.next()?.eq_ignore_ascii_case("y"))
    }

    async fn hang_up(&mut self) -> Result<()> {
        self.hung_up = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !self.hung_up
    }
}

/// Built-in dispatcher that also records every action it is handed.
pub struct RecordingInterpreter {
    inner: Dispatcher,
    pub actions: Mutex<Vec<String>>,
}

impl RecordingInterpreter {
    pub fn new() -> Arc<Self> {
        let inner = Dispatcher::new();
        register_builtin(&inner);
        Arc::new(Self {
            inner,
            actions: Mutex::new(Vec::new()),
        })
    }

    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Interpreter for RecordingInterpreter {
    async fn execute(&self, ctx: &ActionCtx, action: &str) -> Result<ActionDelta> {
        self.actions.lock().unwrap().push(action.to_string());
        self.inner.execute(ctx, action).await
    }
}

pub fn write_menu(root: &Path, set: &str, name: &str, file: &MenuFile) {
    let dir = root.join(set);
    fs::create_dir_all(&dir).unwrap();
    let bytes = encode_menu_file(file).unwrap();
    fs::write(dir.join(format!("{name}.mnu")), bytes).unwrap();
}

pub fn write_sidecar(root: &Path, set: &str, name: &str, ext: &str, text: &str) {
    let dir = root.join(set);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.{ext}")), text).unwrap();
}

pub fn engine(root: &Path, interpreter: Arc<RecordingInterpreter>) -> EngineState {
    let mut cfg = EngineConfig::default();
    cfg.menus.root = root.to_path_buf();
    cfg.security.system_password = "hunter2".into();
    EngineState::new(cfg, interpreter).unwrap()
}
