//! One menu activation.
//!
//! States: Opening -> Active (prompt, read, resolve, dispatch)* -> Closing.
//! Closing always happens: the `MenuInstance` owns every loaded record and is
//! dropped on each exit path, including open failures and hangups.

use std::fs;

use menuprism_core::error::{ErrorKind, MenuError, Result};
use menuprism_core::record::{HelpPolicy, LogMode, MenuItem, NumericMode};

use crate::dispatch::actions::{SET_FILE_AREA, SET_MESSAGE_AREA};
use crate::dispatch::{ActionCtx, ActionDelta, AreaSelection};
use crate::context::UserContext;
use crate::policy::AccessDecision;
use crate::state::EngineState;
use crate::store::LoadedMenu;
use crate::terminal::HotkeyMode;

use super::SessionIo;

const PASSWORD_PROMPT: &str = "|#2SY: ";
const NO_FILE_AREA: &str = "\r\nYou cannot currently access the file section.\r\n\r\n";

/// How an activation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The loop ran until an action finished it.
    Finished {
        reload: bool,
        goto_menu: Option<String>,
    },
    /// The menu could not be opened (missing, malformed, or denied).
    Unavailable(ErrorKind),
    /// Opened, but the numeric mode needs an area the caller does not have.
    NotStarted,
    /// The caller disconnected or an action hung up.
    HungUp,
}

/// Loaded menu plus the session-control flags actions may raise.
#[derive(Debug)]
pub struct MenuInstance {
    menu: LoadedMenu,
    finished: bool,
    reload: bool,
    goto_menu: Option<String>,
}

/// Open `set/name` and drive it until finished.
pub async fn run_activation(
    engine: &EngineState,
    user: &mut UserContext,
    io: &mut SessionIo<'_>,
    set: &str,
    name: &str,
) -> ActivationOutcome {
    let mut inst = match MenuInstance::open(engine, user, io, set, name).await {
        Ok(inst) => inst,
        Err(MenuError::Hangup) => return ActivationOutcome::HungUp,
        Err(e) => {
            tracing::info!(set, menu = name, code = e.kind().as_str(), error = %e, "menu not entered");
            let notice = if e.is_access_denied() {
                "< Menu Sec"
            } else {
                "Unable to open Menu"
            };
            if io.menu_log(notice).await.is_err() {
                return ActivationOutcome::HungUp;
            }
            return ActivationOutcome::Unavailable(e.kind());
        }
    };

    match inst.run(engine, user, io).await {
        Ok(outcome) => outcome,
        Err(e) => {
            // only terminal failures reach here; a broken terminal is a hangup
            if !matches!(e, MenuError::Hangup) {
                tracing::warn!(set, menu = name, error = %e, "terminal failure, ending session");
            }
            ActivationOutcome::HungUp
        }
    }
}

impl MenuInstance {
    /// Opening: load records, check the header policy (with password), then
    /// run the entry script.
    pub async fn open(
        engine: &EngineState,
        user: &mut UserContext,
        io: &mut SessionIo<'_>,
        set: &str,
        name: &str,
    ) -> Result<Self> {
        let menu = engine.store().load(set, name)?;

        let decision = engine.policy().evaluate_header(&menu.header, &user.caller, true);
        authorize(engine, io, decision).await?;

        let mut inst = Self {
            menu,
            finished: false,
            reload: false,
            goto_menu: None,
        };

        if !inst.menu.header.entry_script.is_empty() {
            let script = inst.menu.header.entry_script.clone();
            inst.dispatch(engine, user, io, &script).await?;
        }
        Ok(inst)
    }

    pub fn menu(&self) -> &LoadedMenu {
        &self.menu
    }

    async fn run(
        &mut self,
        engine: &EngineState,
        user: &mut UserContext,
        io: &mut SessionIo<'_>,
    ) -> Result<ActivationOutcome> {
        if self.menu.header.numeric_mode == NumericMode::FileArea && user.file_area.is_none() {
            tracing::debug!(
                menu = %self.menu.name,
                code = MenuError::NumericModeUnavailable.kind().as_str(),
                "file area required"
            );
            io.print(NO_FILE_AREA).await?;
            return Ok(ActivationOutcome::NotStarted);
        }

        if user.expert && self.menu.header.help_policy == HelpPolicy::OnEntrance {
            self.display_help(engine, user, io).await?;
        }

        while !self.finished {
            self.print_prompt(engine, user, io).await?;
            let command = self.read_command(engine, user, io).await?;
            self.execute_command(engine, user, io, &command).await?;
        }

        Ok(ActivationOutcome::Finished {
            reload: self.reload,
            goto_menu: self.goto_menu.take(),
        })
    }

    /// Static help screen for the caller's display, else the generated listing.
    pub async fn display_help(
        &self,
        engine: &EngineState,
        user: &UserContext,
        io: &mut SessionIo<'_>,
    ) -> Result<()> {
        if let Some(path) = engine
            .store()
            .help_file(&self.menu.set, &self.menu.name, user.caps)
        {
            match fs::read(&path) {
                Ok(raw) => return io.print(&String::from_utf8_lossy(&raw)).await,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "help screen unreadable");
                }
            }
        }
        let listing = engine.renderer().render(&self.menu, user);
        io.print(&listing).await
    }

    async fn print_prompt(
        &self,
        engine: &EngineState,
        user: &UserContext,
        io: &mut SessionIo<'_>,
    ) -> Result<()> {
        if !user.expert || self.menu.header.help_policy == HelpPolicy::EveryPrompt {
            self.display_help(engine, user, io).await?;
        }
        io.render_codes = true;
        if !self.menu.prompt.is_empty() {
            io.print(&self.menu.prompt).await?;
        }
        Ok(())
    }

    /// Commands are matched upper-cased, whichever way they were typed.
    async fn read_command(
        &self,
        engine: &EngineState,
        user: &UserContext,
        io: &mut SessionIo<'_>,
    ) -> Result<String> {
        let raw = if !user.hot_keys {
            io.term.read_line(engine.cfg().input.line_max).await?
        } else {
            match self.menu.header.numeric_mode {
                NumericMode::FileArea => {
                    tracing::trace!(user = %user.name, area = ?user.file_area, "caller in file section");
                    io.term.read_hotkey(HotkeyMode::FileArea, &[]).await?
                }
                NumericMode::MessageArea => {
                    tracing::trace!(user = %user.name, area = ?user.message_area, "caller in message section");
                    io.term.read_hotkey(HotkeyMode::MessageArea, &[]).await?
                }
                NumericMode::None => io.term.read_hotkey(HotkeyMode::General, &['/']).await?,
            }
        };
        Ok(raw.trim().to_uppercase())
    }

    /// Resolve, log, and dispatch one command.
    pub async fn execute_command(
        &mut self,
        engine: &EngineState,
        user: &mut UserContext,
        io: &mut SessionIo<'_>,
        command: &str,
    ) -> Result<()> {
        if let Some(item) = numeric_item(self.menu.header.numeric_mode, command) {
            self.log_usage(io, command, Some(&item));
            return self.dispatch(engine, user, io, &item.execute).await;
        }

        let Some(item) = self.menu.get(command).cloned() else {
            tracing::trace!(menu = %self.menu.name, command, "no such key");
            self.log_usage(io, command, None);
            return Ok(());
        };

        let allowed = self.authorize_item(engine, user, io, command, &item).await?;
        // a denied record is still logged under its own text
        self.log_usage(io, command, Some(&item));
        if allowed {
            self.dispatch(engine, user, io, &item.execute).await?;
        }
        Ok(())
    }

    /// Item policy with the password prompt; a denial is logged and echoed.
    async fn authorize_item(
        &self,
        engine: &EngineState,
        user: &UserContext,
        io: &mut SessionIo<'_>,
        command: &str,
        item: &MenuItem,
    ) -> Result<bool> {
        let decision = engine.policy().evaluate_item(item, &user.caller, true);
        match authorize(engine, io, decision).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_access_denied() => {
                tracing::info!(menu = %self.menu.name, command, code = e.kind().as_str(), error = %e, "item denied");
                io.menu_log(&format!("< item security : {command}")).await?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn log_usage(&self, io: &mut SessionIo<'_>, command: &str, item: Option<&MenuItem>) {
        let line = match self.menu.header.logging {
            LogMode::None => return,
            LogMode::Key => command,
            LogMode::Command => item.map(|i| i.execute.as_str()).unwrap_or(command),
            LogMode::Description => item.map(MenuItem::display_text).unwrap_or(command),
        };
        if !line.is_empty() {
            io.log.record(line);
        }
    }

    async fn dispatch(
        &mut self,
        engine: &EngineState,
        user: &mut UserContext,
        io: &mut SessionIo<'_>,
        action: &str,
    ) -> Result<()> {
        let ctx = ActionCtx::new(
            user.name.as_str(),
            self.menu.set.as_str(),
            self.menu.name.as_str(),
            user.caller.clone(),
        );
        match engine.interpreter().execute(&ctx, action).await {
            Ok(delta) => self.apply(user, io, delta).await,
            Err(MenuError::Hangup) => Err(MenuError::Hangup),
            Err(e) => {
                tracing::warn!(menu = %self.menu.name, action, error = %e, "action failed");
                io.log.record(&format!("{}action failed : {action}", crate::obs::MENU_LOG_PREFIX));
                Ok(())
            }
        }
    }

    async fn apply(
        &mut self,
        user: &mut UserContext,
        io: &mut SessionIo<'_>,
        delta: ActionDelta,
    ) -> Result<()> {
        match delta.select_area {
            Some(AreaSelection::Message(n)) => user.message_area = Some(n),
            Some(AreaSelection::File(n)) => user.file_area = Some(n),
            None => {}
        }
        if delta.suppress_codes {
            io.render_codes = false;
        }
        if let Some(next) = delta.goto_menu {
            self.goto_menu = Some(next);
            self.finished = true;
        }
        self.finished |= delta.finished;
        self.reload |= delta.reload;

        if delta.hangup {
            io.term.hang_up().await?;
            return Err(MenuError::Hangup);
        }
        Ok(())
    }
}

impl Drop for MenuInstance {
    fn drop(&mut self) {
        tracing::trace!(set = %self.menu.set, menu = %self.menu.name, "menu closed");
    }
}

/// Turn a policy decision into a verdict, prompting when challenged.
async fn authorize(
    engine: &EngineState,
    io: &mut SessionIo<'_>,
    decision: AccessDecision,
) -> Result<()> {
    match decision {
        AccessDecision::Allow => Ok(()),
        AccessDecision::Deny(reason) => Err(MenuError::AccessDenied(reason.describe())),
        AccessDecision::Challenge { expected } => {
            let max = engine.cfg().security.password_max_len;
            io.term.print("\r\n", false).await?;
            let answer = io.term.read_password(PASSWORD_PROMPT, max).await?;
            let answer: String = answer.chars().take(max).collect();
            if answer == expected {
                Ok(())
            } else {
                Err(MenuError::PasswordMismatch)
            }
        }
    }
}

/// Transient area-switch item for an all-digit command on a numeric menu.
pub fn numeric_item(mode: NumericMode, command: &str) -> Option<MenuItem> {
    if command.is_empty() || !command.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let verb = match mode {
        NumericMode::None => return None,
        NumericMode::MessageArea => SET_MESSAGE_AREA,
        NumericMode::FileArea => SET_FILE_AREA,
    };
    let digits = command.trim_start_matches('0');
    let n = if digits.is_empty() { "0" } else { digits };
    Some(MenuItem::synthetic(format!("{verb} {n}")))
}
