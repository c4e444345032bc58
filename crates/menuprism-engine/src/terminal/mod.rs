//! Caller-facing terminal contract.
//!
//! The engine never touches sockets or raw terminal modes; the host supplies a
//! `Terminal` per session. Every input method is a suspension point and may
//! return `MenuError::Hangup`, which ends the session.

pub mod console;

use async_trait::async_trait;

use menuprism_core::error::Result;

pub use console::StreamTerminal;

/// How a hot-key read interprets digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyMode {
    /// Digits form a message-area number.
    MessageArea,
    /// Digits form a file-area number.
    FileArea,
    /// Single key; the listed characters start a multi-key command.
    General,
}

#[async_trait]
pub trait Terminal: Send {
    /// Write text. Inline formatting codes are interpreted only when
    /// `render_codes` is set, otherwise printed as-is.
    async fn print(&mut self, text: &str, render_codes: bool) -> Result<()>;

    /// Read one line of at most `max_len` characters.
    async fn read_line(&mut self, max_len: usize) -> Result<String>;

    /// Read one hot-key command.
    async fn read_hotkey(&mut self, mode: HotkeyMode, extra_terminators: &[char]) -> Result<String>;

    /// Read a masked string of at most `max_len` characters.
    async fn read_password(&mut self, prompt: &str, max_len: usize) -> Result<String>;

    /// Read one key from `allowed` (upper-cased).
    async fn read_choice(&mut self, allowed: &str) -> Result<char>;

    /// Yes/no question defaulting to no.
    async fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Drop the connection.
    async fn hang_up(&mut self) -> Result<()>;

    fn is_connected(&self) -> bool;
}
