//! Line-oriented terminal over any async byte stream (stdin/stdout, a TCP
//! socket handed over by the host, ...).
//!
//! Hot-key reads are emulated on top of lines: the first key of the line is
//! the command unless the line is a multi-key command or an area number.

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use menuprism_core::error::{MenuError, Result};

use crate::render::HOTKEY_MARKER;

use super::{HotkeyMode, Terminal};

const MAX_BUFFERED: usize = 8 * 1024;

pub struct StreamTerminal<R, W> {
    reader: R,
    writer: W,
    buf: BytesMut,
    connected: bool,
}

impl<R, W> StreamTerminal<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buf: BytesMut::with_capacity(1024),
            connected: true,
        }
    }
}

impl<R, W> StreamTerminal<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn next_line(&mut self) -> Result<String> {
        if !self.connected {
            return Err(MenuError::Hangup);
        }
        loop {
            if let Some(i) = self.buf.iter().position(|&b| b == b'\n') {
                let raw = self.buf.split_to(i + 1);
                let line = String::from_utf8_lossy(&raw);
                return Ok(line.trim_end_matches(['\r', '\n']).to_string());
            }
            if self.buf.len() > MAX_BUFFERED {
                self.buf.clear();
                return Err(MenuError::Io("input line too long".into()));
            }
            let n = self.reader.read_buf(&mut self.buf).await?;
            if n == 0 {
                self.connected = false;
                return Err(MenuError::Hangup);
            }
        }
    }

    async fn write_raw(&mut self, text: &str) -> Result<()> {
        if !self.connected {
            return Err(MenuError::Hangup);
        }
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> Terminal for StreamTerminal<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn print(&mut self, text: &str, render_codes: bool) -> Result<()> {
        if render_codes {
            let plain = strip_codes(text);
            self.write_raw(&plain).await
        } else {
            self.write_raw(text).await
        }
    }

    async fn read_line(&mut self, max_len: usize) -> Result<String> {
        let line = self.next_line().await?;
        Ok(line.chars().take(max_len).collect())
    }

    async fn read_hotkey(&mut self, mode: HotkeyMode, extra_terminators: &[char]) -> Result<String> {
        let line = self.next_line().await?.trim().to_uppercase();
        Ok(hotkey_from_line(&line, mode, extra_terminators))
    }

    async fn read_password(&mut self, prompt: &str, max_len: usize) -> Result<String> {
        self.print(prompt, true).await?;
        self.read_line(max_len).await
    }

    async fn read_choice(&mut self, allowed: &str) -> Result<char> {
        loop {
            let line = self.next_line().await?;
            if let Some(c) = line.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
                if allowed.contains(c) {
                    return Ok(c);
                }
            }
        }
    }

    async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.print(prompt, true).await?;
        self.print(" (y/N) ", false).await?;
        let line = self.next_line().await?;
        Ok(line.trim().eq_ignore_ascii_case("y") || line.trim().eq_ignore_ascii_case("yes"))
    }

    async fn hang_up(&mut self) -> Result<()> {
        if self.connected {
            let _ = self.writer.shutdown().await;
        }
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

fn hotkey_from_line(line: &str, mode: HotkeyMode, extra_terminators: &[char]) -> String {
    let numeric = matches!(mode, HotkeyMode::MessageArea | HotkeyMode::FileArea);
    if numeric && !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()) {
        return line.to_string();
    }
    // `//KEY` is how the listing shows multi-key commands
    if let Some(key) = line.strip_prefix(HOTKEY_MARKER) {
        return key.to_string();
    }
    match line.chars().next() {
        Some(c) if extra_terminators.contains(&c) => line.to_string(),
        Some(c) => c.to_string(),
        None => String::new(),
    }
}

/// Drop `|#n` / `|nn` color codes for a plain byte stream.
fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '|' {
            match chars.peek() {
                Some('#') => {
                    chars.next();
                    if chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                        chars.next();
                    }
                    continue;
                }
                Some(d) if d.is_ascii_digit() => {
                    chars.next();
                    if chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                        chars.next();
                    }
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}
