/// Prefix for engine-generated entries (denials, load failures).
pub const MENU_LOG_PREFIX: &str = "*MENU* : ";

pub trait SysopLog: Send {
    fn record(&mut self, line: &str);
}

/// Emits each entry as a `tracing` event.
#[derive(Debug, Clone)]
pub struct TracingSysopLog {
    user: String,
}

impl TracingSysopLog {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

impl SysopLog for TracingSysopLog {
    fn record(&mut self, line: &str) {
        tracing::info!(target: "menuprism::sysop", user = %self.user, "{line}");
    }
}

/// Keeps entries in memory (hosts that batch writes, and tests).
#[derive(Debug, Clone, Default)]
pub struct MemorySysopLog {
    pub lines: Vec<String>,
}

impl MemorySysopLog {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl SysopLog for MemorySysopLog {
    fn record(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
