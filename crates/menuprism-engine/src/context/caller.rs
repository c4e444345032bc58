/// Live security attributes of a caller, evaluated by the access policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    /// Effective security level.
    pub sl: u16,
    /// Download security level.
    pub dsl: u16,
    /// Held capability bits (checked against required masks).
    pub flags: u16,
    /// Held conditional capability bits.
    pub conditional_flags: u16,
    /// Held restriction bits (checked against restricted masks).
    pub restrictions: u16,
    pub operator: bool,
    pub co_operator: bool,
}

/// What the caller's terminal can display. Picks the help sidecar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayCaps {
    pub ansi: bool,
    pub color: bool,
}

/// Per-connection user state for one session.
/// Read by the engine, mutated by action deltas and the menu-set flow.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub name: String,
    pub caller: Caller,
    /// Selected menu set (directory name under the storage root).
    pub menu_set: String,
    pub hot_keys: bool,
    /// Experienced callers are not shown the help screen at every prompt.
    pub expert: bool,
    pub caps: DisplayCaps,
    pub message_area: Option<u32>,
    pub file_area: Option<u32>,
}

impl UserContext {
    pub fn new(name: impl Into<String>, caller: Caller) -> Self {
        Self {
            name: name.into(),
            caller,
            menu_set: String::new(),
            hot_keys: false,
            expert: false,
            caps: DisplayCaps::default(),
            message_area: None,
            file_area: None,
        }
    }

    pub fn with_menu_set(mut self, set: impl Into<String>) -> Self {
        self.menu_set = set.into();
        self
    }

    pub fn with_hot_keys(mut self, on: bool) -> Self {
        self.hot_keys = on;
        self
    }

    pub fn with_expert(mut self, on: bool) -> Self {
        self.expert = on;
        self
    }

    pub fn with_caps(mut self, caps: DisplayCaps) -> Self {
        self.caps = caps;
        self
    }

    pub fn with_file_area(mut self, area: Option<u32>) -> Self {
        self.file_area = area;
        self
    }
}
