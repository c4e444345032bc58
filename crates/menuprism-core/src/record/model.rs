use crate::error::{MenuError, Result};

/// Password value meaning "use the system-wide password".
pub const SYSTEM_PASSWORD_SENTINEL: &str = "*SYSTEM";

/// What a purely numeric command does on this menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericMode {
    /// Digits are looked up like any other key.
    #[default]
    None,
    /// Digits switch the current message area.
    MessageArea,
    /// Digits switch the current file area.
    FileArea,
}

impl NumericMode {
    pub fn from_u8(v: u8) -> Result<Self> {
        match v {
            0 => Ok(NumericMode::None),
            1 => Ok(NumericMode::MessageArea),
            2 => Ok(NumericMode::FileArea),
            other => Err(MenuError::Malformed(format!("unknown numeric mode {other}"))),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            NumericMode::None => 0,
            NumericMode::MessageArea => 1,
            NumericMode::FileArea => 2,
        }
    }
}

/// Usage-log policy for commands entered on this menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    #[default]
    None,
    /// Log the raw key the caller typed.
    Key,
    /// Log the execute text.
    Command,
    /// Log the display label, or the execute text when the label is empty.
    Description,
}

impl LogMode {
    pub fn from_u8(v: u8) -> Result<Self> {
        match v {
            0 => Ok(LogMode::None),
            1 => Ok(LogMode::Key),
            2 => Ok(LogMode::Command),
            3 => Ok(LogMode::Description),
            other => Err(MenuError::Malformed(format!("unknown logging mode {other}"))),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            LogMode::None => 0,
            LogMode::Key => 1,
            LogMode::Command => 2,
            LogMode::Description => 3,
        }
    }
}

/// When the help screen is shown to experienced callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpPolicy {
    #[default]
    Never,
    EveryPrompt,
    OnEntrance,
}

impl HelpPolicy {
    pub fn from_u8(v: u8) -> Result<Self> {
        match v {
            0 => Ok(HelpPolicy::Never),
            1 => Ok(HelpPolicy::EveryPrompt),
            2 => Ok(HelpPolicy::OnEntrance),
            other => Err(MenuError::Malformed(format!("unknown help policy {other}"))),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            HelpPolicy::Never => 0,
            HelpPolicy::EveryPrompt => 1,
            HelpPolicy::OnEntrance => 2,
        }
    }
}

/// Item visibility in listings and hot-key maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    HiddenFromListing,
    HiddenFromHotkey,
    HiddenFromBoth,
}

impl Visibility {
    pub fn from_u8(v: u8) -> Result<Self> {
        match v {
            0 => Ok(Visibility::Visible),
            1 => Ok(Visibility::HiddenFromListing),
            2 => Ok(Visibility::HiddenFromHotkey),
            3 => Ok(Visibility::HiddenFromBoth),
            other => Err(MenuError::Malformed(format!("unknown visibility {other}"))),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Visibility::Visible => 0,
            Visibility::HiddenFromListing => 1,
            Visibility::HiddenFromHotkey => 2,
            Visibility::HiddenFromBoth => 3,
        }
    }

    /// Whether the generated listing skips this item.
    pub fn hides_listing(self) -> bool {
        matches!(self, Visibility::HiddenFromListing | Visibility::HiddenFromBoth)
    }
}

/// Menu header (record 0). Governs entry into the whole menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuHeader {
    pub numeric_mode: NumericMode,
    pub logging: LogMode,
    pub help_policy: HelpPolicy,
    pub min_sl: u16,
    pub min_dsl: u16,
    /// Every set bit must be held by the caller.
    pub required: u16,
    pub conditional: u16,
    /// Any set bit held by the caller denies.
    pub restricted: u16,
    pub operator_only: bool,
    pub co_operator_only: bool,
    /// Empty means no password. See [`SYSTEM_PASSWORD_SENTINEL`].
    pub password: String,
    pub deleted: bool,
    /// Handed to the interpreter once, when the menu opens.
    pub entry_script: String,
}

/// One command on a menu (records 1..N).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItem {
    /// Case-sensitive token the caller types or hot-keys.
    pub key: String,
    pub label: String,
    /// Action string handed to the interpreter.
    pub execute: String,
    pub min_sl: u16,
    /// 0 means unbounded.
    pub max_sl: u16,
    pub min_dsl: u16,
    /// 0 means unbounded.
    pub max_dsl: u16,
    pub required: u16,
    pub conditional: u16,
    pub restricted: u16,
    pub operator_only: bool,
    pub co_operator_only: bool,
    pub password: String,
    pub visibility: Visibility,
    pub deleted: bool,
}

impl MenuItem {
    /// Transient item carrying only an action (used for numeric area switches).
    pub fn synthetic(execute: impl Into<String>) -> Self {
        Self {
            execute: execute.into(),
            ..Self::default()
        }
    }

    /// Label for listings and logs; falls back to the execute text.
    pub fn display_text(&self) -> &str {
        if self.label.is_empty() {
            &self.execute
        } else {
            &self.label
        }
    }
}

/// Decoded contents of one `.mnu` file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFile {
    pub header: MenuHeader,
    pub items: Vec<MenuItem>,
}
