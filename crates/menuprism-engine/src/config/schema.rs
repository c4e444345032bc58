use std::path::PathBuf;

use serde::Deserialize;
use menuprism_core::error::{MenuError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub version: u32,

    #[serde(default)]
    pub menus: MenusSection,

    #[serde(default)]
    pub security: SecuritySection,

    #[serde(default)]
    pub input: InputSection,

    #[serde(default)]
    pub session: SessionSection,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MenuError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.menus.validate()?;
        self.security.validate()?;
        self.input.validate()?;
        self.session.validate()?;

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: 1,
            menus: MenusSection::default(),
            security: SecuritySection::default(),
            input: InputSection::default(),
            session: SessionSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenusSection {
    /// Storage root holding one directory per menu set.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_set")]
    pub default_set: String,

    /// Conventional name of the entry-point menu.
    #[serde(default = "default_entry_menu")]
    pub entry_menu: String,
}

impl Default for MenusSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            default_set: default_set(),
            entry_menu: default_entry_menu(),
        }
    }
}

impl MenusSection {
    pub fn validate(&self) -> Result<()> {
        if self.default_set.is_empty() || self.default_set.contains(['/', '\\']) {
            return Err(MenuError::Config(
                "menus.default_set must be a plain directory name".into(),
            ));
        }
        if self.entry_menu.is_empty() || self.entry_menu.contains(['/', '\\']) {
            return Err(MenuError::Config(
                "menus.entry_menu must be a plain file stem".into(),
            ));
        }
        Ok(())
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("menus")
}
fn default_set() -> String {
    "wwiv".into()
}
fn default_entry_menu() -> String {
    "main".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecuritySection {
    /// Secret used by records whose password is the system sentinel.
    #[serde(default)]
    pub system_password: String,

    #[serde(default = "default_password_max_len")]
    pub password_max_len: usize,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            system_password: String::new(),
            password_max_len: default_password_max_len(),
        }
    }
}

impl SecuritySection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=64).contains(&self.password_max_len) {
            return Err(MenuError::Config(
                "security.password_max_len must be between 1 and 64".into(),
            ));
        }
        Ok(())
    }
}

fn default_password_max_len() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSection {
    #[serde(default = "default_line_max")]
    pub line_max: usize,

    #[serde(default = "default_menu_set_name_max")]
    pub menu_set_name_max: usize,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            line_max: default_line_max(),
            menu_set_name_max: default_menu_set_name_max(),
        }
    }
}

impl InputSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=255).contains(&self.line_max) {
            return Err(MenuError::Config(
                "input.line_max must be between 1 and 255".into(),
            ));
        }
        if !(1..=32).contains(&self.menu_set_name_max) {
            return Err(MenuError::Config(
                "input.menu_set_name_max must be between 1 and 32".into(),
            ));
        }
        Ok(())
    }
}

fn default_line_max() -> usize {
    50
}
fn default_menu_set_name_max() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    /// Account name that gets the "apply for an account" entry.
    #[serde(default = "default_guest_name")]
    pub guest_name: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            guest_name: default_guest_name(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if self.guest_name.is_empty() {
            return Err(MenuError::Config("session.guest_name must not be empty".into()));
        }
        Ok(())
    }
}

fn default_guest_name() -> String {
    "GUEST".into()
}
