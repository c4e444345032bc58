//! Menu-set descriptions, one `name description` pair per line.
//!
//! Names and descriptions are lower-cased on load and on update. The file is
//! rewritten in full whenever an entry is set.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use menuprism_core::error::{MenuError, Result};

pub const REGISTRY_FILE: &str = "descript.ion";

#[derive(Debug, Clone)]
pub struct MenuSetRegistry {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl MenuSetRegistry {
    /// Load the registry under `root`. A missing file is an empty registry.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(REGISTRY_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(MenuError::Io(format!("{}: {e}", path.display()))),
        };
        Ok(Self { path, entries })
    }

    /// Description for `name`, or "" when unknown.
    pub fn description(&self, name: &str) -> &str {
        self.entries
            .get(&name.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_description(&mut self, name: &str, description: &str) -> Result<()> {
        let name = name.trim().to_lowercase();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(MenuError::Config(format!("invalid menu set name: {name:?}")));
        }
        self.entries
            .insert(name, description.trim().to_lowercase());
        self.save()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn save(&self) -> Result<()> {
        let mut out = String::new();
        for (name, description) in &self.entries {
            out.push_str(name);
            out.push(' ');
            out.push_str(description);
            out.push('\n');
        }
        fs::write(&self.path, out)
            .map_err(|e| MenuError::Io(format!("{}: {e}", self.path.display())))
    }
}

fn parse(text: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        // a name with no description is skipped
        let Some((name, description)) = line.split_once(char::is_whitespace) else {
            continue;
        };
        entries.insert(name.to_lowercase(), description.trim().to_lowercase());
    }
    entries
}
