use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use menuprism_core::error::{MenuError, Result};
use menuprism_core::record::{decode_menu_file, MenuFile, MenuHeader, MenuItem};

use crate::context::DisplayCaps;

pub const MENU_EXT: &str = "mnu";
pub const PROMPT_EXT: &str = "pro";
/// Prompt text ends before the first occurrence of this marker.
pub const PROMPT_TERMINATOR: &str = ".end.";

const HELP_COLOR_EXT: &str = "ans";
const HELP_MONO_EXT: &str = "b&w";
const HELP_PLAIN_EXT: &str = "msg";

/// Locates and reads menu sets under one storage root.
#[derive(Debug, Clone)]
pub struct MenuStore {
    root: PathBuf,
}

impl MenuStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_dir(&self, set: &str) -> PathBuf {
        self.root.join(set)
    }

    /// `<root>/<set>/<menu>.<ext>`
    pub fn menu_path(&self, set: &str, menu: &str, ext: &str) -> PathBuf {
        self.set_dir(set).join(format!("{menu}.{ext}"))
    }

    /// A set is usable iff its entry-point menu file exists.
    pub fn is_valid_set(&self, set: &str, entry_menu: &str) -> bool {
        !set.is_empty() && self.menu_path(set, entry_menu, MENU_EXT).is_file()
    }

    /// Directory names under the root, sorted.
    pub fn list_sets(&self) -> Result<Vec<String>> {
        let mut sets = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                sets.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        sets.sort();
        Ok(sets)
    }

    /// Read a menu file and its prompt sidecar.
    /// Does not evaluate the header policy.
    pub fn load(&self, set: &str, menu: &str) -> Result<LoadedMenu> {
        let path = self.menu_path(set, menu, MENU_EXT);
        let raw = fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => MenuError::NotFound(path.display().to_string()),
            _ => MenuError::Io(format!("{}: {e}", path.display())),
        })?;

        let file = decode_menu_file(Bytes::from(raw))
            .map_err(|e| MenuError::Malformed(format!("{}: {e}", path.display())))?;
        let prompt = self.read_prompt(set, menu);

        tracing::debug!(set, menu, items = file.items.len(), "menu loaded");
        Ok(LoadedMenu::from_file(set, menu, file, prompt))
    }

    /// First existing help screen for the caller's display, if any.
    pub fn help_file(&self, set: &str, menu: &str, caps: DisplayCaps) -> Option<PathBuf> {
        let mut candidates = Vec::with_capacity(3);
        if caps.ansi {
            if caps.color {
                candidates.push(HELP_COLOR_EXT);
            }
            candidates.push(HELP_MONO_EXT);
        }
        candidates.push(HELP_PLAIN_EXT);

        candidates
            .into_iter()
            .map(|ext| self.menu_path(set, menu, ext))
            .find(|p| p.is_file())
    }

    fn read_prompt(&self, set: &str, menu: &str) -> String {
        // binary read keeps \r bytes intact
        match fs::read(self.menu_path(set, menu, PROMPT_EXT)) {
            Ok(raw) => truncate_prompt(&String::from_utf8_lossy(&raw)).to_string(),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(set, menu, error = %e, "prompt sidecar unreadable");
                }
                String::new()
            }
        }
    }
}

/// Text before the first terminator marker.
pub fn truncate_prompt(text: &str) -> &str {
    match text.find(PROMPT_TERMINATOR) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// One menu, loaded and indexed. Immutable after load.
#[derive(Debug, Clone)]
pub struct LoadedMenu {
    pub set: String,
    pub name: String,
    pub header: MenuHeader,
    items: HashMap<String, MenuItem>,
    order: Vec<String>,
    pub prompt: String,
}

impl LoadedMenu {
    /// Index items by key. The first record with a key wins; later duplicates
    /// are unreachable and never listed. Deleted records keep their key but
    /// are left out of the display order.
    pub fn from_file(set: &str, name: &str, file: MenuFile, prompt: String) -> Self {
        let mut items = HashMap::with_capacity(file.items.len());
        let mut order = Vec::with_capacity(file.items.len());

        for item in file.items {
            match items.entry(item.key.clone()) {
                Entry::Occupied(_) => {
                    tracing::trace!(set, menu = name, key = %item.key, "duplicate key ignored");
                }
                Entry::Vacant(slot) => {
                    if !item.deleted {
                        order.push(item.key.clone());
                    }
                    slot.insert(item);
                }
            }
        }

        Self {
            set: set.to_string(),
            name: name.to_string(),
            header: file.header,
            items,
            order,
            prompt,
        }
    }

    pub fn get(&self, key: &str) -> Option<&MenuItem> {
        self.items.get(key)
    }

    /// Keys of non-deleted items in file order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Items in display order.
    pub fn ordered_items(&self) -> impl Iterator<Item = &MenuItem> + '_ {
        self.order.iter().filter_map(|k| self.items.get(k))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
