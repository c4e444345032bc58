//! Generated menu listing, used when a menu ships no static help screen.
//!
//! Layout: two fixed-width cells per row, each `key` (8 columns) then the
//! item text (25 columns), both truncated to fit.

use std::fmt::Write;

use menuprism_core::record::NumericMode;

use crate::context::UserContext;
use crate::policy::AccessPolicy;
use crate::store::LoadedMenu;

/// Prefix that marks a multi-key command in hot-key mode.
pub const HOTKEY_MARKER: &str = "//";

const NUMERIC_LABEL: &str = "[#]";
const NUMERIC_TEXT: &str = "Change Sub/Dir #";
const GUEST_TEXT: &str = "Guest Account Application";
const NEWLINE: &str = "\r\n";

pub struct Renderer<'a> {
    policy: &'a AccessPolicy,
    guest_name: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(policy: &'a AccessPolicy, guest_name: &'a str) -> Self {
        Self { policy, guest_name }
    }

    pub fn render(&self, menu: &LoadedMenu, user: &UserContext) -> String {
        let mut out = String::from("|#0");
        out.push_str(NEWLINE);

        let mut shown = 0usize;
        if menu.header.numeric_mode != NumericMode::None {
            push_cell(&mut out, NUMERIC_LABEL, NUMERIC_TEXT);
            shown += 1;
        }

        for item in menu.ordered_items() {
            if !self
                .policy
                .evaluate_item(item, &user.caller, false)
                .is_allow()
                || item.visibility.hides_listing()
            {
                continue;
            }
            push_cell(&mut out, &key_label(&item.key, user.hot_keys), item.display_text());
            if shown % 2 == 1 {
                out.push_str(NEWLINE);
            }
            shown += 1;
        }

        if user.name == self.guest_name {
            if shown % 2 == 1 {
                out.push_str(NEWLINE);
            }
            let label = key_label("APPLY", user.hot_keys);
            push_cell(&mut out, &label, GUEST_TEXT);
        }

        out.push_str(NEWLINE);
        out.push_str(NEWLINE);
        out
    }
}

/// `[K]`, or `//KEY` for multi-key commands when hot keys are on.
pub fn key_label(key: &str, hot_keys: bool) -> String {
    if hot_keys && key.chars().count() > 1 && !key.starts_with('/') {
        format!("{HOTKEY_MARKER}{key}")
    } else {
        format!("[{key}]")
    }
}

fn push_cell(out: &mut String, label: &str, text: &str) {
    let _ = write!(out, "|#1{label:<8.8}  |#2{text:<25.25}  ");
}
