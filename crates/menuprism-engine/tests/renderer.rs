#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use menuprism_core::record::{MenuFile, MenuHeader, MenuItem, NumericMode, Visibility};
use menuprism_engine::context::{Caller, UserContext};
use menuprism_engine::policy::AccessPolicy;
use menuprism_engine::render::Renderer;
use menuprism_engine::store::LoadedMenu;

fn cell(label: &str, text: &str) -> String {
    format!("|#1{label:<8}  |#2{text:<25}  ")
}

fn item(key: &str, label: &str) -> MenuItem {
    MenuItem {
        key: key.into(),
        label: label.into(),
        execute: format!("Do{key}"),
        ..MenuItem::default()
    }
}

fn menu(numeric_mode: NumericMode, items: Vec<MenuItem>) -> LoadedMenu {
    let file = MenuFile {
        header: MenuHeader {
            numeric_mode,
            ..MenuHeader::default()
        },
        items,
    };
    LoadedMenu::from_file("wwiv", "main", file, String::new())
}

fn user(name: &str) -> UserContext {
    UserContext::new(name, Caller { sl: 10, ..Caller::default() })
}

#[test]
fn empty_menu_for_guest() {
    let policy = AccessPolicy::new("");
    let r = Renderer::new(&policy, "GUEST");

    let out = r.render(&menu(NumericMode::None, vec![]), &user("GUEST"));
    assert_eq!(
        out,
        format!("|#0\r\n{}\r\n\r\n", cell("[APPLY]", "Guest Account Application"))
    );

    let out = r.render(&menu(NumericMode::MessageArea, vec![]), &user("GUEST"));
    assert_eq!(
        out,
        format!(
            "|#0\r\n{}\r\n{}\r\n\r\n",
            cell("[#]", "Change Sub/Dir #"),
            cell("[APPLY]", "Guest Account Application")
        )
    );
}

#[test]
fn guest_name_is_case_sensitive() {
    let policy = AccessPolicy::new("");
    let r = Renderer::new(&policy, "GUEST");
    let out = r.render(&menu(NumericMode::None, vec![]), &user("guest"));
    assert_eq!(out, "|#0\r\n\r\n\r\n");
}

#[test]
fn two_cells_per_row() {
    let policy = AccessPolicy::new("");
    let r = Renderer::new(&policy, "GUEST");
    let m = menu(
        NumericMode::FileArea,
        vec![item("A", "Alpha"), item("B", "Beta"), item("C", "")],
    );

    let out = r.render(&m, &user("SYSOP"));
    let expected = format!(
        "|#0\r\n{}{}\r\n{}{}\r\n\r\n\r\n",
        cell("[#]", "Change Sub/Dir #"),
        cell("[A]", "Alpha"),
        cell("[B]", "Beta"),
        cell("[C]", "DoC"),
    );
    assert_eq!(out, expected);
}

#[test]
fn hidden_and_denied_items_are_skipped() {
    let policy = AccessPolicy::new("");
    let r = Renderer::new(&policy, "GUEST");

    let hidden = MenuItem {
        visibility: Visibility::HiddenFromListing,
        ..item("H", "Hidden")
    };
    let hidden_both = MenuItem {
        visibility: Visibility::HiddenFromBoth,
        ..item("X", "Gone")
    };
    let hotkey_only_hidden = MenuItem {
        visibility: Visibility::HiddenFromHotkey,
        ..item("K", "Shown")
    };
    let too_high = MenuItem {
        min_sl: 200,
        ..item("S", "Sysop")
    };
    let deleted = MenuItem {
        deleted: true,
        ..item("D", "Deleted")
    };
    let m = menu(
        NumericMode::None,
        vec![hidden, hidden_both, hotkey_only_hidden, too_high, deleted],
    );

    let out = r.render(&m, &user("SYSOP"));
    assert_eq!(out, format!("|#0\r\n{}\r\n\r\n", cell("[K]", "Shown")));
}

#[test]
fn password_items_are_listed_without_asking() {
    let policy = AccessPolicy::new("hunter2");
    let r = Renderer::new(&policy, "GUEST");
    let locked = MenuItem {
        password: "*SYSTEM".into(),
        ..item("P", "Private")
    };
    let out = r.render(&menu(NumericMode::None, vec![locked]), &user("SYSOP"));
    assert!(out.contains(&cell("[P]", "Private")));
}

#[test]
fn hot_key_labels_mark_long_keys() {
    let policy = AccessPolicy::new("");
    let r = Renderer::new(&policy, "GUEST");
    let m = menu(NumericMode::None, vec![item("R", "Read"), item("QUIT", "Leave")]);

    let out = r.render(&m, &user("GUEST").with_hot_keys(true));
    assert_eq!(
        out,
        format!(
            "|#0\r\n{}{}\r\n{}\r\n\r\n",
            cell("[R]", "Read"),
            cell("//QUIT", "Leave"),
            cell("//APPLY", "Guest Account Application")
        )
    );
}
