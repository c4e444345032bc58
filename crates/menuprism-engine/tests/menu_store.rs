#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod support;

use std::fs;

use menuprism_core::record::{MenuFile, MenuHeader, MenuItem};
use menuprism_engine::context::DisplayCaps;
use menuprism_engine::store::{MenuSetRegistry, MenuStore};

use support::{write_menu, write_sidecar};

fn item(key: &str, execute: &str) -> MenuItem {
    MenuItem {
        key: key.into(),
        execute: execute.into(),
        ..MenuItem::default()
    }
}

#[test]
fn first_duplicate_key_wins_and_is_listed_once() {
    let dir = tempfile::tempdir().unwrap();
    let file = MenuFile {
        header: MenuHeader::default(),
        items: vec![item("R", "ReadMail"), item("P", "Post"), item("R", "Logoff")],
    };
    write_menu(dir.path(), "wwiv", "main", &file);

    let menu = MenuStore::new(dir.path()).load("wwiv", "main").unwrap();
    assert_eq!(menu.get("R").unwrap().execute, "ReadMail");
    assert_eq!(menu.order(), ["R".to_string(), "P".to_string()]);
    assert_eq!(menu.len(), 2);
}

#[test]
fn header_only_file_is_an_empty_menu() {
    let dir = tempfile::tempdir().unwrap();
    write_menu(dir.path(), "wwiv", "main", &MenuFile::default());

    let menu = MenuStore::new(dir.path()).load("wwiv", "main").unwrap();
    assert!(menu.is_empty());
    assert!(menu.prompt.is_empty());
}

#[test]
fn prompt_sidecar_is_cut_at_terminator() {
    let dir = tempfile::tempdir().unwrap();
    write_menu(dir.path(), "wwiv", "main", &MenuFile::default());
    write_sidecar(
        dir.path(),
        "wwiv",
        "main",
        "pro",
        "|#9Main Menu \r\n|#2Command? .end.\r\nnotes for the sysop\r\n",
    );

    let menu = MenuStore::new(dir.path()).load("wwiv", "main").unwrap();
    assert_eq!(menu.prompt, "|#9Main Menu \r\n|#2Command? ");
}

#[test]
fn missing_menu_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = MenuStore::new(dir.path()).load("wwiv", "main").unwrap_err();
    assert_eq!(err.kind().as_str(), "NOT_FOUND");
}

#[test]
fn short_or_misaligned_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    write_sidecar(dir.path(), "wwiv", "short", "mnu", "too short");
    let store = MenuStore::new(dir.path());
    assert_eq!(store.load("wwiv", "short").unwrap_err().kind().as_str(), "MALFORMED");

    write_menu(dir.path(), "wwiv", "main", &MenuFile::default());
    let path = store.menu_path("wwiv", "main", "mnu");
    let mut raw = fs::read(&path).unwrap();
    raw.extend_from_slice(&[0u8; 17]);
    fs::write(&path, raw).unwrap();
    assert_eq!(store.load("wwiv", "main").unwrap_err().kind().as_str(), "MALFORMED");
}

#[test]
fn help_file_follows_display_caps() {
    let dir = tempfile::tempdir().unwrap();
    let store = MenuStore::new(dir.path());
    let color = DisplayCaps { ansi: true, color: true };
    let mono = DisplayCaps { ansi: true, color: false };
    let plain = DisplayCaps::default();

    assert!(store.help_file("wwiv", "main", color).is_none());

    write_sidecar(dir.path(), "wwiv", "main", "msg", "plain");
    assert!(store.help_file("wwiv", "main", color).unwrap().ends_with("main.msg"));

    write_sidecar(dir.path(), "wwiv", "main", "b&w", "mono");
    assert!(store.help_file("wwiv", "main", color).unwrap().ends_with("main.b&w"));
    assert!(store.help_file("wwiv", "main", plain).unwrap().ends_with("main.msg"));

    write_sidecar(dir.path(), "wwiv", "main", "ans", "color");
    assert!(store.help_file("wwiv", "main", color).unwrap().ends_with("main.ans"));
    assert!(store.help_file("wwiv", "main", mono).unwrap().ends_with("main.b&w"));
}

#[test]
fn set_is_valid_only_with_entry_menu() {
    let dir = tempfile::tempdir().unwrap();
    write_menu(dir.path(), "wwiv", "main", &MenuFile::default());
    write_menu(dir.path(), "broken", "files", &MenuFile::default());
    let store = MenuStore::new(dir.path());

    assert!(store.is_valid_set("wwiv", "main"));
    assert!(!store.is_valid_set("broken", "main"));
    assert!(!store.is_valid_set("", "main"));
    assert_eq!(store.list_sets().unwrap(), vec!["broken".to_string(), "wwiv".to_string()]);
}

#[test]
fn registry_lowercases_and_rewrites() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("descript.ion"),
        "WWIV The Default Set\nlonely\nclassic   old style menus\n",
    )
    .unwrap();

    let mut reg = MenuSetRegistry::load(dir.path()).unwrap();
    assert_eq!(reg.description("wwiv"), "the default set");
    assert_eq!(reg.description("CLASSIC"), "old style menus");
    assert_eq!(reg.description("lonely"), "");

    reg.set_description("Modern", "Shiny New Menus").unwrap();
    let text = fs::read_to_string(dir.path().join("descript.ion")).unwrap();
    assert_eq!(
        text,
        "classic old style menus\nmodern shiny new menus\nwwiv the default set\n"
    );

    let reloaded = MenuSetRegistry::load(dir.path()).unwrap();
    assert_eq!(reloaded.entries().count(), 3);
    assert!(reg.set_description("two words", "x").is_err());
}

#[test]
fn registry_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let reg = MenuSetRegistry::load(dir.path()).unwrap();
    assert_eq!(reg.entries().count(), 0);
    assert_eq!(reg.description("wwiv"), "");
}
