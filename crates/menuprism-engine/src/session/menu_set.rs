//! Menu-set selection flow: lets the caller pick a menu set and toggle hot
//! keys. Entered by the driver when the caller's set has no entry point.

use std::fs;

use menuprism_core::error::Result;

use crate::context::UserContext;
use crate::obs::MENU_LOG_PREFIX;
use crate::state::EngineState;

use super::SessionIo;

/// Welcome text shown on entry and on `?`, relative to the storage root.
pub const WELCOME_FILE: &str = "menuwel.msg";

pub async fn configure_menu_set(
    engine: &EngineState,
    user: &mut UserContext,
    io: &mut SessionIo<'_>,
) -> Result<()> {
    io.print("\r\n|#5Configure Menus\r\n").await?;
    print_welcome(engine, io).await?;

    loop {
        io.print(&format!(
            "\r\n|#11|#9) Menuset      :|#2 {}\r\n",
            user.menu_set
        ))
        .await?;
        io.print(&format!(
            "|#12|#9) Use hot keys :|#2 {}\r\n",
            if user.hot_keys { "Yes" } else { "No " }
        ))
        .await?;
        io.print("\r\n|#9(|#2Q|#9=|#1Quit|#9) : ").await?;

        match io.term.read_choice("Q12?").await? {
            'Q' => break,
            '1' => choose_set(engine, user, io).await?,
            '2' => user.hot_keys = !user.hot_keys,
            '?' => print_welcome(engine, io).await?,
            _ => {}
        }
    }

    let line = format!(
        "{MENU_LOG_PREFIX}Menu in use : {} - {}",
        user.menu_set,
        if user.hot_keys { "Hot" } else { "Off" }
    );
    io.log.record(&line);
    tracing::info!(user = %user.name, set = %user.menu_set, hot_keys = user.hot_keys, "menu set configured");
    io.print("\r\n\r\n").await
}

async fn choose_set(
    engine: &EngineState,
    user: &mut UserContext,
    io: &mut SessionIo<'_>,
) -> Result<()> {
    list_menu_sets(engine, io).await?;
    io.print("\r\n\r\n|#9Enter the menu set to use : ").await?;
    let name = io
        .term
        .read_line(engine.cfg().input.menu_set_name_max)
        .await?
        .trim()
        .to_string();

    if engine.store().is_valid_set(&name, engine.entry_menu()) {
        let description = engine
            .registry()
            .map(|r| r.description(&name).to_string())
            .unwrap_or_default();
        io.print(&format!(
            "\r\n|#9Menu Set : |#2{name} :  |#1{description}\r\n"
        ))
        .await?;
        if io.term.confirm("|#5Use this menu set?").await? {
            user.menu_set = name;
            return Ok(());
        }
    }

    io.print("\r\n|#6That menu set does not exist, resetting to the default menu set\r\n")
        .await?;
    if user.menu_set.is_empty() {
        user.menu_set = engine.cfg().menus.default_set.clone();
    }
    Ok(())
}

/// Print every valid set with its description.
pub async fn list_menu_sets(engine: &EngineState, io: &mut SessionIo<'_>) -> Result<()> {
    let sets = match engine.store().list_sets() {
        Ok(sets) => sets,
        Err(e) => {
            tracing::warn!(root = %engine.store().root().display(), error = %e, "cannot list menu sets");
            Vec::new()
        }
    };
    let registry = engine.registry().ok();

    io.print("\r\n|#1Available menu sets:\r\n").await?;
    let mut any = false;
    for set in sets
        .iter()
        .filter(|s| engine.store().is_valid_set(s, engine.entry_menu()))
    {
        let description = registry.as_ref().map(|r| r.description(set)).unwrap_or("");
        io.print(&format!("|#2{set:<12} |#1{description}\r\n")).await?;
        any = true;
    }
    if !any {
        io.print("|#6No menu sets installed.\r\n").await?;
    }
    Ok(())
}

async fn print_welcome(engine: &EngineState, io: &mut SessionIo<'_>) -> Result<()> {
    match fs::read(engine.store().root().join(WELCOME_FILE)) {
        Ok(raw) => io.print(&String::from_utf8_lossy(&raw)).await,
        Err(_) => Ok(()),
    }
}
