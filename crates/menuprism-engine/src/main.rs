//! menuPrism console host
//!
//! Drives a single local session over stdin/stdout:
//! - YAML config (path from argv[1], default `menuprism.yaml`)
//! - built-in session-control and area actions
//! - sysop log to tracing (`RUST_LOG=menuprism::sysop=info`)

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use menuprism_engine::context::{Caller, DisplayCaps, UserContext};
use menuprism_engine::dispatch::{register_builtin, Dispatcher};
use menuprism_engine::obs::TracingSysopLog;
use menuprism_engine::session::{run_session, SessionOutcome};
use menuprism_engine::terminal::StreamTerminal;
use menuprism_engine::{config, EngineState};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "menuprism.yaml".into());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    let dispatcher = Dispatcher::new();
    register_builtin(&dispatcher);

    let default_set = cfg.menus.default_set.clone();
    let engine = match EngineState::new(cfg, Arc::new(dispatcher)) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "engine setup failed");
            return ExitCode::FAILURE;
        }
    };

    // the local console is the operator's seat
    let name = std::env::var("USER").unwrap_or_else(|_| "SYSOP".into());
    let caller = Caller {
        sl: 255,
        dsl: 255,
        flags: u16::MAX,
        conditional_flags: u16::MAX,
        restrictions: 0,
        operator: true,
        co_operator: true,
    };
    let mut user = UserContext::new(name.clone(), caller)
        .with_menu_set(default_set)
        .with_caps(DisplayCaps { ansi: false, color: false });

    let mut term = StreamTerminal::new(tokio::io::stdin(), tokio::io::stdout());
    let mut log = TracingSysopLog::new(name);

    tracing::info!("menuprism console starting");
    match run_session(&engine, &mut user, &mut term, &mut log).await {
        SessionOutcome::HungUp => ExitCode::SUCCESS,
        SessionOutcome::EntryUnavailable => ExitCode::FAILURE,
    }
}
