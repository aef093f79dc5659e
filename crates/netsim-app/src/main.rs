//! netsim entry point.
//!
//! Interactive router/switch CLI on stdin/stdout. Type `?` for the commands
//! legal at the current prompt, `<text>?` to complete, and `quit` (or EOF)
//! to save the device state and leave.

mod args;
mod render;
mod repl;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use args::{Options, USAGE};
use netsim_state::{FileStore, MemoryStore, StateStore};
use netsim_terminal::{Catalog, LogDiagnostics, Session};
use netsim_types::SimConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse(std::env::args().skip(1))?;
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }

    // Configuration from --config, then NETSIM_CONFIG, then defaults.
    let config_path = options
        .config
        .clone()
        .or_else(|| std::env::var_os("NETSIM_CONFIG").map(PathBuf::from));
    let mut config = match &config_path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => SimConfig::default(),
    };
    options.apply(&mut config);

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading command catalog {}", path.display()))?,
        None => Catalog::builtin()?,
    };

    let store: Box<dyn StateStore> = if options.memory {
        log::info!("Device state kept in memory only");
        Box::new(MemoryStore::new())
    } else {
        let store = FileStore::open(&config.state_path)
            .with_context(|| format!("opening device state {}", config.state_path.display()))?;
        Box::new(store)
    };

    let mut session = Session::new(catalog, store, &config, Box::new(LogDiagnostics))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&mut session, stdin.lock(), &mut stdout)?;

    log::info!("Session ended after {} command(s)", session.history().len());
    Ok(())
}
