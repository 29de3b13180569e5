use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::Store;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with every table
pub fn handle(cli: &Cli) -> AppResult<()> {
    let existing = cli
        .db
        .as_deref()
        .map(|p| Path::new(p).exists())
        .unwrap_or_else(|| Config::database_file().exists());

    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    info("Initializing rTimekeeper…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", &cfg.database));

    if existing {
        warning("Database already exists: keeping its data, adding missing tables only");
    }
    Store::open(&cfg)?;

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
