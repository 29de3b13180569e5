use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::Store;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { dir, compress } = cmd {
        let store = Store::open(cfg)?;
        let dest_dir = dir.clone().unwrap_or_else(|| cfg.backup_path());
        let path = BackupLogic::snapshot(&store, &dest_dir, *compress || cfg.backup_compress)?;
        success(format!("Backup created: {}", path.display()));
    }

    Ok(())
}
