use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::import_file;
use crate::db::Store;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let store = Store::new(&cfg.database, Duration::from_millis(cfg.busy_timeout_ms));

        info(format!("Importing {} into {}", file.display(), &cfg.database));
        let report = import_file(&store, file)?;

        success(format!(
            "Imported {} properties, {} employees, {} entries ({} employee links)",
            report.properties, report.employees, report.entries, report.links
        ));
        if report.unknown_employee_links > 0 {
            warning(format!(
                "{} entry links name employees missing from the employees list",
                report.unknown_employee_links
            ));
        }
    }

    Ok(())
}
