//! Point-in-time copies of the database file, on demand or on a fixed schedule.

use crate::config::Config;
use crate::db::Store;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use zip::ZipWriter;
use zip::write::FileOptions;

pub const BACKUP_PREFIX: &str = "db-backup-";

/// `db-backup-2024-01-01T09-30-00-000Z`: ISO-8601 with `:` and `.` made filesystem safe.
pub fn backup_file_name(at: DateTime<Utc>) -> String {
    let stamp = at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
    format!("{}{}", BACKUP_PREFIX, stamp.replace([':', '.'], "-"))
}

pub struct BackupLogic;

impl BackupLogic {
    /// Write a snapshot of the store into `dest_dir`, returning the path written.
    pub fn snapshot(store: &Store, dest_dir: &Path, compress: bool) -> AppResult<PathBuf> {
        let src = store.path();

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        fs::create_dir_all(dest_dir)?;

        // 3️⃣ Write a consistent copy from one read transaction; live writers
        //    and WAL checkpoints cannot tear it
        let dest = dest_dir.join(backup_file_name(Utc::now()));
        let target = dest
            .to_str()
            .ok_or_else(|| AppError::Backup(format!("invalid backup path {}", dest.display())))?;
        let pool = store.connect()?;
        pool.conn.execute("VACUUM INTO ?1", [target])?;
        drop(pool);

        // 4️⃣ Optional compression
        if !compress {
            return Ok(dest);
        }

        let compressed = compress_backup(&dest)?;
        if let Err(e) = fs::remove_file(&dest) {
            tracing::warn!(path = %dest.display(), error = %e, "failed to remove uncompressed backup");
        }
        Ok(compressed)
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Backup(format!("invalid backup path {}", path.display())))?;

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options)
        .map_err(|e| AppError::Backup(e.to_string()))?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(|e| AppError::Backup(e.to_string()))?;

    Ok(zip_path)
}

/// Where and how often the scheduler snapshots the store.
#[derive(Debug, Clone)]
pub struct BackupSchedule {
    pub dir: PathBuf,
    pub every: Duration,
    pub compress: bool,
}

impl BackupSchedule {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            dir: cfg.backup_path(),
            every: Duration::from_secs(cfg.backup_interval_hours.max(1) * 60 * 60),
            compress: cfg.backup_compress,
        }
    }
}

/// Snapshot the store once per `schedule.every`, starting one period from now.
/// Failures are logged and wait for the next tick. Returns when `shutdown` flips
/// or its sender is dropped.
pub fn spawn_scheduler(
    store: Store,
    schedule: BackupSchedule,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + schedule.every, schedule.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            dir = %schedule.dir.display(),
            every_secs = schedule.every.as_secs(),
            "backup scheduler started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let store = store.clone();
                    let dir = schedule.dir.clone();
                    let compress = schedule.compress;
                    let result = tokio::task::spawn_blocking(move || {
                        BackupLogic::snapshot(&store, &dir, compress)
                    })
                    .await;

                    match result {
                        Ok(Ok(path)) => tracing::info!(path = %path.display(), "backup created"),
                        Ok(Err(e)) => tracing::error!(error = %e, "backup failed"),
                        Err(e) => tracing::error!(error = %e, "backup task panicked"),
                    }
                }
                _ = shutdown.changed() => break,
            }
        }

        tracing::info!("backup scheduler stopped");
    })
}
