use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rTimekeeper
/// HTTP/JSON backend tracking properties, employees, time entries and timers in SQLite
#[derive(Parser)]
#[command(
    name = "rtimekeeper",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record-keeping backend for a service business: properties, employees, time entries and active timers over HTTP/JSON",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Start the HTTP API and the daily backup scheduler
    Serve {
        /// Address to listen on (overrides the configuration)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides the configuration)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Take a backup snapshot of the database now
    Backup {
        /// Destination directory (defaults to the configured backup directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Zip the snapshot
        #[arg(long)]
        compress: bool,
    },

    /// Import a legacy JSON export into the database
    Import {
        /// Legacy JSON file with `properties`, `employees` and `entries`
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
