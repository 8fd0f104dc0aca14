//! Logging setup
//!
//! Console output goes through a global `tracing-subscriber` fmt
//! subscriber installed by [`setup_logging`]. A [`LogMirror`] copies events
//! to a timestamped file for as long as it is held, and echoes them to the
//! console only when that subscriber was installed.

use crate::storage::StorageError;
use crate::Result;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "vetharvest=info,warn";

static ACTIVE_DIRECTIVE: OnceLock<String> = OnceLock::new();

/// Filter directive for a verbosity level
pub fn filter_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => DEFAULT_DIRECTIVE,
        1 => "vetharvest=debug,info",
        2 => "vetharvest=trace,debug",
        _ => "trace",
    }
}

/// Installs the global console subscriber
///
/// `RUST_LOG` overrides the verbosity flags when set.
pub fn setup_logging(verbose: u8, quiet: bool) {
    let directive = filter_directive(verbose, quiet);
    let _ = ACTIVE_DIRECTIVE.set(directive.to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .try_init();
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Scoped copy of log output into `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.log`
///
/// While the mirror is held, events on the current thread go to the file,
/// and to the console as well when [`setup_logging`] has run. Dropping it restores the previous subscriber and
/// flushes the file.
pub struct LogMirror {
    path: PathBuf,
    file: Arc<File>,
    echoes_console: bool,
    _guard: DefaultGuard,
}

impl LogMirror {
    pub fn acquire(dir: &Path, prefix: &str) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("{}_{}.log", prefix, timestamp));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::io(&path, e))?;
        let file = Arc::new(file);

        let active = ACTIVE_DIRECTIVE.get().map(String::as_str);
        let console = active.map(|_| fmt::layer().with_target(false));
        let subscriber = tracing_subscriber::registry()
            .with(build_filter(active.unwrap_or(DEFAULT_DIRECTIVE)))
            .with(console)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::clone(&file)),
            );

        Ok(Self {
            path,
            file,
            echoes_console: active.is_some(),
            _guard: tracing::subscriber::set_default(subscriber),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if events also go to the console while the mirror is held
    pub fn echoes_console(&self) -> bool {
        self.echoes_console
    }
}

impl Drop for LogMirror {
    fn drop(&mut self) {
        tracing::info!("Log saved to {}", self.path.display());
        if let Err(e) = (&*self.file).flush() {
            eprintln!("Failed to flush {}: {}", self.path.display(), e);
        }
    }
}
