// src/util/log.rs

//! Logger Utility - per-level log files, so the terminal UI is never written over
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::{LazyLock, OnceLock};
use chrono::Local;

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Directory used by the global logger, set once before the first log line.
pub static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

const DEFAULT_LOG_DIR: &str = "./logs";

/// Global logger instance
pub static LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    let dir = LOG_DIR
        .get()
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

    // A logger that cannot open its files must not take the app down with it.
    Logger::new(&dir).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger in {}: {}", dir.display(), e);
        Logger::disabled()
    })
});

/// Point the global logger at `dir`. Only effective before the first log call.
pub fn init_log_dir(dir: impl Into<PathBuf>) {
    let _ = LOG_DIR.set(dir.into());
}

/// Log severity levels
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

#[derive(Debug)]
struct LogFiles {
    error_file: Mutex<File>,
    warn_file: Mutex<File>,
    info_file: Mutex<File>,
    debug_file: Mutex<File>,
}

/// Logger that writes to separate files by severity
#[derive(Debug)]
pub struct Logger {
    files: Option<LogFiles>,
}

impl Logger {
    /// Create a new logger writing into `log_dir`
    pub fn new(log_dir: &Path) -> std::io::Result<Self> {
        DEBUG_ENABLED.get_or_init(|| {
            std::env::var("DEBUG").unwrap_or_default() == "true"
        });

        create_dir_all(log_dir)?;

        // start fresh each run
        let files = LogFiles {
            error_file: Mutex::new(File::create(log_dir.join("error.log"))?),
            warn_file: Mutex::new(File::create(log_dir.join("warn.log"))?),
            info_file: Mutex::new(File::create(log_dir.join("info.log"))?),
            debug_file: Mutex::new(File::create(log_dir.join("debug.log"))?),
        };

        Ok(Self { files: Some(files) })
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Self { files: None }
    }

    fn write_log(&self, level: LogLevel, message: &str) {
        let Some(files) = &self.files else {
            return;
        };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let formatted = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);

        let file = match level {
            LogLevel::Error => &files.error_file,
            LogLevel::Warn => &files.warn_file,
            LogLevel::Info => &files.info_file,
            LogLevel::Debug => &files.debug_file,
        };

        if let Ok(mut file) = file.lock() {
            let _ = file.write_all(formatted.as_bytes());
            let _ = file.flush();
        }
    }

    pub fn error(&self, message: &str) {
        self.write_log(LogLevel::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.write_log(LogLevel::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.write_log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.write_log(LogLevel::Debug, message);
    }
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.error(&message);
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.warn(&message);
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.info(&message);
    }};
}

/// Convenience macro for debug logging with formatting
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if *$crate::util::log::DEBUG_ENABLED.get().unwrap_or(&false) {
            let message = format!($($arg)*);
            $crate::util::log::LOGGER.debug(&message);
        }
    }};
}
