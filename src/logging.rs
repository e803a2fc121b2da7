use anyhow::{Context, Result}; // Importing Result type from anyhow for error handling
use chrono::Local; // Importing Local from chrono to get the current date and time
use crossterm::style::Stylize; // Importing Stylize from crossterm to style log levels
use log::{Level, LevelFilter, Metadata, Record}; // Importing logging types from the log crate
use std::{
    fs::{File, OpenOptions}, // Importing File and OpenOptions for file operations
    io::Write,               // Importing Write trait for writing to files
    path::Path,              // Importing Path to handle file paths
    sync::Mutex,             // Importing Mutex for thread-safe access to files
};

// Console logger that can also append to a log file and an error-only file
pub struct Logger {
    log_file: Option<Mutex<File>>,   // Optional log file wrapped in a Mutex
    error_file: Option<Mutex<File>>, // Optional error file wrapped in a Mutex
    level: LevelFilter,              // Log level filter to control which log messages are recorded
}

impl Logger {
    // Initialize the logger with optional log and error file paths and a log level
    pub fn init(log_path: Option<&Path>, error_path: Option<&Path>, level: LevelFilter) -> Result<()> {
        let logger = Self::new(log_path, error_path, level)?;

        // Set the global logger to the newly created logger
        log::set_boxed_logger(Box::new(logger)).context("A logger is already installed")?;
        log::set_max_level(level);

        Ok(())
    }

    // Build a logger without installing it globally
    pub fn new(log_path: Option<&Path>, error_path: Option<&Path>, level: LevelFilter) -> Result<Self> {
        Ok(Logger {
            log_file: log_path.map(Self::open_append).transpose()?,
            error_file: error_path.map(Self::open_append).transpose()?,
            level,
        })
    }

    fn open_append(path: &Path) -> Result<Mutex<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        Ok(Mutex::new(file))
    }

    // Plain line written to files: timestamp, level, target, message
    fn format_plain(record: &Record) -> String {
        format!(
            "[{}] {} - {}: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    }

    // Console line with the level coloured by severity
    fn format_console(record: &Record) -> String {
        let level_str = match record.level() {
            Level::Error => record.level().to_string().red(),
            Level::Warn => record.level().to_string().yellow(),
            Level::Info => record.level().to_string().green(),
            Level::Debug => record.level().to_string().blue(),
            Level::Trace => record.level().to_string().magenta(),
        };

        format!(
            "[{}] {} - {}: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level_str,
            record.target(),
            record.args()
        )
    }

    fn write_to(file: &Option<Mutex<File>>, line: &str) {
        if let Some(file) = file {
            if let Ok(mut file) = file.lock() {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }
}

// Implement the Log trait for the Logger struct
impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprint!("{}", Self::format_console(record));

        let plain = Self::format_plain(record);
        Self::write_to(&self.log_file, &plain);
        if record.level() == Level::Error {
            Self::write_to(&self.error_file, &plain);
        }
    }

    fn flush(&self) {
        for file in [&self.log_file, &self.error_file].into_iter().flatten() {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
