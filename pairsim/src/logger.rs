//! This module defines how to print logging messages.
//!
//! # Example
//!
//! ```
//! pairsim::logger::init(log::LevelFilter::Debug);
//!
//! log::info!("Hello, world!");
//! log::debug!("This is a debug message.");
//! ```
//!
//! Lines go to stderr so stdout stays clean for JSON output.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

static START: OnceLock<Instant> = OnceLock::new();
static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = std::io::stderr().write_all(format_msg(record).as_bytes());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the stderr logger. Later calls only change the level.
pub fn init(level: LevelFilter) {
    START.get_or_init(Instant::now);
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Format a logging message.
pub fn format_msg(record: &Record) -> String {
    let msec = START.get_or_init(Instant::now).elapsed().as_millis();
    let head = format!("[{:>10} {}] ", msec, record.level().as_str());

    match record.level() {
        Level::Info => format!("{head}{}\n", record.args()),
        _ => {
            if let (Some(file), Some(line)) = (record.file(), record.line()) {
                format!("{head}{file}:{line}: {}\n", record.args())
            } else {
                format!("{head}{}\n", record.args())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_have_no_location() {
        let msg = format_msg(
            &Record::builder()
                .args(format_args!("ready"))
                .level(Level::Info)
                .file(Some("src/main.rs"))
                .line(Some(3))
                .build(),
        );
        assert!(msg.ends_with("INFO] ready\n"), "{msg}");
    }

    #[test]
    fn other_levels_carry_location() {
        let msg = format_msg(
            &Record::builder()
                .args(format_args!("odd"))
                .level(Level::Warn)
                .file(Some("src/lib.rs"))
                .line(Some(42))
                .build(),
        );
        assert!(msg.ends_with("WARN] src/lib.rs:42: odd\n"), "{msg}");
    }
}
