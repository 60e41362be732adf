//! Logger setup
//!
//! Log lines go to two places: the console, and the session's log file. At the control rate
//! trace output is far too fast to read on a console, so each destination has its own level.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use fern;
use colored::{ColoredString, Colorize};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level less than `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Notes
///
/// - Both levels must be `Info` or more verbose, so that mode changes and degraded states always
///   reach both outputs.
/// - Only the console is coloured.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    console_level: self::LevelFilter,
    file_level: self::LevelFilter,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    for level in [console_level, file_level].iter() {
        if *level < log::Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(*level))
        }
    }

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileInitError)?;

    let console = fern::Dispatch::new()
        .format(|out, message, record| format_line(out, message, record, true))
        .level(console_level)
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .format(|out, message, record| format_line(out, message, record, false))
        .level(file_level)
        .chain(log_file);

    fern::Dispatch::new()
        .chain(console)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    if let Some(epoch) = session::get_epoch() {
        info!("    Session epoch: {}", epoch);
    }
    info!("    Console log level: {:?}", console_level);
    info!("    File log level: {:?}", file_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn format_line(
    out: fern::FormatCallback,
    message: &std::fmt::Arguments,
    record: &log::Record,
    coloured: bool
) {
    let level = level_to_str(record.level(), coloured);

    // If debug or trace include the target, otherwise don't include it
    if record.level() > log::Level::Info {
        out.finish(format_args!(
            "[{:10.6} {}] {}: {}",
            session::get_elapsed_seconds(),
            level,
            record.target(),
            message
        ))
    }
    else {
        out.finish(format_args!(
            "[{:10.6} {}] {}",
            session::get_elapsed_seconds(),
            level,
            message
        ))
    }
}

/// Get the string representation of a log level
fn level_to_str(level: log::Level, coloured: bool) -> ColoredString {
    let tag = match level {
        log::Level::Trace => "TRC",
        log::Level::Debug => "DBG",
        log::Level::Info  => "INF",
        log::Level::Warn  => "WRN",
        log::Level::Error => "ERR"
    };

    if !coloured {
        return tag.clear()
    }

    match level {
        log::Level::Trace => tag.dimmed().italic(),
        log::Level::Debug => tag.dimmed(),
        log::Level::Info  => tag.normal(),
        log::Level::Warn  => tag.yellow(),
        log::Level::Error => tag.red().bold()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level_tags() {
        assert_eq!(level_to_str(log::Level::Warn, false).to_string(), "WRN");
        assert_eq!(level_to_str(log::Level::Trace, false).to_string(), "TRC");
    }
}
