//! Session management
//!
//! A session is one run of an executable. It owns a directory under the software root holding
//! the run's log and a record of the parameters it ran with, and it provides the time base used
//! by the log and by the control loop.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<Epoch> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// A chrono format string which diplays a timestamp. See
/// https://docs.rs/chrono/0.4.11/chrono/format/strftime/index.html for more
/// information.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A struct storing information about the current session
#[derive(Clone, Debug)]
pub struct Session {
    /// The root directory for this session
    pub session_root: PathBuf,

    /// The path to the session's log file
    pub log_file_path: PathBuf,
}

/// Start of the session.
///
/// The wall clock time names the session, elapsed time is measured on the monotonic clock so
/// that cycle timestamps never jump when the system clock is adjusted.
#[derive(Debug)]
struct Epoch {
    wall: DateTime<Utc>,
    mono: Instant,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the session module.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable (ROBOT_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot create the session directory: {0}")]
    CannotCreateDir(std::io::Error),

    #[error(
        "Cannot initialise the session epoch, have you already initialised the\
         session? (conquer_once error: {0})"
    )]
    CannotInitEpoch(conquer_once::TryInitError),

    #[error("Cannot get the epoch time, did you forget to initialise the session?")]
    CannotGetEpoch,

    #[error("Cannot serialise the parameters: {0}")]
    CannotSerialiseParams(toml::ser::Error),

    #[error("Cannot write the parameter record: {0}")]
    CannotWriteParams(std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start a new session within the given directory.
    ///
    /// This will create a new session directory named `{exec_name}_{timestamp}`
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        // Set the session epoch
        SESSION_EPOCH
            .try_init_once(|| Epoch {
                wall: Utc::now(),
                mono: Instant::now(),
            })
            .map_err(SessionError::CannotInitEpoch)?;

        let timestamp = get_epoch()
            .ok_or(SessionError::CannotGetEpoch)?
            .format(TIMESTAMP_FORMAT);

        // Get the root directory
        let root = crate::host::get_sw_root().map_err(|_| SessionError::SwRootNotSet)?;

        let mut path: PathBuf = root;
        path.push(sessions_dir);
        path.push(format!("{}_{}", exec_name, timestamp));

        fs::create_dir_all(&path).map_err(SessionError::CannotCreateDir)?;

        let log_file_path = path.join(format!("{}.log", exec_name));

        Ok(Session {
            session_root: path,
            log_file_path,
        })
    }

    /// Write the parameters this session is running with into the session directory, as TOML.
    ///
    /// The record can be copied back into `params/` to reproduce the run.
    pub fn record_params<P>(&self, file_name: &str, params: &P) -> Result<PathBuf, SessionError>
    where
        P: Serialize,
    {
        let params_str =
            toml::to_string(params).map_err(SessionError::CannotSerialiseParams)?;

        let path = self.session_root.join(file_name);
        fs::write(&path, params_str).map_err(SessionError::CannotWriteParams)?;

        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the number of seconds elapsed since the start of the session.
///
/// Monotonic. Returns NaN if no session has been started, so that log lines written before the
/// session exists can still be formatted.
pub fn get_elapsed_seconds() -> f64 {
    match SESSION_EPOCH.get() {
        Some(e) => e.mono.elapsed().as_secs_f64(),
        None => std::f64::NAN,
    }
}

/// Return the wall clock time at which the session started, or `None` if no session has been
/// started.
pub fn get_epoch() -> Option<&'static DateTime<Utc>> {
    SESSION_EPOCH.get().map(|e| &e.wall)
}
