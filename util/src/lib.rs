//! # Utility library
//!
//! Services shared by every executable in the workspace: sessions, logging, parameter files and
//! small numeric helpers.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Software root lookup
pub mod host;

/// Console and session log file setup
pub mod logger;

pub mod maths;

/// Interface of the cyclic components
pub mod module;

/// TOML parameter file loading
pub mod params;

/// Session directory and time base
pub mod session;
