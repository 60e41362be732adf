//! # Data Store
//!
//! The control loop context. Everything that persists between cycles lives here and is owned by
//! the dispatcher, which lends it to each component in turn.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::{
    act_driver::VoltageStatus,
    dispatcher::Mode,
    frame_sel::FrameSel,
    test_seq::TestSeq,
    toggle::{ToggleBank, ToggleKinds},
    tunables::TunableConfig,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// The current mode, `None` before the first cycle
    pub mode: Option<Mode>,

    /// Time at which the current mode was entered
    pub mode_start_s: f64,

    // Session state
    pub toggles: ToggleBank,
    pub tunables: TunableConfig,
    pub frame_sel: FrameSel,
    pub test_seq: TestSeq,

    // Degraded state, used to report changes only
    pub inputs_degraded: bool,
    pub voltage_status: VoltageStatus,

    // Watchdog
    /// True while the actuator watchdog is armed
    pub watchdog_armed: bool,

    /// Time of the last write to the actuator bus while armed
    pub last_dispatch_s: Option<f64>,

    // Monitoring Counters
    /// Number of dispatches made later than the watchdog expiration
    pub num_late_dispatches: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Create a new data store with toggles of the given kinds.
    pub fn new(kinds: &ToggleKinds) -> Self {
        Self {
            toggles: ToggleBank::new(kinds),
            ..Self::default()
        }
    }

    /// Seconds spent in the current mode.
    pub fn mode_elapsed_s(&self, now_s: f64) -> f64 {
        now_s - self.mode_start_s
    }
}
