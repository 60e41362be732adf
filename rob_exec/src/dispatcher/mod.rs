//! # Periodic dispatcher
//!
//! Runs the robot's operating modes. Each mode has an init step, run once when the mode is
//! entered, and a periodic step run every cycle while in that mode. The teleop periodic step
//! executes, in order:
//!
//! 1. Input sampling
//! 2. Toggle updates
//! 3. Drive vector building
//! 4. Frame selection
//! 5. Mecanum mixing and mechanism setpoints
//! 6. Dispatch of every setpoint to the actuator bus
//!
//! While the actuator watchdog is armed every actuator must be re-commanded within the watchdog
//! expiration, otherwise the actuators zero themselves.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod state;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::{act_driver::VoltageStatus, frame_sel::Frame, test_seq::TestStep};

pub use state::*;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Input to one dispatcher cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleInput {
    /// Mode requested by the scheduler for this cycle
    pub mode: Mode,

    /// Time at the start of the cycle.
    ///
    /// Units: seconds
    pub now_s: f64,
}

/// Status report for one dispatcher cycle.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    pub mode: Mode,

    /// True if the demands were written to the actuator bus
    pub dispatched: bool,

    /// True if the dispatch came later than the watchdog expiration after the previous one
    pub dispatch_late: bool,

    /// True if either input device was substituted by a neutral sample
    pub inputs_degraded: bool,

    /// Frame the drive command was expressed in (teleop only)
    pub frame: Option<Frame>,

    /// Heading used to de-rotate the drive command (teleop only)
    pub field_heading_deg: Option<f64>,

    /// Use of the supply voltage in the shooter compensation (teleop only)
    pub voltage: Option<VoltageStatus>,

    /// Test sequence step (test only)
    pub test_step: Option<TestStep>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Operating modes of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Disabled,
    Autonomous,
    Teleop,
    Test,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Disabled
    }
}

impl Mode {
    /// Whether the actuator watchdog is armed in this mode
    pub fn is_watchdog_armed(self) -> bool {
        match self {
            Mode::Autonomous | Mode::Teleop => true,
            Mode::Disabled | Mode::Test => false,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" => Ok(Mode::Disabled),
            "auto" | "autonomous" => Ok(Mode::Autonomous),
            "teleop" => Ok(Mode::Teleop),
            "test" => Ok(Mode::Test),
            _ => Err(format!(
                "Unknown mode \"{}\", expected one of disabled, auto, teleop, test",
                s
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
