//! # Robot library.
//!
//! The teleoperated control loop of a mecanum drive robot with an intake, a shooter and a
//! climber. This library allows the executable, benchmarks and tests to access the items defined
//! inside the robot crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Actuator driver - voltage compensated shooter and direct drive intake and climber
pub mod act_driver;

/// Data store - the control loop context persisting between cycles
pub mod data_store;

/// Periodic dispatcher - runs the operating modes and writes demands to the actuators
pub mod dispatcher;

/// Drive vector builder - deadzone and throttle scaling of the driver's stick
pub mod drive_vec;

/// Frame selector - robot or field oriented driving
pub mod frame_sel;

/// Hardware abstraction layer
pub mod hal;

/// Input sampler - reads the joysticks
pub mod input;

/// Mecanum kinematics - converts drive commands into wheel setpoints
pub mod mecanum;

/// Executable parameters
pub mod params;

/// Test mode actuator walkthrough
pub mod test_seq;

/// Toggle state machine - persistent state from momentary buttons
pub mod toggle;

/// Dashboard tunable parameters
pub mod tunables;
