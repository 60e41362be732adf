//! Parameters structure for the actuator driver

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the actuator driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Params {
    /// Intake output magnitude while the intake is enabled, in [0, 1]
    pub intake_speed: f64,

    /// Intake behaviour while the intake is not enabled
    pub intake_idle: IntakeIdlePolicy,

    /// Lowest supply voltage used in the shooter voltage compensation. Readings below this are
    /// replaced by it, which sets the maximum compensation boost.
    ///
    /// Units: volts
    pub min_supply_voltage_v: f64,

    pub shooter_inverted: bool,
    pub intake_inverted: bool,

    /// The operator stick reads negative when pushed forward, so the climber is inverted to
    /// climb on forward stick.
    pub climber_inverted: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Intake output while the intake toggle is off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IntakeIdlePolicy {
    /// Intake is stopped
    Zero,

    /// Intake runs proportional to the operator's throttle gain, in the intake direction
    Throttle,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            intake_speed: 0.7,
            intake_idle: IntakeIdlePolicy::Zero,
            min_supply_voltage_v: 6.8,
            shooter_inverted: false,
            intake_inverted: false,
            climber_inverted: true,
        }
    }
}
