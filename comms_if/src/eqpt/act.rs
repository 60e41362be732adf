//! # Actuator Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// All actuators on the robot, drive motors first.
pub const ALL_ACT_IDS: [ActId; 7] = [
    ActId::DrvFL,
    ActId::DrvFR,
    ActId::DrvRL,
    ActId::DrvRR,
    ActId::Shooter,
    ActId::Intake,
    ActId::Climber,
];

/// The drive motors, in `[FL, FR, RL, RR]` order.
pub const DRV_ACT_IDS: [ActId; 4] = [ActId::DrvFL, ActId::DrvFR, ActId::DrvRL, ActId::DrvRR];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Setpoints sent to the actuator bus every period.
///
/// Every setpoint is a normalised output in the range [-1, +1].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActDems {
    pub setpoint: HashMap<ActId, f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of all actuators available to the robot
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum ActId {
    DrvFL,
    DrvFR,
    DrvRL,
    DrvRR,
    Shooter,
    Intake,
    Climber,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl Default for ActDems {
    fn default() -> Self {
        Self {
            setpoint: ALL_ACT_IDS.iter().map(|&id| (id, 0.0)).collect(),
        }
    }
}

impl ActDems {
    /// Get the setpoint of an actuator, zero if it has not been set.
    pub fn get(&self, id: ActId) -> f64 {
        self.setpoint.get(&id).copied().unwrap_or(0.0)
    }

    /// Set the setpoint of an actuator, limiting it to [-1, +1].
    ///
    /// Non-finite values are replaced with zero.
    pub fn set(&mut self, id: ActId, value: f64) {
        let value = if value.is_finite() {
            value.max(-1.0).min(1.0)
        } else {
            0.0
        };

        self.setpoint.insert(id, value);
    }

    /// Returns true if every actuator is demanded to be stationary.
    pub fn is_zero(&self) -> bool {
        self.setpoint.values().all(|&v| v == 0.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let dems = ActDems::default();
        assert!(dems.is_zero());
        for id in ALL_ACT_IDS.iter() {
            assert_eq!(dems.get(*id), 0.0);
        }
    }

    #[test]
    fn test_set_limits() {
        let mut dems = ActDems::default();

        dems.set(ActId::Shooter, 1.7);
        dems.set(ActId::Intake, -2.0);
        dems.set(ActId::Climber, f64::NAN);

        assert_eq!(dems.get(ActId::Shooter), 1.0);
        assert_eq!(dems.get(ActId::Intake), -1.0);
        assert_eq!(dems.get(ActId::Climber), 0.0);
    }
}
