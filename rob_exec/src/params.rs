//! # Robot Executable Parameters
//!
//! This module provides the static parameters for the robot executable, loaded from
//! `params/rob_exec.toml`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{act_driver, drive_vec, input::ButtonMap, mecanum, test_seq, toggle::ToggleKinds};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RobExecParams {
    /// Target period of one control cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Time after which an actuator which has not been re-commanded zeros its output.
    ///
    /// Units: seconds
    pub watchdog_expiration_s: f64,

    pub buttons: ButtonMap,

    pub toggles: ToggleKinds,

    pub drive: drive_vec::Params,

    pub mecanum: mecanum::Params,

    pub act: act_driver::Params,

    pub auto: AutoParams,

    pub test_mode: test_seq::Params,
}

/// Parameters for the autonomous drive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoParams {
    /// Open loop drive command as `[vx, vy, omega]`, in joystick axes.
    pub drive_cmd: [f64; 3],
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("The cycle period must be positive, found {0} s")]
    InvalidCyclePeriod(f64),

    #[error(
        "The cycle period ({period_s} s) must be shorter than the watchdog expiration \
        ({expiration_s} s)"
    )]
    CycleExceedsWatchdog { period_s: f64, expiration_s: f64 },

    #[error("Button `{0}` is assigned to index {1}, which the device cannot report")]
    ButtonOutOfRange(&'static str, u8),

    #[error("Button assignments must be unique on each device")]
    InvalidButtonMap,

    #[error("{0} must be between 0 and 1, found {1}")]
    OutOfRange(&'static str, f64),

    #[error("The minimum supply voltage must be positive, found {0} V")]
    InvalidVoltageFloor(f64),

    #[error("The drive epsilon must be positive, found {0}")]
    InvalidEpsilon(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for RobExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            watchdog_expiration_s: 0.1,
            buttons: ButtonMap::default(),
            toggles: ToggleKinds::default(),
            drive: drive_vec::Params::default(),
            mecanum: mecanum::Params::default(),
            act: act_driver::Params::default(),
            auto: AutoParams::default(),
            test_mode: test_seq::Params::default(),
        }
    }
}

impl Default for AutoParams {
    fn default() -> Self {
        Self {
            drive_cmd: [0.0, -0.5, 0.0],
        }
    }
}

impl RobExecParams {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), ParamsError> {
        if !(self.cycle_period_s > 0.0) {
            return Err(ParamsError::InvalidCyclePeriod(self.cycle_period_s));
        }

        if !(self.cycle_period_s < self.watchdog_expiration_s) {
            return Err(ParamsError::CycleExceedsWatchdog {
                period_s: self.cycle_period_s,
                expiration_s: self.watchdog_expiration_s,
            });
        }

        if let Some((name, index)) = self.buttons.out_of_range() {
            return Err(ParamsError::ButtonOutOfRange(name, index));
        }

        if !self.buttons.is_valid() {
            return Err(ParamsError::InvalidButtonMap);
        }

        if !(self.drive.epsilon > 0.0) {
            return Err(ParamsError::InvalidEpsilon(self.drive.epsilon));
        }

        if !(self.act.min_supply_voltage_v > 0.0) {
            return Err(ParamsError::InvalidVoltageFloor(self.act.min_supply_voltage_v));
        }

        let unit_ranged = [
            ("Intake speed", self.act.intake_speed),
            ("Test drive power", self.test_mode.drive_power),
            ("Test intake power", self.test_mode.intake_power),
            ("Test climber power", self.test_mode.climber_power),
            ("Test shooter power", self.test_mode.shooter_power),
            ("Autonomous vx", self.auto.drive_cmd[0].abs()),
            ("Autonomous vy", self.auto.drive_cmd[1].abs()),
            ("Autonomous omega", self.auto.drive_cmd[2].abs()),
        ];

        for &(name, value) in unit_ranged.iter() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::OutOfRange(name, value));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert_eq!(RobExecParams::default().are_valid(), Ok(()));
    }

    #[test]
    fn test_invalid() {
        let mut p = RobExecParams::default();
        p.cycle_period_s = 0.2;
        assert!(matches!(
            p.are_valid(),
            Err(ParamsError::CycleExceedsWatchdog { .. })
        ));

        let mut p = RobExecParams::default();
        p.act.min_supply_voltage_v = 0.0;
        assert_eq!(p.are_valid(), Err(ParamsError::InvalidVoltageFloor(0.0)));

        let mut p = RobExecParams::default();
        p.act.intake_speed = 1.2;
        assert_eq!(
            p.are_valid(),
            Err(ParamsError::OutOfRange("Intake speed", 1.2))
        );

        let mut p = RobExecParams::default();
        p.buttons.intake_reverse = p.buttons.intake_toggle;
        assert_eq!(p.are_valid(), Err(ParamsError::InvalidButtonMap));

        let mut p = RobExecParams::default();
        p.buttons.shooter_toggle = 40;
        assert_eq!(
            p.are_valid(),
            Err(ParamsError::ButtonOutOfRange("shooter_toggle", 40))
        );
    }

    #[test]
    fn test_params_file() {
        let s = include_str!("../../params/rob_exec.toml");
        let p: RobExecParams = util::params::from_str(s).unwrap();

        assert_eq!(p.are_valid(), Ok(()));
        assert_eq!(p, RobExecParams::default());
    }
}
