//! # Actuator driver
//!
//! Computes the setpoints of the mechanisms (shooter, intake, climber).
//!
//! The shooter is driven open loop with a feed-forward correction for supply voltage sag:
//!
//! ```text
//! output = base_speed * sign * kp * (ideal_voltage / measured_voltage)
//! ```
//!
//! `kp` is a tunable multiplier, there is no measured-vs-demanded feedback. The measured voltage
//! is floored at `min_supply_voltage_v` before the division, which bounds the output during a
//! brownout. If the voltage cannot be read no compensation is applied.
//!
//! The intake and climber are driven directly and are not voltage compensated.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;
use util::maths::clamp;

use crate::{toggle::ToggleStates, tunables::TunableConfig};

pub use params::*;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Inputs to the actuator driver for one cycle.
#[derive(Debug, Clone, Copy)]
pub struct InputData<'a> {
    pub toggles: &'a ToggleStates,
    pub tunables: &'a TunableConfig,

    /// Operator Y axis, in [-1, 1]
    pub operator_y: f64,

    /// Operator throttle gain, in [0, 1]
    pub operator_gain: f64,

    /// Measured supply voltage, `None` if unavailable.
    ///
    /// Units: volts
    pub supply_voltage_v: Option<f64>,
}

/// Mechanism setpoints, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutputData {
    pub shooter: f64,
    pub intake: f64,
    pub climber: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// How the supply voltage was used in the compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VoltageStatus {
    /// The measured voltage was used directly
    Nominal,

    /// The measured voltage was below the floor, the floor was used instead
    Floored,

    /// No usable measurement, no compensation applied
    Unavailable,
}

impl Default for VoltageStatus {
    fn default() -> Self {
        VoltageStatus::Nominal
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Compute the mechanism setpoints.
pub fn proc(params: &Params, input: &InputData) -> (OutputData, VoltageStatus) {
    let t = input.tunables;

    let (ratio, status) = voltage_ratio(
        t.ideal_voltage_v,
        input.supply_voltage_v,
        params.min_supply_voltage_v,
    );

    let shooter = if input.toggles.shooter_enabled {
        t.base_shooter_speed * input.toggles.shooter_sign * t.kp * ratio
    } else {
        0.0
    };

    let intake = if input.toggles.intake_enabled {
        params.intake_speed * input.toggles.intake_sign
    } else {
        match params.intake_idle {
            IntakeIdlePolicy::Zero => 0.0,
            IntakeIdlePolicy::Throttle => input.operator_gain * input.toggles.intake_sign,
        }
    };

    let output = OutputData {
        shooter: limit(apply_inversion(shooter, params.shooter_inverted)),
        intake: limit(apply_inversion(intake, params.intake_inverted)),
        climber: limit(apply_inversion(input.operator_y, params.climber_inverted)),
    };

    (output, status)
}

/// The voltage compensation ratio `ideal / measured`.
///
/// The measured voltage is floored at `floor_v`, including a reading of exactly zero. A missing,
/// non-finite or negative measurement gives a ratio of one.
pub fn voltage_ratio(ideal_v: f64, measured_v: Option<f64>, floor_v: f64) -> (f64, VoltageStatus) {
    match measured_v.filter(|v| v.is_finite() && *v >= 0.0) {
        Some(v) if v < floor_v => (ideal_v / floor_v, VoltageStatus::Floored),
        Some(v) => (ideal_v / v, VoltageStatus::Nominal),
        None => (1.0, VoltageStatus::Unavailable),
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn apply_inversion(value: f64, inverted: bool) -> f64 {
    if inverted {
        -value
    } else {
        value
    }
}

fn limit(value: f64) -> f64 {
    clamp(&value, &-1.0, &1.0)
}

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-12;

    fn toggles(shooter: bool, intake: bool) -> ToggleStates {
        ToggleStates {
            intake_enabled: intake,
            intake_sign: 1.0,
            shooter_enabled: shooter,
            shooter_sign: 1.0,
            field_oriented: false,
            yaw_reset: false,
        }
    }

    fn tunables(base: f64, kp: f64, ideal: f64) -> TunableConfig {
        TunableConfig {
            base_shooter_speed: base,
            kp,
            ideal_voltage_v: ideal,
            ..TunableConfig::default()
        }
    }

    fn run(params: &Params, t: &ToggleStates, c: &TunableConfig, y: f64, v: Option<f64>) -> (OutputData, VoltageStatus) {
        proc(
            params,
            &InputData {
                toggles: t,
                tunables: c,
                operator_y: y,
                operator_gain: 0.5,
                supply_voltage_v: v,
            },
        )
    }

    #[test]
    fn test_ideal_voltage_is_uncompensated() {
        let p = Params::default();
        let c = tunables(0.68, 0.3, 13.6);

        let (o, s) = run(&p, &toggles(true, false), &c, 0.0, Some(13.6));

        assert_eq!(s, VoltageStatus::Nominal);
        assert!((o.shooter - 0.68 * 0.3).abs() < TOL);
    }

    #[test]
    fn test_example_scenario() {
        let p = Params::default();
        let c = tunables(0.68, 0.3, 13.6);

        let (o, _) = run(&p, &toggles(true, false), &c, 0.0, Some(12.0));

        assert!((o.shooter - 0.2312).abs() < 1e-9);
    }

    #[test]
    fn test_floor_bounds_output() {
        let p = Params::default();
        let c = tunables(0.68, 0.3, 13.6);
        let at_floor = 0.68 * 0.3 * (13.6 / p.min_supply_voltage_v);

        let (o, s) = run(&p, &toggles(true, false), &c, 0.0, Some(p.min_supply_voltage_v));
        assert_eq!(s, VoltageStatus::Nominal);
        assert!((o.shooter - at_floor).abs() < TOL);

        // Continuous down to and including zero
        for &v in [1.0, 0.01, 1e-9, 0.0].iter() {
            let (o, s) = run(&p, &toggles(true, false), &c, 0.0, Some(v));
            assert_eq!(s, VoltageStatus::Floored);
            assert!((o.shooter - at_floor).abs() < TOL);
        }
    }

    #[test]
    fn test_unavailable_voltage() {
        let p = Params::default();
        let c = tunables(0.68, 0.3, 13.6);

        for &v in [None, Some(-3.0), Some(f64::NAN), Some(f64::INFINITY)].iter() {
            let (o, s) = run(&p, &toggles(true, false), &c, 0.0, v);
            assert_eq!(s, VoltageStatus::Unavailable);
            assert!((o.shooter - 0.68 * 0.3).abs() < TOL);
        }
    }

    #[test]
    fn test_shooter_sign_and_limit() {
        let p = Params::default();
        let mut t = toggles(true, false);
        t.shooter_sign = -1.0;

        let (o, _) = run(&p, &t, &tunables(1.0, 2.0, 13.6), 0.0, Some(12.0));
        assert_eq!(o.shooter, -1.0);

        let (o, _) = run(&p, &toggles(false, false), &tunables(1.0, 2.0, 13.6), 0.0, Some(12.0));
        assert_eq!(o.shooter, 0.0);
    }

    #[test]
    fn test_intake_policies() {
        let mut p = Params::default();
        let c = TunableConfig::default();

        let mut t = toggles(false, true);
        t.intake_sign = -1.0;
        let (o, _) = run(&p, &t, &c, 0.0, Some(12.0));
        assert_eq!(o.intake, -p.intake_speed);

        let (o, _) = run(&p, &toggles(false, false), &c, 0.0, Some(12.0));
        assert_eq!(o.intake, 0.0);

        p.intake_idle = IntakeIdlePolicy::Throttle;
        let (o, _) = run(&p, &toggles(false, false), &c, 0.0, Some(12.0));
        assert_eq!(o.intake, 0.5);
    }

    #[test]
    fn test_climber_pass_through() {
        let mut p = Params::default();

        // Inverted by default, no deadzone applied
        let (o, _) = run(&p, &toggles(false, false), &TunableConfig::default(), 0.03, None);
        assert_eq!(o.climber, -0.03);

        p.climber_inverted = false;
        let (o, _) = run(&p, &toggles(false, false), &TunableConfig::default(), -0.7, None);
        assert_eq!(o.climber, -0.7);
    }
}
