//! # Mecanum kinematics
//!
//! Mixes a drive command into the four wheel setpoints of a mecanum drivetrain. When the command
//! carries a field heading the translation is rotated by it before mixing.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::act::{ActDems, DRV_ACT_IDS};
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::drive_vec::DriveCommand;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of drive wheels
pub const NUM_DRV_AXES: usize = 4;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the mecanum mix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Params {
    /// Inversion of each drive motor, in `[FL, FR, RL, RR]` order.
    pub drv_inverted: [bool; NUM_DRV_AXES],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        // Left side motors are mounted mirrored
        Self {
            drv_inverted: [true, false, true, false],
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Wheel speeds for a command, in `[FL, FR, RL, RR]` order, before motor inversion.
///
/// Speeds are scaled down together so that none exceeds 1.
pub fn wheel_speeds(cmd: &DriveCommand) -> [f64; NUM_DRV_AXES] {
    // Stick y is negative forward
    let mut v = Vector2::new(cmd.vx, -cmd.vy);

    if let Some(h) = cmd.field_heading_deg {
        v = Rotation2::new(h.to_radians()) * v;
    }

    let (x, y, w) = (v.x, v.y, cmd.omega);
    let mut speeds = [x + y + w, -x + y - w, -x + y + w, x + y - w];

    let max = speeds.iter().fold(0f64, |m, s| m.max(s.abs()));
    if max > 1.0 {
        for s in speeds.iter_mut() {
            *s /= max;
        }
    }

    speeds
}

/// Write the drive motor setpoints for a command into the demands.
pub fn set_dems(cmd: &DriveCommand, params: &Params, dems: &mut ActDems) {
    let speeds = wheel_speeds(cmd);

    for i in 0..NUM_DRV_AXES {
        let s = if params.drv_inverted[i] { -speeds[i] } else { speeds[i] };
        dems.set(DRV_ACT_IDS[i], s);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::act::ActId;

    const TOL: f64 = 1e-12;

    fn assert_speeds(a: [f64; 4], b: [f64; 4]) {
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < TOL, "{:?} != {:?}", a, b);
        }
    }

    fn cmd(vx: f64, vy: f64, omega: f64, heading: Option<f64>) -> DriveCommand {
        DriveCommand {
            vx,
            vy,
            omega,
            field_heading_deg: heading,
        }
    }

    #[test]
    fn test_pure_motions() {
        // Forward
        assert_speeds(wheel_speeds(&cmd(0.0, -0.5, 0.0, None)), [0.5, 0.5, 0.5, 0.5]);
        // Strafe right
        assert_speeds(wheel_speeds(&cmd(0.5, 0.0, 0.0, None)), [0.5, -0.5, -0.5, 0.5]);
        // Turn clockwise
        assert_speeds(wheel_speeds(&cmd(0.0, 0.0, 0.5, None)), [0.5, -0.5, 0.5, -0.5]);
    }

    #[test]
    fn test_normalised() {
        let s = wheel_speeds(&cmd(1.0, -1.0, 1.0, None));
        assert_speeds(s, [1.0, -1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]);
    }

    #[test]
    fn test_field_heading_rotates() {
        // Field forward while the robot faces 90 degrees gives a robot frame strafe
        let field = wheel_speeds(&cmd(0.0, -0.5, 0.0, Some(90.0)));
        let robot = wheel_speeds(&cmd(-0.5, 0.0, 0.0, None));
        assert_speeds(field, robot);

        // Zero heading is the same as robot frame
        assert_speeds(
            wheel_speeds(&cmd(0.3, -0.2, 0.1, Some(0.0))),
            wheel_speeds(&cmd(0.3, -0.2, 0.1, None)),
        );
    }

    #[test]
    fn test_inversion() {
        let mut dems = ActDems::default();
        set_dems(&cmd(0.0, -0.5, 0.0, None), &Params::default(), &mut dems);

        assert_eq!(dems.get(ActId::DrvFL), -0.5);
        assert_eq!(dems.get(ActId::DrvFR), 0.5);
        assert_eq!(dems.get(ActId::DrvRL), -0.5);
        assert_eq!(dems.get(ActId::DrvRR), 0.5);
    }
}
