//! # Drive vector builder
//!
//! Maps the driver's stick onto a translation and rotation command. A radial deadzone is applied
//! to the translation (x, y) pair only, the twist axis is passed through so that fine turning
//! control is kept. Both are then scaled by the driver's throttle gain.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::maths::{clamp, norm};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the drive vector builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Params {
    /// Stick magnitudes below this are treated as exactly zero, and the direction is not
    /// normalised.
    pub epsilon: f64,
}

/// Translation and rotation demand for the drivetrain.
///
/// Axes follow the joystick convention: +x is right, +y is backwards, +omega is clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DriveCommand {
    pub vx: f64,
    pub vy: f64,
    pub omega: f64,

    /// Heading of the robot in the field frame, only set when the translation is expressed in the
    /// field frame.
    ///
    /// Units: degrees
    pub field_heading_deg: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self { epsilon: 1e-6 }
    }
}

impl DriveCommand {
    /// Command with no motion
    pub fn stop() -> Self {
        Self::default()
    }

    /// Magnitude of the translation part of the command
    pub fn translation_mag(&self) -> f64 {
        norm(&[self.vx, self.vy], &[0.0, 0.0]).unwrap_or(0.0)
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build a drive command from the driver's axes.
///
/// `deadzone` is the radius, in stick units, inside which translation is zero. Outside it the
/// magnitude is reduced by `deadzone` so the output grows from zero at the boundary, and is
/// limited to 1.
pub fn build(x: f64, y: f64, z: f64, throttle_gain: f64, deadzone: f64, params: &Params) -> DriveCommand {
    let magnitude = norm(&[x, y], &[0.0, 0.0]).unwrap_or(0.0);

    let (vx, vy) = if magnitude < params.epsilon {
        (0.0, 0.0)
    } else {
        let (dir_x, dir_y) = (x / magnitude, y / magnitude);

        let effective_mag = if magnitude < deadzone {
            0.0
        } else {
            clamp(&(magnitude - deadzone), &0.0, &1.0)
        };

        (
            dir_x * effective_mag * throttle_gain,
            dir_y * effective_mag * throttle_gain,
        )
    };

    DriveCommand {
        vx,
        vy,
        omega: z * throttle_gain,
        field_heading_deg: None,
    }
}
