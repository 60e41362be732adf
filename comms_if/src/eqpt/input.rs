//! # Input Device Samples
//!
//! Raw readings from the operator input devices (joysticks).

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Raw throttle value corresponding to the minimum gain. The physical dial is inverted so +1
/// gives a gain of zero.
pub const THROTTLE_RAW_MIN_GAIN: f64 = 1.0;

/// Highest button index a device can report.
pub const MAX_BUTTON: u8 = 32;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single reading of one input device.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DeviceSample {
    /// X axis, in [-1, +1]
    pub x: f64,

    /// Y axis, in [-1, +1]. Pushing the stick forward gives a negative value.
    pub y: f64,

    /// Z (twist) axis, in [-1, +1]
    pub z: f64,

    /// Raw throttle dial, in [-1, +1]
    pub throttle: f64,

    /// Button states, bit `n - 1` is button `n`.
    pub buttons: Buttons,
}

/// Bitset of the pressed buttons on a device. Buttons are numbered from 1.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons(pub u32);

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl DeviceSample {
    /// The sample substituted for a device which is absent: all axes centred, throttle at
    /// minimum gain, and no buttons pressed.
    pub fn neutral() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            throttle: THROTTLE_RAW_MIN_GAIN,
            buttons: Buttons::default(),
        }
    }
}

impl Default for DeviceSample {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Buttons {
    /// Returns true if the given button is pressed. Button 0 (unassigned) is never pressed.
    pub fn is_pressed(&self, index: u8) -> bool {
        match index {
            1..=MAX_BUTTON => self.0 & (1 << (index - 1)) != 0,
            _ => false,
        }
    }

    /// Set the state of a button, ignoring out of range indices.
    pub fn set(&mut self, index: u8, pressed: bool) {
        if let 1..=MAX_BUTTON = index {
            let mask = 1 << (index - 1);
            if pressed {
                self.0 |= mask;
            } else {
                self.0 &= !mask;
            }
        }
    }

    /// Build a bitset with the given buttons pressed.
    pub fn pressed(indices: &[u8]) -> Self {
        let mut b = Self::default();
        for &i in indices {
            b.set(i, true);
        }
        b
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_buttons() {
        let mut b = Buttons::pressed(&[1, 4, 32]);

        assert!(b.is_pressed(1));
        assert!(!b.is_pressed(2));
        assert!(b.is_pressed(4));
        assert!(b.is_pressed(32));
        assert!(!b.is_pressed(0));
        assert!(!b.is_pressed(33));

        b.set(4, false);
        assert!(!b.is_pressed(4));
    }

    #[test]
    fn test_neutral() {
        let n = DeviceSample::neutral();
        assert_eq!(n.throttle, THROTTLE_RAW_MIN_GAIN);
        assert_eq!(n.buttons, Buttons(0));
    }
}
