//! # Input sampler
//!
//! Reads both joysticks once per cycle. Sampling never fails: an absent or disconnected device is
//! replaced by a neutral sample (centred axes, throttle at minimum gain, no buttons).

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::input::{DeviceSample, MAX_BUTTON};
use serde::{Deserialize, Serialize};
use util::maths::{clamp, lin_map};

use crate::hal::Hal;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Inputs from both devices for a single cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInputSample {
    /// The driver's joystick
    pub driver: DeviceSample,

    /// The operator's joystick
    pub operator: DeviceSample,

    /// True if the driver's joystick was unavailable and a neutral sample substituted
    pub driver_degraded: bool,

    /// True if the operator's joystick was unavailable and a neutral sample substituted
    pub operator_degraded: bool,
}

/// Assignment of logical functions to button indices.
///
/// Indices start at 1, and must be unique per device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ButtonMap {
    /// Driver: toggle between robot and field oriented driving
    pub drive_mode: u8,

    /// Driver: zero the heading sensor
    pub yaw_reset: u8,

    /// Driver: advance the test sequence
    pub test_advance: u8,

    /// Operator: enable/disable the intake
    pub intake_toggle: u8,

    /// Operator: reverse the intake
    pub intake_reverse: u8,

    /// Operator: enable/disable the shooter
    pub shooter_toggle: u8,

    /// Operator: reverse the shooter
    pub shooter_reverse: u8,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            drive_mode: 2,
            yaw_reset: 3,
            test_advance: 1,
            intake_toggle: 2,
            intake_reverse: 3,
            shooter_toggle: 1,
            shooter_reverse: 4,
        }
    }
}

impl ButtonMap {
    /// Returns true if every button is one the device can report, and no device has two
    /// functions sharing a button.
    pub fn is_valid(&self) -> bool {
        self.out_of_range().is_none() && self.is_unique()
    }

    /// The first assignment outside `1..=MAX_BUTTON`, such a button can never be pressed.
    pub fn out_of_range(&self) -> Option<(&'static str, u8)> {
        let all = [
            ("drive_mode", self.drive_mode),
            ("yaw_reset", self.yaw_reset),
            ("test_advance", self.test_advance),
            ("intake_toggle", self.intake_toggle),
            ("intake_reverse", self.intake_reverse),
            ("shooter_toggle", self.shooter_toggle),
            ("shooter_reverse", self.shooter_reverse),
        ];

        all.iter()
            .copied()
            .find(|&(_, i)| !(1..=MAX_BUTTON).contains(&i))
    }

    fn is_unique(&self) -> bool {
        let driver = [self.drive_mode, self.yaw_reset];
        let operator = [
            self.intake_toggle,
            self.intake_reverse,
            self.shooter_toggle,
            self.shooter_reverse,
        ];

        // The test advance button is only read in test mode, so it may share an index with the
        // teleop driver buttons.
        all_unique(&driver) && all_unique(&operator)
    }
}

impl RawInputSample {
    /// Driver throttle gain in [0, 1]
    pub fn driver_gain(&self) -> f64 {
        throttle_gain(self.driver.throttle)
    }

    /// Operator throttle gain in [0, 1]
    pub fn operator_gain(&self) -> f64 {
        throttle_gain(self.operator.throttle)
    }

    /// Returns true if either device was degraded
    pub fn is_degraded(&self) -> bool {
        self.driver_degraded || self.operator_degraded
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Read both input devices.
pub fn sample<H: Hal>(hal: &H) -> RawInputSample {
    let (driver, driver_degraded) = read_device(hal.driver_stick());
    let (operator, operator_degraded) = read_device(hal.operator_stick());

    RawInputSample {
        driver,
        operator,
        driver_degraded,
        operator_degraded,
    }
}

/// Convert a raw throttle dial reading into a gain.
///
/// The dial reads +1 at its lowest physical position and -1 at its highest, so it is remapped as
/// `(1 - raw) / 2`. The same mapping is used for both devices.
pub fn throttle_gain(raw: f64) -> f64 {
    clamp(&lin_map((1.0, -1.0), (0.0, 1.0), raw), &0.0, &1.0)
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn read_device(sample: Option<DeviceSample>) -> (DeviceSample, bool) {
    match sample {
        Some(s) => (sanitise(s), false),
        None => (DeviceSample::neutral(), true),
    }
}

/// Limit every axis to [-1, 1], replacing non-finite readings with the neutral value.
fn sanitise(s: DeviceSample) -> DeviceSample {
    let axis = |v: f64, neutral: f64| {
        if v.is_finite() {
            clamp(&v, &-1.0, &1.0)
        } else {
            neutral
        }
    };
    let neutral = DeviceSample::neutral();

    DeviceSample {
        x: axis(s.x, neutral.x),
        y: axis(s.y, neutral.y),
        z: axis(s.z, neutral.z),
        throttle: axis(s.throttle, neutral.throttle),
        buttons: s.buttons,
    }
}

fn all_unique(indices: &[u8]) -> bool {
    indices
        .iter()
        .enumerate()
        .all(|(n, i)| !indices[n + 1..].contains(i))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hal::SimHal;
    use comms_if::eqpt::input::Buttons;

    #[test]
    fn test_throttle_gain() {
        assert_eq!(throttle_gain(-1.0), 1.0);
        assert_eq!(throttle_gain(1.0), 0.0);
        assert_eq!(throttle_gain(0.0), 0.5);
        assert_eq!(throttle_gain(0.5), 0.25);
    }

    #[test]
    fn test_absent_devices_are_neutral() {
        let mut hal = SimHal::new();
        hal.driver = None;

        let s = sample(&hal);

        assert!(s.driver_degraded);
        assert!(!s.operator_degraded);
        assert_eq!(s.driver, DeviceSample::neutral());
        assert_eq!(s.driver_gain(), 0.0);
    }

    #[test]
    fn test_sanitise() {
        let mut hal = SimHal::new();
        hal.operator = Some(DeviceSample {
            x: f64::NAN,
            y: -1.5,
            z: 0.25,
            throttle: f64::INFINITY,
            buttons: Buttons::pressed(&[2]),
        });

        let s = sample(&hal);

        assert!(!s.operator_degraded);
        assert_eq!(s.operator.x, 0.0);
        assert_eq!(s.operator.y, -1.0);
        assert_eq!(s.operator.z, 0.25);
        assert_eq!(s.operator_gain(), 0.0);
        assert!(s.operator.buttons.is_pressed(2));
    }

    #[test]
    fn test_button_map_validity() {
        assert!(ButtonMap::default().is_valid());

        let mut map = ButtonMap::default();
        map.shooter_reverse = map.intake_toggle;
        assert!(!map.is_valid());

        let mut map = ButtonMap::default();
        map.yaw_reset = 0;
        assert!(!map.is_valid());
        assert_eq!(map.out_of_range(), Some(("yaw_reset", 0)));

        // Beyond the last button the device reports
        let mut map = ButtonMap::default();
        map.shooter_toggle = 40;
        assert!(!map.is_valid());
        assert_eq!(map.out_of_range(), Some(("shooter_toggle", 40)));
        assert!(!Buttons(u32::MAX).is_pressed(40));

        let mut map = ButtonMap::default();
        map.test_advance = MAX_BUTTON + 1;
        assert!(!map.is_valid());

        let mut map = ButtonMap::default();
        map.shooter_reverse = MAX_BUTTON;
        assert!(map.is_valid());
    }
}
