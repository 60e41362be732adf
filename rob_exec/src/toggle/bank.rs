//! The set of toggles used by the robot

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use serde::{Deserialize, Serialize};

use super::{RisingEdge, Toggle, ToggleKind};
use crate::input::{ButtonMap, RawInputSample};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The kind of each logical toggle, chosen in the parameter file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToggleKinds {
    pub intake_enable: ToggleKind,
    pub intake_reverse: ToggleKind,
    pub shooter_enable: ToggleKind,
    pub shooter_reverse: ToggleKind,
    pub drive_mode: ToggleKind,
}

/// All toggles, persisting for the whole session.
#[derive(Debug, Clone)]
pub struct ToggleBank {
    intake_enable: Toggle,
    intake_reverse: Toggle,
    shooter_enable: Toggle,
    shooter_reverse: Toggle,
    drive_mode: Toggle,
    yaw_reset: RisingEdge,
}

/// Toggle states produced for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToggleStates {
    pub intake_enabled: bool,
    pub intake_sign: f64,
    pub shooter_enabled: bool,
    pub shooter_sign: f64,
    pub field_oriented: bool,

    /// True on the cycle the yaw reset button goes down
    pub yaw_reset: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ToggleKinds {
    fn default() -> Self {
        Self {
            intake_enable: ToggleKind::Latched,
            intake_reverse: ToggleKind::Hold,
            shooter_enable: ToggleKind::Latched,
            shooter_reverse: ToggleKind::Hold,
            drive_mode: ToggleKind::Latched,
        }
    }
}

impl Default for ToggleBank {
    fn default() -> Self {
        Self::new(&ToggleKinds::default())
    }
}

impl ToggleBank {
    pub fn new(kinds: &ToggleKinds) -> Self {
        Self {
            intake_enable: Toggle::new(kinds.intake_enable),
            intake_reverse: Toggle::new(kinds.intake_reverse),
            shooter_enable: Toggle::new(kinds.shooter_enable),
            shooter_reverse: Toggle::new(kinds.shooter_reverse),
            drive_mode: Toggle::new(kinds.drive_mode),
            yaw_reset: RisingEdge::default(),
        }
    }

    /// Update every toggle from this cycle's button states.
    pub fn update(&mut self, input: &RawInputSample, map: &ButtonMap) -> ToggleStates {
        let drv = input.driver.buttons;
        let op = input.operator.buttons;

        if self.intake_enable.update(op.is_pressed(map.intake_toggle)) {
            debug!(
                "Intake enabled: {} ({:?})",
                self.intake_enable.is_active(),
                self.intake_enable.kind()
            );
        }
        self.intake_reverse.update(op.is_pressed(map.intake_reverse));

        if self.shooter_enable.update(op.is_pressed(map.shooter_toggle)) {
            debug!(
                "Shooter enabled: {} ({:?})",
                self.shooter_enable.is_active(),
                self.shooter_enable.kind()
            );
        }
        self.shooter_reverse.update(op.is_pressed(map.shooter_reverse));

        if self.drive_mode.update(drv.is_pressed(map.drive_mode)) {
            debug!(
                "Field oriented driving: {} ({:?})",
                self.drive_mode.is_active(),
                self.drive_mode.kind()
            );
        }

        let yaw_reset = self.yaw_reset.update(drv.is_pressed(map.yaw_reset));

        self.states(yaw_reset)
    }

    /// Current states without a yaw reset request.
    pub fn current(&self) -> ToggleStates {
        self.states(false)
    }

    fn states(&self, yaw_reset: bool) -> ToggleStates {
        ToggleStates {
            intake_enabled: self.intake_enable.is_active(),
            intake_sign: self.intake_reverse.sign(),
            shooter_enabled: self.shooter_enable.is_active(),
            shooter_sign: self.shooter_reverse.sign(),
            field_oriented: self.drive_mode.is_active(),
            yaw_reset,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::input::{Buttons, DeviceSample};

    fn input(driver: &[u8], operator: &[u8]) -> RawInputSample {
        RawInputSample {
            driver: DeviceSample {
                buttons: Buttons::pressed(driver),
                ..DeviceSample::neutral()
            },
            operator: DeviceSample {
                buttons: Buttons::pressed(operator),
                ..DeviceSample::neutral()
            },
            driver_degraded: false,
            operator_degraded: false,
        }
    }

    #[test]
    fn test_default_bank() {
        let map = ButtonMap::default();
        let mut bank = ToggleBank::default();

        // Hold the shooter toggle and intake reverse for three cycles
        for _ in 0..3 {
            let s = bank.update(&input(&[], &[map.shooter_toggle, map.intake_reverse]), &map);
            assert!(s.shooter_enabled);
            assert_eq!(s.intake_sign, -1.0);
        }

        // Release, shooter stays on, intake reverse drops out
        let s = bank.update(&input(&[], &[]), &map);
        assert!(s.shooter_enabled);
        assert_eq!(s.intake_sign, 1.0);
        assert!(!s.intake_enabled);
    }

    #[test]
    fn test_drive_mode_and_yaw_reset() {
        let map = ButtonMap::default();
        let mut bank = ToggleBank::default();

        let s = bank.update(&input(&[map.drive_mode, map.yaw_reset], &[]), &map);
        assert!(s.field_oriented);
        assert!(s.yaw_reset);

        let s = bank.update(&input(&[map.drive_mode, map.yaw_reset], &[]), &map);
        assert!(s.field_oriented);
        assert!(!s.yaw_reset);

        bank.update(&input(&[], &[]), &map);
        let s = bank.update(&input(&[map.drive_mode], &[]), &map);
        assert!(!s.field_oriented);
    }

    #[test]
    fn test_configured_kinds() {
        let map = ButtonMap::default();
        let kinds = ToggleKinds {
            shooter_reverse: ToggleKind::Latched,
            ..ToggleKinds::default()
        };
        let mut bank = ToggleBank::new(&kinds);

        bank.update(&input(&[], &[map.shooter_reverse]), &map);
        let s = bank.update(&input(&[], &[]), &map);

        assert_eq!(s.shooter_sign, -1.0);
        assert_eq!(bank.current().shooter_sign, -1.0);
    }
}
