//! Simulated robot hardware

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{
    act::{ActDems, ActId},
    input::DeviceSample,
};
use log::warn;

use super::Hal;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated hardware.
///
/// Devices and sensors are plain public fields so a test or the executable can set them directly.
/// The actuator bus models the motor watchdog against a simulated clock advanced with
/// [`SimHal::advance_to`].
#[derive(Debug, Clone)]
pub struct SimHal {
    /// Driver joystick, `None` if unplugged
    pub driver: Option<DeviceSample>,

    /// Operator joystick, `None` if unplugged
    pub operator: Option<DeviceSample>,

    /// Raw heading from the IMU, `None` if the IMU is not responding.
    ///
    /// Units: degrees
    pub heading_raw_deg: Option<f64>,

    /// Battery voltage, `None` if the power distribution board is not responding.
    ///
    /// Units: volts
    pub supply_voltage_v: Option<f64>,

    heading_offset_deg: f64,

    bus: SimActuatorBus,
}

/// Actuator bus with a per-bus watchdog.
#[derive(Debug, Clone, Default)]
struct SimActuatorBus {
    last_dems: ActDems,
    last_write_s: Option<f64>,
    now_s: f64,

    safety_enabled: bool,
    expiration_s: f64,
    expired: bool,

    num_writes: u64,
    num_expiries: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SimHal {
    fn default() -> Self {
        Self {
            driver: Some(DeviceSample::neutral()),
            operator: Some(DeviceSample::neutral()),
            heading_raw_deg: Some(0.0),
            supply_voltage_v: Some(12.5),
            heading_offset_deg: 0.0,
            bus: SimActuatorBus::default(),
        }
    }
}

impl SimHal {
    /// Create simulated hardware with both joysticks centred and a healthy battery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the simulated clock, expiring the actuator watchdog if it is armed and the bus
    /// has not been written within the expiration time.
    pub fn advance_to(&mut self, now_s: f64) {
        self.bus.now_s = now_s;

        if !self.bus.safety_enabled || self.bus.expired {
            return;
        }

        if let Some(t) = self.bus.last_write_s {
            if now_s - t > self.bus.expiration_s {
                warn!(
                    "Actuator watchdog expired, {:.3} s since last write",
                    now_s - t
                );
                self.bus.expired = true;
                self.bus.num_expiries += 1;
            }
        }
    }

    /// The output an actuator is actually producing.
    pub fn output(&self, id: ActId) -> f64 {
        if self.bus.expired {
            0.0
        } else {
            self.bus.last_dems.get(id)
        }
    }

    /// The last demands written to the bus, regardless of the watchdog.
    pub fn last_dems(&self) -> &ActDems {
        &self.bus.last_dems
    }

    /// Number of writes made to the bus.
    pub fn num_writes(&self) -> u64 {
        self.bus.num_writes
    }

    /// Number of times the watchdog has expired.
    pub fn num_expiries(&self) -> u64 {
        self.bus.num_expiries
    }

    /// Whether the watchdog is armed.
    pub fn safety_enabled(&self) -> bool {
        self.bus.safety_enabled
    }
}

impl Hal for SimHal {
    fn driver_stick(&self) -> Option<DeviceSample> {
        self.driver
    }

    fn operator_stick(&self) -> Option<DeviceSample> {
        self.operator
    }

    fn heading_deg(&self) -> Option<f64> {
        self.heading_raw_deg.map(|h| h - self.heading_offset_deg)
    }

    fn zero_heading(&mut self) {
        if let Some(h) = self.heading_raw_deg {
            self.heading_offset_deg = h;
        }
    }

    fn supply_voltage(&self) -> Option<f64> {
        self.supply_voltage_v
    }

    fn write_demands(&mut self, dems: &ActDems) {
        self.bus.last_dems = dems.clone();
        self.bus.last_write_s = Some(self.bus.now_s);
        self.bus.expired = false;
        self.bus.num_writes += 1;
    }

    fn set_safety(&mut self, enabled: bool, expiration_s: f64) {
        self.bus.safety_enabled = enabled;
        self.bus.expiration_s = expiration_s;
        self.bus.expired = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_watchdog_expiry() {
        let mut hal = SimHal::new();
        hal.set_safety(true, 0.1);

        let mut dems = ActDems::default();
        dems.set(ActId::Shooter, 0.5);

        hal.advance_to(1.0);
        hal.write_demands(&dems);

        hal.advance_to(1.08);
        assert_eq!(hal.output(ActId::Shooter), 0.5);

        hal.advance_to(1.2);
        assert_eq!(hal.output(ActId::Shooter), 0.0);
        assert_eq!(hal.num_expiries(), 1);

        // Re-commanding recovers the actuator
        hal.write_demands(&dems);
        assert_eq!(hal.output(ActId::Shooter), 0.5);
    }

    #[test]
    fn test_watchdog_disarmed() {
        let mut hal = SimHal::new();
        hal.set_safety(false, 0.1);

        let mut dems = ActDems::default();
        dems.set(ActId::Climber, -0.3);

        hal.write_demands(&dems);
        hal.advance_to(10.0);

        assert_eq!(hal.output(ActId::Climber), -0.3);
        assert_eq!(hal.num_expiries(), 0);
    }

    #[test]
    fn test_zero_heading() {
        let mut hal = SimHal::new();
        hal.heading_raw_deg = Some(37.0);
        assert_eq!(hal.heading_deg(), Some(37.0));

        hal.zero_heading();
        assert_eq!(hal.heading_deg(), Some(0.0));

        hal.heading_raw_deg = Some(40.0);
        assert_eq!(hal.heading_deg(), Some(3.0));

        hal.heading_raw_deg = None;
        assert_eq!(hal.heading_deg(), None);
    }
}
