//! # Hardware abstraction layer
//!
//! The control loop only touches the robot's equipment through the [`Hal`] trait. Every read is
//! non-blocking and returns `None` when the equipment cannot be read, so that the loop can
//! degrade to a safe default rather than stall.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Software implementation of the hardware used by the executable and the tests.
pub mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{act::ActDems, input::DeviceSample};

pub use sim::SimHal;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Access to the robot's input devices, sensors and actuator bus.
pub trait Hal {
    /// Current state of the driver's joystick, or `None` if it is disconnected.
    fn driver_stick(&self) -> Option<DeviceSample>;

    /// Current state of the operator's joystick, or `None` if it is disconnected.
    fn operator_stick(&self) -> Option<DeviceSample>;

    /// Heading relative to the sensor's zero reference, or `None` if the sensor is unavailable.
    ///
    /// Units: degrees
    fn heading_deg(&self) -> Option<f64>;

    /// Make the current heading the new zero reference.
    fn zero_heading(&mut self);

    /// Measured supply (battery) voltage, or `None` if it cannot be read.
    ///
    /// Units: volts
    fn supply_voltage(&self) -> Option<f64>;

    /// Write setpoints to every actuator on the bus.
    fn write_demands(&mut self, dems: &ActDems);

    /// Arm or disarm the actuator watchdog.
    ///
    /// While armed an actuator which has not been written within `expiration_s` seconds zeros
    /// its own output.
    fn set_safety(&mut self, enabled: bool, expiration_s: f64);
}
