//! # Tunable parameters
//!
//! Values which can be changed from the dashboard while the robot runs. They are polled once per
//! cycle, so the last value written to the store always takes effect by the next cycle. Each
//! value read is written back unchanged so that it appears on the dashboard.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use serde::Serialize;
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

pub const KEY_SHOOTER_SPEED: &str = "Shooter Speed 0-1";
pub const KEY_SHOOTER_KP: &str = "Proportional shoot constant";
pub const KEY_IDEAL_VOLTAGE: &str = "Ideal battery voltage";
pub const KEY_DRIVE_DEADZONE: &str = "Drive Deadzone";
pub const KEY_AUTO_TIME: &str = "Auto Time";

const DEFAULT_SHOOTER_SPEED: f64 = 0.68;
const DEFAULT_SHOOTER_KP: f64 = 0.3;
const DEFAULT_IDEAL_VOLTAGE: f64 = 13.6;
const DEFAULT_DRIVE_DEADZONE: f64 = 0.1;
const DEFAULT_AUTO_TIME: f64 = 2.0;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A key/value store shared with the dashboard.
pub trait TunableStore {
    /// Read a number, or `default` if the key has never been written.
    fn get_number(&self, key: &str, default: f64) -> f64;

    fn put_number(&mut self, key: &str, value: f64);

    fn put_string(&mut self, key: &str, value: &str);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// In-memory tunable store.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    numbers: HashMap<String, f64>,
    strings: HashMap<String, String>,
}

/// Values read from the tunable store for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TunableConfig {
    /// Shooter speed before compensation, in [0, 1]
    pub base_shooter_speed: f64,

    /// Shooter feed-forward multiplier
    pub kp: f64,

    /// Supply voltage at which no compensation is applied.
    ///
    /// Units: volts
    pub ideal_voltage_v: f64,

    /// Radius of the translation deadzone, in [0, 1)
    pub drive_deadzone: f64,

    /// Duration of the autonomous drive.
    ///
    /// Units: seconds
    pub auto_drive_duration_s: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MemStore {
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
}

impl TunableStore for MemStore {
    fn get_number(&self, key: &str, default: f64) -> f64 {
        self.numbers.get(key).copied().unwrap_or(default)
    }

    fn put_number(&mut self, key: &str, value: f64) {
        self.numbers.insert(key.to_string(), value);
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }
}

impl Default for TunableConfig {
    fn default() -> Self {
        Self {
            base_shooter_speed: DEFAULT_SHOOTER_SPEED,
            kp: DEFAULT_SHOOTER_KP,
            ideal_voltage_v: DEFAULT_IDEAL_VOLTAGE,
            drive_deadzone: DEFAULT_DRIVE_DEADZONE,
            auto_drive_duration_s: DEFAULT_AUTO_TIME,
        }
    }
}

impl TunableConfig {
    /// Read every tunable from the store and echo it back.
    ///
    /// Values which cannot be used (not finite, or out of range) are replaced by their default
    /// for this cycle, the store is left holding what was written.
    pub fn poll<S: TunableStore>(store: &mut S) -> Self {
        let mut read = |key: &str, default: f64, valid: fn(f64) -> bool| {
            let raw = store.get_number(key, default);
            store.put_number(key, raw);

            if raw.is_finite() && valid(raw) {
                raw
            } else {
                debug!("Tunable \"{}\" has unusable value {}, using {}", key, raw, default);
                default
            }
        };

        Self {
            base_shooter_speed: read(KEY_SHOOTER_SPEED, DEFAULT_SHOOTER_SPEED, |v| {
                (0.0..=1.0).contains(&v)
            }),
            kp: read(KEY_SHOOTER_KP, DEFAULT_SHOOTER_KP, |v| v >= 0.0),
            ideal_voltage_v: read(KEY_IDEAL_VOLTAGE, DEFAULT_IDEAL_VOLTAGE, |v| v > 0.0),
            drive_deadzone: read(KEY_DRIVE_DEADZONE, DEFAULT_DRIVE_DEADZONE, |v| {
                (0.0..1.0).contains(&v)
            }),
            auto_drive_duration_s: read(KEY_AUTO_TIME, DEFAULT_AUTO_TIME, |v| v >= 0.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_echoed() {
        let mut store = MemStore::default();
        let c = TunableConfig::poll(&mut store);

        assert_eq!(c, TunableConfig::default());
        assert_eq!(store.get_number(KEY_SHOOTER_SPEED, -1.0), 0.68);
        assert_eq!(store.get_number(KEY_IDEAL_VOLTAGE, -1.0), 13.6);
        assert_eq!(store.get_number(KEY_AUTO_TIME, -1.0), 2.0);
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = MemStore::default();
        TunableConfig::poll(&mut store);

        store.put_number(KEY_SHOOTER_KP, 0.25);
        store.put_number(KEY_SHOOTER_KP, 0.2);
        store.put_number(KEY_DRIVE_DEADZONE, 0.15);

        let c = TunableConfig::poll(&mut store);
        assert_eq!(c.kp, 0.2);
        assert_eq!(c.drive_deadzone, 0.15);
    }

    #[test]
    fn test_unusable_values() {
        let mut store = MemStore::default();
        store.put_number(KEY_IDEAL_VOLTAGE, 0.0);
        store.put_number(KEY_DRIVE_DEADZONE, f64::NAN);
        store.put_number(KEY_SHOOTER_SPEED, 1.5);

        let c = TunableConfig::poll(&mut store);
        assert_eq!(c.ideal_voltage_v, DEFAULT_IDEAL_VOLTAGE);
        assert_eq!(c.drive_deadzone, DEFAULT_DRIVE_DEADZONE);
        assert_eq!(c.base_shooter_speed, DEFAULT_SHOOTER_SPEED);

        // The store still holds what was written
        assert_eq!(store.get_number(KEY_SHOOTER_SPEED, 0.0), 1.5);
    }
}
