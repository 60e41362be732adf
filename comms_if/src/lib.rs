//! # Communications interface crate.
//!
//! Provides the common interfaces between the control loop and the robot's equipment.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Demand and sample definitions for equipment (actuators and input devices)
pub mod eqpt;
