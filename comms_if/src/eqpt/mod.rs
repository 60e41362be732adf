//! # Equipment Interface
//!
//! This module defines the interface structures which are exchanged with the robot's equipment.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod act;
pub mod input;
