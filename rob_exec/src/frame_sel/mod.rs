//! # Frame selector
//!
//! Decides whether the drive command is expressed in the robot frame or the field frame. In the
//! field frame the current heading is attached to the command for the kinematics to de-rotate the
//! translation. If the heading sensor cannot be read the selector falls back to the robot frame
//! rather than use a stale heading.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, warn};
use serde::Serialize;

use crate::drive_vec::DriveCommand;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Frame selector state, used only to report the heading fallback once.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSel {
    fallback: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The frame the drive command was expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frame {
    /// Translation is relative to the robot's own forward direction
    Robot,

    /// Translation is relative to the field
    Field,

    /// Field orientation was requested but the heading is unavailable, so the robot frame is used
    RobotFallback,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FrameSel {
    /// Select the frame for this cycle's command.
    ///
    /// `heading_deg` is the heading sensor reading relative to its zero reference.
    pub fn select(
        &mut self,
        cmd: DriveCommand,
        field_oriented: bool,
        heading_deg: Option<f64>,
    ) -> (DriveCommand, Frame) {
        if !field_oriented {
            self.set_fallback(false);
            return (
                DriveCommand {
                    field_heading_deg: None,
                    ..cmd
                },
                Frame::Robot,
            );
        }

        match heading_deg.filter(|h| h.is_finite()) {
            Some(h) => {
                self.set_fallback(false);
                (
                    DriveCommand {
                        field_heading_deg: Some(h),
                        ..cmd
                    },
                    Frame::Field,
                )
            }
            None => {
                self.set_fallback(true);
                (
                    DriveCommand {
                        field_heading_deg: None,
                        ..cmd
                    },
                    Frame::RobotFallback,
                )
            }
        }
    }

    /// True if the last selection fell back to the robot frame.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    fn set_fallback(&mut self, fallback: bool) {
        if fallback && !self.fallback {
            warn!("Heading unavailable, field oriented driving falling back to robot frame");
        } else if !fallback && self.fallback {
            info!("Heading fallback cleared");
        }
        self.fallback = fallback;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cmd() -> DriveCommand {
        DriveCommand {
            vx: 0.3,
            vy: -0.2,
            omega: 0.1,
            field_heading_deg: None,
        }
    }

    #[test]
    fn test_robot_frame() {
        let mut fs = FrameSel::default();
        let (c, f) = fs.select(cmd(), false, Some(45.0));

        assert_eq!(f, Frame::Robot);
        assert_eq!(c, cmd());
    }

    #[test]
    fn test_field_frame() {
        let mut fs = FrameSel::default();
        let (c, f) = fs.select(cmd(), true, Some(45.0));

        assert_eq!(f, Frame::Field);
        assert_eq!(c.field_heading_deg, Some(45.0));
        assert_eq!(c.vx, 0.3);
    }

    #[test]
    fn test_fallback() {
        let mut fs = FrameSel::default();

        let (c, f) = fs.select(cmd(), true, None);
        assert_eq!(f, Frame::RobotFallback);
        assert_eq!(c.field_heading_deg, None);
        assert!(fs.is_fallback());

        let (_, f) = fs.select(cmd(), true, Some(f64::NAN));
        assert_eq!(f, Frame::RobotFallback);

        let (_, f) = fs.select(cmd(), true, Some(0.0));
        assert_eq!(f, Frame::Field);
        assert!(!fs.is_fallback());
    }
}
