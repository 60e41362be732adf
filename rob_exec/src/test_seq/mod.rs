//! # Test mode sequence
//!
//! Walks through each actuator in turn at a fixed low power so that wiring and directions can be
//! checked by hand. Each press of the advance button moves from a pause to the next step, or from
//! a step back to a pause. The sequence ends on `Stop`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::act::{ActDems, ActId};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{drive_vec::DriveCommand, mecanum, toggle::RisingEdge};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for test mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Params {
    pub drive_power: f64,
    pub intake_power: f64,
    pub climber_power: f64,
    pub shooter_power: f64,
}

/// Test sequence state.
#[derive(Debug, Clone, Copy)]
pub struct TestSeq {
    /// The step being executed, which may be `Pause`
    current: TestStep,

    /// Position in the sequence
    position: TestStep,

    advance: RisingEdge,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Steps of the test sequence, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestStep {
    Start,
    DriveForward,
    DriveBackward,
    DriveLeft,
    DriveRight,
    TurnRight,
    TurnLeft,
    IntakeForward,
    IntakeBackward,
    ClimberForward,
    ClimberBackward,
    ShooterForward,
    ShooterBackward,
    Stop,
    Pause,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            drive_power: 0.2,
            intake_power: 0.2,
            climber_power: 0.2,
            shooter_power: 0.2,
        }
    }
}

impl Default for TestSeq {
    fn default() -> Self {
        Self {
            current: TestStep::Pause,
            position: TestStep::Start,
            advance: RisingEdge::default(),
        }
    }
}

impl TestStep {
    /// The step after this one. `Stop` and `Pause` are followed by themselves.
    pub fn next(self) -> Self {
        use TestStep::*;

        match self {
            Start => DriveForward,
            DriveForward => DriveBackward,
            DriveBackward => DriveLeft,
            DriveLeft => DriveRight,
            DriveRight => TurnRight,
            TurnRight => TurnLeft,
            TurnLeft => IntakeForward,
            IntakeForward => IntakeBackward,
            IntakeBackward => ClimberForward,
            ClimberForward => ClimberBackward,
            ClimberBackward => ShooterForward,
            ShooterForward => ShooterBackward,
            ShooterBackward => Stop,
            Stop => Stop,
            Pause => Pause,
        }
    }

    /// Human readable name shown on the dashboard
    pub fn name(self) -> &'static str {
        use TestStep::*;

        match self {
            Start => "Start",
            DriveForward => "Drive Forward",
            DriveBackward => "Drive Backward",
            DriveLeft => "Drive Left",
            DriveRight => "Drive Right",
            TurnRight => "Turn Right",
            TurnLeft => "Turn Left",
            IntakeForward => "Intake Forward",
            IntakeBackward => "Intake Backward",
            ClimberForward => "Climber Forward",
            ClimberBackward => "Climber Backward",
            ShooterForward => "Shooter Forward",
            ShooterBackward => "Shooter Backward",
            Stop => "Stop",
            Pause => "Pause",
        }
    }

    /// Demands for this step. Only the actuator under test moves.
    pub fn dems(self, params: &Params, mecanum_params: &mecanum::Params) -> ActDems {
        use TestStep::*;

        let mut dems = ActDems::default();
        let p = params.drive_power;

        let drive = |vx: f64, vy: f64, omega: f64, dems: &mut ActDems| {
            let cmd = DriveCommand {
                vx,
                vy,
                omega,
                field_heading_deg: None,
            };
            mecanum::set_dems(&cmd, mecanum_params, dems);
        };

        match self {
            DriveForward => drive(0.0, -p, 0.0, &mut dems),
            DriveBackward => drive(0.0, p, 0.0, &mut dems),
            DriveLeft => drive(-p, 0.0, 0.0, &mut dems),
            DriveRight => drive(p, 0.0, 0.0, &mut dems),
            TurnRight => drive(0.0, 0.0, p, &mut dems),
            TurnLeft => drive(0.0, 0.0, -p, &mut dems),
            IntakeForward => dems.set(ActId::Intake, params.intake_power),
            IntakeBackward => dems.set(ActId::Intake, -params.intake_power),
            ClimberForward => dems.set(ActId::Climber, params.climber_power),
            ClimberBackward => dems.set(ActId::Climber, -params.climber_power),
            ShooterForward => dems.set(ActId::Shooter, params.shooter_power),
            ShooterBackward => dems.set(ActId::Shooter, -params.shooter_power),
            Start | Stop | Pause => (),
        }

        dems
    }
}

impl TestSeq {
    /// Restart the sequence from the beginning.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The step being executed
    pub fn current(&self) -> TestStep {
        self.current
    }

    /// Update the sequence with the advance button state, returning the step to execute.
    pub fn proc(&mut self, advance_pressed: bool) -> TestStep {
        if self.advance.update(advance_pressed) {
            if self.current == TestStep::Pause {
                self.position = self.position.next();
                self.current = self.position;
            } else if self.current != TestStep::Stop {
                self.current = TestStep::Pause;
            }

            info!("Test step: {}", self.current.name());
        }

        self.current
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Press and release the advance button, returning the step after the press
    fn press(seq: &mut TestSeq) -> TestStep {
        let s = seq.proc(true);
        seq.proc(false);
        s
    }

    #[test]
    fn test_sequence_order() {
        let mut seq = TestSeq::default();
        assert_eq!(seq.proc(false), TestStep::Pause);

        let mut steps = Vec::new();
        loop {
            let s = press(&mut seq);
            if s == TestStep::Stop {
                break;
            }
            assert_ne!(s, TestStep::Pause);
            steps.push(s);
            assert_eq!(press(&mut seq), TestStep::Pause);
        }

        assert_eq!(steps.len(), 12);
        assert_eq!(steps[0], TestStep::DriveForward);
        assert_eq!(steps[11], TestStep::ShooterBackward);

        // Stop is terminal
        assert_eq!(press(&mut seq), TestStep::Stop);
        assert_eq!(press(&mut seq), TestStep::Stop);
    }

    #[test]
    fn test_held_button_advances_once() {
        let mut seq = TestSeq::default();
        for _ in 0..10 {
            assert_eq!(seq.proc(true), TestStep::DriveForward);
        }
    }

    #[test]
    fn test_reset() {
        let mut seq = TestSeq::default();
        press(&mut seq);
        press(&mut seq);
        press(&mut seq);
        assert_eq!(seq.current(), TestStep::DriveBackward);

        seq.reset();
        assert_eq!(seq.current(), TestStep::Pause);
        assert_eq!(press(&mut seq), TestStep::DriveForward);
    }

    #[test]
    fn test_step_dems() {
        let p = Params::default();
        let mp = mecanum::Params::default();

        let d = TestStep::ClimberBackward.dems(&p, &mp);
        assert_eq!(d.get(ActId::Climber), -0.2);
        assert_eq!(d.get(ActId::Shooter), 0.0);
        assert_eq!(d.get(ActId::DrvFL), 0.0);

        let d = TestStep::DriveForward.dems(&p, &mp);
        assert_eq!(d.get(ActId::DrvFR), 0.2);
        assert_eq!(d.get(ActId::Intake), 0.0);

        assert!(TestStep::Pause.dems(&p, &mp).is_zero());
        assert!(TestStep::Stop.dems(&p, &mp).is_zero());
    }
}
