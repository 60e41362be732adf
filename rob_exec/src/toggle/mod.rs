//! # Toggle state machine
//!
//! Converts momentary button presses into persistent on/off or direction state. Each logical
//! switch is configured with a [`ToggleKind`]:
//!
//! - `Latched` toggles flip once on each rising edge of the button, so holding the button for
//!   many cycles produces a single transition.
//! - `Hold` toggles are active only while the button is held, and are recomputed every cycle.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod bank;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

pub use bank::*;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// How a toggle responds to its button.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ToggleKind {
    /// Flip state on each press
    Latched,

    /// Active exactly while the button is held
    Hold,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Detects the transition of a button from released to pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RisingEdge {
    last_pressed: bool,
}

/// A single logical toggle.
#[derive(Debug, Clone, Copy)]
pub struct Toggle {
    kind: ToggleKind,
    active: bool,
    edge: RisingEdge,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RisingEdge {
    /// Update with the current button state, returning true on the cycle the button goes down.
    pub fn update(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.last_pressed;
        self.last_pressed = pressed;
        rising
    }
}

impl Toggle {
    /// Create a new inactive toggle.
    pub fn new(kind: ToggleKind) -> Self {
        Self {
            kind,
            active: false,
            edge: RisingEdge::default(),
        }
    }

    /// Update with the current button state, returning true if the toggle changed state.
    pub fn update(&mut self, pressed: bool) -> bool {
        let rising = self.edge.update(pressed);
        let prev = self.active;

        match self.kind {
            ToggleKind::Latched => {
                if rising {
                    self.active = !self.active;
                }
            }
            ToggleKind::Hold => self.active = pressed,
        }

        self.active != prev
    }

    /// The kind of this toggle
    pub fn kind(&self) -> ToggleKind {
        self.kind
    }

    /// True if the toggle is active (enabled, or reversed for a direction toggle)
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Direction given by the toggle, `-1` when active and `+1` otherwise.
    pub fn sign(&self) -> f64 {
        if self.active {
            -1.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_latched_held_flips_once() {
        let mut t = Toggle::new(ToggleKind::Latched);
        assert_eq!(t.kind(), ToggleKind::Latched);

        // Held for 10 cycles
        let flips = (0..10).filter(|_| t.update(true)).count();
        assert_eq!(flips, 1);
        assert!(t.is_active());

        // Released
        assert!(!t.update(false));
        assert!(t.is_active());

        // Pressed again for several cycles gives a second flip
        let flips = (0..5).filter(|_| t.update(true)).count();
        assert_eq!(flips, 1);
        assert!(!t.is_active());
    }

    #[test]
    fn test_latched_sign() {
        let mut t = Toggle::new(ToggleKind::Latched);
        assert_eq!(t.sign(), 1.0);

        t.update(true);
        assert_eq!(t.sign(), -1.0);
        t.update(true);
        assert_eq!(t.sign(), -1.0);
        t.update(false);
        t.update(true);
        assert_eq!(t.sign(), 1.0);
    }

    #[test]
    fn test_hold() {
        let mut t = Toggle::new(ToggleKind::Hold);
        assert_eq!(t.kind(), ToggleKind::Hold);

        for &pressed in [true, true, true, false, true, false, false].iter() {
            t.update(pressed);
            assert_eq!(t.is_active(), pressed);
            assert_eq!(t.sign(), if pressed { -1.0 } else { 1.0 });
        }
    }

    #[test]
    fn test_rising_edge() {
        let mut e = RisingEdge::default();
        let edges: Vec<bool> = [false, true, true, false, true]
            .iter()
            .map(|&p| e.update(p))
            .collect();

        assert_eq!(edges, vec![false, true, false, false, true]);
    }
}
