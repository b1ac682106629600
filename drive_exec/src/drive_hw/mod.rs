//! # Drive hardware interfaces
//!
//! The control law only talks to the hardware through the traits in this
//! module. Motor controllers, the shifting solenoid and their wiring belong to
//! the implementors.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod sim;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use sim::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use util::maths::clamp;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something which can drive the left and right sides of the drivetrain.
pub trait MotorDispatch {
    /// Send normalised power demands, in [-1, 1], to each side.
    ///
    /// Implementors own the sign convention of physically paired motors.
    fn set_motor_power(&mut self, left: f64, right: f64);
}

/// Something which can physically shift the drivetrain's gear.
pub trait GearShifter {
    /// Shift into high gear (`true`) or low gear (`false`).
    fn shift(&mut self, high_gear: bool);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Demands for a drivetrain with two motors per side.
///
/// The second motor of each side is mounted facing the first, so it is driven
/// inverted. The right side as a whole is mirrored relative to the left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PairedMotorDemands {
    pub left_1: f64,
    pub left_2: f64,
    pub right_1: f64,
    pub right_2: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PairedMotorDemands {
    /// Build the per-motor demands from side demands.
    ///
    /// Each side is limited to [-1, 1] before being mapped onto the motors.
    pub fn from_sides(left: f64, right: f64) -> Self {
        let left = clamp(&left, &-1.0, &1.0);
        let right = clamp(&right, &-1.0, &1.0);

        Self {
            left_1: left,
            left_2: -left,
            right_1: -right,
            right_2: right
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paired_demands() {
        let d = PairedMotorDemands::from_sides(0.5, -0.25);

        assert_eq!(d, PairedMotorDemands {
            left_1: 0.5,
            left_2: -0.5,
            right_1: 0.25,
            right_2: -0.25
        });
    }

    #[test]
    fn test_paired_demands_limited() {
        let d = PairedMotorDemands::from_sides(1.7, -3.0);

        assert_eq!(d.left_1, 1.0);
        assert_eq!(d.left_2, -1.0);
        assert_eq!(d.right_1, 1.0);
        assert_eq!(d.right_2, -1.0);
    }
}
