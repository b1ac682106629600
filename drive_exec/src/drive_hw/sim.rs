//! # Simulated drive hardware
//!
//! Stands in for the motor controllers and the shifting solenoid when running
//! the driver loop off-robot. Demands are logged and kept for inspection.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{GearShifter, MotorDispatch, PairedMotorDemands};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Simulated motors and shifter.
#[derive(Debug, Default)]
pub struct SimDriveHw {
    /// The last demands sent to the motors.
    pub demands: PairedMotorDemands,

    /// The state of the shifting solenoid, `true` for high gear.
    pub solenoid_high: bool,

    /// Number of times demands have been sent.
    pub num_dispatches: u64,

    /// Number of times the gear has been shifted.
    pub num_shifts: u64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimDriveHw {
    /// Create new simulated hardware with the solenoid in the given state.
    pub fn new(solenoid_high: bool) -> Self {
        Self {
            solenoid_high,
            ..Self::default()
        }
    }
}

impl MotorDispatch for SimDriveHw {
    fn set_motor_power(&mut self, left: f64, right: f64) {
        self.demands = PairedMotorDemands::from_sides(left, right);
        self.num_dispatches += 1;

        trace!("SimDriveHw demands: {:?}", self.demands);
    }
}

impl GearShifter for SimDriveHw {
    fn shift(&mut self, high_gear: bool) {
        if self.solenoid_high != high_gear {
            self.num_shifts += 1;
        }
        self.solenoid_high = high_gear;

        debug!("SimDriveHw solenoid set to {}", high_gear);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_dispatch() {
        let mut hw = SimDriveHw::new(true);
        hw.set_motor_power(0.2, 0.4);
        hw.set_motor_power(-0.2, 1.4);

        assert_eq!(hw.num_dispatches, 2);
        assert_eq!(hw.demands, PairedMotorDemands::from_sides(-0.2, 1.0));
    }

    #[test]
    fn test_shift() {
        let mut hw = SimDriveHw::new(true);
        hw.shift(true);
        assert_eq!(hw.num_shifts, 0);

        hw.shift(false);
        assert!(!hw.solenoid_high);
        assert_eq!(hw.num_shifts, 1);
    }
}
