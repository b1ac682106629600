//! Gear states and the per-gear constant table

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The gear the drivetrain is currently in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gear {
    High,
    Low
}

/// Selection of the negative inertia scalar for a gear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NegInertiaScalar {
    /// The same scalar is used whatever the wheel is doing.
    Fixed(f64),

    /// The scalar depends on the direction and magnitude of the wheel input.
    Directional {
        /// Wheel moving further away from centre.
        more: f64,
        /// Wheel returning to centre (or still) near the centre.
        less: f64,
        /// Wheel returning to centre (or still) while far from centre.
        less_ext: f64,
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// All constants the control law needs for one gear.
///
/// Built from `Params::gear_consts`, so every gear dependent branch in the
/// control law reads from this table rather than testing the gear itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GearConsts {
    /// Wheel non-linearity factor `k` of the shaping function.
    pub turn_nonlin: f64,

    /// Number of times the shaping function is applied.
    pub shaping_passes: u32,

    /// Negative inertia scalar selection.
    pub neg_inertia: NegInertiaScalar,

    /// Base turn sensitivity.
    pub sensitivity: f64,

    /// If set, throttle magnitudes above this value relax the sensitivity
    /// towards 1.
    pub sensitivity_cutoff: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Gear {
    /// Get the gear from the high gear flag.
    pub fn from_high(high_gear: bool) -> Self {
        if high_gear {
            Gear::High
        }
        else {
            Gear::Low
        }
    }

    /// Number of passes of the shaping function for this gear.
    ///
    /// Low gear gets an extra pass for finer control near centre.
    pub fn shaping_passes(&self) -> u32 {
        match self {
            Gear::High => 2,
            Gear::Low => 3
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_gear_from_high() {
        assert_eq!(Gear::from_high(true), Gear::High);
        assert_eq!(Gear::from_high(false), Gear::Low);
    }

    #[test]
    fn test_shaping_passes() {
        assert_eq!(Gear::High.shaping_passes(), 2);
        assert_eq!(Gear::Low.shaping_passes(), 3);
    }
}
