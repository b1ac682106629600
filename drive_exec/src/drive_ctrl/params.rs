//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use thiserror::Error;
use super::{Gear, GearConsts, NegInertiaScalar};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Smallest acceptable magnitude of the shaping function's denominator.
const MIN_SHAPING_DENOMINATOR: f64 = 1e-9;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Calibration parameters for drive control.
///
/// Loaded once at start up and never modified by the control law.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Params {

    // ---- GEARS ----

    /// Constants used in high gear.
    pub high_gear: HighGearParams,

    /// Constants used in low gear.
    pub low_gear: LowGearParams,

    /// Gear the drivetrain is in when the control law is created.
    #[serde(default = "default_start_in_high_gear")]
    pub start_in_high_gear: bool,

    // ---- QUICK TURN ----

    /// Smoothing factor (alpha) of the quick stop accumulator's exponential
    /// moving average, in [0, 1].
    pub quick_stop_time_constant: f64,

    /// Scalar applied to the wheel input before it enters the quick stop
    /// accumulator.
    pub quick_stop_stick_scalar: f64,

    // ---- OUTPUT ----

    /// Linearisation polynomial coefficients `[A, B, C, D, E]` of
    /// `A*x^4 + B*x^3 + C*x^2 + D*x + E`, highest power first.
    pub linear_coeffs: [f64; 5],
}

/// High gear calibration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HighGearParams {
    /// Wheel non-linearity factor.
    ///
    /// Must not be a multiple of 2, which would make the shaping function
    /// divide by zero.
    pub turn_nonlin: f64,

    /// Negative inertia scalar.
    pub neg_inertia_scalar: f64,

    /// Turn sensitivity.
    pub sensitivity: f64,
}

/// Low gear calibration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LowGearParams {
    /// Wheel non-linearity factor.
    ///
    /// Must not be a multiple of 2, which would make the shaping function
    /// divide by zero.
    pub turn_nonlin: f64,

    /// Negative inertia scalar used when the wheel is moving away from
    /// centre.
    pub neg_inertia_more: f64,

    /// Negative inertia scalar used when the wheel is returning to (or
    /// holding near) centre.
    pub neg_inertia_less: f64,

    /// Negative inertia scalar used when the wheel is returning to (or
    /// holding) a position far from centre.
    pub neg_inertia_less_ext: f64,

    /// Turn sensitivity.
    pub sensitivity: f64,

    /// Throttle magnitude above which sensitivity is relaxed towards 1.
    ///
    /// Must be positive.
    pub sensitivity_cutoff: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons a set of parameters can be rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error(
        "The {0:?} gear turn non-linearity ({1}) makes the shaping function \
        divide by zero")]
    ZeroShapingDenominator(Gear, f64),

    #[error("The sensitivity cutoff must be positive, found {0}")]
    InvalidSensitivityCutoff(f64),

    #[error("The quick stop time constant must be in [0, 1], found {0}")]
    InvalidTimeConstant(f64),

    #[error("Parameter {0} is not finite")]
    NonFinite(&'static str),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            high_gear: HighGearParams {
                turn_nonlin: 0.6,
                neg_inertia_scalar: 4.0,
                sensitivity: 0.65,
            },
            low_gear: LowGearParams {
                turn_nonlin: 0.5,
                neg_inertia_more: 3.5,
                neg_inertia_less: 4.0,
                neg_inertia_less_ext: 5.0,
                sensitivity: 0.85,
                sensitivity_cutoff: 0.1,
            },
            start_in_high_gear: default_start_in_high_gear(),
            quick_stop_time_constant: 0.1,
            quick_stop_stick_scalar: 5.0,
            linear_coeffs: [0.15, 0.0, 0.25, 0.6, 0.0],
        }
    }
}

impl Params {

    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), ParamsError> {
        let named = [
            ("high_gear.turn_nonlin", self.high_gear.turn_nonlin),
            ("high_gear.neg_inertia_scalar", self.high_gear.neg_inertia_scalar),
            ("high_gear.sensitivity", self.high_gear.sensitivity),
            ("low_gear.turn_nonlin", self.low_gear.turn_nonlin),
            ("low_gear.neg_inertia_more", self.low_gear.neg_inertia_more),
            ("low_gear.neg_inertia_less", self.low_gear.neg_inertia_less),
            ("low_gear.neg_inertia_less_ext", self.low_gear.neg_inertia_less_ext),
            ("low_gear.sensitivity", self.low_gear.sensitivity),
            ("low_gear.sensitivity_cutoff", self.low_gear.sensitivity_cutoff),
            ("quick_stop_time_constant", self.quick_stop_time_constant),
            ("quick_stop_stick_scalar", self.quick_stop_stick_scalar),
        ];

        for (name, value) in named.iter() {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite(*name))
            }
        }

        if self.linear_coeffs.iter().any(|c| !c.is_finite()) {
            return Err(ParamsError::NonFinite("linear_coeffs"))
        }

        // The shaping function divides by sin(pi/2 * k)
        for gear in [Gear::High, Gear::Low].iter() {
            let k = self.gear_consts(*gear).turn_nonlin;
            if (std::f64::consts::FRAC_PI_2 * k).sin().abs() < MIN_SHAPING_DENOMINATOR {
                return Err(ParamsError::ZeroShapingDenominator(*gear, k))
            }
        }

        if self.low_gear.sensitivity_cutoff <= 0.0 {
            return Err(ParamsError::InvalidSensitivityCutoff(
                self.low_gear.sensitivity_cutoff
            ))
        }

        if !(0.0..=1.0).contains(&self.quick_stop_time_constant) {
            return Err(ParamsError::InvalidTimeConstant(
                self.quick_stop_time_constant
            ))
        }

        Ok(())
    }

    /// Look up the constants for the given gear.
    pub fn gear_consts(&self, gear: Gear) -> GearConsts {
        match gear {
            Gear::High => GearConsts {
                turn_nonlin: self.high_gear.turn_nonlin,
                shaping_passes: gear.shaping_passes(),
                neg_inertia: NegInertiaScalar::Fixed(
                    self.high_gear.neg_inertia_scalar
                ),
                sensitivity: self.high_gear.sensitivity,
                sensitivity_cutoff: None,
            },
            Gear::Low => GearConsts {
                turn_nonlin: self.low_gear.turn_nonlin,
                shaping_passes: gear.shaping_passes(),
                neg_inertia: NegInertiaScalar::Directional {
                    more: self.low_gear.neg_inertia_more,
                    less: self.low_gear.neg_inertia_less,
                    less_ext: self.low_gear.neg_inertia_less_ext,
                },
                sensitivity: self.low_gear.sensitivity,
                sensitivity_cutoff: Some(self.low_gear.sensitivity_cutoff),
            }
        }
    }
}

fn default_start_in_high_gear() -> bool {
    true
}
