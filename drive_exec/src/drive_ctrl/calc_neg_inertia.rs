//! Negative inertia compensation and turn sensitivity

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use util::maths::fold_unit;
use super::{ControlState, GearConsts, NegInertiaScalar, LOW_GEAR_LESS_EXT_THRESHOLD};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Apply negative inertia to the shaped wheel value.
///
/// The change in the raw wheel input since the last cycle is scaled and added
/// to the accumulator, and the accumulator is added to the shaped wheel. The
/// accumulator is then folded back by one unit, so a large kick lasts a few
/// cycles while a small one only lasts the current cycle.
///
/// `raw_wheel` is the wheel input before shaping, `shaped_wheel` is the output
/// of `shape`. Returns the adjusted wheel value.
pub fn compensate(
    raw_wheel: f64,
    shaped_wheel: f64,
    consts: &GearConsts,
    state: &mut ControlState
) -> f64 {
    let delta = raw_wheel - state.prev_wheel;
    state.prev_wheel = raw_wheel;

    let scalar = match consts.neg_inertia {
        NegInertiaScalar::Fixed(s) => s,
        NegInertiaScalar::Directional { more, less, less_ext } => {
            // A still wheel (delta == 0) or a centred wheel counts as "not
            // moving further out"
            if shaped_wheel * delta > 0.0 {
                more
            }
            else if shaped_wheel.abs() > LOW_GEAR_LESS_EXT_THRESHOLD {
                less_ext
            }
            else {
                less
            }
        }
    };

    state.neg_inertia_accum += delta * scalar;

    let adjusted = shaped_wheel + state.neg_inertia_accum;

    state.neg_inertia_accum = fold_unit(state.neg_inertia_accum);

    adjusted
}

/// Get the turn sensitivity for the current throttle.
///
/// If the gear has a sensitivity cutoff and the throttle magnitude exceeds it
/// the sensitivity becomes `1 - (1 - s) / |throttle|`.
pub fn sensitivity(throttle: f64, consts: &GearConsts) -> f64 {
    match consts.sensitivity_cutoff {
        Some(cutoff) if throttle.abs() > cutoff => 
            1.0 - (1.0 - consts.sensitivity) / throttle.abs(),
        _ => consts.sensitivity
    }
}
