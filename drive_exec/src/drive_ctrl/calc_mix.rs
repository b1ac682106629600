//! Quick turn accumulation, arcade mixing and saturation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use util::maths::{clamp, fold_unit};
use super::{ControlState, Params, QUICK_STOP_THROTTLE_THRESHOLD};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Result of mixing one cycle's inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MixOutput {
    /// Left side demand after saturation.
    pub left: f64,

    /// Right side demand after saturation.
    pub right: f64,

    /// The side which exceeded its bound and was clamped, if any.
    pub saturated: Option<SatSide>,

    /// True if the quick stop accumulator was updated this cycle.
    pub quick_stop_updated: bool
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A side of the drivetrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SatSide {
    Left,
    Right
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Mix throttle and the adjusted wheel into left and right demands.
///
/// In quick turn the wheel is used directly as the angular power and any
/// overflow on one side is pushed onto the other. Otherwise the angular power
/// is scaled by throttle and `sensitivity`, the quick stop accumulator is
/// subtracted from it, and overflow is simply clamped.
///
/// Only the first exceeded bound (left high, right high, left low, right low)
/// is handled.
pub fn mix(
    throttle: f64,
    adj_wheel: f64,
    quick_turn: bool,
    sensitivity: f64,
    params: &Params,
    state: &mut ControlState
) -> MixOutput {
    let mut quick_stop_updated = false;
    let over_power: f64;
    let angular_power: f64;

    if quick_turn {
        if throttle.abs() < QUICK_STOP_THROTTLE_THRESHOLD {
            let alpha = params.quick_stop_time_constant;
            state.quick_stop_accum = 
                (1.0 - alpha) * state.quick_stop_accum
                + alpha 
                    * clamp(&adj_wheel, &-1.0, &1.0) 
                    * params.quick_stop_stick_scalar;
            quick_stop_updated = true;
        }

        over_power = 1.0;
        angular_power = adj_wheel;
    }
    else {
        over_power = 0.0;
        angular_power = 
            throttle.abs() * adj_wheel * sensitivity - state.quick_stop_accum;
        state.quick_stop_accum = fold_unit(state.quick_stop_accum);
    }

    let mut left = throttle + angular_power;
    let mut right = throttle - angular_power;
    let saturated;

    if left > 1.0 {
        right -= over_power * (left - 1.0);
        left = 1.0;
        saturated = Some(SatSide::Left);
    }
    else if right > 1.0 {
        left -= over_power * (right - 1.0);
        right = 1.0;
        saturated = Some(SatSide::Right);
    }
    else if left < -1.0 {
        right += over_power * (-1.0 - left);
        left = -1.0;
        saturated = Some(SatSide::Left);
    }
    else if right < -1.0 {
        left += over_power * (-1.0 - right);
        right = -1.0;
        saturated = Some(SatSide::Right);
    }
    else {
        saturated = None;
    }

    MixOutput {
        left,
        right,
        saturated,
        quick_stop_updated
    }
}
