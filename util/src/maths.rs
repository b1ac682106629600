//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Apply polynomial coefficients to a value.
///
/// The order of the coefficients is highest power first, i.e. if there are 3
/// coefficients it's a 2nd order polynomial with c[0]*x^2 + c[1]*x + c[2].
pub fn poly_val<T>(value: &T, coeffs: &[T]) -> T
where
    T: Float + std::ops::AddAssign
{
    let mut res = T::zero();

    for i in 0..(coeffs.len() as i32) {
        res += value.powi(coeffs.len() as i32 - 1 - i) * coeffs[i as usize];
    }

    res
}

/// Limit a value to the range `[min, max]`.
///
/// NaN values are passed through unchanged.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Fold a value back towards zero by one full unit.
///
/// Values above `1` have `1` subtracted, values below `-1` have `1` added,
/// anything else collapses to zero. A value can therefore only leak one unit
/// per call, and any finite value converges to zero in a bounded number of
/// calls.
pub fn fold_unit<T>(value: T) -> T
where
    T: Float
{
    if value > T::one() {
        value - T::one()
    }
    else if value < -T::one() {
        value + T::one()
    }
    else {
        T::zero()
    }
}
