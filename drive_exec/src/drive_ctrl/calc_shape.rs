//! Wheel input shaping

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::FRAC_PI_2;
use super::GearConsts;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Shape the raw wheel input with the gear's sine non-linearity.
///
/// Each pass computes `sin(pi/2 * k * w) / sin(pi/2 * k)`, which keeps
/// `f(1) = 1` and `f(-1) = -1` while flattening the response near centre.
///
/// `sin(pi/2 * k)` must be non-zero, which `Params::are_valid` checks at load
/// time.
pub fn shape(wheel: f64, consts: &GearConsts) -> f64 {
    let k = consts.turn_nonlin;
    let denom = (FRAC_PI_2 * k).sin();

    (0..consts.shaping_passes)
        .fold(wheel, |w, _| (FRAC_PI_2 * k * w).sin() / denom)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive_ctrl::{Gear, Params};

    const EPS: f64 = 1e-12;

    #[test]
    fn test_shape_end_points() {
        for k in [0.1, 0.5, 0.6, 0.9, 1.0, 1.3, 3.0].iter() {
            let mut p = Params::default();
            p.high_gear.turn_nonlin = *k;
            p.low_gear.turn_nonlin = *k;

            for gear in [Gear::High, Gear::Low].iter() {
                let c = p.gear_consts(*gear);
                assert!((shape(1.0, &c) - 1.0).abs() < EPS, "k = {}", k);
                assert!((shape(-1.0, &c) + 1.0).abs() < EPS, "k = {}", k);
                assert_eq!(shape(0.0, &c), 0.0);
            }
        }
    }

    #[test]
    fn test_shape_single_pass() {
        let c = GearConsts {
            turn_nonlin: 0.5,
            shaping_passes: 1,
            neg_inertia: crate::drive_ctrl::NegInertiaScalar::Fixed(0.0),
            sensitivity: 1.0,
            sensitivity_cutoff: None
        };

        let expected = (FRAC_PI_2 * 0.25).sin() / (FRAC_PI_2 * 0.5).sin();
        assert!((shape(0.5, &c) - expected).abs() < EPS);
    }

    #[test]
    fn test_shape_odd_and_gear_dependent() {
        let p = Params::default();
        let high = p.gear_consts(Gear::High);
        let low = p.gear_consts(Gear::Low);

        for i in 1..20 {
            let w = i as f64 / 20.0;
            assert!((shape(-w, &high) + shape(w, &high)).abs() < EPS);
            assert!((shape(-w, &low) + shape(w, &low)).abs() < EPS);
        }

        // With the same non-linearity the extra low gear pass still changes
        // the response
        let mut same = Params::default();
        same.high_gear.turn_nonlin = 0.5;
        same.low_gear.turn_nonlin = 0.5;
        let high = same.gear_consts(Gear::High);
        let low = same.gear_consts(Gear::Low);
        assert!((shape(0.3, &high) - shape(0.3, &low)).abs() > 1e-2);
    }
}
