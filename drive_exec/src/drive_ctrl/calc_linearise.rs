//! Output linearisation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use util::maths::{clamp, poly_val};
use super::{DriveCommand, OUTPUT_DEAD_BAND};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Map a normalised demand through the motor response correction curve.
///
/// Positive demands are passed through the quartic `coeffs` (highest power
/// first), negative demands use the curve rotated by 180 degrees, so the
/// function is odd. Demands inside the dead band give zero.
pub fn linearise(x: f64, coeffs: &[f64; 5]) -> f64 {
    let x = if x.abs() < OUTPUT_DEAD_BAND { 0.0 } else { x };

    if x > 0.0 {
        poly_val(&x, coeffs)
    }
    else if x < 0.0 {
        -linearise(-x, coeffs)
    }
    else {
        0.0
    }
}

/// Linearise both sides and limit them to [-1, 1].
///
/// Returns the final command and whether each side (left, right) had to be
/// limited.
pub fn output_stage(
    left: f64, 
    right: f64, 
    coeffs: &[f64; 5]
) -> (DriveCommand, [bool; 2]) {
    let lin_left = linearise(left, coeffs);
    let lin_right = linearise(right, coeffs);

    let cmd = DriveCommand {
        left: clamp(&lin_left, &-1.0, &1.0),
        right: clamp(&lin_right, &-1.0, &1.0)
    };

    (cmd, [cmd.left != lin_left, cmd.right != lin_right])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive_ctrl::Params;

    #[test]
    fn test_linearise_odd() {
        let coeffs = Params::default().linear_coeffs;
        let offset = [0.5, -1.0, 2.0, 0.3, 0.05];

        for c in [coeffs, offset].iter() {
            for i in -150..=150 {
                let x = i as f64 / 100.0;
                assert_eq!(linearise(-x, c), -linearise(x, c), "x = {}", x);
            }
        }
    }

    #[test]
    fn test_linearise_dead_band() {
        // A non-zero constant term shows the dead band snapping to zero
        let coeffs = [0.0, 0.0, 0.0, 1.0, 0.05];

        assert_eq!(linearise(0.0, &coeffs), 0.0);
        assert_eq!(linearise(0.009, &coeffs), 0.0);
        assert_eq!(linearise(-0.009, &coeffs), 0.0);
        assert!((linearise(0.01, &coeffs) - 0.06).abs() < 1e-12);
        assert!((linearise(-0.5, &coeffs) + 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_linearise_polynomial() {
        let coeffs = [1.0, 2.0, 3.0, 4.0, 5.0];

        assert_eq!(linearise(1.0, &coeffs), 15.0);
        assert_eq!(linearise(0.5, &coeffs), 0.0625 + 0.25 + 0.75 + 2.0 + 5.0);
    }

    #[test]
    fn test_output_stage_limits() {
        let coeffs = [0.0, 0.0, 0.0, 2.0, 0.0];

        let (cmd, limited) = output_stage(0.8, -0.25, &coeffs);
        assert_eq!(cmd, DriveCommand { left: 1.0, right: -0.5 });
        assert_eq!(limited, [true, false]);

        let (cmd, limited) = output_stage(0.1, -0.9, &coeffs);
        assert_eq!(cmd, DriveCommand { left: 0.2, right: -1.0 });
        assert_eq!(limited, [false, true]);
    }
}
