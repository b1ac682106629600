//! Drive control module
//!
//! Converts the driver's throttle and wheel (steering) inputs into
//! independent left and right motor commands for a skid steer drivetrain.
//!
//! Each cycle the inputs flow through the following stages:
//!
//! ```text
//! raw inputs -> shape -> negative inertia -> quick turn / mix
//!            -> saturate -> linearise -> dispatch
//! ```
//!
//! The only state carried between cycles is held in `ControlState`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod gear;
mod params;
mod state;
mod calc_shape;
mod calc_neg_inertia;
mod calc_mix;
mod calc_linearise;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use gear::*;
pub use params::*;
pub use state::*;
pub use calc_shape::shape;
pub use calc_neg_inertia::{compensate, sensitivity};
pub use calc_mix::{mix, MixOutput, SatSide};
pub use calc_linearise::{linearise, output_stage};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Shaped wheel magnitude above which the low gear "less extended" negative
/// inertia scalar is used.
pub const LOW_GEAR_LESS_EXT_THRESHOLD: f64 = 0.65;

/// Throttle magnitude below which quick turn updates the quick stop
/// accumulator.
pub const QUICK_STOP_THROTTLE_THRESHOLD: f64 = 0.2;

/// Commands with a magnitude below this value are snapped to zero before
/// linearisation.
pub const OUTPUT_DEAD_BAND: f64 = 0.01;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while initialising DriveCtrl.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Failed to load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Loaded parameters are invalid: {0}")]
    ParamsInvalid(ParamsError),

    #[error("Failed to initialise the archives: {0}")]
    ArchiveError(util::archive::ArchiveError),
}
