//! Inputs to and outputs from DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The driver's inputs for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct InputData {
    /// Forwards/backwards demand, conventionally in [-1, 1].
    pub throttle: f64,

    /// Steering demand, conventionally in [-1, 1].
    pub wheel: f64,

    /// Quick turn (turn in place) requested.
    pub quick_turn: bool
}

/// Normalised left and right side motor commands.
///
/// After the full pipeline both sides are in [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DriveCommand {
    pub left: f64,
    pub right: f64
}
