//! # Drive library.
//!
//! This library allows the drive executable (and benchmarks) to access the items defined inside
//! the drive crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data store - the state shared between modules during one cycle of the driver loop
pub mod data_store;

/// Drive control module - converts the driver's throttle and wheel inputs into left and right
/// motor commands
pub mod drive_ctrl;

/// Drive hardware interfaces - motor dispatch and gear shifting collaborators
pub mod drive_hw;

/// Executable parameters
pub mod params;
