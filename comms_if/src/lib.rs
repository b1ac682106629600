//! # Communications interface crate.
//!
//! Provides the common command interfaces for the drive software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommand definitions, the commands a driver (or a script) sends to the drive exec.
pub mod tc;
