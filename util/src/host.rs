//! Host platform utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::env;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "DRIVE_SW_ROOT";

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the root directory of the drive software.
///
/// The root is read from the `DRIVE_SW_ROOT` environment variable and must be
/// an existing directory.
pub fn get_drive_sw_root() -> Result<PathBuf, env::VarError> {
    let root = PathBuf::from(env::var(SW_ROOT_ENV_VAR)?);

    if root.is_dir() {
        Ok(root)
    }
    else {
        Err(env::VarError::NotPresent)
    }
}

/// Get the directory holding the parameter files, `$DRIVE_SW_ROOT/params`.
pub fn get_params_dir() -> Result<PathBuf, env::VarError> {
    Ok(get_drive_sw_root()?.join("params"))
}
