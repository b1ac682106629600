//! Cyclic module interface
//!
//! Every module stepped by the driver loop implements `State`: it is
//! initialised once with an `InitContext`, then `proc` is called once per
//! control period.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::path::Path;

// Internal imports
use crate::archive::{ArchiveError, Archiver};
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Execution context handed to modules on initialisation.
#[derive(Clone, Copy, Debug)]
pub struct InitContext<'a> {
    pub session: &'a Session,

    /// If false modules must not create archive files.
    pub archive: bool,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

pub trait State {
    /// Module name, also the directory its archives are written into.
    const NAME: &'static str;

    /// Data required during initialisation, usually a parameter file name.
    type InitData;
    type InitError;

    type InputData;
    type OutputData;
    type StatusReport;
    type ProcError;

    /// Initialise the module before the first cycle.
    fn init(&mut self, init_data: Self::InitData, ctx: &InitContext)
        -> Result<(), Self::InitError>;

    /// Process one control cycle, returning the output and a status report.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> InitContext<'a> {
    /// Open `<arch_root>/<module>/<file_name>`.
    ///
    /// With archiving disabled no file is created and an uninitialised
    /// archiver is returned instead.
    pub fn archiver(&self, module: &str, file_name: &str)
        -> Result<Archiver, ArchiveError>
    {
        if self.archive {
            Archiver::from_path(self.session, Path::new(module).join(file_name))
        }
        else {
            Ok(Archiver::default())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_archiver_follows_archive_flag() {
        let sessions = std::env::temp_dir()
            .join(format!("drive_module_{}", std::process::id()));
        std::fs::remove_dir_all(&sessions).ok();
        let session = Session::create_in(&sessions, "drive_exec", Utc::now())
            .unwrap();
        let file = session.arch_root.join("drive_ctrl").join("input.csv");

        // Disabled: nothing on disk and writes are refused
        let ctx = InitContext { session: &session, archive: false };
        let mut a = ctx.archiver("drive_ctrl", "input.csv").unwrap();
        assert!(!file.exists());
        assert!(matches!(a.serialise(1.0f64), Err(ArchiveError::NotInitialised)));

        // Enabled: the file is created in the module's directory
        let ctx = InitContext { session: &session, archive: true };
        let mut a = ctx.archiver("drive_ctrl", "input.csv").unwrap();
        assert!(file.is_file());
        assert!(a.serialise((1.0f64, 2.0f64)).is_ok());

        std::fs::remove_dir_all(&sessions).ok();
    }
}
