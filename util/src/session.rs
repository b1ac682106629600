//! Drive session directories and the session clock
//!
//! A session is one execution of the driver loop. Everything it produces
//! lives under `$DRIVE_SW_ROOT/<sessions_dir>/<exec>_<timestamp>/`:
//!
//! ```text
//! <exec>.log      - log file
//! arch/           - CSV archives
//! params/         - snapshot of the parameter files the loop ran with
//! ```
//!
//! The session epoch is process wide so that log lines and the drive script
//! share one clock.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::{host, time};

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Timestamp suffix of session directory names, sortable by start time.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const ARCH_DIR: &str = "arch";

const PARAMS_SNAPSHOT_DIR: &str = "params";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Directory layout of a running drive session.
#[derive(Clone, Debug)]
pub struct Session {
    /// Time at which the session started.
    pub epoch: DateTime<Utc>,

    pub session_root: PathBuf,

    /// Directory the archivers write into.
    pub arch_root: PathBuf,

    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable (DRIVE_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("A session has already been started by this process")]
    AlreadyStarted,

    #[error("Cannot create the session directory {0:?}: {1}")]
    CannotCreateDir(PathBuf, std::io::Error),

    #[error("Cannot copy parameter file {0:?} into the session: {1}")]
    CannotSnapshotParams(PathBuf, std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start the session for `exec_name` under `$DRIVE_SW_ROOT/<sessions_dir>`
    /// and start the session clock.
    ///
    /// Only one session may be started per process.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        let root = host::get_drive_sw_root()
            .map_err(|_| SessionError::SwRootNotSet)?;

        let epoch = Utc::now();
        SESSION_EPOCH.try_init_once(|| epoch)
            .map_err(|_| SessionError::AlreadyStarted)?;

        Self::create_in(&root.join(sessions_dir), exec_name, epoch)
    }

    /// Create the directory layout of a session starting at `epoch` inside
    /// `sessions_path`. Does not touch the session clock.
    pub(crate) fn create_in(
        sessions_path: &Path,
        exec_name: &str,
        epoch: DateTime<Utc>
    ) -> Result<Self, SessionError> {
        let session_root = sessions_path.join(
            format!("{}_{}", exec_name, epoch.format(TIMESTAMP_FORMAT))
        );

        // Also creates the session root
        let arch_root = session_root.join(ARCH_DIR);
        create_dir(&arch_root)?;

        Ok(Session {
            epoch,
            log_file_path: session_root.join(format!("{}.log", exec_name)),
            session_root,
            arch_root,
        })
    }

    /// Copy the named parameter files from `$DRIVE_SW_ROOT/params` into the
    /// session, so archives can be replayed against the calibration that
    /// produced them.
    pub fn snapshot_params(&self, file_names: &[&str]) -> Result<(), SessionError> {
        let params_dir = host::get_params_dir()
            .map_err(|_| SessionError::SwRootNotSet)?;

        self.snapshot_params_from(&params_dir, file_names)
    }

    fn snapshot_params_from(
        &self,
        params_dir: &Path,
        file_names: &[&str]
    ) -> Result<(), SessionError> {
        let dest_dir = self.session_root.join(PARAMS_SNAPSHOT_DIR);
        create_dir(&dest_dir)?;

        for name in file_names {
            let src = params_dir.join(name);
            fs::copy(&src, dest_dir.join(name))
                .map_err(|e| SessionError::CannotSnapshotParams(src, e))?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Seconds elapsed on the session clock, or `None` before a session has been
/// started.
pub fn get_elapsed_seconds() -> Option<f64> {
    SESSION_EPOCH.get().map(seconds_since)
}

/// Seconds elapsed since `epoch`, NaN if the duration overflows.
pub fn seconds_since(epoch: &DateTime<Utc>) -> f64 {
    time::duration_to_seconds(Utc::now() - *epoch).unwrap_or(std::f64::NAN)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn create_dir(path: &Path) -> Result<(), SessionError> {
    fs::create_dir_all(path)
        .map_err(|e| SessionError::CannotCreateDir(path.to_path_buf(), e))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    /// A scratch directory unique to one test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("drive_session_{}_{}", name, std::process::id()));
        fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_session_layout() {
        let sessions = scratch_dir("layout");
        let epoch = Utc.ymd(2021, 3, 4).and_hms(5, 6, 7);

        let session = Session::create_in(&sessions, "drive_exec", epoch).unwrap();

        assert_eq!(
            session.session_root,
            sessions.join("drive_exec_20210304_050607")
        );
        assert_eq!(session.arch_root, session.session_root.join("arch"));
        assert_eq!(
            session.log_file_path,
            session.session_root.join("drive_exec.log")
        );
        assert!(session.arch_root.is_dir());
        assert_eq!(session.epoch, epoch);

        fs::remove_dir_all(&sessions).ok();
    }

    #[test]
    fn test_snapshot_params() {
        let sessions = scratch_dir("snapshot");
        let params_dir = sessions.join("src_params");
        fs::create_dir_all(&params_dir).unwrap();
        fs::write(params_dir.join("drive_ctrl.toml"), "start_in_high_gear = true\n")
            .unwrap();

        let session = Session::create_in(&sessions, "drive_exec", Utc::now())
            .unwrap();
        session.snapshot_params_from(&params_dir, &["drive_ctrl.toml"]).unwrap();

        let copied = fs::read_to_string(
            session.session_root.join("params").join("drive_ctrl.toml")
        ).unwrap();
        assert_eq!(copied, "start_in_high_gear = true\n");

        // A missing file names the file which could not be copied
        match session.snapshot_params_from(&params_dir, &["missing.toml"]) {
            Err(SessionError::CannotSnapshotParams(p, _)) => {
                assert_eq!(p, params_dir.join("missing.toml"))
            },
            r => panic!("Expected CannotSnapshotParams, found {:?}", r)
        }

        fs::remove_dir_all(&sessions).ok();
    }

    #[test]
    fn test_seconds_since() {
        let epoch = Utc::now() - chrono::Duration::milliseconds(1500);
        let s = seconds_since(&epoch);
        assert!(s >= 1.5 && s < 60.0);
    }
}
