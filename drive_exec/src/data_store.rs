//! # Data Store

use log::{info, warn};

use crate::{
    drive_ctrl::{self, DriveCommand, DriveCtrl},
    drive_hw::{GearShifter, SimDriveHw},
    params::DriveExecParams,
};

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Gives the reason the drive has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    MakeSafeTc,
    CycleOverruns,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    // Safe mode variables
    /// Determines if the drive is in safe mode.
    pub safe: bool,

    /// Gives the reason for the drive being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    // DriveCtrl
    pub drive_ctrl: DriveCtrl,
    /// Driver inputs, held between cycles until a new `Drive` or `Stop` TC
    pub drive_ctrl_input: drive_ctrl::InputData,
    pub drive_ctrl_output: DriveCommand,
    pub drive_ctrl_status_rpt: drive_ctrl::StatusReport,

    // Hardware
    pub drive_hw: SimDriveHw,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Number of consecutive cycles which finished on time
    pub num_consec_good_cycles: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Puts the drive into safe mode with the given cause.
    ///
    /// The held driver inputs are zeroed.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);
            self.safe = true;
            self.safe_cause = Some(cause);

            self.drive_ctrl_input = drive_ctrl::InputData::default();
        }
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// Returns `Ok(())` if this cause was cleared and safe mode was disabled, or `Err(())`
    /// otherwise. To remove safe mode the provided cause must match the initial reason for safe
    /// mode being enabled.
    ///
    /// If safe mode was not enabled `Ok(())` is returned
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), ()> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) => {
                if cause == root_cause {
                    self.safe = false;
                    self.safe_cause = None;
                    info!("Make unsafe requested, root cause match, safe mode disabled");
                    Ok(())
                } else {
                    Err(())
                }
            }
            None => Ok(()),
        }
    }

    /// Shift gear in both the control law and the hardware.
    pub fn shift_gear(&mut self, high_gear: bool) {
        self.drive_ctrl.set_high_gear(high_gear);
        self.drive_hw.shift(high_gear);
    }

    /// Account for the timing of the cycle which just finished.
    ///
    /// More than `max_consec_cycle_overruns` consecutive overruns puts the
    /// drive into safe mode. Overrun safe mode is only left again after
    /// `recovery_good_cycles` consecutive on-time cycles.
    pub fn record_cycle_timing(&mut self, overran: bool, params: &DriveExecParams) {
        if overran {
            self.num_consec_cycle_overruns += 1;
            self.num_consec_good_cycles = 0;

            if self.num_consec_cycle_overruns > params.max_consec_cycle_overruns {
                self.make_safe(SafeModeCause::CycleOverruns);
            }
        }
        else {
            self.num_consec_cycle_overruns = 0;
            self.num_consec_good_cycles = self.num_consec_good_cycles.saturating_add(1);

            if self.safe_cause == Some(SafeModeCause::CycleOverruns)
                && self.num_consec_good_cycles >= params.recovery_good_cycles
            {
                self.make_unsafe(SafeModeCause::CycleOverruns).ok();
            }
        }
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears the previous cycle's outputs. In safe mode the held inputs are
    /// forced to zero.
    pub fn cycle_start(&mut self) {
        self.drive_ctrl_output = DriveCommand::default();
        self.drive_ctrl_status_rpt = drive_ctrl::StatusReport::default();

        if self.safe {
            self.drive_ctrl_input = drive_ctrl::InputData::default();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_safe_mode() {
        let mut ds = DataStore::default();
        ds.drive_ctrl_input.throttle = 0.8;

        ds.make_safe(SafeModeCause::MakeSafeTc);
        assert!(ds.safe);
        assert_eq!(ds.drive_ctrl_input, drive_ctrl::InputData::default());

        // Wrong cause does not clear safe mode
        assert_eq!(ds.make_unsafe(SafeModeCause::CycleOverruns), Err(()));
        assert!(ds.safe);

        assert_eq!(ds.make_unsafe(SafeModeCause::MakeSafeTc), Ok(()));
        assert!(!ds.safe);
        assert_eq!(ds.safe_cause, None);
    }

    #[test]
    fn test_cycle_start_in_safe_mode() {
        let mut ds = DataStore::default();
        ds.make_safe(SafeModeCause::CycleOverruns);
        ds.drive_ctrl_input.wheel = 0.5;

        ds.cycle_start();
        assert_eq!(ds.drive_ctrl_input, drive_ctrl::InputData::default());
    }

    fn timing_params() -> DriveExecParams {
        DriveExecParams {
            cycle_period_s: 0.02,
            max_consec_cycle_overruns: 2,
            recovery_good_cycles: 3,
            log_level: String::from("info"),
            module_log_levels: Default::default(),
            archive: false,
        }
    }

    #[test]
    fn test_overrun_safe_mode_hysteresis() {
        let p = timing_params();
        let mut ds = DataStore::default();

        // Two overruns are tolerated, the third makes the drive safe
        ds.record_cycle_timing(true, &p);
        ds.record_cycle_timing(true, &p);
        assert!(!ds.safe);
        ds.record_cycle_timing(true, &p);
        assert!(ds.safe);
        assert_eq!(ds.safe_cause, Some(SafeModeCause::CycleOverruns));

        // A single good cycle is not enough to recover
        ds.record_cycle_timing(false, &p);
        ds.record_cycle_timing(false, &p);
        assert!(ds.safe);

        // An overrun restarts the recovery count
        ds.record_cycle_timing(true, &p);
        ds.record_cycle_timing(false, &p);
        ds.record_cycle_timing(false, &p);
        assert!(ds.safe);
        ds.record_cycle_timing(false, &p);
        assert!(!ds.safe);
        assert_eq!(ds.safe_cause, None);
    }

    #[test]
    fn test_good_cycles_keep_tc_safe_mode() {
        let p = timing_params();
        let mut ds = DataStore::default();
        ds.make_safe(SafeModeCause::MakeSafeTc);

        for _ in 0..10 {
            ds.record_cycle_timing(false, &p);
        }
        assert!(ds.safe);
        assert_eq!(ds.safe_cause, Some(SafeModeCause::MakeSafeTc));
    }

    #[test]
    fn test_shift_gear() {
        let mut ds = DataStore::default();
        ds.shift_gear(true);
        assert!(ds.drive_ctrl.high_gear());
        assert!(ds.drive_hw.solenoid_high);

        ds.shift_gear(false);
        assert!(!ds.drive_ctrl.high_gear());
        assert!(!ds.drive_hw.solenoid_high);
    }
}
