//! # Drive Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use util::logger::{parse_level, LevelFilter};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
pub struct DriveExecParams {

    /// Target period of one cycle of the driver loop.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Number of consecutive cycle overruns after which the drive is made safe.
    pub max_consec_cycle_overruns: u64,

    /// Number of consecutive on-time cycles needed to leave overrun safe mode.
    pub recovery_good_cycles: u64,

    /// Minimum log level, for example "info" or "trace".
    pub log_level: String,

    /// Log level overrides for individual modules, keyed by target (for example
    /// "drive_lib::drive_ctrl").
    #[serde(default)]
    pub module_log_levels: HashMap<String, String>,

    /// Write the drive control archives each cycle.
    #[serde(default)]
    pub archive: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ExecParamsError {
    #[error("The cycle period must be positive, found {0} s")]
    InvalidCyclePeriod(f64),

    #[error("Unrecognised log level \"{0}\"")]
    InvalidLogLevel(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DriveExecParams {

    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), ExecParamsError> {
        if !self.cycle_period_s.is_finite() || self.cycle_period_s <= 0.0 {
            return Err(ExecParamsError::InvalidCyclePeriod(self.cycle_period_s))
        }

        self.log_levels().map(|_| ())
    }

    /// Get the minimum log level and the per-module overrides.
    pub fn log_levels(&self) 
        -> Result<(LevelFilter, Vec<(String, LevelFilter)>), ExecParamsError> 
    {
        let level = parse_level(&self.log_level)
            .ok_or_else(|| ExecParamsError::InvalidLogLevel(self.log_level.clone()))?;

        let mut module_levels = Vec::with_capacity(self.module_log_levels.len());
        for (target, l) in self.module_log_levels.iter() {
            let filter = parse_level(l)
                .ok_or_else(|| ExecParamsError::InvalidLogLevel(l.clone()))?;
            module_levels.push((target.clone(), filter));
        }

        // Keep the order stable for the start up log
        module_levels.sort_by(|a, b| a.0.cmp(&b.0));

        Ok((level, module_levels))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PARAMS_TOML: &str = r#"
cycle_period_s = 0.02
max_consec_cycle_overruns = 50
recovery_good_cycles = 25
log_level = "trace"
archive = true

[module_log_levels]
"drive_lib::drive_ctrl" = "debug"
"drive_lib::drive_hw" = "info"
"#;

    #[test]
    fn test_parse_exec_params() {
        let p: DriveExecParams = util::params::from_str(PARAMS_TOML).unwrap();

        assert!(p.are_valid().is_ok());
        assert!(p.archive);
        assert_eq!(p.recovery_good_cycles, 25);

        let (level, module_levels) = p.log_levels().unwrap();
        assert_eq!(level, LevelFilter::Trace);
        assert_eq!(module_levels, vec![
            (String::from("drive_lib::drive_ctrl"), LevelFilter::Debug),
            (String::from("drive_lib::drive_hw"), LevelFilter::Info),
        ]);
    }

    #[test]
    fn test_invalid_exec_params() {
        let mut p: DriveExecParams = util::params::from_str(PARAMS_TOML).unwrap();
        p.cycle_period_s = 0.0;
        assert_eq!(p.are_valid(), Err(ExecParamsError::InvalidCyclePeriod(0.0)));

        let mut p: DriveExecParams = util::params::from_str(PARAMS_TOML).unwrap();
        p.log_level = String::from("shouty");
        assert_eq!(
            p.are_valid(), 
            Err(ExecParamsError::InvalidLogLevel(String::from("shouty")))
        );
    }
}
