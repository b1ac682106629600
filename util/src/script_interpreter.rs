//! # Drive script interpreter module
//!
//! This module provides an interpreter for drive scripts, allowing 
//! telecommands to be replayed into the driver loop at fixed times.
//!
//! A script is a list of `<time_s>: <json tc>;` entries, for example:
//!
//! ```text
//! 0.0: {"type": "ShiftGear", "high": false};
//! 0.5: {"type": "Drive", "throttle": 0.6, "wheel": 0.2};
//! 2.0: {"type": "Stop"};
//! ```
//!
//! Anything outside of an entry (such as `#` comment lines) is ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_tcs` to acquire a list of telecommands that need executing.
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script entries must be in time order, {1} s comes after {0} s")]
    OutOfOrder(f64, f64),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError)
}

/// The result of polling the interpreter.
#[derive(Debug, PartialEq)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        let mut si = Self::from_script_str(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of commands
        let mut tc_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Script regex is invalid");

        for cap in re.captures_iter(script) {
            // Parse the exec time
            let exec_time_s: f64 = match cap[1].parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Entries must be sorted so the queue can be popped from the
            // front.
            if let Some(prev) = tc_queue.back() {
                if exec_time_s < prev.exec_time_s {
                    return Err(ScriptError::OutOfOrder(
                        prev.exec_time_s, exec_time_s
                    ))
                }
            }

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = match Tc::from_json(&cap[3]) {
                Ok(c) => c,
                Err(e) => return Err(ScriptError::InvalidTc(
                    exec_time_s, e
                ))
            };

            // Build command from the match
            tc_queue.push_back(Command {
                exec_time_s,
                tc
            });
        }

        if tc_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            _script_path: None,
            cmds: tc_queue
        })
    }

    /// Return the TCs which are due at the current session time.
    ///
    /// The script clock only runs once a session has been started, before
    /// that nothing is due.
    pub fn get_pending_tcs(&mut self) -> PendingTcs {
        match get_elapsed_seconds() {
            Some(t) => self.get_pending_tcs_at(t),
            None => PendingTcs::None
        }
    }

    /// Return a vector of TCs due at or before `current_time_s`, or `None`
    /// if no TCs need executing yet.
    pub fn get_pending_tcs_at(&mut self, current_time_s: f64) -> PendingTcs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        // Pop items from the queue while the head's exec time has passed.
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s > current_time_s {
                break
            }

            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        // If the vector is longer than 0 return Some, otherwise None
        if tc_vec.is_empty() {
            PendingTcs::None
        }
        else {
            PendingTcs::Some(tc_vec)
        }
    }

    /// Get the number of TCs remaining in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SCRIPT: &str = r#"
# Low gear pull away then a quick turn
0.0: {"type": "ShiftGear", "high": false};
0.0: {"type": "Drive", "throttle": 0.5, "wheel": 0.0};
1.5: {"type": "Drive", "throttle": 0.0, "wheel": 1.0, "quick_turn": true};
3.0: {"type": "Stop"};
"#;

    #[test]
    fn test_parse_script() {
        let si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_tcs(), 4);
        assert_eq!(si.get_duration(), 3.0);
    }

    #[test]
    fn test_pending_tcs() {
        let mut si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        assert_eq!(
            si.get_pending_tcs_at(0.1),
            PendingTcs::Some(vec![
                Tc::ShiftGear { high: false },
                Tc::Drive { throttle: 0.5, wheel: 0.0, quick_turn: false }
            ])
        );
        assert_eq!(si.get_pending_tcs_at(1.0), PendingTcs::None);
        assert_eq!(
            si.get_pending_tcs_at(1.6),
            PendingTcs::Some(vec![
                Tc::Drive { throttle: 0.0, wheel: 1.0, quick_turn: true }
            ])
        );
        assert_eq!(si.get_pending_tcs_at(5.0), PendingTcs::Some(vec![Tc::Stop]));
        assert_eq!(si.get_pending_tcs_at(5.1), PendingTcs::EndOfScript);
    }

    #[test]
    fn test_no_tcs_before_session_start() {
        // No test in this crate starts the session clock
        let mut si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        assert_eq!(si.get_pending_tcs(), PendingTcs::None);
        assert_eq!(si.get_num_tcs(), 4);
    }

    #[test]
    fn test_empty_script() {
        assert!(matches!(
            ScriptInterpreter::from_script_str("# nothing here\n"),
            Err(ScriptError::ScriptEmpty)
        ));
    }

    #[test]
    fn test_out_of_order() {
        let script = "2.0: {\"type\": \"Stop\"};\n1.0: {\"type\": \"Stop\"};\n";
        assert!(matches!(
            ScriptInterpreter::from_script_str(script),
            Err(ScriptError::OutOfOrder(_, _))
        ));
    }

    #[test]
    fn test_invalid_tc() {
        let script = "1.0: {\"type\": \"Jump\"};\n";
        assert!(matches!(
            ScriptInterpreter::from_script_str(script),
            Err(ScriptError::InvalidTc(_, _))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ScriptInterpreter::new("/no/such/script.drv"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
