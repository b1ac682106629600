//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications 
//! interface. Telecommands are the driver's instructions to the drive exec:
//! stick inputs, gear shifts and safety commands.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;
use serde_json;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the drive exec by the driver.
///
/// Telecommands are serialised as JSON objects with a `type` tag, for example
/// `{"type": "Drive", "throttle": 0.5, "wheel": -0.1, "quick_turn": false}`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Tc {
    /// Set the driver's stick inputs. The inputs are held until the next
    /// `Drive` or `Stop` command.
    Drive {
        /// Forwards/backwards demand, conventionally in [-1, 1].
        throttle: f64,

        /// Steering demand, conventionally in [-1, 1]. Positive values turn
        /// the left side faster than the right.
        wheel: f64,

        /// Enable quick turn (turning in place at low throttle).
        #[serde(default)]
        quick_turn: bool
    },

    /// Shift the drivetrain into high (`true`) or low (`false`) gear.
    ShiftGear {
        high: bool
    },

    /// Zero the held stick inputs.
    Stop,

    /// Put the drive into safe mode, commanding zero inputs until made
    /// unsafe.
    MakeSafe,

    /// Remove safe mode.
    MakeUnsafe,

    /// Reset the control law's internal accumulators.
    ResetState
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet.
    ///
    /// JSON cannot carry non-finite numbers, so `Drive` inputs parsed here are
    /// always finite.
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_drive() {
        let tc = Tc::from_json(
            r#"{"type": "Drive", "throttle": 0.5, "wheel": -0.25, "quick_turn": true}"#
        ).unwrap();

        assert_eq!(tc, Tc::Drive { throttle: 0.5, wheel: -0.25, quick_turn: true });
    }

    #[test]
    fn test_parse_drive_default_quick_turn() {
        let tc = Tc::from_json(r#"{"type": "Drive", "throttle": 1.0, "wheel": 0.0}"#).unwrap();

        assert_eq!(tc, Tc::Drive { throttle: 1.0, wheel: 0.0, quick_turn: false });
    }

    #[test]
    fn test_parse_unit_and_gear() {
        assert_eq!(Tc::from_json(r#"{"type": "Stop"}"#).unwrap(), Tc::Stop);
        assert_eq!(Tc::from_json(r#"{"type": "MakeSafe"}"#).unwrap(), Tc::MakeSafe);
        assert_eq!(
            Tc::from_json(r#"{"type": "ShiftGear", "high": false}"#).unwrap(),
            Tc::ShiftGear { high: false }
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Tc::from_json(r#"{"type": "Fly"}"#),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "Drive", "wheel": 0.0}"#),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json("not json"),
            Err(TcParseError::InvalidJson(_))
        ));
    }
}
