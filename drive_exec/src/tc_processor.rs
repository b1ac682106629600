//! # Telecommand processor module
//!
//! The telecommand processor handles TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use comms_if::tc::Tc;
use drive_lib::{
    data_store::{DataStore, SafeModeCause},
    drive_ctrl::InputData
};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules. While in safe
/// mode only `MakeUnsafe`, `MakeSafe` and `Stop` are executed.
pub(crate) fn exec(ds: &mut DataStore, tc: &Tc) {

    if ds.safe {
        match tc {
            Tc::MakeSafe | Tc::MakeUnsafe | Tc::Stop => (),
            _ => {
                warn!("Cannot execute {:?} while in safe mode", tc);
                return
            }
        }
    }

    // Handle different Tcs
    match tc {
        Tc::Drive { throttle, wheel, quick_turn } => {
            debug!(
                "Recieved Drive command: throttle {}, wheel {}, quick turn {}",
                throttle, wheel, quick_turn
            );
            ds.drive_ctrl_input = InputData {
                throttle: *throttle,
                wheel: *wheel,
                quick_turn: *quick_turn
            };
        },
        Tc::ShiftGear { high } => {
            debug!("Recieved ShiftGear command (high: {})", high);
            ds.shift_gear(*high);
        },
        Tc::Stop => {
            debug!("Recieved Stop command");
            ds.drive_ctrl_input = InputData::default();
        },
        Tc::MakeSafe => {
            debug!("Recieved MakeSafe command");
            ds.make_safe(SafeModeCause::MakeSafeTc);
        },
        Tc::MakeUnsafe => {
            debug!("Recieved MakeUnsafe command");
            if ds.make_unsafe(SafeModeCause::MakeSafeTc).is_err() {
                warn!(
                    "Cannot make unsafe, safe mode was caused by {:?}", 
                    ds.safe_cause
                );
            }
        },
        Tc::ResetState => {
            debug!("Recieved ResetState command");
            ds.drive_ctrl.reset_state();
        }
    }

}
