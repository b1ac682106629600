//! Main drive executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing and handling (from a drive script)
//!         - Drive control processing
//!         - Motor dispatch
//!         - Archiving
//!
//! # Usage
//!
//!     drive_exec <script_path>
//!
//! The `DRIVE_SW_ROOT` environment variable must point at the directory
//! containing `params/` and where the `sessions/` directory will be created.
//!
//! # Modules
//!
//! All modules (e.g. `drive_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use drive_lib::{
    data_store::DataStore,
    drive_ctrl::DriveCtrl,
    drive_hw::{MotorDispatch, SimDriveHw},
    params::DriveExecParams,
};

mod tc_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Report, eyre::{WrapErr, eyre}};

// Internal
use util::{
    module::{InitContext, State},
    logger::logger_init,
    session::Session,
    script_interpreter::{ScriptInterpreter, PendingTcs},
    archive::Archived
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "drive_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // ---- LOAD PARAMETERS ----

    let exec_params: DriveExecParams = util::params::load(
        "drive_exec.toml"
    ).wrap_err("Could not load exec params")?;
    exec_params.are_valid().wrap_err("Exec params are invalid")?;

    // Initialise logger
    let (log_level, module_levels) = exec_params.log_levels()
        .wrap_err("Invalid log levels")?;
    logger_init(log_level, &module_levels, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Drive Executable\n");
    info!("Session directory: {:?}", session.session_root);
    info!("Exec parameters loaded: {:#?}\n", exec_params);

    session.snapshot_params(&["drive_exec.toml", "drive_ctrl.toml"])
        .wrap_err("Could not copy the parameter files into the session")?;

    // ---- INITIALISE TC SOURCE ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    if args.len() != 2 {
        return Err(eyre!(
            "Expected a single drive script argument, found {}", args.len() - 1)
        );
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut script = ScriptInterpreter::new(&args[1])
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs\n",
        script.get_duration(),
        script.get_num_tcs()
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    let init_ctx = InitContext {
        session: &session,
        archive: exec_params.archive
    };

    ds.drive_ctrl.init("drive_ctrl.toml", &init_ctx)
        .wrap_err("Failed to initialise DriveCtrl")?;
    info!("{} init complete", DriveCtrl::NAME);

    // The solenoid starts in whatever gear the control law starts in
    ds.drive_hw = SimDriveHw::new(ds.drive_ctrl.high_gear());
    info!("SimDriveHw init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start();

        // ---- TELECOMMAND PROCESSING ----

        match script.get_pending_tcs() {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec.iter() {
                    tc_processor::exec(&mut ds, tc);
                }
            }
            // Exit if end of script reached
            PendingTcs::EndOfScript => {
                info!("End of drive script reached, stopping");
                break
            }
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        // DriveCtrl processing
        let (output, report) = match ds.drive_ctrl.proc(&ds.drive_ctrl_input) {
            Ok(o) => o,
            Err(e) => match e {}
        };
        ds.drive_ctrl_output = output;
        ds.drive_ctrl_status_rpt = report;

        // ---- MOTOR DISPATCH ----

        ds.drive_hw.set_motor_power(
            ds.drive_ctrl_output.left,
            ds.drive_ctrl_output.right
        );

        // ---- WRITE ARCHIVES ----

        if exec_params.archive {
            if let Err(e) = ds.drive_ctrl.write() {
                warn!("Could not write DriveCtrl archives: {}", e);
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        let sleep_dur = cycle_period.checked_sub(cycle_dur);

        if sleep_dur.is_none() {
            warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
            );
        }

        // Stale inputs are worse than no inputs, so stop driving if the loop
        // keeps overrunning
        ds.record_cycle_timing(sleep_dur.is_none(), &exec_params);

        if let Some(d) = sleep_dur {
            thread::sleep(d);
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    // Leave the motors stopped
    ds.drive_hw.set_motor_power(0.0, 0.0);

    info!(
        "End of execution after {} cycles ({} motor dispatches, {} gear shifts)",
        ds.num_cycles,
        ds.drive_hw.num_dispatches,
        ds.drive_hw.num_shifts
    );

    Ok(())
}
