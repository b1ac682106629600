//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::{
    compensate, mix, output_stage, sensitivity, shape,
    DriveCommand, Gear, InitError, InputData, Params, ParamsError, SatSide};
use util::{
    params,
    module::{InitContext, State},
    archive::{Archived, ArchiveError, Archiver}};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state
#[derive(Default)]
pub struct DriveCtrl {

    pub(crate) params: Params,

    pub(crate) state: ControlState,
    arch_state: Archiver,

    pub(crate) input: InputData,
    arch_input: Archiver,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) output: Option<DriveCommand>,
    arch_output: Archiver
}

/// State carried between cycles of the control law.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ControlState {
    /// Last cycle's raw (unshaped) wheel input.
    pub prev_wheel: f64,

    /// Negative inertia accumulator.
    pub neg_inertia_accum: f64,

    /// Quick stop accumulator, a low throttle estimate of the turn rate.
    pub quick_stop_accum: f64,

    /// True if the drivetrain is in high gear.
    pub high_gear: bool
}

/// Status report for DriveCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// The left side exceeded its bound in the mixer.
    pub left_mix_saturated: bool,

    /// The right side exceeded its bound in the mixer.
    pub right_mix_saturated: bool,

    /// The left output had to be limited after linearisation.
    pub left_output_limited: bool,

    /// The right output had to be limited after linearisation.
    pub right_output_limited: bool,

    /// The quick stop accumulator was updated this cycle.
    pub quick_stop_updated: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for DriveCtrl {
    const NAME: &'static str = "drive_ctrl";

    type InitData = &'static str;
    type InitError = InitError;
    
    type InputData = InputData;
    type OutputData = DriveCommand;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, ctx: &InitContext) 
        -> Result<(), Self::InitError> 
    {
        // Load and check the parameters
        let params: Params = params::load(init_data)
            .map_err(InitError::ParamLoadError)?;
        params.are_valid().map_err(InitError::ParamsInvalid)?;

        self.state = ControlState {
            high_gear: params.start_in_high_gear,
            ..ControlState::default()
        };
        self.params = params;

        // Initialise the archivers
        self.arch_state = ctx.archiver(Self::NAME, "state.csv")
            .map_err(InitError::ArchiveError)?;
        self.arch_input = ctx.archiver(Self::NAME, "input.csv")
            .map_err(InitError::ArchiveError)?;
        self.arch_report = ctx.archiver(Self::NAME, "status_report.csv")
            .map_err(InitError::ArchiveError)?;
        self.arch_output = ctx.archiver(Self::NAME, "output.csv")
            .map_err(InitError::ArchiveError)?;

        info!(
            "DriveCtrl starting in {:?} gear", 
            Gear::from_high(self.state.high_gear)
        );

        Ok(())
    }

    /// Perform cyclic processing of Drive Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        let output = self.update(
            input_data.throttle, 
            input_data.wheel, 
            input_data.quick_turn
        );

        trace!(
            "DriveCtrl output: left {:.4}, right {:.4} (gear {:?})",
            output.left,
            output.right,
            self.gear()
        );

        Ok((output, self.report))
    }
}

impl Archived for DriveCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        // Write each one individually
        self.arch_state.serialise(self.state)?;
        self.arch_input.serialise(self.input)?;
        self.arch_report.serialise(self.report)?;
        if let Some(output) = self.output {
            self.arch_output.serialise(output)?;
        }

        Ok(())
    }
}

impl DriveCtrl {

    /// Create a new drive controller from already loaded parameters.
    ///
    /// The parameters are checked with `Params::are_valid` first. The
    /// controller does not archive anything.
    pub fn new(params: Params) -> Result<Self, ParamsError> {
        params.are_valid()?;

        Ok(Self {
            state: ControlState {
                high_gear: params.start_in_high_gear,
                ..ControlState::default()
            },
            params,
            ..Self::default()
        })
    }

    /// Run one cycle of the control law.
    ///
    /// This is the single per-cycle entry point for the driver loop, and
    /// must be called once per control period.
    pub fn update(&mut self, throttle: f64, wheel: f64, quick_turn: bool) 
        -> DriveCommand 
    {
        self.report = StatusReport::default();
        self.input = InputData { throttle, wheel, quick_turn };

        let consts = self.params.gear_consts(self.gear());

        // Input shaping and negative inertia
        let shaped_wheel = shape(wheel, &consts);
        let adj_wheel = compensate(wheel, shaped_wheel, &consts, &mut self.state);
        let sensitivity = sensitivity(throttle, &consts);

        // Mix and saturate
        let mixed = mix(
            throttle, 
            adj_wheel, 
            quick_turn, 
            sensitivity, 
            &self.params, 
            &mut self.state
        );

        self.report.left_mix_saturated = mixed.saturated == Some(SatSide::Left);
        self.report.right_mix_saturated = mixed.saturated == Some(SatSide::Right);
        self.report.quick_stop_updated = mixed.quick_stop_updated;

        // Linearise the output
        let (output, limited) = output_stage(
            mixed.left, 
            mixed.right, 
            &self.params.linear_coeffs
        );

        self.report.left_output_limited = limited[0];
        self.report.right_output_limited = limited[1];

        self.output = Some(output);

        output
    }

    /// Returns true if the drivetrain is in high gear.
    pub fn high_gear(&self) -> bool {
        self.state.high_gear
    }

    /// Set the gear the control law uses.
    ///
    /// The accumulators are kept so the response stays continuous across the
    /// shift. The physical shift is performed by a `GearShifter`.
    pub fn set_high_gear(&mut self, high_gear: bool) {
        if self.state.high_gear != high_gear {
            debug!("DriveCtrl shifting to {:?} gear", Gear::from_high(high_gear));
        }
        self.state.high_gear = high_gear;
    }

    /// Get the current gear.
    pub fn gear(&self) -> Gear {
        Gear::from_high(self.state.high_gear)
    }

    /// Get a copy of the control state.
    pub fn control_state(&self) -> ControlState {
        self.state
    }

    /// Get the status report of the last cycle.
    pub fn report(&self) -> StatusReport {
        self.report
    }

    /// Reset the accumulators and the remembered wheel input, keeping the
    /// current gear.
    pub fn reset_state(&mut self) {
        self.state = ControlState {
            high_gear: self.state.high_gear,
            ..ControlState::default()
        };
    }
}
