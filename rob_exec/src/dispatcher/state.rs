//! Implementations for the Dispatcher state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::act::{ActDems, ActId};
use log::{debug, info, trace, warn};
use std::convert::Infallible;

// Internal
use super::{CycleInput, Mode, StatusReport};
use crate::{
    act_driver::{self, VoltageStatus},
    data_store::DataStore,
    drive_vec::{self, DriveCommand},
    hal::Hal,
    input::{self, RawInputSample},
    mecanum,
    params::{ParamsError, RobExecParams},
    tunables::{TunableConfig, TunableStore},
};
use util::module::State;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Dashboard key under which the test step is published
pub const KEY_TEST_STATUS: &str = "Test Status";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Periodic dispatcher state.
///
/// Owns the hardware, the tunable store and the control loop context for the whole session.
pub struct Dispatcher<H, S> {
    params: RobExecParams,
    hal: H,
    store: S,
    ds: DataStore,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<H: Hal, S: TunableStore> State for Dispatcher<H, S> {
    type InitData = RobExecParams;
    type InitError = ParamsError;

    type InputData = CycleInput;
    type OutputData = ActDems;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the dispatcher with validated parameters.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        init_data.are_valid()?;

        self.ds = DataStore::new(&init_data.toggles);
        self.params = init_data;

        Ok(())
    }

    /// Perform one control cycle in the requested mode.
    ///
    /// Processing never fails, every anomaly is handled by degrading to a safe output.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let mode = input_data.mode;
        let now_s = input_data.now_s;

        if self.ds.mode != Some(mode) {
            self.enter_mode(mode, now_s);
        }

        self.ds.tunables = TunableConfig::poll(&mut self.store);

        let mut report = StatusReport {
            mode,
            ..StatusReport::default()
        };

        let dems = match mode {
            Mode::Disabled => ActDems::default(),
            Mode::Autonomous => self.autonomous_periodic(now_s),
            Mode::Teleop => self.teleop_periodic(&mut report),
            Mode::Test => self.test_periodic(&mut report),
        };

        // Disabled dispatches nothing
        if mode != Mode::Disabled {
            self.dispatch(&dems, now_s, &mut report);
        }

        trace!("Dispatcher output ({}):\n    {:?}", mode, dems.setpoint);

        self.ds.num_cycles += 1;

        Ok((dems, report))
    }
}

impl<H: Hal, S: TunableStore> Dispatcher<H, S> {
    /// Create a new dispatcher with default parameters. Call `init` to set the parameters.
    pub fn new(hal: H, store: S) -> Self {
        let params = RobExecParams::default();

        Self {
            ds: DataStore::new(&params.toggles),
            params,
            hal,
            store,
        }
    }

    pub fn params(&self) -> &RobExecParams {
        &self.params
    }

    pub fn hal(&self) -> &H {
        &self.hal
    }

    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn data_store(&self) -> &DataStore {
        &self.ds
    }

    /// Perform the init step of a new mode.
    ///
    /// Previous demands are superseded by zero before the new mode's first periodic step.
    fn enter_mode(&mut self, mode: Mode, now_s: f64) {
        match self.ds.mode {
            Some(prev) => info!("Mode transition: {} -> {}", prev, mode),
            None => info!("Entering {} mode", mode),
        }

        let armed = mode.is_watchdog_armed();
        self.hal.set_safety(armed, self.params.watchdog_expiration_s);
        self.hal.write_demands(&ActDems::default());

        self.ds.watchdog_armed = armed;
        self.ds.last_dispatch_s = if armed { Some(now_s) } else { None };
        self.ds.mode = Some(mode);
        self.ds.mode_start_s = now_s;

        if mode == Mode::Test {
            self.ds.test_seq.reset();
        }

        debug!(
            "Actuator watchdog {}",
            if armed { "armed" } else { "disarmed" }
        );
    }

    /// Open loop drive for a fixed duration.
    fn autonomous_periodic(&mut self, now_s: f64) -> ActDems {
        let mut dems = ActDems::default();

        if self.ds.mode_elapsed_s(now_s) < self.ds.tunables.auto_drive_duration_s {
            let [vx, vy, omega] = self.params.auto.drive_cmd;
            let cmd = DriveCommand {
                vx,
                vy,
                omega,
                field_heading_deg: None,
            };
            mecanum::set_dems(&cmd, &self.params.mecanum, &mut dems);
        }

        dems
    }

    /// Operator control.
    fn teleop_periodic(&mut self, report: &mut StatusReport) -> ActDems {
        let input = input::sample(&self.hal);
        self.check_inputs(&input, report);

        let toggles = self.ds.toggles.update(&input, &self.params.buttons);
        let tunables = self.ds.tunables;

        // Drive
        let cmd = drive_vec::build(
            input.driver.x,
            input.driver.y,
            input.driver.z,
            input.driver_gain(),
            tunables.drive_deadzone,
            &self.params.drive,
        );

        if toggles.yaw_reset {
            info!("Heading zero reference reset");
            self.hal.zero_heading();
        }

        let (cmd, frame) =
            self.ds
                .frame_sel
                .select(cmd, toggles.field_oriented, self.hal.heading_deg());
        report.frame = Some(frame);
        report.field_heading_deg = cmd.field_heading_deg;

        let mut dems = ActDems::default();
        mecanum::set_dems(&cmd, &self.params.mecanum, &mut dems);

        // Mechanisms
        let (mech, voltage) = act_driver::proc(
            &self.params.act,
            &act_driver::InputData {
                toggles: &toggles,
                tunables: &tunables,
                operator_y: input.operator.y,
                operator_gain: input.operator_gain(),
                supply_voltage_v: self.hal.supply_voltage(),
            },
        );
        self.check_voltage(voltage);
        report.voltage = Some(voltage);

        dems.set(ActId::Shooter, mech.shooter);
        dems.set(ActId::Intake, mech.intake);
        dems.set(ActId::Climber, mech.climber);

        dems
    }

    /// Manual actuator walkthrough.
    fn test_periodic(&mut self, report: &mut StatusReport) -> ActDems {
        let input = input::sample(&self.hal);
        self.check_inputs(&input, report);

        let step = self.ds.test_seq.proc(
            input
                .driver
                .buttons
                .is_pressed(self.params.buttons.test_advance),
        );
        self.store.put_string(KEY_TEST_STATUS, step.name());
        report.test_step = Some(step);

        step.dems(&self.params.test_mode, &self.params.mecanum)
    }

    /// Write the demands to the actuator bus, checking the re-issue interval.
    fn dispatch(&mut self, dems: &ActDems, now_s: f64, report: &mut StatusReport) {
        if self.ds.watchdog_armed {
            if let Some(t) = self.ds.last_dispatch_s {
                let gap_s = now_s - t;
                if gap_s > self.params.watchdog_expiration_s {
                    self.ds.num_late_dispatches += 1;
                    report.dispatch_late = true;
                    warn!(
                        "Demands re-issued {:.3} s after the previous dispatch, exceeding the \
                        watchdog expiration of {:.3} s",
                        gap_s, self.params.watchdog_expiration_s
                    );
                }
            }
        }

        self.hal.write_demands(dems);
        self.ds.last_dispatch_s = Some(now_s);
        report.dispatched = true;
    }

    fn check_inputs(&mut self, input: &RawInputSample, report: &mut StatusReport) {
        let degraded = input.is_degraded();
        report.inputs_degraded = degraded;

        if degraded && !self.ds.inputs_degraded {
            warn!(
                "Input device unavailable (driver: {}, operator: {}), using neutral input",
                input.driver_degraded, input.operator_degraded
            );
        } else if !degraded && self.ds.inputs_degraded {
            info!("All input devices available");
        }

        self.ds.inputs_degraded = degraded;
    }

    fn check_voltage(&mut self, status: VoltageStatus) {
        if status != self.ds.voltage_status {
            match status {
                VoltageStatus::Nominal => info!("Supply voltage nominal"),
                VoltageStatus::Floored => warn!(
                    "Supply voltage below {:.2} V, shooter compensation limited",
                    self.params.act.min_supply_voltage_v
                ),
                VoltageStatus::Unavailable => {
                    warn!("Supply voltage unavailable, shooter compensation disabled")
                }
            }
        }

        self.ds.voltage_status = status;
    }
}
