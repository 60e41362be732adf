//! Main robot-side executable entry point.
//! 
//! # Architecture
//! 
//! The executable runs a fixed period loop. Every cycle the scheduler chooses the operating mode
//! and the dispatcher performs one cycle of that mode:
//! 
//!     - Disabled for a settling time
//!     - The mode given on the command line, for the given duration
//!     - Disabled again before exiting
//! 
//! The hardware is simulated, with both joysticks centred.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{info, trace, warn};
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use rob_lib::{
    dispatcher::{CycleInput, Dispatcher, Mode},
    hal::SimHal,
    params::RobExecParams,
    tunables::MemStore,
};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Time spent disabled at the start and end of the run.
const SETTLE_TIME_S: f64 = 1.0;

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "rob_exec", about = "Robot control loop executable")]
struct Opt {
    /// Mode to run after the initial settling time (disabled, auto, teleop, test)
    #[structopt(short, long, default_value = "teleop")]
    mode: Mode,

    /// Time to spend in the chosen mode, in seconds
    #[structopt(short, long, default_value = "15.0")]
    duration: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<()> {

    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "rob_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger, the full trace goes to the session's log file only
    logger_init(LevelFilter::Info, LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Robot Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    info!("Options: {:?}", opt);

    // ---- LOAD PARAMETERS ----

    let params: RobExecParams = util::params::load("rob_exec.toml")
        .wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    let record_path = session.record_params("rob_exec.toml", &params)
        .wrap_err("Could not record the exec params")?;

    info!("Exec parameters recorded in {:?}", record_path);

    let cycle_period = Duration::from_secs_f64(params.cycle_period_s);

    // ---- INITIALISE DISPATCHER ----

    let mut dispatcher = Dispatcher::new(SimHal::new(), MemStore::default());
    dispatcher.init(params)
        .wrap_err("Failed to initialise the Dispatcher")?;

    info!("Dispatcher init complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let start_s = session::get_elapsed_seconds();
    let mut num_consec_cycle_overruns: u64 = 0;

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();
        let now_s = session::get_elapsed_seconds();

        // ---- SCHEDULING ----

        let mode = match schedule(now_s - start_s, &opt) {
            Some(m) => m,
            None => break
        };

        // ---- CONTROL PROCESSING ----

        dispatcher.hal_mut().advance_to(now_s);

        let (dems, report) = dispatcher.proc(&CycleInput { mode, now_s })?;

        trace!("Cycle report: {:?}", report);
        trace!("Cycle demands: {:?}", dems);

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                num_consec_cycle_overruns += 1;
                warn!(
                    "Cycle overran by {:.06} s ({} consecutive)", 
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64(),
                    num_consec_cycle_overruns
                );
            }
        }
    }

    // ---- SHUTDOWN ----

    let ds = dispatcher.data_store();
    info!("Executed {} cycles", ds.num_cycles);
    info!("Late dispatches: {}", ds.num_late_dispatches);
    info!("Watchdog expiries: {}", dispatcher.hal().num_expiries());

    info!("End of execution");

    Ok(())
}

/// The mode to run at the given time since the start of the loop, or `None` once the run is
/// complete.
fn schedule(elapsed_s: f64, opt: &Opt) -> Option<Mode> {
    if elapsed_s < SETTLE_TIME_S {
        Some(Mode::Disabled)
    }
    else if elapsed_s < SETTLE_TIME_S + opt.duration {
        Some(opt.mode)
    }
    else if elapsed_s < 2.0 * SETTLE_TIME_S + opt.duration {
        Some(Mode::Disabled)
    }
    else {
        None
    }
}
