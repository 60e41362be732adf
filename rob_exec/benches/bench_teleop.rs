//! # Teleop Cycle Benchmark

use comms_if::eqpt::input::{Buttons, DeviceSample};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rob_lib::{
    dispatcher::{CycleInput, Dispatcher, Mode},
    hal::SimHal,
    params::RobExecParams,
    tunables::MemStore,
};
use util::module::State;

fn teleop_benchmark(c: &mut Criterion) {
    // ---- Build a dispatcher with everything active ----

    let params = RobExecParams::default();
    let mut hal = SimHal::new();

    hal.driver = Some(DeviceSample {
        x: 0.4,
        y: -0.7,
        z: 0.2,
        throttle: -0.5,
        buttons: Buttons::pressed(&[params.buttons.drive_mode]),
    });
    hal.operator = Some(DeviceSample {
        x: 0.0,
        y: 0.3,
        z: 0.0,
        throttle: 0.0,
        buttons: Buttons::pressed(&[params.buttons.shooter_toggle, params.buttons.intake_toggle]),
    });
    hal.heading_raw_deg = Some(42.0);
    hal.supply_voltage_v = Some(11.8);

    let mut dispatcher = Dispatcher::new(hal, MemStore::default());
    dispatcher.init(params).unwrap();

    let mut now_s = 0.0;

    c.bench_function("teleop cycle", |b| {
        b.iter(|| {
            now_s += 0.02;
            dispatcher.hal_mut().advance_to(now_s);
            black_box(dispatcher.proc(&CycleInput {
                mode: Mode::Teleop,
                now_s,
            }))
        })
    });
}

criterion_group!(benches, teleop_benchmark);
criterion_main!(benches);
