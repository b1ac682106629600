//! # Drive Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drive_lib::drive_ctrl::{DriveCtrl, Params};

fn drive_ctrl_benchmark(c: &mut Criterion) {
    // ---- Build a controller in each gear ----

    let mut high = DriveCtrl::new(Params::default()).unwrap();
    high.set_high_gear(true);

    let mut low = DriveCtrl::new(Params::default()).unwrap();
    low.set_high_gear(false);

    // ---- Pre-generate a sweep of driver inputs ----

    let inputs: Vec<(f64, f64, bool)> = (0..1000)
        .map(|i| {
            let t = i as f64 / 1000.0;
            (
                (t * std::f64::consts::TAU).sin(),
                (t * 3.0 * std::f64::consts::TAU).cos(),
                i % 10 == 0,
            )
        })
        .collect();

    c.bench_function("drive_ctrl_update_high_gear", |b| {
        b.iter(|| {
            for (throttle, wheel, quick_turn) in inputs.iter() {
                black_box(high.update(*throttle, *wheel, *quick_turn));
            }
        })
    });

    c.bench_function("drive_ctrl_update_low_gear", |b| {
        b.iter(|| {
            for (throttle, wheel, quick_turn) in inputs.iter() {
                black_box(low.update(*throttle, *wheel, *quick_turn));
            }
        })
    });
}

criterion_group!(benches, drive_ctrl_benchmark);
criterion_main!(benches);
