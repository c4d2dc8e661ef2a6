//! Test parallel histogram equalization across worker counts and models
//!
//! # See also
//!
//! - `SharedMemory::equalize`, `MessagePassing::equalize`
//! - `PartitionPlan`, `Histogram`, `merge::reduce`, `Lut`, `assemble`

use histeq_core::PixelBuffer;
use histeq_equalize::{
    Equalizer, ExecConfig, ExecModel, Histogram, Lut, PartitionPlan, assemble, merge, remap,
};
use histeq_test::{RegParams, synth};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn backend(model: ExecModel, workers: usize) -> Box<dyn Equalizer> {
    ExecConfig::new(workers, model).unwrap().build().unwrap()
}

/// Output does not depend on the worker count or the model.
#[test]
fn equalize_reg_worker_invariance() {
    init_logger();
    let mut rp = RegParams::new("equalize_workers");

    // 2257 samples: not a multiple of most of the worker counts below
    let img = synth::noise_gray(61, 37, 42);
    let plane = img.gray().unwrap();
    let reference = backend(ExecModel::SharedMemory, 1).equalize(plane).unwrap();

    for model in [ExecModel::SharedMemory, ExecModel::MessagePassing] {
        for workers in [1, 2, 3, 4, 7, 8, 16] {
            let out = backend(model, workers).equalize(plane).unwrap();
            if !rp.compare_buffers(&reference, &out) {
                eprintln!("{} with {} workers differs", model, workers);
            }
        }
    }

    assert!(rp.cleanup(), "equalize worker invariance test failed");
}

/// The stages compose into the same result the backends produce.
#[test]
fn equalize_reg_stages() {
    init_logger();
    let mut rp = RegParams::new("equalize_stages");

    let img = synth::low_contrast_gray(40, 30, 90, 50);
    let plane = img.gray().unwrap();
    let n = plane.len();
    let plan = PartitionPlan::new(n, 5).unwrap();

    let locals: Vec<Histogram> = plan
        .partitions()
        .iter()
        .map(|p| Histogram::from_samples(&plane[p.range()]))
        .collect();
    for (p, h) in plan.partitions().iter().zip(&locals) {
        rp.compare_values(p.count as f64, h.total() as f64, 0.0);
    }

    let global = merge::reduce(&locals).unwrap();
    rp.compare_values(n as f64, global.total() as f64, 0.0);

    let lut = Lut::build(&global, n as u64);
    rp.compare_values(1.0, lut.is_monotonic() as u8 as f64, 0.0);

    let parts: Vec<Vec<u8>> = plan
        .partitions()
        .iter()
        .map(|p| remap::remap(&plane[p.range()], &lut))
        .collect();
    let out = assemble(&plan, parts).unwrap();
    rp.compare_values(n as f64, out.len() as f64, 0.0);

    let direct: Vec<u8> = plane.iter().map(|&v| lut.apply(v)).collect();
    rp.compare_buffers(&direct, &out);

    let via_backend = backend(ExecModel::MessagePassing, 5).equalize(plane).unwrap();
    rp.compare_buffers(&out, &via_backend);

    // The equalized range is stretched to the full scale
    rp.compare_values(255.0, *out.iter().max().unwrap() as f64, 0.0);
    rp.compare_values(0.0, *out.iter().min().unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "equalize stages test failed");
}

/// A uniform image has no spread: every output sample is the guard value.
#[test]
fn equalize_reg_uniform() {
    init_logger();
    let mut rp = RegParams::new("equalize_uniform");

    let plane = PixelBuffer::filled(33, 140);
    for model in [ExecModel::SharedMemory, ExecModel::MessagePassing] {
        let out = backend(model, 4).equalize(&plane).unwrap();
        rp.compare_buffers(&[0u8; 33], &out);
    }

    assert!(rp.cleanup(), "equalize uniform test failed");
}

/// Two intensities on a 2x2 image spread to the extremes.
#[test]
fn equalize_reg_two_level() {
    init_logger();
    let mut rp = RegParams::new("equalize_two_level");

    let plane = PixelBuffer::from(vec![10, 10, 250, 250]);
    for model in [ExecModel::SharedMemory, ExecModel::MessagePassing] {
        let out = backend(model, 2).equalize(&plane).unwrap();
        rp.compare_buffers(&[0, 0, 255, 255], &out);
    }

    assert!(rp.cleanup(), "equalize two-level test failed");
}
