//! Contrast enhancement driver
//!
//! Reads `in.pgm` and `in.ppm` from the working directory and writes
//! `out.pgm`, `out_hsl.ppm` and `out_yuv.ppm`. The worker count and model
//! come from `HISTEQ_WORKERS` and `HISTEQ_MODEL`.

use anyhow::{Context, Result};
use histeq::ExecConfig;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ExecConfig::from_env().context("invalid execution configuration")?;
    let eq = config.build().context("failed to start workers")?;

    histeq::driver::run(Path::new("."), eq.as_ref())
}
