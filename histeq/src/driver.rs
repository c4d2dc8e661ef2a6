//! File-to-file enhancement run
//!
//! Reads `in.pgm` and `in.ppm` from a directory, equalizes them, and
//! writes `out.pgm`, `out_hsl.ppm` and `out_yuv.ppm` next to them. Both
//! inputs are loaded before any equalization starts, so a bad input
//! aborts the run with nothing written.

use crate::equalize::{EqualizeResult, Equalizer};
use crate::{Image, contrast_enhancement_gray, contrast_enhancement_hsl, contrast_enhancement_yuv};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

/// Grayscale input file name.
pub const GRAY_INPUT: &str = "in.pgm";
/// Color input file name.
pub const COLOR_INPUT: &str = "in.ppm";
/// Equalized grayscale output.
pub const GRAY_OUTPUT: &str = "out.pgm";
/// Color output equalized on HSL lightness.
pub const HSL_OUTPUT: &str = "out_hsl.ppm";
/// Color output equalized on YUV luma.
pub const YUV_OUTPUT: &str = "out_yuv.ppm";

/// The decoded input pair.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Grayscale image from [`GRAY_INPUT`]
    pub gray: Image,
    /// Color image from [`COLOR_INPUT`]
    pub color: Image,
}

fn read(path: &Path) -> Result<Image> {
    crate::io::read_image(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write(image: &Image, path: &Path) -> Result<()> {
    crate::io::write_image(image, path)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn timed<T>(label: &str, f: impl FnOnce() -> EqualizeResult<T>) -> Result<T> {
    let start = Instant::now();
    let out = f().with_context(|| format!("{} failed", label))?;
    log::info!("{} processing time: {:.3} (ms)", label, elapsed_ms(start));
    Ok(out)
}

/// Read both inputs from `dir`.
///
/// # Errors
///
/// Fails if either file is missing or is not a valid PGM/PPM.
pub fn load_inputs(dir: &Path) -> Result<Inputs> {
    let gray = read(&dir.join(GRAY_INPUT))?;
    let color = read(&dir.join(COLOR_INPUT))?;
    Ok(Inputs { gray, color })
}

/// Equalize the inputs in `dir` with `eq` and write the three outputs.
///
/// # Errors
///
/// Input errors are reported before any output is written. Equalization
/// and write errors abort the remaining steps.
pub fn run(dir: &Path, eq: &dyn Equalizer) -> Result<()> {
    let inputs = load_inputs(dir)?;
    let start = Instant::now();

    log::info!(
        "running contrast enhancement for gray-scale images with {} workers ({})",
        eq.workers(),
        eq.name()
    );
    let gray = timed("gray", || contrast_enhancement_gray(&inputs.gray, eq))?;
    write(&gray, &dir.join(GRAY_OUTPUT))?;

    log::info!(
        "running contrast enhancement for color images with {} workers ({})",
        eq.workers(),
        eq.name()
    );
    let hsl = timed("HSL", || contrast_enhancement_hsl(&inputs.color, eq))?;
    write(&hsl, &dir.join(HSL_OUTPUT))?;

    let yuv = timed("YUV", || contrast_enhancement_yuv(&inputs.color, eq))?;
    write(&yuv, &dir.join(YUV_OUTPUT))?;

    log::info!("result time: {:.3} (ms)", elapsed_ms(start));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExecConfig, ExecModel, PixelBuffer};
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("histeq-driver-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn gray_input() -> Image {
        Image::from_gray(2, 2, PixelBuffer::from(vec![10, 10, 250, 250])).unwrap()
    }

    fn color_input() -> Image {
        Image::from_rgb(
            2,
            1,
            PixelBuffer::from(vec![20, 200]),
            PixelBuffer::from(vec![40, 180]),
            PixelBuffer::from(vec![60, 160]),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_color_input_writes_nothing() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = scratch_dir("missing-color");
        crate::io::write_image(&gray_input(), dir.join(GRAY_INPUT)).unwrap();

        let eq = ExecConfig::new(2, ExecModel::SharedMemory).unwrap().build().unwrap();
        assert!(load_inputs(&dir).is_err());
        assert!(run(&dir, eq.as_ref()).is_err());
        assert!(!dir.join(GRAY_OUTPUT).exists());
        assert!(!dir.join(HSL_OUTPUT).exists());
        assert!(!dir.join(YUV_OUTPUT).exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_writes_all_outputs() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = scratch_dir("full-run");
        crate::io::write_image(&gray_input(), dir.join(GRAY_INPUT)).unwrap();
        crate::io::write_image(&color_input(), dir.join(COLOR_INPUT)).unwrap();

        let eq = ExecConfig::new(3, ExecModel::MessagePassing).unwrap().build().unwrap();
        run(&dir, eq.as_ref()).unwrap();

        let gray = crate::io::read_image(dir.join(GRAY_OUTPUT)).unwrap();
        assert_eq!(gray.gray().unwrap().as_slice(), &[0, 0, 255, 255]);
        for name in [HSL_OUTPUT, YUV_OUTPUT] {
            let out = crate::io::read_image(dir.join(name)).unwrap();
            assert_eq!((out.width(), out.height()), (2, 1));
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
