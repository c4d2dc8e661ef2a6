//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use histeq_core::{Image, ImageKind};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values (default)
    #[default]
    Compare,
    /// Compare, and also write images to the regout directory
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "equalize")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (compare or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two sample buffers for exact equality
    ///
    /// Reports the first differing position on failure.
    pub fn compare_buffers(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            let msg = format!(
                "Failure in {}_reg: buffer comparison for index {} - sizes: {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            );
            return self.fail(msg);
        }

        match expected.iter().zip(actual).position(|(a, b)| a != b) {
            Some(pos) => {
                let msg = format!(
                    "Failure in {}_reg: buffer comparison for index {} - \
                     mismatch at {}: expected {}, got {}",
                    self.test_name, self.index, pos, expected[pos], actual[pos]
                );
                self.fail(msg)
            }
            None => true,
        }
    }

    /// Compare two images for exact equality
    ///
    /// # Returns
    ///
    /// `true` if the images have the same size, kind and samples.
    pub fn compare_images(&mut self, expected: &Image, actual: &Image) -> bool {
        self.index += 1;

        if expected.width() != actual.width()
            || expected.height() != actual.height()
            || expected.kind() != actual.kind()
        {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            return self.fail(msg);
        }

        for (channel, (p1, p2)) in expected.planes().iter().zip(actual.planes()).enumerate() {
            if let Some(pos) = p1.iter().zip(p2.iter()).position(|(a, b)| a != b) {
                let width = expected.width() as usize;
                let msg = format!(
                    "Failure in {}_reg: image comparison for index {} - \
                     channel {} mismatch at ({}, {})",
                    self.test_name,
                    self.index,
                    channel,
                    pos % width,
                    pos / width
                );
                return self.fail(msg);
            }
        }

        true
    }

    /// In display mode, write an image to the regout directory
    ///
    /// The file is named `<test>.<index>.<pgm|ppm>`. In compare mode this
    /// only advances the index.
    pub fn write_image(&mut self, image: &Image) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        fs::create_dir_all(regout_dir())?;
        let ext = match image.kind() {
            ImageKind::Gray => "pgm",
            ImageKind::Rgb => "ppm",
        };
        let path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );
        histeq_io::write_image(image, &path).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use histeq_core::PixelBuffer;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("display"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("compare"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_buffers() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_buffers(&[1, 2, 3], &[1, 2, 3]));
        assert!(!rp.compare_buffers(&[1, 2, 3], &[1, 9, 3]));
        assert!(!rp.compare_buffers(&[1, 2], &[1, 2, 3]));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_images() {
        let mut rp = RegParams::new("test");
        let a = Image::from_gray(2, 1, PixelBuffer::from(vec![0, 1])).unwrap();
        let b = Image::from_gray(2, 1, PixelBuffer::from(vec![0, 2])).unwrap();
        let c = Image::from_gray(1, 2, PixelBuffer::from(vec![0, 1])).unwrap();
        assert!(rp.compare_images(&a, &a.clone()));
        assert!(!rp.compare_images(&a, &b));
        assert!(!rp.compare_images(&a, &c));
        assert!(!rp.cleanup());
    }
}
