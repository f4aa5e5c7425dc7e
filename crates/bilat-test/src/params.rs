//! Regression test parameters and operations

use crate::error::TestResult;
use crate::{golden_dir, io, regout_dir};
use bilat_core::Image16;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from environment variable or string
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
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
    /// Name of the test (e.g., "bilateral_mono")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "bilateral_mono")
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured based on the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

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

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value (typically from golden/reference)
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
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two sample arrays element by element
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected samples
    /// * `actual` - Actual samples
    /// * `delta` - Maximum allowed per-sample difference
    ///
    /// # Returns
    ///
    /// `true` if the arrays have the same length and every pair is within
    /// delta, `false` otherwise.
    pub fn compare_samples(&mut self, expected: &[u16], actual: &[u16], delta: u16) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            self.fail(format!(
                "Failure in {}_reg: sample comparison for index {} - length {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            ));
            return false;
        }

        let worst = expected
            .iter()
            .zip(actual)
            .enumerate()
            .map(|(i, (&e, &a))| (i, e.abs_diff(a)))
            .max_by_key(|&(_, d)| d);
        match worst {
            Some((i, d)) if d > delta => {
                self.fail(format!(
                    "Failure in {}_reg: sample comparison for index {}\n\
                     max difference = {} at sample {} but allowed delta = {}\n\
                     expected = {}, actual = {}",
                    self.test_name, self.index, d, i, delta, expected[i], actual[i]
                ));
                false
            }
            _ => true,
        }
    }

    /// Compare two images for exact equality
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_images(&mut self, img1: &Image16, img2: &Image16) -> bool {
        if img1.dimensions() != img2.dimensions() || img1.channels() != img2.channels() {
            self.index += 1;
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch",
                self.test_name, self.index
            ));
            return false;
        }
        self.compare_samples(img1.data(), img2.data(), 0)
    }

    /// Write an image to file and check against golden file
    ///
    /// In generate mode, the file is copied to the golden directory.
    /// In compare mode, it is compared with its golden file when one
    /// exists; a missing golden file is reported and skipped.
    /// In display mode, only the output file is written.
    pub fn write_image_and_check(&mut self, image: &Image16) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.png",
            regout_dir(),
            self.test_name,
            self.index
        );
        io::write_image(image, &local_path)?;

        let golden_path = format!(
            "{}/{}_golden.{:02}.png",
            golden_dir(),
            self.test_name,
            self.index
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(&local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!("No golden file, skipping: {}", golden_path);
                    return Ok(());
                }
                let golden = io::read_image(&golden_path)?;
                if golden != *image {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
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

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
