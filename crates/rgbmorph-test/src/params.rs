//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use rgbmorph_core::{ImageFormat, Pix};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Keep every written image in the regout directory
    Generate,
    /// Check results (default)
    #[default]
    Compare,
    /// Run checks and keep written images for visual inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }

    /// Whether written images are left on disk
    pub fn keeps_output(self) -> bool {
        self != Self::Compare
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode and every
/// failure recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "equivalence")
    pub test_name: String,
    /// Incremented before each check
    index: usize,
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "equivalence"); prefixes
    ///   every file written to the regout directory
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured based on the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

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

    /// Get the current check index
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
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if `|expected - actual| <= delta`, `false` otherwise; a
    /// `false` result is also recorded as a failure.
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
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality
    ///
    /// Reports the first differing pixel on failure.
    ///
    /// # Arguments
    ///
    /// * `expected` - Reference image
    /// * `actual` - Image under test
    ///
    /// # Returns
    ///
    /// `true` if dimensions and every pixel match.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        self.index += 1;

        if !expected.sizes_equal(actual) {
            let msg = format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch \
                 {}x{} vs {}x{}",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            );
            self.fail(msg);
            return false;
        }

        if let Some((x, y)) = expected.first_difference(actual) {
            let msg = format!(
                "Failure in {}_reg: pix comparison for index {} - pixel mismatch at ({}, {}): \
                 expected {:06x}, got {:06x}",
                self.test_name,
                self.index,
                x,
                y,
                expected.get_pixel_unchecked(x, y),
                actual.get_pixel_unchecked(x, y)
            );
            self.fail(msg);
            return false;
        }

        true
    }

    /// Write an image to the regout directory and read it back
    ///
    /// The file is named `<test>.<index>.<ext>`. For lossless formats the
    /// decoded image must equal `pix`; for JPEG only the dimensions are
    /// checked. The file is removed afterwards in compare mode.
    ///
    /// # Arguments
    ///
    /// * `pix` - Image to write
    /// * `format` - Output format; also picks the file extension
    ///
    /// # Returns
    ///
    /// `Err` only if the file cannot be written, read back or removed. A
    /// mismatch after decoding is recorded as a failed check instead.
    pub fn write_pix(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        rgbmorph_io::write_image(pix, &path, format).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let back = rgbmorph_io::read_image(&path).map_err(|e| TestError::ImageRead {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let same = match format {
            ImageFormat::Jpeg => back.sizes_equal(pix),
            _ => back.equals(pix),
        };
        if !same {
            let msg = format!(
                "Failure in {}_reg, index {}: {} does not read back as written",
                self.test_name, self.index, path
            );
            self.fail(msg);
        }

        if self.mode.keeps_output() {
            eprintln!("Wrote: {}", path);
        } else {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if every check passed.
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
