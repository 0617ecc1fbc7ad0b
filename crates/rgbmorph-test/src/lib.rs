//! rgbmorph-test - Regression test harness for rgbmorph
//!
//! Every `tests/*_reg.rs` file drives a [`RegParams`], records each check
//! under a running index and reports all failures at the end instead of
//! stopping at the first one.
//!
//! # Usage
//!
//! ```ignore
//! use rgbmorph_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("equivalence");
//! let pix = synth::random(64, 48, 7).unwrap();
//! rp.compare_pix(&expected, &actual);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: `compare` (default), `generate` or `display`

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // rgbmorph-test is at crates/rgbmorph-test
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
