//! bilat-test - Regression test framework for bilat
//!
//! This crate provides a regression test framework with three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! It also carries the deterministic synthetic images the tests filter
//! ([`generators`]) and slow, exact reference filters to check the engine
//! against ([`reference`]).
//!
//! # Usage
//!
//! ```ignore
//! use bilat_filter::{BilateralOptions, SpatialKernel, filter_mono};
//! use bilat_test::{RegParams, generators};
//!
//! let mut rp = RegParams::new("bilateral_mono");
//! let img = generators::flat(9, 9, 1, 0x8000).expect("flat");
//! let kernel = SpatialKernel::uniform(2);
//! let out = filter_mono(&img, &kernel, &BilateralOptions::new(1.0)).expect("filter");
//! rp.compare_values(0x8000 as f64, out.get(0, 0, 0).unwrap_or(0) as f64, 0.0);
//! rp.write_image_and_check(&out).expect("write");
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
pub mod generators;
pub mod io;
mod params;
pub mod reference;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // bilat-test is at crates/bilat-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
