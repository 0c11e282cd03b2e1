//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`)
//! - [`route`]: URL utilities (`is_external_link`, `site_join`, `canonical_link`)

pub mod fs;
pub mod route;

// Re-export commonly used functions from fs (used in many places)
pub use fs::normalize_path;
