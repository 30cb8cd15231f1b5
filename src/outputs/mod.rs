//! Output generation for scraped climate data.
//!
//! # Submodules
//!
//! - [`json`]: Writes tidy records to dated JSON files for downstream consumers
//! - [`markdown`]: Renders a per-city comparison dashboard
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── wikipedia.json
//!
//! markdown_output_dir/
//! └── 2025-05-06_wikipedia.md
//! ```

pub mod json;
pub mod markdown;
