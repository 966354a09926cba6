//! # depfence
//!
//! Dependency maintainer risk intelligence: combines release staleness,
//! release cadence, and bus factor into a single 0-100 abandonment risk
//! score per dependency, with table, JSON, and SARIF output for CI gates.
//!
//! ## Quick Start
//!
//! ```no_run
//! use depfence::{scan, ScanConfig};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = ScanConfig::default();
//! let reports = scan(Path::new("requirements.txt"), &config).await?;
//!
//! for rpt in reports {
//!     println!("{}: {} ({})", rpt.name, rpt.score, rpt.verdict);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## How scoring works
//!
//! Each package is scored from registry metadata alone: a staleness term
//! (0-40) grows once the latest release is older than 60 days, a sparsity
//! term (0-30) shrinks as more releases are published, and a bus-factor
//! term (0-30) penalizes packages with a single identified maintainer.
//! Packages whose metadata cannot be fetched score 100 (UNKNOWN); an
//! unreachable package is never assumed safe.

mod config;
mod error;
mod parser;
mod registry;
mod report;
mod scan;
mod scoring;
mod types;

// Re-export public API
pub use config::{NetworkConfig, ScanConfig, FREE_LIMIT};
pub use error::{Result, ScanError};
pub use parser::{is_safe_name, parse_manifest};
pub use registry::{fetch_package_metadata, PackageInfo, PackageMetadata, ReleaseArtifact};
pub use report::{render_json, render_sarif, render_table, truncate_reports};
pub use scan::{scan, scan_manifest};
pub use scoring::score_package;
pub use types::{RiskReport, Verdict};
