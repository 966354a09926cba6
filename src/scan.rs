//! Scan orchestration: parse -> fetch -> score -> sort
//!
//! The fetcher is injected so the pipeline can be driven by a test double
//! without network access, and so future registries can plug in without
//! touching the orchestration.

use crate::config::ScanConfig;
use crate::error::Result;
use crate::parser::parse_manifest;
use crate::registry::{fetch_package_metadata, PackageMetadata};
use crate::scoring::score_package;
use crate::types::RiskReport;
use chrono::Utc;
use std::future::Future;
use std::path::Path;
use tracing::{info, warn};

/// Scan a manifest using an injected metadata fetcher.
///
/// Every declared package yields exactly one report: fetch failures
/// synthesize a maximal-risk UNKNOWN entry rather than being dropped, so
/// an unreachable package is never treated as safe. Only a manifest-level
/// read/parse failure aborts the scan.
///
/// The returned reports are stably sorted by score descending; ties keep
/// manifest order.
pub async fn scan_manifest<F, Fut>(path: &Path, fetch: F) -> Result<Vec<RiskReport>>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Option<PackageMetadata>>,
{
    let names = parse_manifest(path)?;
    info!("Scanning {} packages from {}", names.len(), path.display());

    let mut reports = Vec::with_capacity(names.len());
    for name in names {
        match fetch(name.clone()).await {
            Some(meta) => reports.push(score_package(&name, &meta, Utc::now())),
            None => {
                warn!("Registry metadata unavailable for {}", name);
                reports.push(RiskReport::unknown(name));
            }
        }
    }

    reports.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(reports)
}

/// Scan a manifest against the configured registry
pub async fn scan(path: &Path, config: &ScanConfig) -> Result<Vec<RiskReport>> {
    let network = &config.network;
    scan_manifest(path, |name| {
        let network = network.clone();
        async move { fetch_package_metadata(&name, &network).await }
    })
    .await
}
