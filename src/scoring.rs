//! Risk scoring: staleness, release sparsity, and bus factor
//!
//! Pure functions over registry metadata. The current time is an explicit
//! input so scores are deterministic under test.

use crate::registry::PackageMetadata;
use crate::types::{RiskReport, Verdict};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::trace;

/// Sentinel day count when no dated release exists; drives the staleness
/// term to its ceiling.
const NO_RELEASE_DAYS: i64 = 9999;

/// Days of grace before staleness starts accruing
const STALENESS_GRACE_DAYS: i64 = 60;

/// Compute the abandonment risk score for a package.
///
/// The score is the capped sum of three terms: staleness (0-40), release
/// sparsity (0-30), and bus factor (0-30). All arithmetic is integer.
pub fn score_package(name: &str, meta: &PackageMetadata, now: DateTime<Utc>) -> RiskReport {
    let latest = latest_release(meta);
    let days = match latest {
        Some(dt) => (now - dt).num_days(),
        None => NO_RELEASE_DAYS,
    };

    let release_count = meta.releases.values().filter(|files| !files.is_empty()).count() as u32;

    let roles = identified_roles(meta);
    let maintainer_count = roles.max(1);

    let staleness = ((days - STALENESS_GRACE_DAYS) * 40).div_euclid(700).clamp(0, 40);
    let sparsity = (30 - 2 * release_count as i64).max(0);
    let bus = (30 - (maintainer_count as i64 - 1) * 15).max(0);

    let total = (staleness + sparsity + bus).min(100) as u8;
    trace!(
        "{}: staleness={} sparsity={} bus={} total={}",
        name, staleness, sparsity, bus, total
    );

    let mut factors = Vec::new();
    if staleness > 0 {
        if latest.is_some() {
            factors.push(format!("no release in {} days", days));
        } else {
            factors.push("no dated release found".to_string());
        }
    }
    if sparsity > 0 {
        factors.push(format!("only {} release(s) published", release_count));
    }
    if bus > 0 {
        if maintainer_count == 1 {
            factors.push("single identified maintainer (bus factor 1)".to_string());
        } else {
            factors.push("few identified maintainers".to_string());
        }
    }

    RiskReport {
        name: name.to_string(),
        score: total,
        last_release_days: days,
        maintainer_count,
        release_count,
        verdict: Verdict::from_score(total),
        last_release_date: latest
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        factors,
    }
}

/// Most recent upload timestamp across all release artifacts, or `None`
/// when no artifact carries a parseable date.
fn latest_release(meta: &PackageMetadata) -> Option<DateTime<Utc>> {
    meta.releases
        .values()
        .flatten()
        .filter_map(|artifact| {
            artifact
                .upload_time_iso_8601
                .as_deref()
                .or(artifact.upload_time.as_deref())
        })
        .filter_map(parse_release_timestamp)
        .max()
}

/// Parse an upload timestamp: RFC 3339 first, then the registry's legacy
/// timezone-less format (assumed UTC). An unparseable entry is skipped,
/// never fatal for the package.
fn parse_release_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Count of distinct identified roles: author and maintainer count
/// independently when either their name or email is present.
fn identified_roles(meta: &PackageMetadata) -> u32 {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
    let info = &meta.info;
    let mut roles = 0;
    if present(&info.author) || present(&info.author_email) {
        roles += 1;
    }
    if present(&info.maintainer) || present(&info.maintainer_email) {
        roles += 1;
    }
    roles
}
