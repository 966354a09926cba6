//! Registry metadata client
//!
//! Fetches published package metadata from the registry's JSON endpoint.
//! This boundary is a total function from name to `Option<PackageMetadata>`:
//! network failures, non-success statuses, and malformed bodies all degrade
//! to `None` so a single flaky package can never abort a scan.

use crate::config::NetworkConfig;
use crate::parser::is_safe_name;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Published metadata for a package, as served by the registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub info: PackageInfo,
    /// Version string -> published artifacts for that version
    #[serde(default)]
    pub releases: HashMap<String, Vec<ReleaseArtifact>>,
}

/// Authorship fields from the registry's `info` object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub maintainer: Option<String>,
    #[serde(default)]
    pub maintainer_email: Option<String>,
}

/// A single published artifact within a release
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseArtifact {
    #[serde(default)]
    pub upload_time_iso_8601: Option<String>,
    #[serde(default)]
    pub upload_time: Option<String>,
}

/// Fetch metadata for a package from the registry.
///
/// Unsafe names are rejected without issuing a request. Any failure past
/// that point (transport, status, body) returns `None`.
pub async fn fetch_package_metadata(name: &str, config: &NetworkConfig) -> Option<PackageMetadata> {
    if !is_safe_name(name) {
        warn!("Rejecting unsafe package name: {:?}", name);
        return None;
    }

    let client = match build_client(config) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to build HTTP client: {}", e);
            return None;
        }
    };

    let url = format!(
        "{}/pypi/{}/json",
        config.registry_url.trim_end_matches('/'),
        name
    );
    debug!("Fetching registry metadata: {}", url);

    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            debug!("Request failed for {}: {}", name, e);
            return None;
        }
    };

    if !response.status().is_success() {
        debug!("Registry returned {} for {}", response.status(), name);
        return None;
    }

    match response.json::<PackageMetadata>().await {
        Ok(meta) => Some(meta),
        Err(e) => {
            debug!("Malformed registry body for {}: {}", name, e);
            None
        }
    }
}

fn build_client(config: &NetworkConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout())
        .build()
}
