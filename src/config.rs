//! Configuration for scan behavior and registry access

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of reports shown on the free tier
pub const FREE_LIMIT: usize = 20;

/// Main configuration for a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Network configuration for registry calls
    pub network: NetworkConfig,
    /// Maximum number of reports returned after sorting
    pub free_limit: usize,
}

/// Network configuration for registry API calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Base URL of the package registry
    pub registry_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            free_limit: FREE_LIMIT,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            registry_url: "https://pypi.org".to_string(),
            timeout_secs: 10,
        }
    }
}

impl NetworkConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ScanConfig {
    /// Create a new builder for ScanConfig
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }
}

/// Builder for ScanConfig
#[derive(Default)]
pub struct ScanConfigBuilder {
    network: Option<NetworkConfig>,
    free_limit: Option<usize>,
}

impl ScanConfigBuilder {
    pub fn network(mut self, network: NetworkConfig) -> Self {
        self.network = Some(network);
        self
    }

    pub fn free_limit(mut self, limit: usize) -> Self {
        self.free_limit = Some(limit);
        self
    }

    pub fn build(self) -> ScanConfig {
        ScanConfig {
            network: self.network.unwrap_or_default(),
            free_limit: self.free_limit.unwrap_or(FREE_LIMIT),
        }
    }
}
