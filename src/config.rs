//! Configuration for the audit pipeline

use crate::detect::LicenseOverrides;
use crate::types::LockFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Directory under the project root holding vendored dependency trees.
pub const VENDOR_DIR: &str = "vendor";

/// Main configuration for an audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Lock format to read; `None` auto-detects (Gopkg.lock preferred)
    pub lock_format: Option<LockFormat>,
    /// Whether to download the synthesized archives
    pub download: bool,
    /// Manual license assignments applied when detection fails
    #[serde(default)]
    pub overrides: LicenseOverrides,
    /// Network configuration for the download stage
    pub network: NetworkConfig,
}

/// Network configuration for archive downloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            lock_format: None,
            download: false,
            overrides: LicenseOverrides::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl NetworkConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AuditConfig {
    /// Create a new builder for AuditConfig
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::default()
    }
}

/// Builder for AuditConfig
#[derive(Default)]
pub struct AuditConfigBuilder {
    lock_format: Option<LockFormat>,
    download: bool,
    overrides: Option<LicenseOverrides>,
    network: Option<NetworkConfig>,
}

impl AuditConfigBuilder {
    pub fn lock_format(mut self, format: LockFormat) -> Self {
        self.lock_format = Some(format);
        self
    }

    pub fn download(mut self, download: bool) -> Self {
        self.download = download;
        self
    }

    pub fn overrides(mut self, overrides: LicenseOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn network(mut self, network: NetworkConfig) -> Self {
        self.network = Some(network);
        self
    }

    pub fn build(self) -> AuditConfig {
        AuditConfig {
            lock_format: self.lock_format,
            download: self.download,
            overrides: self.overrides.unwrap_or_default(),
            network: self.network.unwrap_or_default(),
        }
    }
}
