//! Outcome summaries for lifecycle hooks.

use std::time::Duration;

/// Which activation path ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationMode {
    /// No prior manifest: the live partition was rebuilt from staging.
    Fresh,
    /// Prior manifest found: unchanged entries were kept.
    Incremental,
}

/// Result of a successful activation.
#[derive(Debug, Clone)]
pub struct ActivationReport {
    /// Path taken.
    pub mode: ActivationMode,
    /// Request URLs removed from the live partition.
    pub evicted: Vec<String>,
    /// Live entries kept from the previous version.
    pub retained: usize,
    /// Staged shell entries copied into the live partition.
    pub promoted: usize,
    /// Wall time of the activation.
    pub elapsed: Duration,
}

/// Result of a successful install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    /// Number of shell files fetched into staging.
    pub fetched: usize,
}
