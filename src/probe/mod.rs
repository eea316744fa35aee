//! Connectivity probes and the health check orchestrator.
//!
//! A [`ProbeSpec`] pairs a probe implementation with the policy applied to
//! its failures: a critical probe's failure fails the whole report and stops
//! further probing, while a non-critical probe's failure is absorbed into a
//! configured fallback detail. [`run_health_checks`] executes a spec sequence
//! in order and always produces a complete [`HealthReport`] - probe errors
//! are captured into results, never propagated to the caller.
//!
//! Probe specs are built once at startup and shared read-only across
//! requests; each run owns its own connections and leaves no state behind.

pub mod database;
pub mod dns;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ProbeError;

/// Detail recorded for probes that never ran because an earlier critical
/// probe failed.
pub const SKIPPED_DETAIL: &str = "skipped due to prior critical failure";

/// A single connectivity check.
///
/// `execute` performs the check and returns a human-readable success detail
/// (a timestamp, a resolved address). Implementations must not retain state
/// between calls.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn execute(&self) -> Result<String, ProbeError>;
}

/// A probe plus the failure policy and presentation strings attached to it.
///
/// Built once at process start, immutable afterwards.
pub struct ProbeSpec {
    /// Identifier used in results and logs
    pub name: String,
    /// Row label on the status page (e.g. "Database Time")
    pub label: String,
    /// Whether failure fails the whole report and halts further probing
    pub critical: bool,
    /// Detail substituted when the probe fails non-critically, and the row
    /// text shown when the page is in the error state
    pub offline_detail: String,
    probe: Arc<dyn Probe>,
}

impl ProbeSpec {
    /// A probe whose failure fails the whole report.
    pub fn critical(
        name: impl Into<String>,
        label: impl Into<String>,
        offline_detail: impl Into<String>,
        probe: impl Probe + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            critical: true,
            offline_detail: offline_detail.into(),
            probe: Arc::new(probe),
        }
    }

    /// A probe whose failure is absorbed into its offline detail.
    pub fn non_critical(
        name: impl Into<String>,
        label: impl Into<String>,
        offline_detail: impl Into<String>,
        probe: impl Probe + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            critical: false,
            offline_detail: offline_detail.into(),
            probe: Arc::new(probe),
        }
    }
}

/// Outcome of one probe execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Failed,
}

/// Aggregated outcome of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overall {
    Ok,
    Error,
}

/// Result of one probe within a report. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub name: String,
    pub status: ProbeStatus,
    pub detail: String,
}

impl ProbeResult {
    fn ok(name: &str, detail: String) -> Self {
        Self {
            name: name.to_string(),
            status: ProbeStatus::Ok,
            detail,
        }
    }

    fn failed(name: &str, detail: String) -> Self {
        Self {
            name: name.to_string(),
            status: ProbeStatus::Failed,
            detail,
        }
    }
}

/// The ordered result of running all probes for one request.
///
/// `probes` always has one entry per spec, in spec order - probes skipped
/// after a critical failure get a synthetic [`SKIPPED_DETAIL`] result.
/// `overall` is `Error` iff a critical probe failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub overall: Overall,
    pub probes: Vec<ProbeResult>,
}

impl HealthReport {
    /// The error message of the critical probe that failed the report, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match self.overall {
            Overall::Ok => None,
            Overall::Error => self
                .probes
                .iter()
                .find(|p| p.status == ProbeStatus::Failed && p.detail != SKIPPED_DETAIL)
                .map(|p| p.detail.as_str()),
        }
    }
}

/// Run the given probes in order and aggregate their results.
///
/// Probes execute sequentially; the critical short-circuit depends on this
/// ordering. A critical failure records the real error message for the
/// failing probe, marks every remaining probe as skipped, and fails the
/// report. A non-critical failure records the spec's offline detail and
/// leaves the overall status untouched.
pub async fn run_health_checks(specs: &[ProbeSpec]) -> HealthReport {
    let mut probes = Vec::with_capacity(specs.len());
    let mut overall = Overall::Ok;

    for (position, spec) in specs.iter().enumerate() {
        match spec.probe.execute().await {
            Ok(detail) => {
                tracing::debug!(probe = %spec.name, detail = %detail, "Probe succeeded");
                probes.push(ProbeResult::ok(&spec.name, detail));
            }
            Err(err) if spec.critical => {
                tracing::error!(probe = %spec.name, error = %err, "Critical probe failed");
                probes.push(ProbeResult::failed(&spec.name, err.to_string()));
                for skipped in &specs[position + 1..] {
                    tracing::debug!(probe = %skipped.name, "Probe skipped");
                    probes.push(ProbeResult::failed(&skipped.name, SKIPPED_DETAIL.to_string()));
                }
                overall = Overall::Error;
                break;
            }
            Err(err) => {
                tracing::warn!(probe = %spec.name, error = %err, "Non-critical probe failed");
                probes.push(ProbeResult::failed(&spec.name, spec.offline_detail.clone()));
            }
        }
    }

    HealthReport { overall, probes }
}
