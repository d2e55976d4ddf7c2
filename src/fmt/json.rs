#[cfg(feature = "json")]
use chrono::Utc;
#[cfg(feature = "json")]
use serde::Serialize;
use std::time::Duration;

use crate::domain::probe::{SessionStats, TargetAddress};
use crate::error::TcppingError;
#[cfg(feature = "json")]
use crate::stats::compute_stats;

#[cfg(feature = "json")]
#[derive(Serialize)]
pub struct JsonSummary {
    pub schema_version: u8,
    pub run_ts: String,
    pub hostname: String,
    pub ip: String,
    pub port: u16,
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub failure_percent: u32,
    pub total_ms: u64,
    pub interrupted: bool,
    pub rtt_min_ms: f64,
    pub rtt_avg_ms: f64,
    pub rtt_max_ms: f64,
    pub rtt_mdev_ms: f64,
}

/// Serialize the session summary into a JSON string.
#[allow(unused_variables)]
pub fn summary_to_json(
    target: &TargetAddress,
    port: u16,
    stats: &SessionStats,
    total: Duration,
    pretty: bool,
) -> Result<String, TcppingError> {
    #[cfg(feature = "json")]
    {
        let rtt = compute_stats(&stats.latencies_ms());
        let summary = JsonSummary {
            schema_version: 1,
            run_ts: Utc::now().to_rfc3339(),
            hostname: target.hostname.clone(),
            ip: target.ip.to_string(),
            port,
            attempted: stats.attempted,
            succeeded: stats.succeeded,
            failed: stats.failed,
            failure_percent: stats.failure_percent(),
            total_ms: (total.as_secs_f64() * 1000.0).round() as u64,
            interrupted: stats.interrupted(),
            rtt_min_ms: rtt.min,
            rtt_avg_ms: rtt.mean,
            rtt_max_ms: rtt.max,
            rtt_mdev_ms: rtt.mdev,
        };
        let text = if pretty {
            serde_json::to_string_pretty(&summary).map_err(|e| TcppingError::Other(e.to_string()))?
        } else {
            serde_json::to_string(&summary).map_err(|e| TcppingError::Other(e.to_string()))?
        };
        Ok(text)
    }
    #[cfg(not(feature = "json"))]
    {
        Err(TcppingError::Other("json feature disabled".into()))
    }
}
