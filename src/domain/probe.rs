use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

#[cfg(feature = "json")]
use serde::Serialize;

/// Destination resolved once at session start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct TargetAddress {
    pub hostname: String,
    pub ip: Ipv4Addr,
}

/// Why a single probe failed, in the order the connect error is classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum ProbeErrorKind {
    Timeout,
    ConnectionError,
    Unexpected,
}

impl fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::ConnectionError => "connection error",
            ProbeErrorKind::Unexpected => "unexpected error",
        };
        f.write_str(s)
    }
}

/// Outcome of one connect/close attempt.
///
/// `elapsed` is always populated: the handshake time on success, the
/// measured time until failure otherwise (about the timeout bound when the
/// attempt timed out).
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeResult {
    pub success: bool,
    pub elapsed: Duration,
    pub error_kind: Option<ProbeErrorKind>,
    pub detail: Option<String>,
}

impl ProbeResult {
    pub fn established(elapsed: Duration) -> Self {
        Self {
            success: true,
            elapsed,
            error_kind: None,
            detail: None,
        }
    }

    pub fn failed(kind: ProbeErrorKind, elapsed: Duration, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            elapsed,
            error_kind: Some(kind),
            detail: Some(detail.into()),
        }
    }
}

/// How the loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum SessionOutcome {
    /// Every configured probe was issued.
    Completed,
    /// Stopped early by the user.
    Interrupted,
}

/// Counters and latency samples accumulated over a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionStats {
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub latencies: Vec<Duration>,
    pub outcome: SessionOutcome,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            attempted: 0,
            succeeded: 0,
            failed: 0,
            latencies: Vec::new(),
            outcome: SessionOutcome::Completed,
        }
    }
}

impl SessionStats {
    /// Fold one finished probe into the counters.
    pub fn record(&mut self, result: &ProbeResult) {
        self.attempted += 1;
        if result.success {
            self.succeeded += 1;
            self.latencies.push(result.elapsed);
        } else {
            self.failed += 1;
        }
    }

    /// Failure share in percent, rounded to the nearest integer.
    pub fn failure_percent(&self) -> u32 {
        if self.attempted == 0 {
            return 0;
        }
        (100.0 * f64::from(self.failed) / f64::from(self.attempted)).round() as u32
    }

    /// Latency samples in milliseconds, in probe order.
    pub fn latencies_ms(&self) -> Vec<f64> {
        self.latencies
            .iter()
            .map(|d| d.as_secs_f64() * 1000.0)
            .collect()
    }

    pub fn interrupted(&self) -> bool {
        self.outcome == SessionOutcome::Interrupted
    }
}
