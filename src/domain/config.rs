use std::time::Duration;

use crate::error::TcppingError;

pub const DEFAULT_COUNT: u32 = 1000;
pub const DEFAULT_INTERVAL: f64 = 1.0;
/// Floor for the inter-probe delay; lower requests are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(200);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Validated settings for one probing session.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub count: u32,
    pub interval: Duration,
    pub numeric_only: bool,
    pub connect_timeout: Duration,
    /// Set when the requested interval was below [`MIN_INTERVAL`].
    pub interval_clamped: bool,
}

impl Config {
    /// Build a session config, raising `interval_secs` to the floor when needed.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        count: u32,
        interval_secs: f64,
        numeric_only: bool,
    ) -> Result<Self, TcppingError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(TcppingError::Config("empty destination".into()));
        }
        if port == 0 {
            return Err(TcppingError::Config(
                "port out of range [1..65535]: 0".into(),
            ));
        }
        if count == 0 {
            return Err(TcppingError::Config("count must be greater than 0".into()));
        }
        let (interval, interval_clamped) = clamp_interval(interval_secs)?;
        Ok(Self {
            host,
            port,
            count,
            interval,
            numeric_only,
            connect_timeout: CONNECT_TIMEOUT,
            interval_clamped,
        })
    }
}

/// Convert an interval in seconds to a duration no shorter than [`MIN_INTERVAL`].
///
/// Returns whether the value had to be raised.
pub fn clamp_interval(secs: f64) -> Result<(Duration, bool), TcppingError> {
    if !secs.is_finite() {
        return Err(TcppingError::Config(format!("invalid interval: {secs}")));
    }
    if secs < MIN_INTERVAL.as_secs_f64() {
        return Ok((MIN_INTERVAL, true));
    }
    let interval = Duration::try_from_secs_f64(secs)
        .map_err(|e| TcppingError::Config(format!("invalid interval: {e}")))?;
    Ok((interval, false))
}
