use std::net::Ipv4Addr;
use std::time::Duration;

use console::style;

use crate::domain::probe::{ProbeResult, SessionStats, TargetAddress};
use crate::stats::compute_stats;

/// Banner printed once before probing.
pub fn render_header(target: &TargetAddress) -> String {
    format!(
        "{} {} ({}) TCP SYN/ACK/close",
        style("TCPPING").bold(),
        style(&target.hostname).green(),
        target.ip
    )
}

/// One line per established connection.
pub fn render_reply(ip: Ipv4Addr, port: u16, seq: u32, result: &ProbeResult) -> String {
    format!(
        "TCP/ACK from {}[{}]: tcp_seq={} time={} ms",
        ip,
        port,
        seq,
        style(format!("{:.3}", result.elapsed.as_secs_f64() * 1000.0)).yellow()
    )
}

/// Diagnostic line for a failed probe.
pub fn render_failure(ip: Ipv4Addr, port: u16, seq: u32, result: &ProbeResult) -> String {
    let kind = result
        .error_kind
        .map(|k| k.to_string())
        .unwrap_or_else(|| "failure".to_string());
    let detail = result.detail.as_deref().unwrap_or("");
    format!(
        "{} {}[{}]: tcp_seq={} {}: {}",
        style("No TCP/ACK from").red(),
        ip,
        port,
        seq,
        kind,
        detail
    )
}

pub fn render_interval_warning(min_interval: Duration) -> String {
    style(format!(
        "Warning: interval has been adjusted to {}s.",
        min_interval.as_secs_f64()
    ))
    .yellow()
    .to_string()
}

/// Summary block printed once the loop is over.
///
/// Latencies are reported in milliseconds, in min/avg/max/mdev order.
pub fn render_footer(stats: &SessionStats, total: Duration, target: &TargetAddress) -> String {
    let summary = compute_stats(&stats.latencies_ms());
    let total_ms = (total.as_secs_f64() * 1000.0).round() as u64;
    format!(
        "\n{}\n\
         {} connections attempted, {} established, {}% failed, time {}ms\n\
         rtt min/avg/max/mdev = {:.3}/{:.3}/{:.3}/{:.3} ms",
        style(format!("--- {} tcpping statistics ---", target.ip)).bold(),
        stats.attempted,
        stats.succeeded,
        stats.failure_percent(),
        total_ms,
        summary.min,
        summary.mean,
        summary.max,
        summary.mdev
    )
}
