use std::io::{self, ErrorKind};
use std::net::{Ipv4Addr, Shutdown, SocketAddr, SocketAddrV4};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{Instant, timeout};
use tracing::{debug, instrument, warn};

use crate::domain::probe::{ProbeErrorKind, ProbeResult};

/// Open a fresh TCP connection to `ip:port`, time the handshake and close it.
///
/// Never fails: every outcome is folded into the returned [`ProbeResult`].
/// The socket is released on every path, including when the returned future
/// is dropped mid-connect.
#[instrument(level = "trace")]
pub async fn attempt(ip: Ipv4Addr, port: u16, limit: Duration) -> ProbeResult {
    let addr = SocketAddr::V4(SocketAddrV4::new(ip, port));
    let start = Instant::now();

    match timeout(limit, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            let elapsed = start.elapsed();
            close_quietly(stream);
            debug!(%addr, ?elapsed, "connection established");
            ProbeResult::established(elapsed)
        }
        Ok(Err(err)) => {
            let elapsed = start.elapsed();
            let kind = classify(&err);
            if kind == ProbeErrorKind::Unexpected {
                warn!(%addr, error = %err, "unexpected connect failure");
            } else {
                debug!(%addr, error = %err, "connect failed");
            }
            ProbeResult::failed(kind, elapsed, err.to_string())
        }
        Err(_) => {
            debug!(%addr, "connect timed out");
            ProbeResult::failed(ProbeErrorKind::Timeout, start.elapsed(), "Connection timed out")
        }
    }
}

/// Shut both directions down and close; teardown errors are dropped.
fn close_quietly(stream: TcpStream) {
    if let Ok(std_stream) = stream.into_std() {
        let _ = std_stream.shutdown(Shutdown::Both);
    }
}

/// Map a connect error to a probe error kind, timeouts first.
pub fn classify(err: &io::Error) -> ProbeErrorKind {
    match err.kind() {
        ErrorKind::TimedOut => ProbeErrorKind::Timeout,
        ErrorKind::ConnectionRefused
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::NotConnected
        | ErrorKind::BrokenPipe
        | ErrorKind::AddrNotAvailable
        | ErrorKind::NetworkUnreachable
        | ErrorKind::HostUnreachable
        | ErrorKind::NetworkDown => ProbeErrorKind::ConnectionError,
        _ => ProbeErrorKind::Unexpected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_orders_timeout_before_connection_errors() {
        let timed_out = io::Error::from(ErrorKind::TimedOut);
        assert_eq!(classify(&timed_out), ProbeErrorKind::Timeout);

        let refused = io::Error::from(ErrorKind::ConnectionRefused);
        assert_eq!(classify(&refused), ProbeErrorKind::ConnectionError);

        let unreachable = io::Error::from(ErrorKind::HostUnreachable);
        assert_eq!(classify(&unreachable), ProbeErrorKind::ConnectionError);

        let other = io::Error::other("boom");
        assert_eq!(classify(&other), ProbeErrorKind::Unexpected);
    }
}
