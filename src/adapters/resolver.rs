use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

use trust_dns_resolver::TokioAsyncResolver;

use crate::domain::probe::TargetAddress;
use crate::error::TcppingError;

/// Resolve `host` into the name and IPv4 address used for the session.
///
/// An IPv4 literal is used as-is; unless `numeric_only` is set its name comes
/// from a reverse lookup, and a failed reverse lookup fails resolution.
/// Anything else is taken as a host name and forward-resolved to its first
/// IPv4 address.
pub async fn resolve(host: &str, numeric_only: bool) -> Result<TargetAddress, TcppingError> {
    let host = host.trim();
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        let hostname = if numeric_only {
            host.to_string()
        } else {
            reverse_lookup(ip).await?
        };
        return Ok(TargetAddress { hostname, ip });
    }

    let ip = resolve_ipv4(host)?;
    Ok(TargetAddress {
        hostname: host.to_string(),
        ip,
    })
}

/// Forward-resolve a host name to its first IPv4 address.
pub fn resolve_ipv4(host: &str) -> Result<Ipv4Addr, TcppingError> {
    let addrs: Vec<SocketAddr> = (host, 0)
        .to_socket_addrs()
        .map_err(|e| TcppingError::Dns(format!("DNS resolution failed for '{}': {}", host, e)))?
        .collect();

    addrs
        .iter()
        .find_map(|a| match a.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| TcppingError::Dns(format!("No IPv4 address found for '{}'", host)))
}

/// Look up the PTR name of `ip` through the system resolver configuration.
pub async fn reverse_lookup(ip: Ipv4Addr) -> Result<String, TcppingError> {
    let resolver = TokioAsyncResolver::tokio_from_system_conf()?;
    let names = resolver
        .reverse_lookup(IpAddr::V4(ip))
        .await
        .map_err(|e| TcppingError::Dns(format!("reverse lookup failed for {}: {}", ip, e)))?;

    names
        .iter()
        .next()
        .map(|name| name.to_string().trim_end_matches('.').to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| TcppingError::Dns(format!("No host name found for {}", ip)))
}
