//! Socket level probes against a reflector.
//!
//! Every probe binds a fresh client socket to an ephemeral local port,
//! sends the decimal port number as payload and waits for any reply.
//! Each socket operation is bounded by the probe timeout.

pub mod tcp;
pub mod udp;

use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use reflector_common::config::Config;
use reflector_common::network::protocol::Protocol;
use thiserror::Error;
use tokio::net::lookup_host;
use tokio::time::timeout;

use crate::verifier::Prober;

pub(crate) const EPHEMERAL_ADDR: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0);
pub(crate) const RECV_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve host '{host}': {source}")]
    Lookup {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("host '{0}' has no IPv4 address")]
    NoIpv4(String),
}

/// Resolves `host` to its first IPv4 address. IPv4 literals skip the lookup.
pub async fn resolve_ipv4(host: &str) -> Result<Ipv4Addr, ResolveError> {
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Ok(ip);
    }

    let addrs = lookup_host((host, 0))
        .await
        .map_err(|source| ResolveError::Lookup {
            host: host.to_string(),
            source,
        })?;

    addrs
        .filter_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| ResolveError::NoIpv4(host.to_string()))
}

/// Probes over real sockets.
#[derive(Debug, Clone, Copy)]
pub struct SocketProber {
    probe_timeout: Duration,
}

impl SocketProber {
    pub fn new(probe_timeout: Duration) -> Self {
        Self { probe_timeout }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.probe_timeout)
    }
}

#[async_trait]
impl Prober for SocketProber {
    async fn probe(&self, protocol: Protocol, addr: SocketAddrV4) -> Result<(), ProbeError> {
        match protocol {
            Protocol::Udp => udp::datagram_probe(addr, self.probe_timeout).await,
            Protocol::Tcp => tcp::stream_probe(addr, self.probe_timeout).await,
        }
    }
}

pub(crate) fn payload(addr: &SocketAddrV4) -> String {
    addr.port().to_string()
}

pub(crate) async fn with_timeout<F, T>(limit: Duration, operation: F) -> Result<T, ProbeError>
where
    F: Future<Output = io::Result<T>>,
{
    match timeout(limit, operation).await {
        Ok(result) => Ok(result?),
        Err(_elapsed) => Err(ProbeError::Timeout(limit)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ipv4_literal_is_returned_as_is() {
        let ip = resolve_ipv4("10.0.0.1").await.unwrap();
        assert_eq!(ip, Ipv4Addr::new(10, 0, 0, 1));
    }

    #[tokio::test]
    async fn localhost_resolves_to_loopback() {
        let ip = resolve_ipv4("localhost").await.unwrap();
        assert!(ip.is_loopback());
    }

    #[tokio::test]
    async fn ipv6_literal_has_no_ipv4_address() {
        let err = resolve_ipv4("::1").await.unwrap_err();
        assert!(matches!(err, ResolveError::NoIpv4(host) if host == "::1"));
    }

    #[tokio::test]
    async fn unknown_host_is_an_error() {
        assert!(resolve_ipv4("reflector.invalid").await.is_err());
    }
}
