//! Per-port verification.
//!
//! The [`Prober`] trait is the seam between the orchestration logic and the
//! sockets. The runner only ever talks to a `Prober`, so the retry logic can
//! be exercised with scripted outcomes.

use std::net::{Ipv4Addr, SocketAddrV4};

use async_trait::async_trait;
use reflector_common::network::protocol::Protocol;
use reflector_common::results::{Attempt, PortResults};
use tracing::debug;

use crate::network::ProbeError;

/// Performs a single liveness exchange with a reflector.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, protocol: Protocol, addr: SocketAddrV4) -> Result<(), ProbeError>;
}

/// Probes one port and records the outcome.
///
/// Probe errors never escape: any error or timeout classifies the port as
/// failed. Returns `true` when the port answered.
pub async fn verify_port<P>(
    prober: &P,
    host: Ipv4Addr,
    protocol: Protocol,
    port: u16,
    attempt: Attempt,
    results: &mut PortResults,
) -> bool
where
    P: Prober + ?Sized,
{
    let addr: SocketAddrV4 = SocketAddrV4::new(host, port);

    match prober.probe(protocol, addr).await {
        Ok(()) => {
            results.record_success(port, attempt);
            true
        }
        Err(e) => {
            debug!(%addr, %protocol, ?attempt, "probe failed: {e}");
            results.record_failure(port);
            false
        }
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
