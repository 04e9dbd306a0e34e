//! The verification run: one ordered first pass over the selected ports,
//! followed by a bounded number of retry rounds over whatever failed.
//!
//! The runner never prints. Everything the user sees is derived from the
//! [`Event`]s handed to the caller's callback.

use std::net::Ipv4Addr;

use reflector_common::config::Config;
use reflector_common::network::ports::PortSelection;
use reflector_common::network::protocol::Protocol;
use reflector_common::results::{Attempt, PortResults};
use tracing::debug;

use crate::verifier::{self, Prober};

/// What to verify.
#[derive(Debug, Clone, Copy)]
pub struct VerificationRequest {
    pub host: Ipv4Addr,
    pub protocol: Protocol,
    pub selection: PortSelection,
}

/// Running counters after each first pass probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub checked: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.checked as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A first pass probe finished.
    Checked(Progress),
    /// The first pass left failures behind; `retries` rounds may follow.
    FirstPassFailures { ports: Vec<String>, retries: u32 },
    /// A retry round is about to start, after the retry delay.
    RetryRound { round: u32 },
    /// A failed port is being probed again.
    Reverifying { port: u16 },
}

/// Runs the first pass and the retry rounds and returns the final results.
pub async fn run<P, F>(
    prober: &P,
    request: &VerificationRequest,
    cfg: &Config,
    mut on_event: F,
) -> PortResults
where
    P: Prober + ?Sized,
    F: FnMut(Event),
{
    let mut results: PortResults = PortResults::new();

    first_pass(prober, request, &mut results, &mut on_event).await;

    if results.has_failures() {
        on_event(Event::FirstPassFailures {
            ports: results.consolidated_failures(),
            retries: cfg.retry_count,
        });
    }

    let mut round: u32 = 0;
    while results.has_failures() && round < cfg.retry_count {
        round += 1;
        on_event(Event::RetryRound { round });
        tokio::time::sleep(cfg.retry_delay).await;
        retry_round(prober, request, &mut results, &mut on_event).await;
        debug!(round, remaining = results.failure_count(), "retry round finished");
    }

    results
}

async fn first_pass<P, F>(
    prober: &P,
    request: &VerificationRequest,
    results: &mut PortResults,
    on_event: &mut F,
) where
    P: Prober + ?Sized,
    F: FnMut(Event),
{
    let ports: Vec<u16> = request.selection.ports();
    let total: usize = ports.len();

    for (idx, port) in ports.into_iter().enumerate() {
        verifier::verify_port(
            prober,
            request.host,
            request.protocol,
            port,
            Attempt::First,
            results,
        )
        .await;

        on_event(Event::Checked(Progress {
            checked: idx + 1,
            total,
            succeeded: results.success_count(),
            failed: results.failure_count(),
        }));
    }
}

/// Re-probes a snapshot of the failed ports, ascending.
async fn retry_round<P, F>(
    prober: &P,
    request: &VerificationRequest,
    results: &mut PortResults,
    on_event: &mut F,
) where
    P: Prober + ?Sized,
    F: FnMut(Event),
{
    let pending: Vec<u16> = results.failed().iter().copied().collect();

    for port in pending {
        on_event(Event::Reverifying { port });
        verifier::verify_port(
            prober,
            request.host,
            request.protocol,
            port,
            Attempt::Retry,
            results,
        )
        .await;
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
