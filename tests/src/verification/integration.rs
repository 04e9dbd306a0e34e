#![cfg(test)]
use std::net::Ipv4Addr;

use reflector_common::network::ports::{self, PortRange, PortSelection};
use reflector_common::network::protocol::Protocol;
use reflector_common::results::PortResults;
use reflector_core::network::SocketProber;
use reflector_core::runner::{self, Event, VerificationRequest};

use crate::utils::{self, UNREACHABLE_HOST};

fn single_port(port: u16) -> PortSelection {
    PortSelection::Range(PortRange::from_bounds(i64::from(port), i64::from(port)).unwrap())
}

/// Every requested port of an unreachable host ends up blocked and is
/// reported as consolidated ranges.
#[tokio::test]
async fn unreachable_host_reports_every_port_blocked() {
    let cfg = utils::fast_config();
    let prober = SocketProber::from_config(&cfg);
    let request = VerificationRequest {
        host: UNREACHABLE_HOST,
        protocol: Protocol::Tcp,
        selection: PortSelection::Range(PortRange::from_bounds(5000, 5004).unwrap()),
    };

    let results: PortResults = runner::run(&prober, &request, &cfg, |_| {}).await;

    assert!(results.succeeded().is_empty());
    assert_eq!(results.failure_count(), 5);
    assert_eq!(results.consolidated_failures(), vec!["5000-5004"]);
}

#[tokio::test]
async fn unreachable_host_with_default_table() {
    let cfg = utils::fast_config();
    let prober = SocketProber::from_config(&cfg);
    let request = VerificationRequest {
        host: UNREACHABLE_HOST,
        protocol: Protocol::Tcp,
        selection: PortSelection::Default(ports::default_table(Protocol::Tcp, false)),
    };

    let mut rounds: u32 = 0;
    let results = runner::run(&prober, &request, &cfg, |event| {
        if matches!(event, Event::RetryRound { .. }) {
            rounds += 1;
        }
    })
    .await;

    assert_eq!(rounds, cfg.retry_count);
    assert_eq!(results.consolidated_failures(), vec!["5004", "5060-5061"]);
}

#[tokio::test]
async fn udp_reflector_port_is_open() {
    let cfg = utils::fast_config();
    let port: u16 = utils::spawn_udp_reflector(0).await.unwrap();
    let prober = SocketProber::from_config(&cfg);
    let request = VerificationRequest {
        host: Ipv4Addr::LOCALHOST,
        protocol: Protocol::Udp,
        selection: single_port(port),
    };

    let mut events: Vec<Event> = Vec::new();
    let results = runner::run(&prober, &request, &cfg, |e| events.push(e)).await;

    assert!(!results.has_failures());
    assert!(results.succeeded().contains(&port));
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn tcp_reflector_port_is_open() {
    let cfg = utils::fast_config();
    let port: u16 = utils::spawn_tcp_reflector().await.unwrap();
    let prober = SocketProber::from_config(&cfg);
    let request = VerificationRequest {
        host: Ipv4Addr::LOCALHOST,
        protocol: Protocol::Tcp,
        selection: single_port(port),
    };

    let results = runner::run(&prober, &request, &cfg, |_| {}).await;

    assert_eq!(results.success_count(), 1);
    assert!(!results.has_failures());
}

#[tokio::test]
async fn late_reflector_is_promoted_on_retry() {
    let cfg = utils::fast_config();
    let port: u16 = utils::spawn_udp_reflector(2).await.unwrap();
    let prober = SocketProber::from_config(&cfg);
    let request = VerificationRequest {
        host: Ipv4Addr::LOCALHOST,
        protocol: Protocol::Udp,
        selection: single_port(port),
    };

    let mut retries: Vec<u32> = Vec::new();
    let results = runner::run(&prober, &request, &cfg, |event| {
        if let Event::RetryRound { round } = event {
            retries.push(round);
        }
    })
    .await;

    assert!(results.succeeded().contains(&port));
    assert!(!results.failed().contains(&port));
    assert_eq!(retries, vec![1, 2]);
}

#[tokio::test]
async fn closed_tcp_port_stays_blocked() {
    let cfg = utils::fast_config();
    let port: u16 = utils::closed_tcp_port().await.unwrap();
    let prober = SocketProber::from_config(&cfg);
    let request = VerificationRequest {
        host: Ipv4Addr::LOCALHOST,
        protocol: Protocol::Tcp,
        selection: single_port(port),
    };

    let results = runner::run(&prober, &request, &cfg, |_| {}).await;

    assert_eq!(results.consolidated_failures(), vec![port.to_string()]);
    assert!(results.succeeded().is_empty());
}
