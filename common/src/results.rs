use std::collections::BTreeSet;

use crate::network::range;

/// Whether a probe belongs to the first pass or to a retry round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Retry,
}

/// Outcome accumulator for one run.
///
/// A port lives in at most one of the two sets. Success always wins:
/// a failed port is promoted on a later success, an open port is never
/// demoted by a later failure.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PortResults {
    succeeded: BTreeSet<u16>,
    failed: BTreeSet<u16>,
}

impl PortResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, port: u16, attempt: Attempt) {
        self.succeeded.insert(port);
        let promoted: bool = self.failed.remove(&port);
        if promoted && attempt == Attempt::Retry {
            tracing::debug!(port, "port recovered on retry");
        }
    }

    pub fn record_failure(&mut self, port: u16) {
        if self.succeeded.contains(&port) {
            return;
        }
        self.failed.insert(port);
    }

    pub fn succeeded(&self) -> &BTreeSet<u16> {
        &self.succeeded
    }

    pub fn failed(&self) -> &BTreeSet<u16> {
        &self.failed
    }

    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Failed ports, ascending, as consolidated ranges.
    pub fn consolidated_failures(&self) -> Vec<String> {
        range::consolidate(self.failed.iter().copied())
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
