//! # Port Sets
//!
//! The built-in reflector port tables and the user supplied port range.
//!
//! A run always verifies exactly one [`PortSelection`]: either one of the
//! four fixed tables (picked by QoS mode and protocol) or an inclusive
//! `start-end` range given on the command line.

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::network::protocol::Protocol;
use crate::network::range;

/// A fixed, ordered list of port spans.
///
/// Spans are kept in declaration order and are not sorted.
#[derive(Debug)]
pub struct PortTable {
    pub name: &'static str,
    spans: &'static [RangeInclusive<u16>],
}

impl PortTable {
    pub const fn new(name: &'static str, spans: &'static [RangeInclusive<u16>]) -> Self {
        Self { name, spans }
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.spans.iter().flat_map(|span| span.clone())
    }

    pub fn len(&self) -> usize {
        self.spans
            .iter()
            .map(|span| usize::from(*span.end() - *span.start()) + 1)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

pub static QOS_UDP: PortTable = PortTable::new(
    "QoS UDP",
    &[
        5004..=5004,
        52500..=59499,
        63000..=64667,
        10001..=13747,
        25001..=27997,
        13750..=17498,
        28000..=30998,
        17501..=21247,
        31001..=33997,
    ],
);

pub static QOS_TCP: PortTable = PortTable::new(
    "QoS TCP",
    &[5004..=5004, 5060..=5061, 33432..=33433],
);

pub static NON_QOS_UDP: PortTable =
    PortTable::new("non-QoS UDP", &[5004..=5004, 34000..=34999]);

pub static NON_QOS_TCP: PortTable = PortTable::new("non-QoS TCP", &[5004..=5004, 5060..=5061]);

/// Picks the built-in table for the given mode and protocol.
pub fn default_table(protocol: Protocol, qos: bool) -> &'static PortTable {
    match (qos, protocol) {
        (true, Protocol::Udp) => &QOS_UDP,
        (true, Protocol::Tcp) => &QOS_TCP,
        (false, Protocol::Udp) => &NON_QOS_UDP,
        (false, Protocol::Tcp) => &NON_QOS_TCP,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortRangeError {
    #[error("invalid start port {0}, ports must be within 0-65535")]
    StartOutOfBounds(i64),
    #[error("invalid end port {0}, ports must be within 0-65535")]
    EndOutOfBounds(i64),
    #[error("start port {start} is greater than end port {end}")]
    Inverted { start: i64, end: i64 },
}

/// Inclusive range of ports, always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Validates raw command line bounds.
    pub fn from_bounds(start: i64, end: i64) -> Result<Self, PortRangeError> {
        let start_port =
            u16::try_from(start).map_err(|_| PortRangeError::StartOutOfBounds(start))?;
        let end_port = u16::try_from(end).map_err(|_| PortRangeError::EndOutOfBounds(end))?;

        if start_port > end_port {
            return Err(PortRangeError::Inverted { start, end });
        }

        Ok(Self {
            start: start_port,
            end: end_port,
        })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The ports a single run verifies, in probe order.
#[derive(Debug, Clone, Copy)]
pub enum PortSelection {
    Default(&'static PortTable),
    Range(PortRange),
}

impl PortSelection {
    pub fn ports(&self) -> Vec<u16> {
        match self {
            PortSelection::Default(table) => table.iter().collect(),
            PortSelection::Range(range) => range.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PortSelection::Default(table) => table.len(),
            PortSelection::Range(range) => range.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human readable form used in progress and summary lines.
    pub fn describe(&self) -> String {
        match self {
            PortSelection::Default(table) => range::consolidate(table.iter()).join(", "),
            PortSelection::Range(range) => range.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_selection() {
        let tcp: Vec<u16> = default_table(Protocol::Tcp, true).iter().collect();
        assert_eq!(tcp, vec![5004, 5060, 5061, 33432, 33433]);

        let non_qos_tcp: Vec<u16> = default_table(Protocol::Tcp, false).iter().collect();
        assert_eq!(non_qos_tcp, vec![5004, 5060, 5061]);

        let non_qos_udp: Vec<u16> = default_table(Protocol::Udp, false).iter().collect();
        assert_eq!(non_qos_udp.len(), 1001);
        assert_eq!(non_qos_udp[0], 5004);
        assert_eq!(non_qos_udp[1], 34000);
        assert_eq!(*non_qos_udp.last().unwrap(), 34999);

        assert!(std::ptr::eq(default_table(Protocol::Udp, true), &QOS_UDP));
    }

    #[test]
    fn qos_udp_table_keeps_declaration_order() {
        let ports: Vec<u16> = QOS_UDP.iter().collect();
        assert_eq!(ports.len(), QOS_UDP.len());
        assert_eq!(ports[0], 5004);
        assert_eq!(ports[1], 52500);

        let first_low = ports.iter().position(|&p| p == 10001).unwrap();
        let last_high = ports.iter().position(|&p| p == 64667).unwrap();
        assert!(last_high < first_low);

        assert!(ports.contains(&33997));
        assert!(!ports.contains(&13748));
        assert!(!ports.contains(&34000));
    }

    #[test]
    fn table_len_counts_inclusive_spans() {
        assert_eq!(NON_QOS_TCP.len(), 3);
        assert_eq!(QOS_TCP.len(), 5);
        assert_eq!(NON_QOS_UDP.len(), 1 + 1000);
        assert_eq!(
            QOS_UDP.len(),
            1 + 7000 + 1668 + 3747 + 2997 + 3749 + 2999 + 3747 + 2997
        );
    }

    #[test]
    fn port_range_accepts_valid_bounds() {
        let range = PortRange::from_bounds(52000, 52501).unwrap();
        assert_eq!(range.start(), 52000);
        assert_eq!(range.end(), 52501);
        assert_eq!(range.len(), 502);

        let single = PortRange::from_bounds(0, 0).unwrap();
        assert_eq!(single.iter().collect::<Vec<u16>>(), vec![0]);

        let top = PortRange::from_bounds(65535, 65535).unwrap();
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn port_range_rejects_invalid_bounds() {
        assert_eq!(
            PortRange::from_bounds(-1, 10),
            Err(PortRangeError::StartOutOfBounds(-1))
        );
        assert_eq!(
            PortRange::from_bounds(10, 65536),
            Err(PortRangeError::EndOutOfBounds(65536))
        );
        assert_eq!(
            PortRange::from_bounds(70000, 70001),
            Err(PortRangeError::StartOutOfBounds(70000))
        );
        assert_eq!(
            PortRange::from_bounds(200, 100),
            Err(PortRangeError::Inverted {
                start: 200,
                end: 100
            })
        );
    }

    #[test]
    fn selection_describe() {
        let selection = PortSelection::Default(&NON_QOS_UDP);
        assert_eq!(selection.describe(), "5004, 34000-34999");
        assert_eq!(selection.len(), 1001);

        let range = PortRange::from_bounds(100, 105).unwrap();
        let selection = PortSelection::Range(range);
        assert_eq!(selection.describe(), "100-105");
        assert_eq!(selection.ports(), vec![100, 101, 102, 103, 104, 105]);
    }
}
