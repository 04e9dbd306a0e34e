pub mod verify;

use clap::Parser;
use reflector_common::network::ports::{self, PortRange, PortRangeError, PortSelection};
use reflector_common::network::protocol::Protocol;
use reflector_common::results::PortResults;
use reflector_core::network::{self, ResolveError};
use reflector_core::runner::VerificationRequest;
use thiserror::Error;

pub const COMPLETED_EXIT_CODE: i32 = 0;
pub const USAGE_EXIT_CODE: i32 = 1;

const AFTER_HELP: &str = "\
If --start-port is given, --end-port is mandatory (and the other way around).
Without a range the default ports are verified: QoS ports unless --non-qos is set.
  QoS      TCP: 5004, 5060-5061, 33432-33433
           UDP: 5004, 10001-13747, 13750-17498, 17501-21247, 25001-27997,
                28000-30998, 31001-33997, 52500-59499, 63000-64667
  non-QoS  TCP: 5004, 5060-5061
           UDP: 5004, 34000-34999
To verify a single port, use it as both start and end port.

Examples:
  reflector-client --ip <reflector-ip> --protocol udp --start-port 52000 --end-port 52501 --non-qos
  reflector-client --ip <reflector-ip> --protocol tcp";

#[derive(Parser, Debug)]
#[command(name = "reflector-client", version)]
#[command(about = "Verifies that UDP/TCP ports towards a reflector are open.")]
#[command(arg_required_else_help = true, after_help = AFTER_HELP)]
pub struct CommandLine {
    /// IPv4 address or hostname of the reflector
    #[arg(long, value_name = "HOST")]
    pub ip: String,

    /// Transport to verify (udp or tcp)
    #[arg(long)]
    pub protocol: Protocol,

    /// First port of an inclusive range
    #[arg(long, requires = "end_port", allow_negative_numbers = true)]
    pub start_port: Option<i64>,

    /// Last port of an inclusive range
    #[arg(long, requires = "start_port", allow_negative_numbers = true)]
    pub end_port: Option<i64>,

    /// Verify the non-QoS default ports instead of the QoS ones
    #[arg(long)]
    pub non_qos: bool,
}

impl CommandLine {
    /// Parses the process arguments.
    ///
    /// Help and version requests exit 0, every other parse error exits with
    /// the usage exit code.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(cmd) => cmd,
            Err(e) => {
                let _ = e.print();
                std::process::exit(exit_code(&e));
            }
        }
    }

    pub fn qos(&self) -> bool {
        !self.non_qos
    }

    /// Resolves the ports to verify: the explicit range when both bounds are
    /// given, otherwise the default table for the protocol and QoS mode.
    pub fn selection(&self) -> Result<PortSelection, PortRangeError> {
        match (self.start_port, self.end_port) {
            (Some(start), Some(end)) => {
                Ok(PortSelection::Range(PortRange::from_bounds(start, end)?))
            }
            _ => Ok(PortSelection::Default(ports::default_table(
                self.protocol,
                self.qos(),
            ))),
        }
    }

    /// Validates the port selection, then resolves the reflector host.
    pub async fn request(&self) -> Result<VerificationRequest, UsageError> {
        let selection: PortSelection = self.selection()?;
        let host = network::resolve_ipv4(&self.ip).await?;

        Ok(VerificationRequest {
            host,
            protocol: self.protocol,
            selection,
        })
    }
}

/// Arguments that parse but cannot be verified.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error(transparent)]
    Range(#[from] PortRangeError),
    #[error(transparent)]
    Host(#[from] ResolveError),
}

impl UsageError {
    pub fn exit_code(&self) -> i32 {
        USAGE_EXIT_CODE
    }
}

/// Help and version requests are not errors.
pub fn exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        USAGE_EXIT_CODE
    } else {
        COMPLETED_EXIT_CODE
    }
}

/// A finished run exits cleanly whether or not ports are blocked.
pub fn completed_exit_code(_results: &PortResults) -> i32 {
    COMPLETED_EXIT_CODE
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
