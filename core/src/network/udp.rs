use std::net::SocketAddrV4;
use std::time::Duration;

use tokio::net::UdpSocket;

use crate::network::{EPHEMERAL_ADDR, ProbeError, RECV_BUFFER_SIZE, payload, with_timeout};

/// Sends the port number as a datagram and waits for any datagram back.
pub async fn datagram_probe(addr: SocketAddrV4, probe_timeout: Duration) -> Result<(), ProbeError> {
    let socket: UdpSocket = UdpSocket::bind(EPHEMERAL_ADDR).await?;
    let payload: String = payload(&addr);

    with_timeout(probe_timeout, socket.send_to(payload.as_bytes(), addr)).await?;

    let mut buf = [0u8; RECV_BUFFER_SIZE];
    let (len, from) = with_timeout(probe_timeout, socket.recv_from(&mut buf)).await?;
    tracing::trace!(%addr, %from, len, "datagram reply");

    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
