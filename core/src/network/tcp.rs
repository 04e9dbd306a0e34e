use std::net::{SocketAddr, SocketAddrV4};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpSocket, TcpStream};

use crate::network::{EPHEMERAL_ADDR, ProbeError, RECV_BUFFER_SIZE, payload, with_timeout};

/// Connects, sends the port number and waits for a reply.
///
/// An orderly close by the peer counts as a reply: the connection was
/// accepted, so the port is open.
pub async fn stream_probe(addr: SocketAddrV4, probe_timeout: Duration) -> Result<(), ProbeError> {
    let socket: TcpSocket = TcpSocket::new_v4()?;
    socket.bind(SocketAddr::V4(EPHEMERAL_ADDR))?;

    let mut stream: TcpStream =
        with_timeout(probe_timeout, socket.connect(SocketAddr::V4(addr))).await?;
    let payload: String = payload(&addr);

    with_timeout(probe_timeout, stream.write_all(payload.as_bytes())).await?;

    let mut buf = [0u8; RECV_BUFFER_SIZE];
    let len: usize = with_timeout(probe_timeout, stream.read(&mut buf)).await?;
    tracing::trace!(%addr, len, "stream reply");

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
