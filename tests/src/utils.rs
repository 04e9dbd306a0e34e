use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use reflector_common::config::Config;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};

/// TEST-NET-1, never routed.
pub const UNREACHABLE_HOST: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

pub fn fast_config() -> Config {
    Config {
        probe_timeout: Duration::from_millis(50),
        retry_count: 4,
        retry_delay: Duration::ZERO,
    }
}

/// UDP reflector on localhost that stays silent for the first `ignore`
/// datagrams and echoes everything after that.
pub async fn spawn_udp_reflector(ignore: usize) -> anyhow::Result<u16> {
    let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port: u16 = socket.local_addr()?.port();

    tokio::spawn(async move {
        let mut seen: usize = 0;
        let mut buf = [0u8; 64];
        while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
            seen += 1;
            if seen > ignore {
                let _ = socket.send_to(&buf[..len], peer).await;
            }
        }
    });

    Ok(port)
}

/// TCP reflector on localhost echoing the first read of every connection.
pub async fn spawn_tcp_reflector() -> anyhow::Result<u16> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port: u16 = listener.local_addr()?.port();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 64];
            if let Ok(len) = stream.read(&mut buf).await {
                let _ = stream.write_all(&buf[..len]).await;
            }
        }
    });

    Ok(port)
}

/// A localhost TCP port with nothing listening on it.
pub async fn closed_tcp_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    drop(listener);
    Ok(addr.port())
}
