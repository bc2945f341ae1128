use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use super::Transport;
use crate::packet::Packet;

/// The bridge listens on the broadcast address unless told otherwise.
pub const DEFAULT_ADDRESS: &str = "255.255.255.255";
pub const DEFAULT_PORT: u16 = 8899;

/// Sends packets to the bridge over UDP.
pub struct UdpTransport {
    /// Unconnected socket reused between calls.
    socket: UdpSocket,
    /// Resolved bridge endpoint.
    target: SocketAddr,
}

impl UdpTransport {
    /// Build a new UdpTransport set to talk to a specific bridge.
    /// (try "255.255.255.255", 8899)
    pub fn new(addr: &str, port: u16) -> io::Result<UdpTransport> {
        let target = (addr, port).to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no address for {}:{}", addr, port),
            )
        })?;

        let bind_addr = if target.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
        let socket = UdpSocket::bind(bind_addr)?;
        // The default endpoint is the broadcast address.
        socket.set_broadcast(true)?;

        Ok(UdpTransport { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, packet: &Packet) -> io::Result<()> {
        let sent = self.socket.send_to(packet.as_bytes(), self.target)?;
        if sent != packet.as_bytes().len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram: {} of {} bytes", sent, packet.as_bytes().len()),
            ));
        }
        Ok(())
    }
}
