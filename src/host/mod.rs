//! Transports carry packets to the bridge.

use std::io;

use crate::packet::Packet;

mod udp;
pub use self::udp::{UdpTransport, DEFAULT_ADDRESS, DEFAULT_PORT};

/// Something that can deliver a packet to the bridge.
///
/// Delivery is fire-and-forget: `Ok` only means the datagram left.
pub trait Transport {
    /// Hand a single packet to the network.
    fn send(&mut self, packet: &Packet) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, packet: &Packet) -> io::Result<()> {
        (**self).send(packet)
    }
}
