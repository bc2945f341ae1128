//! Sends commands to the bridge.
//!
//! The bridge drops commands that arrive too quickly, so every send is
//! followed by a fixed pause. Nothing is ever read back: the bridge neither
//! acknowledges commands nor reports state.
//!
//! Commands must be issued from one logical sequence. The bridge targets
//! `rgb`, `brightness` and `*_white` at the zone most recently switched on,
//! so reordering sends changes which lights they affect. See
//! [`crate::command`] for the full list of ordering rules.

use std::io;
use std::thread;
use std::time::Duration;

use log::LevelFilter;

use crate::command::{self, CommandSpec, UnknownCommand};
use crate::config::Root;
use crate::host::{Transport, UdpTransport};
use crate::packet::Packet;

/// Minimum gap between two commands.
pub const PACING: Duration = Duration::from_millis(100);

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    UnknownCommand(#[from] UnknownCommand),
    /// Socket setup or send failed. Never retried.
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),
}

/// A client for one bridge endpoint.
pub struct Bridge<T: Transport = UdpTransport> {
    transport: T,
    /// Verbosity of this bridge's own diagnostics.
    log_level: LevelFilter,
}

impl Bridge<UdpTransport> {
    /// Open a UDP socket for the bridge at `addr:port`.
    pub fn connect(addr: &str, port: u16, log_level: LevelFilter) -> BridgeResult<Self> {
        let transport = UdpTransport::new(addr, port).map_err(BridgeError::Transport)?;
        Ok(Bridge::with_transport(transport, log_level))
    }

    pub fn from_config(config: &Root) -> BridgeResult<Self> {
        Self::connect(&config.bridge.address, config.bridge.port, config.log_level)
    }
}

impl<T: Transport> Bridge<T> {
    pub fn with_transport(transport: T, log_level: LevelFilter) -> Self {
        Bridge { transport, log_level }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// The commands this bridge understands.
    pub fn commands(&self) -> &'static [CommandSpec] {
        &command::COMMANDS
    }

    /// Send a single packet and wait out the pacing interval.
    ///
    /// The pause happens whether or not the send succeeded.
    pub fn send(&mut self, packet: &Packet) -> BridgeResult<()> {
        if log::Level::Debug <= self.log_level {
            log::debug!("Sending: {}", packet);
        }
        let result = self.transport.send(packet);
        thread::sleep(PACING);

        result.map_err(|err| {
            if log::Level::Warn <= self.log_level {
                log::warn!("Send of {} failed: {}", packet, err);
            }
            BridgeError::Transport(err)
        })
    }

    /// Look up a command by name and send it.
    ///
    /// `value` only matters for `brightness` (2..=27) and `rgb` (0..=255).
    /// It is truncated to a byte without any range check; an unknown name
    /// sends nothing.
    pub fn send_simple(&mut self, name: &str, value: u32) -> BridgeResult<()> {
        let spec = command::lookup(name)?;
        self.send(&Packet::encode(spec, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// Records every packet with the time it was handed over.
    #[derive(Default)]
    struct Recorder {
        sent: Vec<(Instant, Packet)>,
        fail: bool,
    }

    impl Transport for Recorder {
        fn send(&mut self, packet: &Packet) -> io::Result<()> {
            self.sent.push((Instant::now(), *packet));
            if self.fail {
                Err(io::Error::new(io::ErrorKind::Other, "network unreachable"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn sends_are_paced() {
        let mut bridge = Bridge::with_transport(Recorder::default(), LevelFilter::Debug);
        let started = Instant::now();
        for _ in 0..4 {
            bridge.send_simple("disco", 0).unwrap();
        }
        assert!(started.elapsed() >= PACING * 4);

        let sent = &bridge.transport().sent;
        assert_eq!(sent.len(), 4);
        for pair in sent.windows(2) {
            assert!(pair[1].0.duration_since(pair[0].0) >= PACING);
        }
        assert!(sent.iter().all(|(_, p)| p.as_bytes() == [77, 0, 85]));
    }

    #[test]
    fn send_simple_encodes_value() {
        let mut bridge = Bridge::with_transport(Recorder::default(), LevelFilter::Warn);
        bridge.send_simple("all_on", 0).unwrap();
        bridge.send_simple("rgb", 160).unwrap();
        bridge.send_simple("brightness", 27).unwrap();

        let bytes: Vec<&[u8]> = bridge.transport().sent.iter().map(|(_, p)| p.as_bytes()).collect();
        assert_eq!(bytes, vec![&[66, 0, 85][..], &[64, 160, 85][..], &[78, 27, 85][..]]);
    }

    #[test]
    fn unknown_command_sends_nothing() {
        let mut bridge = Bridge::with_transport(Recorder::default(), LevelFilter::Off);
        let started = Instant::now();
        match bridge.send_simple("unknown_command_xyz", 0) {
            Err(BridgeError::UnknownCommand(UnknownCommand(name))) => {
                assert_eq!(name, "unknown_command_xyz")
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(bridge.transport().sent.is_empty());
        assert!(started.elapsed() < PACING);
    }

    #[test]
    fn transport_failure_still_paces() {
        let recorder = Recorder { fail: true, ..Recorder::default() };
        let mut bridge = Bridge::with_transport(recorder, LevelFilter::Warn);
        let started = Instant::now();
        let err = bridge.send_simple("all_off", 0).unwrap_err();
        assert!(started.elapsed() >= PACING);
        assert!(matches!(err, BridgeError::Transport(_)));
        assert_eq!(bridge.transport().sent.len(), 1);
    }

    #[test]
    fn introspection_lists_table() {
        let bridge = Bridge::with_transport(Recorder::default(), LevelFilter::Warn);
        assert_eq!(bridge.commands().len(), 20);
        assert!(bridge.commands().iter().any(|spec| spec.name == "group2_white"));
    }
}
