//! Bridge packet format.
//!
//! Every command is three bytes in network order: opcode, value, and a fixed
//! 0x55 terminator.

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::command::{self, CommandSpec, UnknownCommand};

pub const PACKET_LEN: usize = 3;
/// All commands to the bridge end with this byte.
pub const TERMINATOR: u8 = 0x55;

/// A single encoded command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet([u8; PACKET_LEN]);

pub type PacketResult<T> = Result<T, PacketError>;

#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    #[error("expected 3 bytes, got {0}")]
    Length(usize),
    #[error("bad terminator byte {0:#04x}")]
    Terminator(u8),
    #[error("unknown opcode {0}")]
    UnknownOpcode(u8),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Packet {
    /// Encode a table entry. Values wider than a byte are truncated.
    pub fn encode(spec: &CommandSpec, value: u32) -> Packet {
        let mut buf = [0u8; PACKET_LEN];
        // A three byte slice always has room for three bytes.
        let _ = Self::write_fields(&mut &mut buf[..], spec.opcode, value as u8);
        Packet(buf)
    }

    fn write_fields(out: &mut dyn Write, opcode: u8, value: u8) -> io::Result<()> {
        out.write_u8(opcode)?;
        out.write_u8(value)?;
        out.write_u8(TERMINATOR)
    }

    /// Read a packet back from raw datagram bytes.
    pub fn parse(bytes: &[u8]) -> PacketResult<Packet> {
        if bytes.len() != PACKET_LEN {
            return Err(PacketError::Length(bytes.len()));
        }
        let mut reader = io::Cursor::new(bytes);
        Self::read_from(&mut reader)
    }

    fn read_from(buf: &mut dyn Read) -> PacketResult<Packet> {
        let opcode = buf.read_u8()?;
        let value = buf.read_u8()?;
        match buf.read_u8()? {
            TERMINATOR => Ok(Packet([opcode, value, TERMINATOR])),
            other => Err(PacketError::Terminator(other)),
        }
    }

    pub fn opcode(&self) -> u8 {
        self.0[0]
    }

    pub fn value(&self) -> u8 {
        self.0[1]
    }

    pub fn terminator(&self) -> u8 {
        self.0[2]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The table entry this packet was built from.
    pub fn command(&self) -> PacketResult<&'static CommandSpec> {
        command::by_opcode(self.opcode()).ok_or(PacketError::UnknownOpcode(self.opcode()))
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(&self.0)
    }
}

/// Colon-joined hex, e.g. `42:0:55` for `all_on`.
impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}:{:x}:{:x}", self.0[0], self.0[1], self.0[2])
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Build the packet for a named command.
///
/// This is a pure function. `value` is truncated to its low byte, so range
/// checking is up to the caller (see [`command::check_range`]).
pub fn build(name: &str, value: u32) -> Result<Packet, UnknownCommand> {
    let spec = command::lookup(name)?;
    Ok(Packet::encode(spec, value))
}
