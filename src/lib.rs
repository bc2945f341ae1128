//! Control client for MiLight/Easybulb/LimitlessLED RGBW bulbs via their
//! WiFi bridge.
//!
//! Communication with the bridge is one way. Commands are three byte UDP
//! datagrams; nothing is ever acknowledged and no state can be read back.

pub mod client;
pub mod command;
pub mod config;
pub mod host;
pub mod packet;
pub mod routine;
pub mod script;

pub use client::{Bridge, BridgeError, BridgeResult, PACING};
pub use packet::{build, Packet};
