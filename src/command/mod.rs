//! The bridge's command table.
//!
//! Commands are named the way the bridge documentation names them and map to
//! a single opcode byte. Only `brightness` and `rgb` carry a value byte.
//!
//! The bridge has no zone field in its parameterized commands. Callers must
//! observe the following when driving real hardware:
//!
//! * Send the zone's `*_on` command before `rgb`, `brightness` or `*_white`.
//!   The bridge targets whichever zone was activated last
//!   (e.g. send `all_on` before `all_white`).
//! * Brightness is remembered by the bulbs separately for white and colour
//!   modes.
//! * Every `disco` steps once through the preset patterns. There is no way
//!   to pick a pattern or read the current one.
//! * A `groupN_on` sent within 2-3 seconds of powering a bulb binds that
//!   bulb to the group.

use std::fmt;
use std::ops::RangeInclusive;

pub const BRIGHTNESS_MIN: u32 = 2;
pub const BRIGHTNESS_MAX: u32 = 27;

/// Valid positions on the bridge's colour wheel.
pub const RGB_RANGE: RangeInclusive<u32> = 0..=255;

/// What follows the opcode on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// The value byte is always zero.
    None,
    /// Brightness step, 2..=27.
    Brightness,
    /// Colour wheel position, 0..=255.
    Color,
}

impl Param {
    /// The range the device understands, if the command takes a value.
    pub fn range(self) -> Option<RangeInclusive<u32>> {
        match self {
            Param::None => None,
            Param::Brightness => Some(BRIGHTNESS_MIN..=BRIGHTNESS_MAX),
            Param::Color => Some(RGB_RANGE),
        }
    }
}

/// A single row of the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub opcode: u8,
    pub param: Param,
}

impl CommandSpec {
    pub fn is_parameterized(&self) -> bool {
        self.param != Param::None
    }
}

const fn simple(name: &'static str, opcode: u8) -> CommandSpec {
    CommandSpec { name, opcode, param: Param::None }
}

/// Every command the bridge accepts.
pub static COMMANDS: [CommandSpec; 20] = [
    simple("all_off", 65),
    simple("all_on", 66),
    simple("disco_slower", 67),
    simple("disco_faster", 68),
    simple("group1_on", 69),
    simple("group1_off", 70),
    simple("group2_on", 71),
    simple("group2_off", 72),
    simple("group3_on", 73),
    simple("group3_off", 74),
    simple("group4_on", 75),
    simple("group4_off", 76),
    simple("disco", 77),
    simple("all_white", 194),
    simple("group1_white", 197),
    simple("group2_white", 199),
    simple("group3_white", 201),
    simple("group4_white", 203),
    CommandSpec { name: "brightness", opcode: 78, param: Param::Brightness },
    CommandSpec { name: "rgb", opcode: 64, param: Param::Color },
];

/// The requested command name is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

/// A value the device would not understand for this command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("{name} does not take a value (got {value})")]
    Unexpected { name: &'static str, value: u32 },
    #[error("{name} value {value} is outside {min}..={max}")]
    OutOfRange { name: &'static str, value: u32, min: u32, max: u32 },
}

/// Look up a command by name.
pub fn lookup(name: &str) -> Result<&'static CommandSpec, UnknownCommand> {
    COMMANDS
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| UnknownCommand(name.to_owned()))
}

/// Reverse lookup. Opcodes are unique across the table.
pub fn by_opcode(opcode: u8) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.opcode == opcode)
}

/// All command names, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|spec| spec.name)
}

/// Check a value against what the device accepts for `spec`.
///
/// The packet builder never calls this; values are truncated on the wire.
/// Note that 256 is rejected for `rgb` even though the vendor docs mention it.
pub fn check_range(spec: &CommandSpec, value: u32) -> Result<(), RangeError> {
    match spec.param.range() {
        None if value != 0 => Err(RangeError::Unexpected { name: spec.name, value }),
        None => Ok(()),
        Some(range) if range.contains(&value) => Ok(()),
        Some(range) => Err(RangeError::OutOfRange {
            name: spec.name,
            value,
            min: *range.start(),
            max: *range.end(),
        }),
    }
}

/// Named markers on the colour wheel, as listed in the bridge docs.
/// Every position in between is usable too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Violet,
    RoyalBlue,
    BabyBlue,
    Aqua,
    MintGreen,
    SeafoamGreen,
    Green,
    LimeGreen,
    Yellow,
    YellowyOrange,
    Orange,
    Red,
    Pink,
    Fuchsia,
    Lilac,
    Lavender,
}

impl Color {
    pub const ALL: [Color; 16] = [
        Color::Violet,
        Color::RoyalBlue,
        Color::BabyBlue,
        Color::Aqua,
        Color::MintGreen,
        Color::SeafoamGreen,
        Color::Green,
        Color::LimeGreen,
        Color::Yellow,
        Color::YellowyOrange,
        Color::Orange,
        Color::Red,
        Color::Pink,
        Color::Fuchsia,
        Color::Lilac,
        Color::Lavender,
    ];

    /// Wheel position for the `rgb` command.
    pub fn wheel(self) -> u8 {
        match self {
            Color::Violet => 0,
            Color::RoyalBlue => 16,
            Color::BabyBlue => 32,
            Color::Aqua => 48,
            Color::MintGreen => 64,
            Color::SeafoamGreen => 80,
            Color::Green => 96,
            Color::LimeGreen => 112,
            Color::Yellow => 128,
            Color::YellowyOrange => 144,
            Color::Orange => 160,
            Color::Red => 176,
            Color::Pink => 194,
            Color::Fuchsia => 210,
            Color::Lilac => 226,
            Color::Lavender => 240,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Violet => "violet",
            Color::RoyalBlue => "royal_blue",
            Color::BabyBlue => "baby_blue",
            Color::Aqua => "aqua",
            Color::MintGreen => "mint_green",
            Color::SeafoamGreen => "seafoam_green",
            Color::Green => "green",
            Color::LimeGreen => "lime_green",
            Color::Yellow => "yellow",
            Color::YellowyOrange => "yellowy_orange",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Pink => "pink",
            Color::Fuchsia => "fuchsia",
            Color::Lilac => "lilac",
            Color::Lavender => "lavender",
        }
    }

    pub fn from_name(name: &str) -> Option<Color> {
        Color::ALL.iter().copied().find(|color| color.name() == name)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
