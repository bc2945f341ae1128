//! Parser for command-line style command tokens.
//!
//! A token is a command name, optionally followed by a colon and a value:
//! `all_on`, `brightness:10`, `rgb:160` or `rgb:orange`.

use std::fmt;
use std::str::FromStr;

use crate::command::{self, Color, RangeError, UnknownCommand};

/// One parsed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCommand {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("empty command")]
    Empty,
    #[error("bad value {value:?} for {name}")]
    BadValue { name: String, value: String },
    #[error(transparent)]
    UnknownCommand(#[from] UnknownCommand),
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl ScriptCommand {
    /// Check the name against the table and the value against its range.
    pub fn validate(&self) -> Result<(), ScriptError> {
        let spec = command::lookup(&self.name)?;
        command::check_range(spec, self.value)?;
        Ok(())
    }
}

impl FromStr for ScriptCommand {
    type Err = ScriptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut bits = token.trim().splitn(2, ':');
        let name = match bits.next() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => return Err(ScriptError::Empty),
        };

        let value = match bits.next() {
            None => 0,
            Some(raw) => parse_value(raw).ok_or_else(|| ScriptError::BadValue {
                name: name.clone(),
                value: raw.to_owned(),
            })?,
        };

        Ok(ScriptCommand { name, value })
    }
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match command::lookup(&self.name) {
            Ok(spec) if !spec.is_parameterized() && self.value == 0 => f.write_str(&self.name),
            _ => write!(f, "{}:{}", self.name, self.value),
        }
    }
}

/// Numbers, or a colour name for convenience.
fn parse_value(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.parse::<u32>()
        .ok()
        .or_else(|| Color::from_name(raw).map(|color| color.wheel() as u32))
}

/// Parse a whole list of tokens, stopping at the first bad one.
pub fn parse_all<I, S>(tokens: I) -> Result<Vec<ScriptCommand>, ScriptError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|token| token.as_ref().parse()).collect()
}
