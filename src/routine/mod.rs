//! Scripted walks through the bridge's features, for checking real hardware
//! by eye.
//!
//! Routines are plain lists of steps so they can be inspected before being
//! run. Each one starts from a known "sane" state: everything on, orange at
//! full brightness, then white at full brightness.

use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use crate::client::{Bridge, BridgeResult};
use crate::command::{Color, BRIGHTNESS_MAX, BRIGHTNESS_MIN};
use crate::host::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Send a command (paced like any other send).
    Send(&'static str, u32),
    /// Wait on top of the pacing interval.
    Pause(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    Sane,
    Simple,
    WhiteBrightness,
    RgbBrightness,
    Rgb,
    All,
}

impl Routine {
    pub const ALL: [Routine; 6] = [
        Routine::Sane,
        Routine::Simple,
        Routine::WhiteBrightness,
        Routine::RgbBrightness,
        Routine::Rgb,
        Routine::All,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Routine::Sane => "sane",
            Routine::Simple => "simple",
            Routine::WhiteBrightness => "white_brightness",
            Routine::RgbBrightness => "rgb_brightness",
            Routine::Rgb => "rgb",
            Routine::All => "all",
        }
    }

    pub fn steps(self) -> Vec<Step> {
        let mut steps = vec![];
        match self {
            Routine::Sane => sane(&mut steps),
            Routine::Simple => simple(&mut steps),
            Routine::WhiteBrightness => white_brightness(&mut steps),
            Routine::RgbBrightness => rgb_brightness(&mut steps),
            Routine::Rgb => rgb(&mut steps),
            Routine::All => {
                simple(&mut steps);
                white_brightness(&mut steps);
                rgb_brightness(&mut steps);
                rgb(&mut steps);
                sane(&mut steps);
            }
        }
        steps
    }
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Routine {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Routine::ALL
            .iter()
            .copied()
            .find(|routine| routine.name() == name)
            .ok_or_else(|| format!("unknown routine: {}", name))
    }
}

fn secs(secs: f32) -> Step {
    Step::Pause(Duration::from_secs_f32(secs))
}

fn sane(steps: &mut Vec<Step>) {
    steps.extend_from_slice(&[
        Step::Send("all_on", 0),
        Step::Send("rgb", Color::Orange.wheel() as u32),
        Step::Send("brightness", BRIGHTNESS_MAX),
        Step::Send("all_white", 0),
        Step::Send("brightness", BRIGHTNESS_MAX),
        secs(2.0),
    ]);
}

fn simple(steps: &mut Vec<Step>) {
    sane(steps);
    steps.extend_from_slice(&[
        Step::Send("all_off", 0),
        secs(1.0),
        Step::Send("all_on", 0),
        secs(1.0),
        Step::Send("disco", 0),
        secs(10.0),
    ]);
}

/// Brightness from min to max and back down again.
fn brightness_sweep(steps: &mut Vec<Step>) {
    steps.push(Step::Send("brightness", BRIGHTNESS_MIN));
    steps.push(secs(2.0));
    let range = BRIGHTNESS_MIN..=BRIGHTNESS_MAX;
    steps.extend(range.clone().map(|level| Step::Send("brightness", level)));
    steps.extend(range.rev().map(|level| Step::Send("brightness", level)));
    steps.push(secs(2.0));
}

fn white_brightness(steps: &mut Vec<Step>) {
    sane(steps);
    brightness_sweep(steps);
}

fn rgb_brightness(steps: &mut Vec<Step>) {
    sane(steps);
    steps.push(Step::Send("rgb", Color::Orange.wheel() as u32));
    brightness_sweep(steps);
}

fn rgb(steps: &mut Vec<Step>) {
    sane(steps);
    steps.push(Step::Send("all_on", 0));
    steps.push(Step::Send("rgb", 0));
    steps.push(secs(2.0));
    for position in 0..=255 {
        steps.push(Step::Send("rgb", position));
        steps.push(secs(0.5));
    }
    steps.push(secs(2.0));
}

/// Run steps against a bridge, stopping at the first failed send.
pub fn run<T: Transport>(bridge: &mut Bridge<T>, steps: &[Step]) -> BridgeResult<()> {
    run_with(bridge, steps, thread::sleep)
}

/// Like [`run`], with pauses handed to `pause` instead of sleeping.
pub fn run_with<T, F>(bridge: &mut Bridge<T>, steps: &[Step], mut pause: F) -> BridgeResult<()>
where
    T: Transport,
    F: FnMut(Duration),
{
    for step in steps {
        match *step {
            Step::Send(name, value) => {
                log::info!("Command: {}:{}", name, value);
                bridge.send_simple(name, value)?;
            }
            Step::Pause(duration) => pause(duration),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;
    use crate::packet::Packet;
    use log::LevelFilter;
    use std::io;

    fn sends(steps: &[Step]) -> Vec<(&'static str, u32)> {
        steps
            .iter()
            .filter_map(|step| match *step {
                Step::Send(name, value) => Some((name, value)),
                Step::Pause(_) => None,
            })
            .collect()
    }

    #[test]
    fn sane_state() {
        assert_eq!(
            sends(&Routine::Sane.steps()),
            vec![
                ("all_on", 0),
                ("rgb", 160),
                ("brightness", 27),
                ("all_white", 0),
                ("brightness", 27)
            ]
        );
    }

    #[test]
    fn sweeps_go_up_then_down() {
        let white = sends(&Routine::WhiteBrightness.steps());
        // sane, min, then 26 levels up and 26 down
        assert_eq!(white.len(), 5 + 1 + 26 * 2);
        assert_eq!(white[5], ("brightness", 2));
        assert_eq!(white[6], ("brightness", 2));
        assert_eq!(white[31], ("brightness", 27));
        assert_eq!(white[32], ("brightness", 27));
        assert_eq!(white.last(), Some(&("brightness", 2)));

        let rgb = sends(&Routine::RgbBrightness.steps());
        assert_eq!(rgb[5], ("rgb", 160));
        assert_eq!(rgb.len(), white.len() + 1);
    }

    #[test]
    fn rgb_walks_the_whole_wheel() {
        let rgb = sends(&Routine::Rgb.steps());
        let positions: Vec<u32> = rgb[7..].iter().map(|&(_, value)| value).collect();
        assert_eq!(positions, (0..=255).collect::<Vec<u32>>());
    }

    #[test]
    fn every_step_is_valid() {
        for routine in Routine::ALL.iter() {
            for (name, value) in sends(&routine.steps()) {
                let spec = command::lookup(name).unwrap();
                assert!(command::check_range(spec, value).is_ok(), "{} {}", name, value);
            }
        }
    }

    #[test]
    fn all_ends_sane() {
        let all = Routine::All.steps();
        let tail = &all[all.len() - 6..];
        assert_eq!(tail, &Routine::Sane.steps()[..]);
    }

    #[test]
    fn names_parse() {
        for routine in Routine::ALL.iter() {
            assert_eq!(routine.name().parse::<Routine>(), Ok(*routine));
        }
        assert!("party".parse::<Routine>().is_err());
    }

    #[derive(Default)]
    struct Sink(Vec<Packet>);

    impl Transport for Sink {
        fn send(&mut self, packet: &Packet) -> io::Result<()> {
            self.0.push(*packet);
            Ok(())
        }
    }

    #[test]
    fn run_sends_in_order_and_pauses() {
        let mut bridge = Bridge::with_transport(Sink::default(), LevelFilter::Off);
        let mut paused = vec![];
        run_with(&mut bridge, &Routine::Sane.steps(), |d| paused.push(d)).unwrap();

        let bytes: Vec<u8> = bridge.transport().0.iter().map(|p| p.opcode()).collect();
        assert_eq!(bytes, vec![66, 64, 78, 194, 78]);
        assert_eq!(paused, vec![Duration::from_secs(2)]);
    }
}
