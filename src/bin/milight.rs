use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use milight_rs::command;
use milight_rs::config::{self, Root};
use milight_rs::routine::{self, Routine};
use milight_rs::script::{self, ScriptCommand};
use milight_rs::Bridge;

#[derive(Debug, Parser)]
#[clap(name = "milight", about = "Send commands to a MiLight WiFi bridge")]
struct Args {
    /// YAML or JSON config file.
    #[clap(long, short)]
    config: Option<PathBuf>,

    /// Bridge address (default 255.255.255.255).
    #[clap(long, short)]
    address: Option<String>,

    /// Bridge UDP port (default 8899).
    #[clap(long, short)]
    port: Option<u16>,

    /// Log level: off, error, warn, info, debug or trace.
    #[clap(long, value_parser = parse_level)]
    log_level: Option<LevelFilter>,

    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Send commands in order, e.g. `all_on rgb:160 brightness:27`.
    Send {
        /// Send values the bulbs don't understand (they get truncated to a byte).
        #[clap(long)]
        unchecked: bool,
        #[clap(required = true)]
        commands: Vec<String>,
    },
    /// List known commands.
    List,
    /// Run a test routine: sane, simple, white_brightness, rgb_brightness, rgb or all.
    Routine { name: Routine },
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level.parse().map_err(|_| format!("unknown log level: {}", level))
}

fn load_config(args: &Args) -> Result<Root, config::ConfigError> {
    let mut root = match &args.config {
        Some(path) => config::read_config(path)?,
        None => Root::default(),
    };
    if let Some(address) = &args.address {
        root.bridge.address = address.clone();
    }
    if let Some(port) = args.port {
        root.bridge.port = port;
    }
    if let Some(level) = args.log_level {
        root.log_level = level;
    }
    Ok(root)
}

fn parse_commands(tokens: &[String], unchecked: bool) -> Result<Vec<ScriptCommand>, script::ScriptError> {
    let commands = script::parse_all(tokens)?;
    for cmd in &commands {
        match cmd.validate() {
            Err(script::ScriptError::Range(err)) if unchecked => {
                log::warn!("{}, sending anyway", err);
            }
            result => result?,
        }
    }
    Ok(commands)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let root = load_config(&args)?;

    env_logger::Builder::new()
        .filter_level(root.log_level)
        .parse_default_env()
        .init();

    match args.cmd {
        Cmd::List => {
            for spec in command::COMMANDS.iter() {
                match spec.param.range() {
                    Some(range) => {
                        println!("{:<14} {:>3}  {}..={}", spec.name, spec.opcode, range.start(), range.end())
                    }
                    None => println!("{:<14} {:>3}", spec.name, spec.opcode),
                }
            }
        }
        Cmd::Send { unchecked, commands } => {
            let commands = parse_commands(&commands, unchecked)?;
            let mut bridge = Bridge::from_config(&root)?;
            for cmd in &commands {
                log::info!("Command: {}", cmd);
                bridge.send_simple(&cmd.name, cmd.value)?;
            }
        }
        Cmd::Routine { name } => {
            let mut bridge = Bridge::from_config(&root)?;
            log::info!("Running routine {} against {}", name, bridge.transport().target());
            routine::run(&mut bridge, &name.steps())?;
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("milight: {}", err);
        process::exit(1);
    }
}
