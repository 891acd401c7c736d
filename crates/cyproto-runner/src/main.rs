//! `cyproto` - drive a cybot over the command/response protocol.
//!
//! `cyproto serve` runs a mock executor with randomized hardware;
//! `drive`, `turn` and `scan` send a single command to an executor and print
//! the result.

use std::num::NonZeroU16;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use cyproto_core::{DriveCommand, ScanCommand, TurnCommand};
use cyproto_runner::{HostSession, MockServer, RunnerConfig, RunnerResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cyproto", version, about = "Cybot protocol host and mock executor")]
struct Cli {
    /// YAML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Run a mock executor that answers with randomized results.
    Serve(ServeArgs),

    /// Drive forwards (positive distance) or backwards (negative distance).
    Drive {
        /// Distance in centimetres.
        #[arg(allow_negative_numbers = true)]
        distance: f32,
        #[arg(long, default_value = "200")]
        speed: NonZeroU16,
        #[command(flatten)]
        target: Target,
    },

    /// Turn counter-clockwise (positive angle) or clockwise (negative angle).
    Turn {
        /// Angle in degrees.
        #[arg(allow_negative_numbers = true)]
        angle: f32,
        #[arg(long, default_value = "100")]
        speed: NonZeroU16,
        #[command(flatten)]
        target: Target,
    },

    /// Scan the field for objects.
    Scan {
        #[arg(long, default_value_t = 0)]
        start: u8,
        #[arg(long, default_value_t = 180)]
        end: u8,
        /// Degrees between samples.
        #[arg(long, default_value_t = 2)]
        fidelity: u8,
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on.
    #[arg(long)]
    listen: Option<String>,
    /// RNG seed for reproducible results.
    #[arg(long)]
    seed: Option<u64>,
    /// Probability that a drive or turn stops short.
    #[arg(long)]
    failure_rate: Option<f64>,
    /// Simulated action duration in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[derive(Args, Debug)]
struct Target {
    /// Executor address.
    #[arg(long)]
    connect: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> RunnerResult<()> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            RunnerConfig::load(path)?
        }
        None => RunnerConfig::default(),
    };

    match cli.command {
        CliCommand::Serve(args) => {
            if let Some(listen) = args.listen {
                config.listen = listen;
            }
            if args.seed.is_some() {
                config.seed = args.seed;
            }
            if let Some(rate) = args.failure_rate {
                config.failure_rate = rate;
            }
            if let Some(delay) = args.delay_ms {
                config.response_delay_ms = delay;
            }
            MockServer::bind(&config)?.serve_forever()
        }

        CliCommand::Drive { distance, speed, target } => {
            let mut session = connect(&mut config, target)?;
            let result = session.drive(DriveCommand {
                distance,
                speed: speed.get(),
            })?;
            println!("Drove: {:.2}cm", result.total_distance);
            if result.bump_detected {
                println!("Bump detected");
            }
            if result.cliff_detected {
                println!("Cliff detected");
            }
            Ok(())
        }

        CliCommand::Turn { angle, speed, target } => {
            let mut session = connect(&mut config, target)?;
            let result = session.turn(TurnCommand {
                angle,
                speed: speed.get(),
            })?;
            println!("Turned: {:.2}°", result.total_angle);
            Ok(())
        }

        CliCommand::Scan { start, end, fidelity, target } => {
            let mut session = connect(&mut config, target)?;
            let result = session.scan(ScanCommand {
                start_angle: start,
                end_angle: end,
                fidelity,
            })?;
            println!("Scanned: {} objects", result.len());
            for object in &result {
                println!(
                    "  {:>3}°  {:6.2}cm away  {:5.2}cm wide",
                    object.angle, object.distance, object.width
                );
            }
            Ok(())
        }
    }
}

fn connect(config: &mut RunnerConfig, target: Target) -> RunnerResult<HostSession> {
    if let Some(addr) = target.connect {
        config.connect = addr;
    }
    info!("connecting to {}", config.connect);
    HostSession::connect(config.connect.as_str())
}
