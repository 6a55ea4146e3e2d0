use std::path::PathBuf;
use std::thread;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{Receiver, bounded};

use locbridge::config::{AccuracyPolicy, BridgeConfig, SensorDelay};
use locbridge::events::{BridgeEvent, WriterSink};
use locbridge::location::Provider;
use locbridge::output::{OutputFormat, create_formatter};
use locbridge::platform::RecordingHost;
use locbridge::source::{CallbackSource, ReplaySource};
use locbridge::{HostCallback, LocationModule};

#[derive(Parser, Debug)]
#[command(name = "locbridge")]
#[command(about = "Run heading and location callbacks through the bridge filters", long_about = None)]
struct Args {
    /// Recorded session (JSON lines, one host callback per line)
    #[arg(required_unless_present = "simulate")]
    session: Option<PathBuf>,

    /// Generate a synthetic session instead of replaying one
    #[arg(long)]
    simulate: bool,

    /// Seed for the synthetic session
    #[arg(long)]
    seed: Option<u64>,

    /// Length of the synthetic session in seconds
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum azimuth change in degrees before a heading is emitted
    #[arg(long)]
    heading_filter: Option<f64>,

    /// Accuracy threshold in meters for location updates
    #[arg(long)]
    desired_accuracy: Option<f64>,

    /// Minimum distance in meters requested from the provider
    #[arg(long)]
    distance_filter: Option<f64>,

    /// Heading sensor rate: fastest, game, ui, normal or "<n>us"
    #[arg(long)]
    sensor_delay: Option<SensorDelay>,

    /// Accuracy filter polarity
    #[arg(long, value_enum)]
    accuracy_policy: Option<AccuracyPolicy>,

    /// Do not start heading updates
    #[arg(long)]
    no_heading: bool,

    /// Do not start location updates
    #[arg(long)]
    no_location: bool,

    /// Report the GPS provider as disabled so the network provider is used
    #[arg(long)]
    gps_disabled: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    let source = open_source(&args)?;

    let host = RecordingHost::new().with_provider(Provider::Gps, !args.gps_disabled);
    let sink = WriterSink::new(
        Box::new(std::io::stdout()),
        create_formatter(args.format, args.verbose > 0),
    )?;
    let mut module = LocationModule::new(host, Box::new(sink), config);

    module.request_when_in_use_authorization();
    if !args.no_heading {
        module.start_updating_heading()?;
    }
    if !args.no_location {
        module.start_updating_location()?;
    }

    let (tx, rx) = bounded(64);
    let producer = thread::spawn(move || -> anyhow::Result<()> {
        let mut source = source;
        while let Some(callback) = source.next_callback()? {
            if tx.send(callback).is_err() {
                break;
            }
        }
        Ok(())
    });

    run_dispatch_loop(&mut module, rx);

    module.shutdown();
    producer
        .join()
        .map_err(|_| anyhow::anyhow!("Callback source thread panicked"))??;

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<BridgeConfig> {
    let mut config = match &args.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };

    if let Some(degrees) = args.heading_filter {
        config.heading_filter = degrees;
    }
    if let Some(meters) = args.desired_accuracy {
        config.desired_accuracy = meters;
    }
    if let Some(meters) = args.distance_filter {
        config.distance_filter = meters;
    }
    if let Some(delay) = args.sensor_delay {
        config.sensor_delay = delay;
    }
    if let Some(policy) = args.accuracy_policy {
        config.accuracy_policy = policy;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(feature = "simulation")]
fn open_source(args: &Args) -> anyhow::Result<Box<dyn CallbackSource>> {
    use locbridge::simulation::{SessionConfig, SimulatedSource};

    if args.simulate {
        let mut session = SessionConfig::default().with_duration(args.duration);
        session.seed = args.seed;
        return Ok(Box::new(SimulatedSource::new(&session)?));
    }
    open_replay(args)
}

#[cfg(not(feature = "simulation"))]
fn open_source(args: &Args) -> anyhow::Result<Box<dyn CallbackSource>> {
    if args.simulate {
        anyhow::bail!("--simulate requires the `simulation` feature");
    }
    open_replay(args)
}

fn open_replay(args: &Args) -> anyhow::Result<Box<dyn CallbackSource>> {
    let path = args
        .session
        .as_ref()
        .context("A session file is required")?;
    Ok(Box::new(ReplaySource::open(path)?))
}

fn run_dispatch_loop(module: &mut LocationModule<RecordingHost>, rx: Receiver<HostCallback>) {
    let mut callbacks = 0usize;
    let mut headings = 0usize;
    let mut locations = 0usize;

    for callback in rx {
        callbacks += 1;
        match module.dispatch(callback) {
            Some(BridgeEvent::HeadingUpdated(_)) => headings += 1,
            Some(BridgeEvent::LocationUpdated(_)) => locations += 1,
            None => {}
        }
    }

    log::info!(
        "Processed {} callbacks: {} heading updates, {} location updates",
        callbacks,
        headings,
        locations
    );
}
