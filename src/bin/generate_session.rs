use anyhow::{Context, Result};
use clap::Parser;
use locbridge::simulation::{SessionConfig, generate_session};
use locbridge::source::write_session;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_session")]
#[command(about = "Generate synthetic heading and location sessions for replay")]
struct Args {
    /// TOML session configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Session duration in seconds (CLI override)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Turn rate in degrees per second (CLI override)
    #[arg(long)]
    turn_rate: Option<f64>,

    /// Probability of a provider dropout per fix (CLI override)
    #[arg(long)]
    dropout: Option<f64>,
}

fn load_toml_config(path: &PathBuf) -> Result<SessionConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => load_toml_config(path)?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(duration) = args.duration {
        config.duration_secs = duration;
    }
    if let Some(turn_rate) = args.turn_rate {
        config.turn_rate_deg_per_sec = turn_rate;
    }
    if let Some(dropout) = args.dropout {
        config.dropout_probability = dropout;
    }

    let callbacks = generate_session(&config)?;
    log::info!("Generated {} callbacks", callbacks.len());

    let mut writer: Box<dyn Write> = match args.output {
        Some(ref path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    write_session(&mut writer, &callbacks)?;

    Ok(())
}
