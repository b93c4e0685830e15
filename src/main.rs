use anyhow::Context;
use clap::Parser;
use motionkit::{banner, init_logging, Config, SettingsManager, Session};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Interpret G-code one line at a time
#[derive(Parser, Debug)]
#[command(name = "motionkit")]
#[command(version)]
#[command(about = "G-code line interpreter speaking the controller's serial protocol")]
struct Args {
    /// G-code file to execute; reads stdin when omitted
    file: Option<PathBuf>,

    /// Configuration file (JSON or TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print every motion and spindle request as JSON
    #[arg(long)]
    trace: bool,

    /// Output logs in JSON format
    #[arg(long)]
    log_json: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load_from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()));
    }
    match Config::default_path() {
        Ok(path) if path.exists() => Config::load_from_file(&path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        _ => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json)?;
    info!("motionkit v{} (built {})", motionkit::VERSION, motionkit::BUILD_DATE);

    let config = load_config(args.config.as_deref())?;
    let settings = match &config.settings_file {
        Some(path) => SettingsManager::open(path, config.machine.clone(), io::stdout())
            .with_context(|| format!("opening settings file {}", path.display()))?,
        None => SettingsManager::new(config.machine.clone()),
    };
    let mut session = Session::new(&config, settings, args.trace);

    let mut out = io::stdout();
    writeln!(out, "{}", banner())?;

    match &args.file {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            session.run(BufReader::new(file), &mut out)?;
        }
        None => {
            session.run(io::stdin().lock(), &mut out)?;
        }
    }

    Ok(())
}
