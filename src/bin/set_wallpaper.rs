use clap::Parser;
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use goal_wallpaper::{init_logging, platform_backend, set_wallpaper, Settings};

/// Set an existing image as the desktop wallpaper.
#[derive(Parser)]
#[command(name = "set-wallpaper", version)]
struct Cli {
    /// Image to apply
    path: PathBuf,

    /// Settings file, defaults to settings.yaml in the config directory
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Monitor passed to hyprpaper
    #[arg(long)]
    monitor: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = Settings::load(cli.settings.as_deref());
    init_logging(cli.verbose || settings.as_ref().is_ok_and(Settings::debug_enabled));

    let result = match settings {
        Ok(settings) => run(cli, settings),
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mut settings: Settings) -> Result<(), Box<dyn Error>> {
    if let Some(monitor) = cli.monitor {
        settings.monitor = monitor;
    }

    let backend = platform_backend(&settings)?;
    set_wallpaper(&cli.path, backend.as_ref())?;
    Ok(())
}
