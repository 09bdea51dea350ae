use clap::Parser;
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use goal_wallpaper::{
    init_logging, platform_backend, set_wallpaper, GoalConfig, Renderer, Settings,
};

/// Render your goals into a desktop wallpaper.
#[derive(Parser)]
#[command(name = "goal-wallpaper", version)]
struct Cli {
    /// Goals file (JSON with `title` and `goals`)
    #[arg(short, long)]
    goals: Option<PathBuf>,

    /// Where to write the PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Settings file, defaults to settings.yaml in the config directory
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Canvas width (1-16384), overrides the goals file and settings
    #[arg(long, requires = "height", value_parser = clap::value_parser!(u32).range(1..=16384))]
    width: Option<u32>,

    /// Canvas height (1-16384), overrides the goals file and settings
    #[arg(long, requires = "width", value_parser = clap::value_parser!(u32).range(1..=16384))]
    height: Option<u32>,

    /// Font file to draw text with
    #[arg(long)]
    font: Option<PathBuf>,

    /// Also set the generated image as the desktop wallpaper
    #[arg(long)]
    apply: bool,

    /// Monitor passed to hyprpaper when applying
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
    let goals_path = cli.goals.unwrap_or_else(|| settings.goals_path());
    let output = cli.output.unwrap_or_else(|| settings.output_path());

    info!("Loading goals from {}", goals_path.display());
    let mut config = GoalConfig::load(&goals_path)?;
    if let (Some(width), Some(height)) = (cli.width, cli.height) {
        config.resolution = Some((width, height));
    }

    let mut theme = settings.theme.clone();
    if let Some(font) = cli.font {
        theme.font = Some(font);
    }

    let mut renderer = Renderer::new(theme)?;
    let image = renderer.render_to_path(&config, &output)?;
    info!(
        "Wallpaper generated: {} ({}x{}, {} goal(s))",
        output.display(),
        image.width(),
        image.height(),
        image.layout.goals.len()
    );

    if cli.apply {
        if let Some(monitor) = cli.monitor {
            settings.monitor = monitor;
        }
        let backend = platform_backend(&settings)?;
        set_wallpaper(&output, backend.as_ref())?;
    }

    Ok(())
}
