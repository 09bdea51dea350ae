//! Linux backend: detects the desktop environment and drives its own
//! wallpaper tooling (gsettings, plasma, xfconf, hyprpaper, sway, feh...).

use log::{debug, error, warn};
use std::env;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use super::{SetWallpaperError, WallpaperBackend};

const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Must exit successfully within the timeout.
    Run(Vec<String>),
    /// Failure is ignored.
    Try(Vec<String>),
    /// Long-running daemon started in the background.
    Spawn(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub name: &'static str,
    pub steps: Vec<Step>,
}

impl Strategy {
    fn run(name: &'static str, argv: Vec<String>) -> Self {
        Strategy {
            name,
            steps: vec![Step::Run(argv)],
        }
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

/// Strategies to try, in order, for the given `XDG_CURRENT_DESKTOP` and
/// `XDG_SESSION_TYPE` values.
pub fn plan(desktop: &str, session: &str, image: &Path, monitor: &str) -> Vec<Strategy> {
    let desktop = desktop.to_lowercase();
    let session = session.to_lowercase();
    let path = image.display().to_string();
    let uri = format!("file://{}", path);

    if desktop.contains("gnome") || desktop.contains("unity") {
        return vec![Strategy {
            name: "gsettings",
            steps: vec![
                Step::Run(argv(&[
                    "gsettings",
                    "set",
                    "org.gnome.desktop.background",
                    "picture-uri",
                    &uri,
                ])),
                Step::Run(argv(&[
                    "gsettings",
                    "set",
                    "org.gnome.desktop.background",
                    "picture-uri-dark",
                    &uri,
                ])),
            ],
        }];
    }

    if desktop.contains("kde") || desktop.contains("plasma") {
        return vec![Strategy::run(
            "plasma-apply-wallpaperimage",
            argv(&["plasma-apply-wallpaperimage", &path]),
        )];
    }

    if desktop.contains("xfce") {
        return vec![Strategy::run(
            "xfconf-query",
            argv(&[
                "xfconf-query",
                "-c",
                "xfce4-desktop",
                "-p",
                "/backdrop/screen0/monitor0/workspace0/last-image",
                "-s",
                &path,
            ]),
        )];
    }

    let swaybg = Strategy {
        name: "swaybg",
        steps: vec![
            Step::Try(argv(&["pkill", "swaybg"])),
            Step::Spawn(argv(&["swaybg", "-i", &path, "-m", "fill"])),
        ],
    };

    if desktop.contains("hyprland") {
        let target = format!("{},{}", monitor, path);
        return vec![
            Strategy {
                name: "hyprpaper",
                steps: vec![
                    Step::Run(argv(&["hyprctl", "hyprpaper", "preload", &path])),
                    Step::Run(argv(&["hyprctl", "hyprpaper", "wallpaper", &target])),
                ],
            },
            swaybg,
        ];
    }

    if desktop.contains("sway") {
        let output = format!("output * bg {} fill", path);
        return vec![Strategy::run("swaymsg", argv(&["swaymsg", &output])), swaybg];
    }

    if session == "wayland" {
        return vec![swaybg];
    }

    vec![
        Strategy::run("feh", argv(&["feh", "--bg-fill", &path])),
        Strategy::run("nitrogen", argv(&["nitrogen", "--set-zoom-fill", &path])),
    ]
}

pub struct DesktopCommands {
    desktop: String,
    session: String,
    monitor: String,
}

impl DesktopCommands {
    pub fn new(desktop: String, session: String, monitor: String) -> Self {
        DesktopCommands {
            desktop,
            session,
            monitor,
        }
    }

    pub fn from_env(monitor: String) -> Self {
        let desktop = env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
        let session = env::var("XDG_SESSION_TYPE").unwrap_or_default();
        debug!("Desktop: {:?}, session: {:?}", desktop, session);
        Self::new(desktop, session, monitor)
    }
}

impl WallpaperBackend for DesktopCommands {
    fn name(&self) -> &str {
        "desktop commands"
    }

    fn apply(&self, image: &Path) -> Result<(), SetWallpaperError> {
        let strategies = plan(&self.desktop, &self.session, image, &self.monitor);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| SetWallpaperError::Rejected {
                backend: self.name().to_string(),
                reason: format!("cannot start command runtime: {}", err),
            })?;

        runtime.block_on(async {
            for strategy in &strategies {
                match run_strategy(strategy).await {
                    Ok(()) => {
                        debug!("Wallpaper set using {}", strategy.name);
                        return Ok(());
                    }
                    Err(reason) => warn!("{} failed: {}", strategy.name, reason),
                }
            }

            error!(
                "Could not set the wallpaper, set {} manually",
                image.display()
            );
            Err(SetWallpaperError::NoStrategySucceeded {
                desktop: if self.desktop.is_empty() {
                    "unknown".to_string()
                } else {
                    self.desktop.clone()
                },
            })
        })
    }
}

async fn run_strategy(strategy: &Strategy) -> Result<(), String> {
    for step in &strategy.steps {
        match step {
            Step::Run(argv) => run_command(argv).await?,
            Step::Try(argv) => {
                if let Err(reason) = run_command(argv).await {
                    debug!("Ignoring: {}", reason);
                }
            }
            Step::Spawn(argv) => spawn_command(argv)?,
        }
    }
    Ok(())
}

async fn run_command(argv: &[String]) -> Result<(), String> {
    let (program, args) = argv.split_first().ok_or("empty command")?;
    debug!("Command: {}", argv.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match timeout(COMMAND_TIMEOUT, output).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => return Err(format!("error executing {}: {}", program, err)),
        Err(_) => return Err(format!("{} timed out", program)),
    };

    debug!("Command output: {:?}", output);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} exited with {}: {}", program, output.status, stderr.trim()));
    }

    // hyprctl reports hyprpaper failures on stdout with a zero exit code.
    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.contains("failed") {
        return Err(format!("{}: {}", program, stdout.trim()));
    }

    Ok(())
}

fn spawn_command(argv: &[String]) -> Result<(), String> {
    let (program, args) = argv.split_first().ok_or("empty command")?;
    debug!("Spawning: {}", argv.join(" "));

    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_child| ())
        .map_err(|err| format!("error spawning {}: {}", program, err))
}
