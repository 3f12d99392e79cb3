use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use orbit_trace::animator::{FrameDriver, SharedStage, Stage};
use orbit_trace::config::Config;
use orbit_trace::runtime::{block_on_with_grace, SHUTDOWN_GRACE};
use orbit_trace::scene::{SceneGraph, ScenePosition};
use orbit_trace::telemetry::HttpFetcher;
use orbit_trace::tracker::{poll_once, Poller, TargetStore};
use orbit_trace::web::{self, AppState};

#[derive(Parser)]
#[command(name = "orbit-trace")]
#[command(about = "Live ISS position tracker with an animated scene")]
struct Cli {
    /// YAML config file; defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll once and print the fix with its scene positions
    Fetch,
    /// Run the poller and frame loop, logging the scene periodically
    Watch {
        #[arg(long, default_value = "5s", value_parser = parse_report_interval)]
        report_every: Duration,
    },
    /// Run the poller and frame loop behind the JSON API
    Serve {
        /// Overrides web.bind from the config
        #[arg(long)]
        bind: Option<String>,
    },
    /// Validate a config file
    Validate { path: PathBuf },
}

fn parse_report_interval(s: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    if interval.is_zero() {
        return Err("report interval must be greater than zero".into());
    }
    Ok(interval)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Validate { path } => return validate(&path),
        command => command,
    };

    match block_on_with_grace(run(cli.config, command), SHUTDOWN_GRACE) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config_path: Option<PathBuf>, command: Commands) -> ExitCode {
    let config = match Config::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match command {
        Commands::Fetch => fetch(&config).await,
        Commands::Watch { report_every } => watch(&config, report_every).await,
        Commands::Serve { bind } => serve(&config, bind).await,
        Commands::Validate { path } => validate(&path),
    }
}

fn validate(path: &Path) -> ExitCode {
    match Config::from_file(path) {
        Ok(config) => {
            println!("Config is valid");
            println!("  endpoint: {}", config.telemetry.endpoint);
            println!(
                "  interval: {}",
                humantime::format_duration(config.telemetry.interval)
            );
            println!(
                "  radii:    orbit {} / camera {}",
                config.scene.orbit_radius, config.scene.camera_radius
            );
            println!("  trail:    {} markers", config.scene.trail_capacity);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn fetcher(config: &Config) -> HttpFetcher {
    HttpFetcher::new(config.telemetry.endpoint.clone(), config.telemetry.timeout)
}

fn store(config: &Config) -> TargetStore {
    TargetStore::new(
        config.scene.mapper(),
        config.scene.initial_targets(),
        config.scene.trail_capacity,
    )
}

fn stage(config: &Config) -> SharedStage {
    let scene = SceneGraph::new(
        config
            .scene
            .model
            .then(|| ScenePosition::from(config.scene.initial_object)),
        ScenePosition::from(config.scene.initial_camera),
    );
    Stage::new(config.animation.clone(), scene).shared()
}

async fn fetch(config: &Config) -> ExitCode {
    let fetcher = Arc::new(fetcher(config));
    let store = store(config);

    match poll_once(&fetcher, &store).await {
        Ok(targets) => match serde_json::to_string_pretty(targets.as_ref()) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error encoding fix: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Fetch failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

struct Running {
    poller: Poller<HttpFetcher>,
    driver: FrameDriver,
}

impl Running {
    fn start(config: &Config, store: &TargetStore, stage: &SharedStage) -> Option<Self> {
        let fetcher = fetcher(config);
        log::info!("Polling {}", fetcher.endpoint());
        let mut poller = Poller::new(fetcher, store.clone(), config.telemetry.interval);
        if let Err(e) = poller.start() {
            eprintln!("Error starting poller: {}", e);
            return None;
        }
        let mut driver = FrameDriver::new(stage.clone(), store.clone(), config.scene.fps);
        driver.start();
        Some(Self { poller, driver })
    }

    async fn stop(mut self) {
        self.poller.stop().await;
        self.driver.stop().await;
    }
}

async fn watch(config: &Config, report_every: Duration) -> ExitCode {
    let store = store(config);
    let stage = stage(config);
    let mut fixes = store.subscribe();
    let Some(running) = Running::start(config, &store, &stage) else {
        return ExitCode::FAILURE;
    };

    let mut report = tokio::time::interval(report_every);
    loop {
        tokio::select! {
            _ = report.tick() => log_scene(&store, &stage),
            Ok(()) = fixes.changed() => {
                if let Some(sample) = &fixes.borrow_and_update().sample {
                    log::info!(
                        "New fix: lat {:.4} lon {:.4} alt {:.1} km",
                        sample.latitude_deg,
                        sample.longitude_deg,
                        sample.altitude_km
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    running.stop().await;
    log::info!("{} markers recorded", store.trail_len());
    ExitCode::SUCCESS
}

fn log_scene(store: &TargetStore, stage: &SharedStage) {
    let (snapshot, frames) = {
        let locked = stage.lock().unwrap();
        (locked.snapshot(), locked.frames())
    };
    let target = store.current();

    match &snapshot.model {
        Some(model) => log::info!(
            "frame {}: model ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})",
            frames,
            model.position.x,
            model.position.y,
            model.position.z,
            target.object.x,
            target.object.y,
            target.object.z
        ),
        None => log::info!("frame {}: no model attached", frames),
    }
    log::info!(
        "frame {}: camera ({:.2}, {:.2}, {:.2}), trail {} markers",
        frames,
        snapshot.camera.position.x,
        snapshot.camera.position.y,
        snapshot.camera.position.z,
        store.trail_len()
    );
    if snapshot.label.visible {
        log::info!("label: {}", snapshot.label.text.replace('\n', " | "));
    }
}

async fn serve(config: &Config, bind: Option<String>) -> ExitCode {
    let store = store(config);
    let stage = stage(config);
    let Some(running) = Running::start(config, &store, &stage) else {
        return ExitCode::FAILURE;
    };

    let bind_addr = bind.unwrap_or_else(|| config.web.bind.clone());
    let state = AppState {
        store: store.clone(),
        stage: stage.clone(),
    };
    let result = web::run_server(&bind_addr, state).await;

    running.stop().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_interval_accepts_humantime() {
        let cli = Cli::try_parse_from(["orbit-trace", "watch", "--report-every", "2s 500ms"]).unwrap();
        match cli.command {
            Commands::Watch { report_every } => {
                assert_eq!(report_every, Duration::from_millis(2500))
            }
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn report_interval_rejects_zero() {
        assert!(Cli::try_parse_from(["orbit-trace", "watch", "--report-every", "0s"]).is_err());
        assert!(Cli::try_parse_from(["orbit-trace", "watch", "--report-every", "0ms"]).is_err());
        assert!(parse_report_interval("soon").is_err());
    }

    #[test]
    fn report_interval_defaults_to_five_seconds() {
        let cli = Cli::try_parse_from(["orbit-trace", "-c", "x.yaml", "watch"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
        assert!(matches!(
            cli.command,
            Commands::Watch { report_every } if report_every == Duration::from_secs(5)
        ));
    }
}
