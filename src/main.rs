//! Super JOANA headless runner
//!
//! Runs the simulation without a window: the autopilot plays, sound cues go
//! to the log, and the HUD is logged once per simulated second.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use super_joana::autopilot::Autopilot;
use super_joana::consts::FRAME_DT;
use super_joana::engine::{HeadlessEngine, LevelSource};
use super_joana::level::{LevelDirectory, LevelError};
use super_joana::sim::{GameEvent, GamePhase, GameState, handle_input, tick};
use super_joana::{Settings, TuningPreset};

#[derive(Parser, Debug)]
#[command(name = "super-joana")]
#[command(about = "Run the Super JOANA platformer simulation headless")]
struct Cli {
    /// Directory of level_<n>.json files; procedural levels when omitted
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Seed for procedural levels and the autopilot
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of procedural levels
    #[arg(long, default_value_t = 3)]
    level_count: u32,
    /// Frames to simulate (60 per second)
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Settings file
    #[arg(long, default_value = "super-joana-settings.json")]
    settings: PathBuf,
    /// Balance preset, overrides the settings file (super-joana, alan-map)
    #[arg(long)]
    preset: Option<String>,
    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Super JOANA (headless) starting...");

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), LevelError> {
    let mut settings = Settings::load(&cli.settings);
    if let Some(name) = &cli.preset {
        match TuningPreset::from_name(name) {
            Some(preset) => {
                settings.preset = preset;
                settings.tuning = None;
            }
            None => log::warn!("Unknown preset '{}', keeping {}", name, settings.preset.as_str()),
        }
    }
    if cli.save_settings {
        if let Err(e) = settings.save(&cli.settings) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    let source = match &cli.levels {
        Some(dir) => LevelSource::Directory(LevelDirectory::new(dir.clone())),
        None => LevelSource::Generated {
            seed: cli.seed,
            count: cli.level_count,
        },
    };
    let mut engine = HeadlessEngine::new(source);
    settings.apply_audio(&mut engine.audio);

    let tuning = settings.tuning();
    let start_level = tuning.start_level;
    log::info!("Preset {}, starting at level {}", settings.preset.as_str(), start_level);

    let mut state = GameState::new(tuning);
    state.setup(start_level, &mut engine)?;
    let mut pilot = Autopilot::new(cli.seed);

    for frame in 0..cli.frames {
        for event in pilot.plan(&state) {
            handle_input(&mut state, event, &mut engine);
        }
        tick(&mut state, FRAME_DT, &mut engine)?;

        for event in &state.events {
            match event {
                GameEvent::PlayerDied { cause } => {
                    log::info!("Frame {}: player died ({:?})", frame, cause)
                }
                GameEvent::LevelComplete { level } => {
                    log::info!("Frame {}: level {} complete", frame, level)
                }
                GameEvent::GameOver => log::info!("Frame {}: game over", frame),
                GameEvent::GameWon => log::info!("Frame {}: all levels complete", frame),
                _ => {}
            }
        }

        if frame % 60 == 59 {
            log::info!("{}", state.hud().join("  "));
        }
        if state.phase == GamePhase::Won {
            break;
        }
    }

    log::info!(
        "Finished on level {} with score {} and {} lives ({} sounds played)",
        state.level,
        state.score,
        state.life,
        engine.audio.played()
    );
    Ok(())
}
