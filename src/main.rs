//! Fallen Cathedral - headless runner
//!
//! Runs one arena session driven by the autopilot, with the icon pipeline on
//! a tokio worker, and prints the final snapshot.

use clap::Parser;
use fallen_cathedral::core::config::SessionConfig;
use fallen_cathedral::core::error::{GameError, Result};
use fallen_cathedral::imagegen::{spawn_pipeline, OpenAiImageClient};
use fallen_cathedral::session::{Autopilot, ControlState, GameSnapshot, Session};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Fallen Cathedral arena simulation
#[derive(Parser, Debug)]
#[command(name = "fallen-cathedral")]
#[command(about = "Run a headless arena session and print the final state")]
struct Args {
    /// Session config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Frames per simulated second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Request item icons from the remote image service
    #[arg(long)]
    remote_images: bool,

    /// Sleep between frames to run at wall-clock speed
    #[arg(long)]
    realtime: bool,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fallen_cathedral=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.remote_images {
        config.images.remote_enabled = true;
    }
    if args.fps == 0 {
        return Err(GameError::Config("--fps must be positive".into()));
    }

    tracing::info!(seed = ?config.seed, seconds = args.seconds, "Fallen Cathedral starting...");

    // The icon worker needs a runtime; the simulation itself stays synchronous
    let rt = Runtime::new()?;
    let _guard = rt.enter();

    if config.images.remote_enabled && config.images.resolved_api_key().is_none() {
        tracing::warn!(
            env = %config.images.api_key_env,
            "Remote images requested but no API key found - using local icons"
        );
    }
    let client = OpenAiImageClient::from_config(&config.images);
    let (icons, events, worker) = spawn_pipeline(&config.images, client);
    let mut session = Session::new(&config, icons, events);

    let autopilot = Autopilot::new();
    let mut controls = ControlState::new();
    let frame = 1.0 / args.fps as f32;
    let frames = (args.seconds.max(0.0) * args.fps as f32).ceil() as u64;

    let mut snapshot = session.snapshot();
    for _ in 0..frames {
        let started = Instant::now();
        autopilot.steer(session.state(), &mut controls);
        snapshot = session.tick(frame, &mut controls);
        if snapshot.game_over {
            break;
        }
        if args.realtime {
            let budget = Duration::from_secs_f32(frame);
            if let Some(rest) = budget.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    // Give queued icons a chance to land before reporting
    let deadline = Instant::now() + config.images.timeout() + Duration::from_secs(1);
    while has_pending_icons(&snapshot) && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(20));
        session.drain_events();
        snapshot = session.snapshot();
    }

    drop(session);
    if let Err(err) = rt.block_on(worker) {
        tracing::warn!(error = %err, "Icon pipeline task ended abnormally");
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        _ => print_text(&snapshot),
    }
    Ok(())
}

fn has_pending_icons(snapshot: &GameSnapshot) -> bool {
    snapshot.drops.iter().any(|d| d.provenance.is_none())
}

fn print_text(snapshot: &GameSnapshot) {
    let hero = &snapshot.hero;
    println!("\n=== THE FALLEN CATHEDRAL ===");
    println!("{}", snapshot.objective);
    println!(
        "Time {:.1}s | Wave {} | Kills {} | Gold {}",
        snapshot.elapsed, snapshot.wave, snapshot.kills, snapshot.gold
    );
    println!(
        "Level {} | Life {} / {} | Mana {} / {} | XP {} / {}",
        hero.level,
        hero.life.round(),
        hero.max_life.round(),
        hero.mana.round(),
        hero.max_mana.round(),
        hero.xp,
        hero.next_level_xp
    );

    println!("\nCooldowns:");
    for cooldown in &snapshot.cooldowns {
        println!("  {:?}: {}", cooldown.ability, cooldown.label);
    }

    println!("\nRecent drops:");
    if snapshot.drops.is_empty() {
        println!("  (none)");
    }
    for drop in &snapshot.drops {
        println!(
            "  {} [{} · {}]",
            drop.name,
            drop.tier.as_str().to_uppercase(),
            drop.source
        );
    }

    println!("\nCombat log:");
    for entry in &snapshot.log {
        println!("  {} {}", entry.color.hex(), entry.text);
    }

    println!("\nImage generator: {}", snapshot.generator_status);
    if snapshot.game_over {
        println!("\nGAME OVER");
    }
}
