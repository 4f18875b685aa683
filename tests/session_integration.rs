//! Session integration tests
//!
//! Long autopilot runs checking invariants tick by tick, determinism under a
//! fixed seed, and a full run with the icon pipeline attached.

use fallen_cathedral::core::config::SessionConfig;
use fallen_cathedral::core::error::{GameError, Result};
use fallen_cathedral::imagegen::{spawn_pipeline, Icon, Provenance, RemoteImageService};
use fallen_cathedral::session::{Autopilot, ControlState, GameSnapshot, RenderKind, Session};
use std::future::Future;
use std::time::Duration;

const DT: f32 = 1.0 / 60.0;

fn seeded(seed: u64) -> SessionConfig {
    SessionConfig {
        seed: Some(seed),
        ..SessionConfig::default()
    }
}

fn run(session: &mut Session, ticks: usize, mut check: impl FnMut(&GameSnapshot)) -> GameSnapshot {
    let autopilot = Autopilot::new();
    let mut controls = ControlState::new();
    let mut snapshot = session.snapshot();
    for _ in 0..ticks {
        autopilot.steer(session.state(), &mut controls);
        snapshot = session.tick(DT, &mut controls);
        check(&snapshot);
    }
    snapshot
}

/// Vitals, caps and counters stay within bounds for a long run
#[test]
fn test_invariants_over_long_run() {
    let (mut session, _commands, _events) = Session::detached(&seeded(2024));
    let mut last_wave = 1;
    let mut last_kills = 0;

    let snapshot = run(&mut session, 60 * 90, |s| {
        assert!(s.hero.life >= 0.0 && s.hero.life <= s.hero.max_life);
        assert!(s.hero.mana >= 0.0 && s.hero.mana <= s.hero.max_mana);
        assert!(s.drops.len() <= 6);
        assert!(s.log.len() <= 8);
        assert!(s.wave >= last_wave && s.wave <= last_wave + 1);
        assert!(s.kills >= last_kills);
        assert_eq!(s.count(RenderKind::Hero), 1);
        if s.game_over {
            assert_eq!(s.hero.life, 0.0);
        }
        last_wave = s.wave;
        last_kills = s.kills;
    });

    assert!(session.state().total_spawned > 0);
    assert!(snapshot.kills > 0, "autopilot should kill something in 90s");
}

/// Same seed, same inputs, same outcome
#[test]
fn test_seeded_runs_are_deterministic() {
    let outcome = |seed| {
        let (mut session, _commands, _events) = Session::detached(&seeded(seed));
        let s = run(&mut session, 60 * 30, |_| {});
        (s.kills, s.gold, s.wave, s.hero.level, session.state().total_spawned)
    };
    assert_eq!(outcome(9), outcome(9));
}

/// Enemies alive never exceed the population cap for the current wave
#[test]
fn test_population_cap_respected() {
    let (mut session, _commands, _events) = Session::detached(&seeded(5));
    run(&mut session, 60 * 40, |s| {
        let alive = [RenderKind::Imp, RenderKind::Ghoul, RenderKind::Brute]
            .into_iter()
            .map(|kind| s.count(kind))
            .sum::<usize>();
        assert!(alive <= 7 + 2 * s.wave as usize);
    });
}

struct NeverCalled;

impl RemoteImageService for NeverCalled {
    fn generate(&self, _api_key: &str, _prompt: &str) -> impl Future<Output = Result<Icon>> + Send {
        async {
            Err(GameError::ImageService(
                "remote service used while disabled".into(),
            ))
        }
    }
}

/// Every drop eventually gets an icon from the worker
#[tokio::test]
async fn test_drops_resolve_through_pipeline() {
    let config = SessionConfig {
        drop_chance: 1.0,
        ..seeded(77)
    };
    let (icons, events, _worker) = spawn_pipeline(&config.images, NeverCalled);
    let mut session = Session::new(&config, icons, events);

    let snapshot = run(&mut session, 60 * 30, |_| {});
    assert!(!snapshot.drops.is_empty(), "every kill drops an item");

    let mut snapshot = snapshot;
    for _ in 0..200 {
        if snapshot.drops.iter().all(|d| d.provenance.is_some()) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.drain_events();
        snapshot = session.snapshot();
    }

    for drop in &snapshot.drops {
        assert!(matches!(
            drop.provenance,
            Some(Provenance::Local | Provenance::Cache)
        ));
        assert!(drop.icon.as_ref().is_some_and(|icon| !icon.is_empty()));
    }
    assert!(!snapshot.generator_status.is_empty());
}

/// Tick until the generator status reads `expected`, or give up
async fn wait_for_status(session: &mut Session, expected: &str) -> String {
    let mut controls = ControlState::new();
    let mut status = session.snapshot().generator_status;
    for _ in 0..200 {
        if status == expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        status = session.tick(DT, &mut controls).generator_status;
    }
    status
}

/// Runtime toggles made through the session show up in its status line
#[tokio::test]
async fn test_runtime_toggles_update_generator_status() {
    let mut config = SessionConfig {
        drop_chance: 0.0,
        ..seeded(31)
    };
    config.images.api_key_env = "FALLEN_CATHEDRAL_TEST_UNSET_KEY".into();
    let (icons, events, _worker) = spawn_pipeline(&config.images, NeverCalled);
    let mut session = Session::new(&config, icons, events);

    let snapshot = run(&mut session, 30, |_| {});
    assert_eq!(snapshot.generator_status, "Local icon generator ready.");

    let steps = [
        "Remote image mode enabled. New loot will request generated art.",
        "No API key set. Local generation remains active.",
        "Remote image mode disabled. Using local icon generator.",
    ];
    assert!(session.set_remote_images(true));
    assert_eq!(wait_for_status(&mut session, steps[0]).await, steps[0]);

    assert!(session.set_api_key(Some("   ".into())));
    assert_eq!(wait_for_status(&mut session, steps[1]).await, steps[1]);

    assert!(session.set_remote_images(false));
    assert_eq!(wait_for_status(&mut session, steps[2]).await, steps[2]);
}
