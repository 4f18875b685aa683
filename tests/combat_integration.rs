//! Combat integration tests
//!
//! Drive a detached session through casts, hits, kills and wave changes and
//! check the observable state after each step.

use fallen_cathedral::combat::AbilityKind;
use fallen_cathedral::core::config::SessionConfig;
use fallen_cathedral::core::types::Vec2;
use fallen_cathedral::entity::EnemyKind;
use fallen_cathedral::imagegen::{channel, PipelineCommand};
use fallen_cathedral::session::{ControlState, Session};

const DT: f32 = 0.02;

fn quiet_config() -> SessionConfig {
    SessionConfig {
        seed: Some(11),
        drop_chance: 0.0,
        ..SessionConfig::default()
    }
}

/// Session with a single imp straight ahead of the hero
fn session_with_imp(life: f32) -> Session {
    let (mut session, _commands, _events) = Session::detached(&quiet_config());
    let state = session.state_mut();
    let mut imp = state
        .spawner
        .spawn_kind(EnemyKind::Imp, 1, Vec2::new(0.0, 6.0));
    imp.life = life;
    imp.max_life = life;
    state.enemies.push(imp);
    session
}

/// Fire one bolt at the imp and tick until it has resolved
fn fire_one_bolt(session: &mut Session) {
    let mut controls = ControlState {
        fire: true,
        aim: Vec2::new(0.0, 6.0),
        ..ControlState::default()
    };
    session.tick(DT, &mut controls);
    controls.fire = false;
    for _ in 0..20 {
        if session.state().projectiles.is_empty() {
            break;
        }
        session.tick(DT, &mut controls);
    }
    assert!(
        session.state().projectiles.is_empty(),
        "bolt should hit or expire"
    );
}

/// A level 1 bolt deals 28, so an imp at 34 life survives the first hit
/// with 6 left and falls to the second
#[test]
fn test_imp_scenario_two_bolts() {
    let mut session = session_with_imp(34.0);
    assert_eq!(AbilityKind::FireBolt.damage_at(1), 28.0);

    fire_one_bolt(&mut session);
    let imp = &session.state().enemies[0];
    assert!(!imp.dead);
    assert!((imp.life - 6.0).abs() < 1e-4);
    assert_eq!(session.state().kills, 0);

    // Let the cooldown run out, then fire again
    for _ in 0..10 {
        session.tick(DT, &mut ControlState::default());
    }
    fire_one_bolt(&mut session);

    let state = session.state();
    assert_eq!(state.kills, 1);
    assert_eq!(state.orbs.len(), 1);
    assert_eq!(state.wave, 1);
    assert!(state.gold >= 8);
    assert_eq!(state.hero.xp, 13);
}

/// An imp whose life is no more than one bolt dies on the first hit
#[test]
fn test_lethal_bolt_kills_on_first_hit() {
    let mut session = session_with_imp(28.0);
    fire_one_bolt(&mut session);

    let state = session.state();
    assert_eq!(state.kills, 1);
    assert_eq!(state.orbs.len(), 1);
    assert_eq!(state.wave, 1);
    // Dead enemies are removed on the following tick
    assert!(state.enemies.iter().all(|e| e.dead));
    session.tick(DT, &mut ControlState::default());
    assert!(session.state().enemies.is_empty());
}

/// The twelfth kill starts wave 2 and updates the objective
#[test]
fn test_wave_transition_at_first_milestone() {
    let (mut session, _commands, _events) = Session::detached(&quiet_config());
    let (queue, _rx) = channel();
    let state = session.state_mut();
    state.kills = 11;

    let mut imp = state
        .spawner
        .spawn_kind(EnemyKind::Imp, 1, Vec2::new(4.0, 0.0));
    let death = imp.hit(1000.0).expect("lethal hit");
    assert!(imp.hit(1000.0).is_none(), "death must fire once");

    let mut rng = fallen_cathedral::core::GameRng::from_seed(1);
    state.settle_death(&death, &mut rng, &queue);

    assert_eq!(state.kills, 12);
    assert_eq!(state.wave, 2);
    assert!(state.log.contains("Wave 2 begins. Demons grow stronger."));
    assert_eq!(
        state.objective,
        "Wave 2: eliminate corrupted fiends and survive escalating pressure."
    );
}

/// Without enough mana nothing fires: no projectile, no cooldown, no log line
#[test]
fn test_cast_without_mana_is_silent() {
    let (mut session, _commands, _events) = Session::detached(&quiet_config());
    session.state_mut().hero.mana = 0.0;
    let before = session.state().log.len();

    let mut controls = ControlState {
        spirit: true,
        aim: Vec2::new(3.0, 0.0),
        ..ControlState::default()
    };
    session.tick(DT, &mut controls);

    let state = session.state();
    assert!(state.projectiles.is_empty());
    assert!(state.hero.cooldowns.is_ready(AbilityKind::SpiritLance));
    assert_eq!(state.log.len(), before);
}

/// A whirl keeps damaging everything around the hero while it expands
#[test]
fn test_whirl_hits_every_enemy_in_reach() {
    let (mut session, _commands, _events) = Session::detached(&quiet_config());
    {
        let state = session.state_mut();
        let positions = [
            Vec2::new(2.0, 0.0),
            Vec2::new(-2.0, 0.0),
            Vec2::new(0.0, 2.5),
        ];
        for position in positions {
            let mut ghoul = state.spawner.spawn_kind(EnemyKind::Ghoul, 1, position);
            ghoul.life = 500.0;
            ghoul.speed = 0.0;
            state.enemies.push(ghoul);
        }
    }

    let mut controls = ControlState::default();
    controls.press_whirl();
    session.tick(DT, &mut controls);
    for _ in 0..5 {
        session.tick(DT, &mut controls);
    }

    assert!(session.state().enemies.iter().all(|e| e.life < 500.0));
}

/// A drop queues exactly one icon job for the new item
#[test]
fn test_drop_queues_icon_job() {
    let config = SessionConfig {
        drop_chance: 1.0,
        ..quiet_config()
    };
    let (mut session, mut commands, _events) = Session::detached(&config);
    {
        let state = session.state_mut();
        let mut imp = state
            .spawner
            .spawn_kind(EnemyKind::Imp, 1, Vec2::new(0.0, 6.0));
        imp.life = 1.0;
        state.enemies.push(imp);
    }
    fire_one_bolt(&mut session);

    let state = session.state();
    let drop = state.recent_drops.iter().next().expect("drop").clone();
    match commands.try_recv() {
        Ok(PipelineCommand::Generate(request)) => {
            assert_eq!(request.drop_id, drop.id);
            assert_eq!(request.name, drop.name);
        }
        other => panic!("expected one icon job, got {:?}", other),
    }
    assert!(commands.try_recv().is_err());
    assert_eq!(drop.source_label(), "queued");
}
