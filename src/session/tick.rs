//! The session and its fixed-order frame tick
//!
//! Order per tick: drain pipeline events, hero (movement, casts), spawn
//! check, enemy updates, projectile resolution, area resolution, loot orbs,
//! snapshot. Kills found by a resolver pass are settled right after that
//! pass, before the next stage runs. The tick stops after the enemy pass if
//! the hero falls there.

use crate::combat::abilities::{try_cast, AbilityKind};
use crate::combat::area::resolve_areas;
use crate::combat::projectile::resolve_projectiles;
use crate::core::config::SessionConfig;
use crate::core::rng::GameRng;
use crate::entity::enemy::EnemyDeath;
use crate::imagegen::{channel, IconQueue, PipelineCommand, PipelineEvent};
use crate::loot::orb::update_orbs;
use crate::session::input::ControlState;
use crate::session::snapshot::GameSnapshot;
use crate::session::state::GameState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub struct Session {
    state: GameState,
    rng: GameRng,
    max_step: f32,
    icons: IconQueue,
    events: UnboundedReceiver<PipelineEvent>,
}

impl Session {
    /// A session wired to a running icon pipeline
    ///
    /// A `max_step` that is not positive falls back to the default step.
    pub fn new(
        config: &SessionConfig,
        icons: IconQueue,
        events: UnboundedReceiver<PipelineEvent>,
    ) -> Self {
        let max_step = if config.max_step > 0.0 {
            config.max_step
        } else {
            SessionConfig::default().max_step
        };
        Self {
            state: GameState::new(config),
            rng: GameRng::new(config.seed),
            max_step,
            icons,
            events,
        }
    }

    /// A session with no worker attached
    ///
    /// Returns the raw command receiver and an event sender so the caller can
    /// inspect queued icon jobs and feed results back by hand.
    pub fn detached(
        config: &SessionConfig,
    ) -> (Self, UnboundedReceiver<PipelineCommand>, UnboundedSender<PipelineEvent>) {
        let (icons, commands) = channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (Self::new(config, icons, events_rx), commands, events_tx)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state)
    }

    /// Advance the simulation by one frame
    ///
    /// `frame_dt` is clamped to the configured maximum step. A fatal strike
    /// ends the tick after the enemy pass, and from then on only pipeline
    /// results are applied.
    pub fn tick(&mut self, frame_dt: f32, controls: &mut ControlState) -> GameSnapshot {
        let dt = frame_dt.max(0.0).min(self.max_step);
        self.drain_events();

        if !self.state.game_over {
            self.state.elapsed += dt;
            self.update_hero(dt, controls);
            self.spawn();
            self.update_enemies(dt);
            if self.state.game_over {
                return self.snapshot();
            }

            let deaths = resolve_projectiles(
                &mut self.state.projectiles,
                &mut self.state.enemies,
                dt,
            );
            self.settle(&deaths);

            let deaths = resolve_areas(&mut self.state.areas, &mut self.state.enemies, dt);
            self.settle(&deaths);

            let hero_position = self.state.hero.position;
            self.state.gold += update_orbs(&mut self.state.orbs, hero_position, dt, &mut self.rng);
        }

        self.snapshot()
    }

    /// Apply every icon result and status line the worker has posted
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            match event {
                PipelineEvent::Resolved {
                    drop_id,
                    icon,
                    provenance,
                } => {
                    if !self.state.recent_drops.resolve_icon(drop_id, icon, provenance) {
                        tracing::debug!(?drop_id, "Icon arrived for an evicted drop");
                    }
                }
                PipelineEvent::Status(line) => self.state.generator_status = line,
            }
            applied += 1;
        }
        applied
    }

    /// Toggle remote icon generation at runtime
    ///
    /// The worker answers with a status line on a later tick. Returns false
    /// once the pipeline has stopped.
    pub fn set_remote_images(&self, enabled: bool) -> bool {
        self.icons.set_remote_enabled(enabled)
    }

    /// Replace the remote credential at runtime; blank clears it
    pub fn set_api_key(&self, api_key: Option<String>) -> bool {
        self.icons.set_api_key(api_key)
    }

    fn update_hero(&mut self, dt: f32, controls: &mut ControlState) {
        let state = &mut self.state;
        state.hero.advance(dt, controls.move_axis, controls.aim);

        for kind in AbilityKind::ALL {
            if controls.wants(kind) {
                try_cast(
                    kind,
                    &mut state.hero,
                    controls.aim,
                    &mut state.projectiles,
                    &mut state.areas,
                    &mut state.log,
                );
            }
        }
        controls.whirl = false;
    }

    fn spawn(&mut self) {
        let state = &mut self.state;
        if state
            .spawner
            .update(state.elapsed, state.wave, &mut state.enemies, &mut self.rng)
            .is_some()
        {
            state.total_spawned += 1;
        }
    }

    fn update_enemies(&mut self, dt: f32) {
        let state = &mut self.state;
        state.enemies.retain(|e| !e.dead);

        let mut fallen = false;
        for enemy in state.enemies.iter_mut() {
            fallen |= enemy.update(dt, &mut state.hero, state.wave, &mut state.log);
        }
        if fallen {
            state.mark_fallen();
        }
    }

    fn settle(&mut self, deaths: &[EnemyDeath]) {
        for death in deaths {
            self.state.settle_death(death, &mut self.rng, &self.icons);
        }
    }
}
