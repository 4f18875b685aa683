//! Mutable state of one run and the kill settlement

use crate::combat::area::AreaEffect;
use crate::combat::constants::{KILL_GOLD_BASE_MAX, KILL_GOLD_MIN, KILL_GOLD_PER_WAVE};
use crate::combat::projectile::Projectile;
use crate::core::config::SessionConfig;
use crate::core::log::{
    CombatLog, TONE_HINT, TONE_INTRO, TONE_LOOT, TONE_LOOT_LEGENDARY, TONE_WAVE,
};
use crate::core::rng::GameRng;
use crate::core::types::{Color, DropId};
use crate::director::spawn::SpawnDirector;
use crate::director::wave::{objective_text, WaveSchedule, FALLEN_OBJECTIVE};
use crate::entity::enemy::{Enemy, EnemyDeath};
use crate::entity::hero::Hero;
use crate::imagegen::{IconQueue, StatusLine};
use crate::loot::drops::{apply_rewards, DropItem, RecentDrops};
use crate::loot::orb::LootOrb;
use crate::loot::table::{roll_drop, ItemTier};

const TONE_FIRE_HINT: Color = Color::rgb(0xffc27f);

/// Everything that changes while a session runs
#[derive(Debug, Clone)]
pub struct GameState {
    pub hero: Hero,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub areas: Vec<AreaEffect>,
    pub orbs: Vec<LootOrb>,

    pub wave: u32,
    pub kills: u32,
    pub total_spawned: u32,
    pub gold: u32,
    /// Accumulated simulation time, drives the spawn timer
    pub elapsed: f32,

    /// Terminal: once set the tick only produces snapshots
    pub game_over: bool,
    pub objective: String,
    pub log: CombatLog,
    pub recent_drops: RecentDrops,
    pub generator_status: StatusLine,

    pub schedule: WaveSchedule,
    pub spawner: SpawnDirector,
    pub drop_chance: f32,
}

impl GameState {
    /// Fresh run at wave 1 with the intro lines logged
    pub fn new(config: &SessionConfig) -> Self {
        let mut log = CombatLog::new(config.combat_log_capacity);
        log.push("Entered The Fallen Cathedral", TONE_INTRO);
        log.push("Hold fire to cast Fire Bolt", TONE_FIRE_HINT);
        log.push(
            "Hold spirit for Spirit Lance, tap whirl for Whirl",
            TONE_HINT,
        );

        Self {
            hero: Hero::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            areas: Vec::new(),
            orbs: Vec::new(),
            wave: 1,
            kills: 0,
            total_spawned: 0,
            gold: 0,
            elapsed: 0.0,
            game_over: false,
            objective: objective_text(1),
            log,
            recent_drops: RecentDrops::new(config.recent_drops_capacity),
            generator_status: StatusLine::idle(),
            schedule: WaveSchedule::from_config(config),
            spawner: SpawnDirector::new(),
            drop_chance: config.drop_chance,
        }
    }

    /// Apply every consequence of one kill
    ///
    /// Runs once per death record, in the order the kills happened. Returns
    /// the id of the item dropped, if any.
    pub fn settle_death(
        &mut self,
        death: &EnemyDeath,
        rng: &mut GameRng,
        queue: &IconQueue,
    ) -> Option<DropId> {
        self.kills += 1;
        tracing::debug!(
            kind = death.kind.name(),
            id = ?death.id,
            kills = self.kills,
            "Enemy slain"
        );

        self.hero.gain_xp(death.xp, &mut self.log);
        let gold_max = KILL_GOLD_BASE_MAX + KILL_GOLD_PER_WAVE * self.wave;
        self.gold += rng.rand_int(KILL_GOLD_MIN, gold_max);
        self.orbs.push(LootOrb::new(death.position));
        self.areas.push(AreaEffect::death_burst(death.position, death.color));

        let dropped = self.maybe_drop(death, rng, queue);
        self.check_wave();
        dropped
    }

    fn maybe_drop(
        &mut self,
        death: &EnemyDeath,
        rng: &mut GameRng,
        queue: &IconQueue,
    ) -> Option<DropId> {
        let template = roll_drop(rng, self.drop_chance)?;
        let item = DropItem::from_template(template);
        let id = item.id;

        apply_rewards(&mut self.hero, &item);
        let request = item.icon_request();
        let tone = if item.tier == ItemTier::Legendary {
            TONE_LOOT_LEGENDARY
        } else {
            TONE_LOOT
        };
        self.log.push(format!("Looted {}", item.name), tone);
        tracing::info!(item = %item.name, tier = %item.tier, "Item dropped");

        self.recent_drops.push(item);
        queue.enqueue(request);
        let beam = AreaEffect::loot_beam(death.position, template.tier.beam_color());
        self.areas.push(beam);
        Some(id)
    }

    /// Advance at most one wave if the kill count has reached the threshold
    pub fn check_wave(&mut self) -> bool {
        match self.schedule.next_wave(self.wave, self.kills) {
            Some(next) => {
                self.wave = next;
                self.log.push(
                    format!("Wave {} begins. Demons grow stronger.", next),
                    TONE_WAVE,
                );
                self.objective = objective_text(next);
                tracing::info!(wave = next, kills = self.kills, "Wave advanced");
                true
            }
            None => false,
        }
    }

    /// Enter the terminal state after the hero falls
    pub fn mark_fallen(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.objective = FALLEN_OBJECTIVE.to_string();
        tracing::info!(
            wave = self.wave,
            kills = self.kills,
            gold = self.gold,
            level = self.hero.level,
            "Hero has fallen"
        );
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| !e.dead).count()
    }
}
