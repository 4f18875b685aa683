//! Read-only view of a session handed to the UI or renderer after each tick

use crate::combat::abilities::AbilityKind;
use crate::combat::area::{AreaEffect, AreaKind};
use crate::combat::projectile::{Projectile, ProjectileKind};
use crate::core::log::LogEntry;
use crate::core::types::{Color, DropId, Vec2};
use crate::entity::enemy::{Enemy, EnemyKind};
use crate::entity::hero::Hero;
use crate::imagegen::{Icon, Provenance};
use crate::loot::drops::DropItem;
use crate::loot::orb::LootOrb;
use crate::loot::table::ItemTier;
use crate::session::state::GameState;
use serde::Serialize;

pub const HERO_COLOR: Color = Color::rgb(0x71605d);
pub const LOOT_ORB_COLOR: Color = Color::rgb(0xf7cf63);
const LOOT_ORB_SCALE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    Hero,
    Imp,
    Ghoul,
    Brute,
    Bolt,
    Lance,
    Whirl,
    DeathBurst,
    LootBeam,
    LootOrb,
}

impl From<EnemyKind> for RenderKind {
    fn from(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Imp => RenderKind::Imp,
            EnemyKind::Ghoul => RenderKind::Ghoul,
            EnemyKind::Brute => RenderKind::Brute,
        }
    }
}

impl From<ProjectileKind> for RenderKind {
    fn from(kind: ProjectileKind) -> Self {
        match kind {
            ProjectileKind::Bolt => RenderKind::Bolt,
            ProjectileKind::Lance => RenderKind::Lance,
        }
    }
}

impl From<AreaKind> for RenderKind {
    fn from(kind: AreaKind) -> Self {
        match kind {
            AreaKind::Whirl => RenderKind::Whirl,
            AreaKind::DeathBurst => RenderKind::DeathBurst,
            AreaKind::LootBeam => RenderKind::LootBeam,
        }
    }
}

/// One drawable thing in the arena
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEntity {
    pub kind: RenderKind,
    pub position: Vec2,
    pub color: Color,
    /// Body scale for actors, current radius for area effects
    pub scale: f32,
    pub opacity: f32,
    /// Remaining life in [0, 1] for the hero and enemies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<f32>,
}

impl RenderEntity {
    fn hero(hero: &Hero) -> Self {
        Self {
            kind: RenderKind::Hero,
            position: hero.position,
            color: HERO_COLOR,
            scale: 1.0,
            opacity: 1.0,
            health: Some(hero.life_fraction()),
        }
    }

    fn enemy(enemy: &Enemy) -> Self {
        Self {
            kind: enemy.kind.into(),
            position: enemy.position,
            color: enemy.color,
            scale: enemy.scale,
            opacity: 1.0,
            health: Some(enemy.life_fraction()),
        }
    }

    fn projectile(projectile: &Projectile) -> Self {
        Self {
            kind: projectile.kind.into(),
            position: projectile.position,
            color: projectile.color,
            scale: projectile.scale,
            opacity: 1.0,
            health: None,
        }
    }

    fn area(area: &AreaEffect) -> Self {
        Self {
            kind: area.kind.into(),
            position: area.origin,
            color: area.color,
            scale: area.radius,
            opacity: area.opacity(),
            health: None,
        }
    }

    fn orb(orb: &LootOrb) -> Self {
        Self {
            kind: RenderKind::LootOrb,
            position: orb.position,
            color: LOOT_ORB_COLOR,
            scale: LOOT_ORB_SCALE,
            opacity: 1.0,
            health: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroVitals {
    pub life: f32,
    pub max_life: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    /// Bar fills in [0, 1]
    pub life_fraction: f32,
    pub mana_fraction: f32,
    pub xp_fraction: f32,
}

impl From<&Hero> for HeroVitals {
    fn from(hero: &Hero) -> Self {
        Self {
            life: hero.life,
            max_life: hero.max_life,
            mana: hero.mana,
            max_mana: hero.max_mana,
            level: hero.level,
            xp: hero.xp,
            next_level_xp: hero.next_level_xp,
            life_fraction: hero.life_fraction(),
            mana_fraction: hero.mana_fraction(),
            xp_fraction: hero.xp_fraction(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropView {
    pub id: DropId,
    pub name: String,
    pub tier: ItemTier,
    /// Absent while the icon is still queued
    pub provenance: Option<Provenance>,
    pub source: &'static str,
    #[serde(skip)]
    pub icon: Option<Icon>,
}

impl From<&DropItem> for DropView {
    fn from(item: &DropItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            tier: item.tier,
            provenance: item.provenance,
            source: item.source_label(),
            icon: item.icon.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CooldownView {
    pub ability: AbilityKind,
    pub remaining: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub hero: HeroVitals,
    pub wave: u32,
    pub kills: u32,
    pub gold: u32,
    pub elapsed: f32,
    pub objective: String,
    pub log: Vec<LogEntry>,
    /// Newest first
    pub drops: Vec<DropView>,
    pub cooldowns: Vec<CooldownView>,
    pub game_over: bool,
    pub generator_status: String,
    pub generator_status_color: Color,
    pub entities: Vec<RenderEntity>,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let hero = &state.hero;

        let actors = 1 + state.enemies.len() + state.projectiles.len();
        let mut entities = Vec::with_capacity(actors + state.areas.len() + state.orbs.len());
        entities.push(RenderEntity::hero(hero));
        let alive = state.enemies.iter().filter(|e| !e.dead);
        entities.extend(alive.map(RenderEntity::enemy));
        entities.extend(state.projectiles.iter().map(RenderEntity::projectile));
        entities.extend(state.areas.iter().map(RenderEntity::area));
        entities.extend(state.orbs.iter().map(RenderEntity::orb));

        let cooldowns = AbilityKind::ALL
            .iter()
            .map(|&ability| CooldownView {
                ability,
                remaining: hero.cooldowns.get(ability),
                label: hero.cooldowns.label(ability),
            })
            .collect();

        let drops = state.recent_drops.iter().rev().map(DropView::from);

        Self {
            hero: HeroVitals::from(hero),
            wave: state.wave,
            kills: state.kills,
            gold: state.gold,
            elapsed: state.elapsed,
            objective: state.objective.clone(),
            log: state.log.entries().cloned().collect(),
            drops: drops.collect(),
            cooldowns,
            game_over: state.game_over,
            generator_status: state.generator_status.message.clone(),
            generator_status_color: state.generator_status.color,
            entities,
        }
    }

    pub fn count(&self, kind: RenderKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SessionConfig;

    #[test]
    fn test_fresh_snapshot() {
        let state = GameState::new(&SessionConfig::default());
        let snapshot = GameSnapshot::capture(&state);
        assert_eq!(snapshot.entities.len(), 1);
        assert_eq!(snapshot.count(RenderKind::Hero), 1);
        assert_eq!(snapshot.log.len(), 3);
        assert!(snapshot.cooldowns.iter().all(|c| c.label == "Ready"));
        assert!(snapshot.drops.is_empty());
    }

    #[test]
    fn test_bar_fractions() {
        let mut state = GameState::new(&SessionConfig::default());
        state.hero.life = state.hero.max_life / 2.0;
        state.hero.xp = state.hero.next_level_xp / 4;
        let mut ghoul = state
            .spawner
            .spawn_kind(EnemyKind::Ghoul, 1, Vec2::new(5.0, 0.0));
        let quarter = ghoul.max_life / 4.0;
        assert!(ghoul.hit(quarter).is_none());
        state.enemies.push(ghoul);

        let snapshot = GameSnapshot::capture(&state);
        assert!((snapshot.hero.life_fraction - 0.5).abs() < 1e-6);
        assert_eq!(snapshot.hero.mana_fraction, 1.0);
        let xp = snapshot.hero.xp_fraction;
        assert!(xp > 0.0 && xp < 1.0);

        let health = |kind| {
            snapshot
                .entities
                .iter()
                .find(|e| e.kind == kind)
                .and_then(|e| e.health)
        };
        assert_eq!(health(RenderKind::Hero), Some(snapshot.hero.life_fraction));
        let ghoul = health(RenderKind::Ghoul).expect("ghoul health");
        assert!((ghoul - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_snapshot_serializes_without_icons() {
        let state = GameState::new(&SessionConfig::default());
        let snapshot = GameSnapshot::capture(&state);
        let json = serde_json::to_value(snapshot).expect("serialize");
        assert_eq!(json["wave"], 1);
        assert_eq!(json["entities"][0]["kind"], "hero");
        assert_eq!(json["cooldowns"][2]["ability"], "Whirl");
        assert!(json["log"][0]["text"].is_string());
        assert_eq!(json["hero"]["life_fraction"], 1.0);
        assert!(json["entities"][0]["health"].is_number());
    }
}
