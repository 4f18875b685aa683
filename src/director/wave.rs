//! Kill-count wave progression

use crate::core::config::SessionConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct WaveSchedule {
    /// Kill totals that end waves 1..=N
    pub milestones: Vec<u32>,
    /// Per-wave kill factor once the milestone list runs out
    pub late_factor: u32,
}

impl Default for WaveSchedule {
    fn default() -> Self {
        Self {
            milestones: vec![12, 30, 54, 80],
            late_factor: 35,
        }
    }
}

impl WaveSchedule {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            milestones: config.kill_milestones.clone(),
            late_factor: config.kills_per_late_wave,
        }
    }

    /// Total kills needed to finish `wave` (1-based)
    pub fn threshold(&self, wave: u32) -> u32 {
        wave.checked_sub(1)
            .and_then(|idx| self.milestones.get(idx as usize))
            .copied()
            .unwrap_or(wave * self.late_factor)
    }

    /// The next wave number if `kills` completes `wave`
    ///
    /// Advances at most one wave per call.
    pub fn next_wave(&self, wave: u32, kills: u32) -> Option<u32> {
        (kills >= self.threshold(wave)).then_some(wave + 1)
    }
}

pub fn objective_text(wave: u32) -> String {
    if wave <= 1 {
        "Wave 1: clear cultists and gather infernal loot.".to_string()
    } else {
        format!(
            "Wave {}: eliminate corrupted fiends and survive escalating pressure.",
            wave
        )
    }
}

pub const FALLEN_OBJECTIVE: &str = "You have fallen. Start a new session to re-enter Sanctuary.";
