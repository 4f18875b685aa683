//! Bounded combat log shown to the player

use crate::core::types::Color;
use serde::Serialize;
use std::collections::VecDeque;

pub const TONE_DEFAULT: Color = Color::rgb(0xf3e7d0);
pub const TONE_HERO_HIT: Color = Color::rgb(0xff9990);
pub const TONE_LEVEL_UP: Color = Color::rgb(0xffe39b);
pub const TONE_WAVE: Color = Color::rgb(0xffb98d);
pub const TONE_LOOT: Color = Color::rgb(0xd4e6ff);
pub const TONE_LOOT_LEGENDARY: Color = Color::rgb(0xf9d47f);
pub const TONE_INTRO: Color = Color::rgb(0xead8bd);
pub const TONE_HINT: Color = Color::rgb(0xa9cbff);

/// One line of the combat log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub text: String,
    pub color: Color,
}

/// Ring buffer of the most recent log lines
#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl CombatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, color: Color) {
        self.entries.push_back(LogEntry {
            text: text.into(),
            color,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.text.contains(needle))
    }
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_evicts_oldest() {
        let mut log = CombatLog::new(3);
        for i in 0..5 {
            log.push(format!("line {}", i), TONE_DEFAULT);
        }
        let texts: Vec<_> = log.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["line 2", "line 3", "line 4"]);
        assert_eq!(log.last().map(|e| e.text.as_str()), Some("line 4"));
    }
}
