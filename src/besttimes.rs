//! Per-level and overall best completion times
//!
//! Persisted to LocalStorage as bare float strings under a global key and one
//! key per level. A level never finished reports the sentinel value, which is
//! also what corrupt or missing storage falls back to.

use serde::{Deserialize, Serialize};

use crate::consts::BEST_TIME_SENTINEL;

/// Best completion times in seconds, lower is better
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestTimes {
    /// Best single-level time across the whole game
    global: f32,
    per_level: Vec<f32>,
}

impl BestTimes {
    /// LocalStorage key for the overall best (used only in wasm32)
    #[allow(dead_code)]
    const GLOBAL_KEY: &'static str = "bestTime";

    /// Fresh record sheet with every slot at the sentinel
    pub fn new(level_count: usize) -> Self {
        Self {
            global: BEST_TIME_SENTINEL,
            per_level: vec![BEST_TIME_SENTINEL; level_count],
        }
    }

    /// Per-level LocalStorage key
    #[allow(dead_code)]
    fn level_key(level: usize) -> String {
        format!("level{level}BestTime")
    }

    /// Record a level completion. True iff this beats the stored time.
    pub fn record_level(&mut self, level: usize, time: f32) -> bool {
        let Some(slot) = self.per_level.get_mut(level) else {
            return false;
        };
        if time < *slot {
            *slot = time;
            return true;
        }
        false
    }

    /// Record a completion against the overall best. True iff it improves.
    pub fn record_global(&mut self, time: f32) -> bool {
        if time < self.global {
            self.global = time;
            return true;
        }
        false
    }

    pub fn global(&self) -> f32 {
        self.global
    }

    /// Best time for a level; sentinel when unset or out of range
    pub fn level(&self, level: usize) -> f32 {
        self.per_level
            .get(level)
            .copied()
            .unwrap_or(BEST_TIME_SENTINEL)
    }

    /// Load from LocalStorage (WASM only). Missing or unparsable values fall
    /// back to the sentinel, never to an error.
    #[cfg(target_arch = "wasm32")]
    pub fn load(level_count: usize) -> Self {
        let mut times = Self::new(level_count);
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            times.global = read_time(&storage, Self::GLOBAL_KEY);
            for level in 0..level_count {
                times.per_level[level] = read_time(&storage, &Self::level_key(level));
            }
            log::info!("Loaded best times (global: {:.1})", times.global);
        }
        times
    }

    /// Persist the overall best (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save_global(&self) {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.set_item(Self::GLOBAL_KEY, &self.global.to_string());
        }
    }

    /// Persist one level's best (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save_level(&self, level: usize) {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.set_item(&Self::level_key(level), &self.level(level).to_string());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(level_count: usize) -> Self {
        Self::new(level_count)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_global(&self) {}

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_level(&self, _level: usize) {}
}

#[cfg(target_arch = "wasm32")]
fn read_time(storage: &web_sys::Storage, key: &str) -> f32 {
    storage
        .get_item(key)
        .ok()
        .flatten()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|t| t.is_finite() && *t >= 0.0)
        .unwrap_or(BEST_TIME_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_sheet_is_all_sentinel() {
        let times = BestTimes::new(3);
        assert_eq!(times.global(), BEST_TIME_SENTINEL);
        for i in 0..3 {
            assert_eq!(times.level(i), BEST_TIME_SENTINEL);
        }
    }

    #[test]
    fn test_record_level_improves_only_downward() {
        let mut times = BestTimes::new(3);
        assert!(times.record_level(1, 42.5));
        assert_eq!(times.level(1), 42.5);

        // Slower run does not overwrite
        assert!(!times.record_level(1, 50.0));
        assert_eq!(times.level(1), 42.5);

        assert!(times.record_level(1, 30.0));
        assert_eq!(times.level(1), 30.0);
    }

    #[test]
    fn test_record_out_of_range_is_ignored() {
        let mut times = BestTimes::new(3);
        assert!(!times.record_level(7, 10.0));
        assert_eq!(times.level(7), BEST_TIME_SENTINEL);
    }

    #[test]
    fn test_global_record() {
        let mut times = BestTimes::new(3);
        assert!(times.record_global(90.0));
        assert!(!times.record_global(90.0));
        assert!(times.record_global(89.9));
        assert_eq!(times.global(), 89.9);
    }

    #[test]
    fn test_level_key_format() {
        assert_eq!(BestTimes::level_key(0), "level0BestTime");
        assert_eq!(BestTimes::level_key(2), "level2BestTime");
    }
}
