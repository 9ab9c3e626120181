//! Achievement definitions, the persisted unlocked-set, and the section-visit
//! tracking that feeds it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How long an unlock toast stays on screen.
pub const TOAST_DURATION_MS: i32 = 5_000;
/// Delay before the first-visit unlock fires after page load.
pub const FIRST_VISIT_DELAY_MS: i32 = 2_000;
/// Distinct sections required for the `explorer` unlock.
pub const EXPLORER_SECTION_COUNT: usize = 6;
/// A section counts as visited once this much of it intersects the viewport.
pub const SECTION_VISIBILITY_THRESHOLD: f64 = 0.5;
/// Scroll fraction past which `scrollMaster` unlocks.
pub const SCROLL_MASTER_FRACTION: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub key: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        key: "firstVisit",
        icon: "assets/icons/hand.svg",
        title: "Welcome!",
        desc: "First visit to the portfolio",
    },
    AchievementDef {
        key: "explorer",
        icon: "assets/icons/map.svg",
        title: "Explorer",
        desc: "Visited all sections",
    },
    AchievementDef {
        key: "projectViewer",
        icon: "assets/icons/rocket.svg",
        title: "Project Enthusiast",
        desc: "Viewed projects section",
    },
    AchievementDef {
        key: "skillsViewer",
        icon: "assets/icons/tools.svg",
        title: "Skills Scout",
        desc: "Checked out skills",
    },
    AchievementDef {
        key: "contactViewer",
        icon: "assets/icons/mailbox.svg",
        title: "Networker",
        desc: "Visited contact section",
    },
    AchievementDef {
        key: "terminalUser",
        icon: "assets/icons/laptop.svg",
        title: "Terminal Master",
        desc: "Used the interactive terminal",
    },
    AchievementDef {
        key: "themeChanger",
        icon: "assets/icons/palette.svg",
        title: "Theme Master",
        desc: "Changed the theme",
    },
    AchievementDef {
        key: "scrollMaster",
        icon: "assets/icons/scroll.svg",
        title: "Scroll Master",
        desc: "Scrolled to the bottom",
    },
];

pub fn achievement(key: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.key == key)
}

/// The persisted unlocked-set. Serialized as a bare key list so the stored
/// value stays a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    unlocked: Vec<String>,
}

impl Ledger {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "achievements";

    pub fn is_unlocked(&self, key: &str) -> bool {
        self.unlocked.iter().any(|k| k == key)
    }

    /// Insert `key` into the unlocked-set. Returns `true` only when the key
    /// is a known achievement and was not already unlocked, which is the
    /// caller's cue to show the one notification this key will ever get.
    pub fn unlock(&mut self, key: &str) -> bool {
        if achievement(key).is_none() || self.is_unlocked(key) {
            return false;
        }
        self.unlocked.push(key.to_string());
        true
    }

    pub fn keys(&self) -> &[String] {
        &self.unlocked
    }

    /// Load the persisted unlocked-set (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(store) = crate::util::local_storage() {
            if let Ok(Some(raw)) = store.get_item(Self::STORAGE_KEY) {
                if let Ok(ledger) = serde_json::from_str::<Ledger>(&raw) {
                    log::info!("Loaded {} unlocked achievements", ledger.unlocked.len());
                    return ledger;
                }
            }
        }
        Self::default()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(store) = crate::util::local_storage() {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = store.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

/// Tracks which page sections have been seen at the visibility threshold.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    visited: HashSet<String>,
}

impl SectionTracker {
    /// Record a sighting of `section_id` and return the achievement keys the
    /// sighting earns. Repeat sightings are harmless; the ledger's
    /// idempotent unlock absorbs duplicates.
    pub fn record(&mut self, section_id: &str) -> Vec<&'static str> {
        self.visited.insert(section_id.to_string());
        let mut earned = Vec::new();
        match section_id {
            "projects" => earned.push("projectViewer"),
            "skills" => earned.push("skillsViewer"),
            "contact" => earned.push("contactViewer"),
            _ => {}
        }
        if self.visited.len() >= EXPLORER_SECTION_COUNT {
            earned.push("explorer");
        }
        earned
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_is_idempotent() {
        let mut ledger = Ledger::default();
        assert!(ledger.unlock("terminalUser"));
        for _ in 0..5 {
            assert!(!ledger.unlock("terminalUser"));
        }
        assert_eq!(ledger.keys(), ["terminalUser"]);
    }

    #[test]
    fn unknown_keys_never_unlock() {
        let mut ledger = Ledger::default();
        assert!(!ledger.unlock("speedrunner"));
        assert!(ledger.keys().is_empty());
    }

    #[test]
    fn ledger_persists_as_a_plain_key_list() {
        let mut ledger = Ledger::default();
        ledger.unlock("firstVisit");
        ledger.unlock("themeChanger");
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"["firstVisit","themeChanger"]"#);
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn every_def_resolves_by_key() {
        for def in ACHIEVEMENTS {
            assert_eq!(achievement(def.key).map(|d| d.key), Some(def.key));
        }
        assert!(achievement("nope").is_none());
    }

    #[test]
    fn six_distinct_sections_earn_explorer() {
        let mut tracker = SectionTracker::default();
        let sections = ["home", "about", "projects", "skills", "achievements", "contact"];
        let mut earned_explorer = false;
        for (i, id) in sections.iter().enumerate() {
            let earned = tracker.record(id);
            if i < sections.len() - 1 {
                assert!(
                    !earned.contains(&"explorer"),
                    "explorer unlocked after only {} sections",
                    i + 1
                );
            } else {
                earned_explorer = earned.contains(&"explorer");
            }
        }
        assert!(earned_explorer);
    }

    #[test]
    fn repeat_visits_do_not_count_toward_explorer() {
        let mut tracker = SectionTracker::default();
        for _ in 0..10 {
            for id in ["home", "about", "projects", "skills", "achievements"] {
                let earned = tracker.record(id);
                assert!(!earned.contains(&"explorer"));
            }
        }
        assert_eq!(tracker.visited_count(), 5);
    }

    #[test]
    fn section_visits_map_to_their_achievements() {
        let mut tracker = SectionTracker::default();
        assert_eq!(tracker.record("projects"), vec!["projectViewer"]);
        assert_eq!(tracker.record("skills"), vec!["skillsViewer"]);
        assert_eq!(tracker.record("contact"), vec!["contactViewer"]);
        assert!(tracker.record("about").is_empty());
    }
}
