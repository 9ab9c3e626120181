//! Visual theme selection, applied as a `data-theme` attribute on the root
//! element and persisted to LocalStorage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Retro,
    Cyberpunk,
    Vaporwave,
    Matrix,
    Gameboy,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Retro,
        Theme::Cyberpunk,
        Theme::Vaporwave,
        Theme::Matrix,
        Theme::Gameboy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Retro => "retro",
            Theme::Cyberpunk => "cyberpunk",
            Theme::Vaporwave => "vaporwave",
            Theme::Matrix => "matrix",
            Theme::Gameboy => "gameboy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "retro" => Some(Theme::Retro),
            "cyberpunk" => Some(Theme::Cyberpunk),
            "vaporwave" => Some(Theme::Vaporwave),
            "matrix" => Some(Theme::Matrix),
            "gameboy" => Some(Theme::Gameboy),
            _ => None,
        }
    }

    /// Comma-separated allow-list for user-facing error messages.
    pub fn allow_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "portfolio-theme";

    /// Load the persisted theme (WASM only); falls back to the default.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(store) = crate::util::local_storage() {
            if let Ok(Some(raw)) = store.get_item(Self::STORAGE_KEY) {
                if let Some(theme) = Theme::from_str(&raw) {
                    return theme;
                }
            }
        }
        Self::default()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(store) = crate::util::local_storage() {
            let _ = store.set_item(Self::STORAGE_KEY, self.as_str());
        }
    }

    /// Set `data-theme` on the document element so the stylesheet's theme
    /// variables take effect.
    #[cfg(target_arch = "wasm32")]
    pub fn apply(&self) {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        if let Some(root) = root {
            let _ = root.set_attribute("data-theme", self.as_str());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}

    #[cfg(not(target_arch = "wasm32"))]
    pub fn apply(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(Theme::from_str("CYBERPUNK"), Some(Theme::Cyberpunk));
        assert_eq!(Theme::from_str("GameBoy"), Some(Theme::Gameboy));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Theme::from_str("neon"), None);
        assert_eq!(Theme::from_str(""), None);
    }

    #[test]
    fn allow_list_names_every_theme() {
        let list = Theme::allow_list();
        for theme in Theme::ALL {
            assert!(list.contains(theme.as_str()));
        }
    }
}
