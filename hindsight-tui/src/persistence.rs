//! UI preference persistence — JSON save/load across restarts.
//!
//! Only view preferences persist. Server entities (results, metrics) are
//! never written to disk; they are re-fetched on every launch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::Panel;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub filter_code: Option<String>,
    pub active_panel: Panel,
    pub eval_window_days: u32,
    pub batch_limit: Option<u32>,
    pub force: bool,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            filter_code: None,
            active_panel: Panel::Results,
            eval_window_days: 30,
            batch_limit: None,
            force: false,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &crate::app::AppState) -> PersistedState {
    PersistedState {
        filter_code: app.filter_code.clone(),
        active_panel: app.active_panel,
        eval_window_days: app.run.eval_window_days,
        batch_limit: app.run.batch_limit,
        force: app.run.force,
        welcome_dismissed: app.overlay != crate::app::Overlay::Welcome,
    }
}

/// Apply persisted state to AppState. Runs before the initial fetches so the
/// restored filter applies to them.
pub fn apply(app: &mut crate::app::AppState, state: PersistedState) {
    app.filter_code = state.filter_code;
    app.active_panel = state.active_panel;
    app.run.eval_window_days = state.eval_window_days;
    app.run.batch_limit = state.batch_limit;
    app.run.force = state.force;
    if !state.welcome_dismissed {
        app.overlay = crate::app::Overlay::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = std::env::temp_dir().join("hindsight_persist_test");
        let path = dir.join("state.json");

        let state = PersistedState {
            filter_code: Some("AAPL".into()),
            welcome_dismissed: true,
            eval_window_days: 60,
            ..PersistedState::default()
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.filter_code.as_deref(), Some("AAPL"));
        assert!(loaded.welcome_dismissed);
        assert_eq!(loaded.eval_window_days, 60);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert!(loaded.filter_code.is_none());
        assert!(!loaded.welcome_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = std::env::temp_dir().join("hindsight_persist_corrupt");
        let path = dir.join("state.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.filter_code.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
