use shared_storage::ClientStore;
use shared_utils::store::PersistedStore;

use crate::models::ThemePreference;

const THEME_STORE: &str = "theme-storage";

/// Light/dark preference, persisted across restarts.
pub struct ThemeService {
    preference: PersistedStore<ThemePreference>,
}

impl ThemeService {
    pub fn new(client: ClientStore) -> Self {
        Self {
            preference: PersistedStore::open(client, THEME_STORE, ThemePreference::Light),
        }
    }

    pub fn get(&self) -> ThemePreference {
        self.preference.get()
    }

    pub fn set(&self, theme: ThemePreference) -> ThemePreference {
        self.preference.update(|current| {
            *current = theme;
            *current
        })
    }

    pub fn toggle(&self) -> ThemePreference {
        self.preference.update(|current| {
            *current = current.toggled();
            *current
        })
    }
}
