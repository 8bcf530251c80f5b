//! Persistent session state: bearer token, signed-in user profile and theme preference.
//! Keep the public surface thin and split implementation across sub-modules.

mod store;
mod theme;

pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use theme::Theme;

use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::models::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const THEME_KEY: &str = "theme";

/// Typed view over a key-value backend. Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("has_token", &self.get_token().is_some()).finish()
    }
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self { Self { backend } }

    pub fn in_memory() -> Self { Self::new(Arc::new(MemoryStore::default())) }

    pub fn file(path: impl Into<std::path::PathBuf>) -> Self { Self::new(Arc::new(FileStore::open(path))) }

    pub fn get_token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<()> { self.backend.set(TOKEN_KEY, token) }

    pub fn remove_token(&self) -> Result<()> { self.backend.remove(TOKEN_KEY) }

    /// Stored profile, or the empty record when nothing (or garbage) is stored.
    pub fn get_user(&self) -> User {
        let Some(raw) = self.backend.get(USER_KEY) else { return User::default(); };
        match serde_json::from_str::<User>(&raw) {
            Ok(u) => u,
            Err(e) => {
                warn!(target: "session", "ignoring malformed stored user profile: {}", e);
                User::default()
            }
        }
    }

    pub fn set_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.backend.set(USER_KEY, &raw)
    }

    pub fn remove_user(&self) -> Result<()> { self.backend.remove(USER_KEY) }

    /// Drop token and profile together. Theme preference survives.
    pub fn clear(&self) -> Result<()> {
        self.remove_token()?;
        self.remove_user()
    }

    pub fn theme(&self) -> Theme {
        self.backend.get(THEME_KEY).and_then(|s| Theme::parse(&s)).unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> { self.backend.set(THEME_KEY, theme.as_str()) }

    /// Flip between light and dark, persist, and return the new theme.
    pub fn toggle_theme(&self) -> Result<Theme> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
