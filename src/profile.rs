//! # Feature: Assistant Profile
//!
//! The assistant's persisted identity: owner display name, gender pronoun
//! preference, and language preference, stored as key/value rows in a small
//! SQLite table. The optional registered-user identity lives only for the
//! lifetime of the instance. Missing or unreadable entries fall back to
//! literal defaults so a host without storage still gets a working profile.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with the three persisted keys

use anyhow::Result;
use log::info;
use sqlite::{Connection, State};

pub const DEFAULT_NAME: &str = "MPA";
pub const DEFAULT_GENDER: &str = "neutral";
pub const DEFAULT_LANGUAGE: &str = "en";

const KEY_NAME: &str = "name";
const KEY_GENDER: &str = "gender";
const KEY_LANGUAGE: &str = "language";

/// The assistant's mutable identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantProfile {
    pub user_name: String,
    pub gender: String,
    pub language: String,
    /// The single caller identity this instance answers to, when locked.
    pub registered_user: Option<String>,
}

impl Default for AssistantProfile {
    fn default() -> Self {
        AssistantProfile {
            user_name: DEFAULT_NAME.to_string(),
            gender: DEFAULT_GENDER.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            registered_user: None,
        }
    }
}

/// Key/value persistence for the profile fields.
pub struct ProfileStore {
    connection: Connection,
}

impl ProfileStore {
    pub fn open(database_path: &str) -> Result<Self> {
        let connection = sqlite::open(database_path)?;
        connection.execute(
            "CREATE TABLE IF NOT EXISTS profile (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        )?;
        info!("Profile store initialized at: {}", database_path);
        Ok(ProfileStore { connection })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let mut statement = self
            .connection
            .prepare("SELECT value FROM profile WHERE key = ?")?;
        statement.bind((1, key))?;

        if let Ok(State::Row) = statement.next() {
            Ok(Some(statement.read::<String, _>("value")?))
        } else {
            Ok(None)
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut statement = self.connection.prepare(
            "INSERT OR REPLACE INTO profile (key, value, updated_at)
             VALUES (?, ?, CURRENT_TIMESTAMP)",
        )?;
        statement.bind((1, key))?;
        statement.bind((2, value))?;
        statement.next()?;
        Ok(())
    }

    /// Load a full profile, substituting defaults for missing or empty
    /// entries. The registered user is never persisted.
    pub fn load_profile(&self) -> AssistantProfile {
        let read = |key: &str, fallback: &str| {
            self.get(key)
                .ok()
                .flatten()
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        AssistantProfile {
            user_name: read(KEY_NAME, DEFAULT_NAME),
            gender: read(KEY_GENDER, DEFAULT_GENDER),
            language: read(KEY_LANGUAGE, DEFAULT_LANGUAGE),
            registered_user: None,
        }
    }

    pub fn save_name(&self, name: &str) -> Result<()> {
        self.set(KEY_NAME, name)
    }

    pub fn save_gender(&self, gender: &str) -> Result<()> {
        self.set(KEY_GENDER, gender)
    }

    pub fn save_language(&self, language: &str) -> Result<()> {
        self.set(KEY_LANGUAGE, language)
    }
}
