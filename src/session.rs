//! Operator session: the API token and the Discord user it belongs to.
//!
//! A [`Session`] is an explicit value handed to whatever needs it; the only
//! persistence is a [`SessionStore`] file chosen by the caller.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::model::User;
use crate::store::write_atomic;

/// API tokens are issued for seven days.
pub const SESSION_LIFETIME: time::Duration = time::Duration::days(7);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,

    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,

    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn begin(token: String, user: User) -> Self {
        Self::begin_at(token, user, OffsetDateTime::now_utc())
    }

    pub fn begin_at(token: String, user: User, now: OffsetDateTime) -> Self {
        Self {
            token,
            user,
            started_at: now,
            expires_at: now + SESSION_LIFETIME,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }

    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }

    /// Ends the session and removes it from `store`.
    pub fn teardown(self, store: &SessionStore) -> Result<()> {
        store.clear()?;
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path).context("read session.json")?;
        let session: Session = serde_json::from_slice(&bytes).context("parse session.json")?;
        Ok(Some(session))
    }

    /// Like [`SessionStore::load`] but fails when there is no live session.
    pub fn require(&self) -> Result<Session> {
        let Some(session) = self.load()? else {
            anyhow::bail!("not logged in (run `botdash login`)");
        };
        if session.is_expired() {
            anyhow::bail!("session expired (run `botdash login`)");
        }
        Ok(session)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(session).context("serialize session")?;
        write_atomic(&self.path, &bytes).context("write session.json")?;
        Ok(())
    }

    /// Returns whether a session file was removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("remove {}", self.path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
