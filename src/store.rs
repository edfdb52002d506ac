//! On-disk operator state: `.botdash/config.json` and `.botdash/session.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::session::SessionStore;

const STORE_DIR: &str = ".botdash";

const DEFAULT_COMMIT_TIMEOUT_MS: u64 = 15_000;

fn default_commit_timeout_ms() -> Option<u64> {
    Some(DEFAULT_COMMIT_TIMEOUT_MS)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashConfig {
    pub version: u32,

    /// Base URL of the management API, e.g. `http://localhost:5000`.
    pub api_url: String,

    /// Per-request timeout for API calls.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    /// Deadline for a whole commit batch; `null` waits indefinitely.
    #[serde(default = "default_commit_timeout_ms")]
    pub commit_timeout_ms: Option<u64>,
}

impl DashConfig {
    pub fn new(api_url: &str) -> Self {
        Self {
            version: 1,
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout_ms: None,
            commit_timeout_ms: default_commit_timeout_ms(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn commit_timeout(&self) -> Option<Duration> {
        self.commit_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Clone, Debug)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    pub fn state_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn init(base: &Path, api_url: &str, force: bool) -> Result<Self> {
        let root = Self::state_dir(base);
        if root.join("config.json").exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                root.display()
            ));
        }
        fs::create_dir_all(&root).with_context(|| format!("create {}", root.display()))?;

        let store = Self { root };
        store.write_config(&DashConfig::new(api_url))?;
        Ok(store)
    }

    pub fn open(base: &Path) -> Result<Self> {
        let root = Self::state_dir(base);
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `botdash init`)",
                STORE_DIR,
                root.display()
            ));
        }
        Ok(Self { root })
    }

    /// Walks up from `start` to the nearest directory holding `.botdash`.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if Self::state_dir(dir).is_dir() {
                return Self::open(dir);
            }
        }
        Err(anyhow!("No {} directory found (run `botdash init`)", STORE_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<DashConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: DashConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &DashConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(self.root.join("session.json"))
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
