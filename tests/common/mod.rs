use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

/// Token the dev server accepts without the OAuth round trip.
pub const DEV_TOKEN: &str = "dev";

/// A running `botdash-devserver`, killed on drop.
pub struct DevServer {
    pub base_url: String,
    pub token: String,
    child: Child,
    _scratch: tempfile::TempDir,
}

impl Drop for DevServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[allow(dead_code)]
impl DevServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn bearer(&self) -> String {
        bearer(&self.token)
    }
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Dev server with the built-in seed and no injected failures.
#[allow(dead_code)]
pub fn devserver() -> Result<DevServer> {
    Launch::default().spawn()
}

#[derive(Default)]
pub struct Launch {
    seed: Option<serde_json::Value>,
    fail_command: Option<String>,
}

#[allow(dead_code)]
impl Launch {
    /// Replaces the built-in guild, commands and channels.
    pub fn seed(mut self, seed: serde_json::Value) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Channel edits of `name` answer 500.
    pub fn fail_command(mut self, name: &str) -> Self {
        self.fail_command = Some(name.to_string());
        self
    }

    pub fn spawn(self) -> Result<DevServer> {
        let scratch = tempfile::tempdir().context("create devserver scratch dir")?;
        let addr_file = scratch.path().join("addr");

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_botdash-devserver"));
        cmd.arg("--addr")
            .arg("127.0.0.1:0")
            .arg("--addr-file")
            .arg(&addr_file)
            .arg("--dev-token")
            .arg(DEV_TOKEN);
        if let Some(seed) = &self.seed {
            let seed_file = write_seed(scratch.path(), seed)?;
            cmd.arg("--seed").arg(seed_file);
        }
        if let Some(name) = &self.fail_command {
            cmd.arg("--fail-command").arg(name);
        }

        let mut child = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("spawn botdash-devserver")?;

        let base_url = match wait_until_ready(&mut child, &addr_file) {
            Ok(url) => url,
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(err);
            }
        };

        Ok(DevServer {
            base_url,
            token: DEV_TOKEN.to_string(),
            child,
            _scratch: scratch,
        })
    }
}

fn write_seed(dir: &Path, seed: &serde_json::Value) -> Result<PathBuf> {
    let path = dir.join("seed.json");
    let bytes = serde_json::to_vec_pretty(seed).context("serialize seed")?;
    std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Polls for the bound address, then for `/healthz`; bails if the process exits.
fn wait_until_ready(child: &mut Child, addr_file: &Path) -> Result<String> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let probe = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .context("build readiness client")?;
    let mut base_url: Option<String> = None;

    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().context("poll devserver")? {
            anyhow::bail!("botdash-devserver exited early ({})", status);
        }

        if base_url.is_none() {
            base_url = std::fs::read_to_string(addr_file)
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(|addr| format!("http://{}", addr));
        }

        if let Some(url) = &base_url
            && probe
                .get(format!("{}/healthz", url))
                .send()
                .is_ok_and(|r| r.status().is_success())
        {
            return Ok(url.clone());
        }
        thread::sleep(Duration::from_millis(25));
    }

    anyhow::bail!(
        "botdash-devserver not ready (addr file {})",
        addr_file.display()
    )
}
