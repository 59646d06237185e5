//! Materializing the specification repository locally.

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};

/// Something that can place a specification tree at a local path.
pub trait SpecSource {
    /// Populate `dest` with the specification repository, replacing any previous contents.
    fn materialize(&self, dest: &Path) -> SyncResult<()>;
}

/// Shallow git clone of a remote repository.
#[derive(Debug, Clone)]
pub struct GitSource {
    url: String,
    depth: u32,
}

impl GitSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: 1,
        }
    }

    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check if Git is available on the system.
    pub fn is_git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl SpecSource for GitSource {
    fn materialize(&self, dest: &Path) -> SyncResult<()> {
        if !Self::is_git_available() {
            return Err(SyncError::Fetch("git is not installed or not on PATH".to_string()));
        }

        if dest.exists() {
            info!("Deleting {}...", dest.display());
            fs::remove_dir_all(dest)?;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        info!("Cloning {} into {}", self.url, dest.display());
        let mut child = Command::new("git")
            .args(["clone", "--progress"])
            .arg(format!("--depth={}", self.depth))
            .arg(&self.url)
            .arg(dest)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SyncError::Fetch(format!("Failed to run git clone: {}", e)))?;

        let relayed = match child.stderr.take() {
            Some(stderr) => relay_progress(stderr, &mut ProgressLog::default()),
            None => Ok(String::new()),
        };
        let last_line = match relayed {
            Ok(line) => line,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e.into());
            }
        };

        let status = child.wait()?;
        if !status.success() {
            return Err(SyncError::Fetch(format!(
                "git clone exited with {}: {}",
                status, last_line
            )));
        }

        info!("Cloned");
        Ok(())
    }
}

/// Log git's progress output and return the last message seen.
fn relay_progress(reader: impl Read, progress: &mut ProgressLog) -> io::Result<String> {
    let mut last_line = String::new();
    // git rewrites progress lines in place with carriage returns
    for chunk in BufReader::new(reader).split(b'\r') {
        let chunk = chunk?;
        for line in String::from_utf8_lossy(&chunk).lines() {
            if progress.report(line) {
                last_line = line.trim().to_string();
            }
        }
    }
    Ok(last_line)
}

/// Logs progress messages, suppressing consecutive repeats.
#[derive(Debug, Default)]
struct ProgressLog {
    last: String,
}

impl ProgressLog {
    /// Returns true if the message was logged.
    fn report(&mut self, message: &str) -> bool {
        let message = message.trim();
        if message.is_empty() || message == self.last {
            return false;
        }
        // percentage updates share a prefix; only log when the phase changes
        let phase = message.split(':').next().unwrap_or(message);
        let same_phase = self.last.split(':').next() == Some(phase);
        self.last = message.to_string();
        if same_phase && !message.contains("done") {
            debug!("{}", message);
        } else {
            info!("{}", message);
        }
        true
    }
}
