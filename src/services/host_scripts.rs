use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::error::{AppError, AppResult};

/// Directory holding the host scripts that do the actual VM work.
#[derive(Debug, Clone)]
pub struct HostScripts {
    dir: PathBuf,
}

impl HostScripts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, script: &str) -> PathBuf {
        self.dir.join(script)
    }

    pub fn command(&self, script: &str) -> Command {
        let mut cmd = Command::new(self.path(script));
        cmd.stdin(Stdio::null());
        cmd
    }

    /// Run a script to completion and return its stdout; non-zero exit is an error.
    pub async fn output(&self, script: &str, args: &[&str]) -> AppResult<String> {
        tracing::debug!(script, ?args, "Running host script");
        let output = self
            .command(script)
            .args(args)
            .output()
            .await
            .map_err(|e| AppError::external(script, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::external(
                script,
                format!("{}: {}", output.status, stderr.trim()),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Scripts that are missing from the directory.
    pub fn missing(&self, scripts: &[&str]) -> Vec<String> {
        scripts
            .iter()
            .filter(|s| !self.path(s).is_file())
            .map(|s| s.to_string())
            .collect()
    }
}
