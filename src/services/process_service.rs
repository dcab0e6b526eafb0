use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::{IDLE_PROCESS_BASELINE, SCRIPT_PROCESS_COUNT};
use crate::error::{AppError, AppResult};
use crate::models::JobPhase;
use crate::services::HostScripts;

/// Source of the current job phase.
#[async_trait]
pub trait JobProbe: Send + Sync {
    async fn job_phase(&self) -> AppResult<JobPhase>;
}

/// Infers the phase from how many `wget` and `virt-install` processes exist.
///
/// An idle host runs exactly [`IDLE_PROCESS_BASELINE`] of each. Any other
/// `wget` count means an image download is under way; otherwise any other
/// `virt-install` count means VMs are being created. Unrelated processes with
/// the same names will skew the result.
#[derive(Debug, Clone)]
pub struct ProcessCountProbe {
    scripts: HostScripts,
}

impl ProcessCountProbe {
    pub fn new(scripts: HostScripts) -> Self {
        Self { scripts }
    }

    pub async fn count_processes(&self, name: &str) -> AppResult<u32> {
        let out = self.scripts.output(SCRIPT_PROCESS_COUNT, &[name]).await?;
        parse_count(&out).ok_or_else(|| {
            AppError::external(
                SCRIPT_PROCESS_COUNT,
                format!("non-numeric output {:?} for {}", out.trim(), name),
            )
        })
    }
}

#[async_trait]
impl JobProbe for ProcessCountProbe {
    async fn job_phase(&self) -> AppResult<JobPhase> {
        let wget = self.count_processes("wget").await?;
        let virt_install = self.count_processes("virt-install").await?;
        let phase = phase_from_counts(wget, virt_install);
        tracing::debug!(wget, virt_install, %phase, "Computed job phase");
        Ok(phase)
    }
}

pub fn phase_from_counts(wget: u32, virt_install: u32) -> JobPhase {
    if wget != IDLE_PROCESS_BASELINE {
        JobPhase::Downloading
    } else if virt_install != IDLE_PROCESS_BASELINE {
        JobPhase::Creating
    } else {
        JobPhase::Idle
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Reads the phase from a status file kept up to date by the creation script.
///
/// The script writes `downloading` or `creating` while it works and removes
/// the file (or writes `idle`) when it finishes. A missing file means idle.
#[derive(Debug, Clone)]
pub struct SentinelProbe {
    path: PathBuf,
}

impl SentinelProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobProbe for SentinelProbe {
    async fn job_phase(&self) -> AppResult<JobPhase> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(JobPhase::Idle),
            Err(e) => return Err(AppError::Io(e)),
        };
        JobPhase::from_keyword(&contents).ok_or_else(|| {
            AppError::external(
                self.path.display().to_string(),
                format!("unknown job status {:?}", contents.trim()),
            )
        })
    }
}
