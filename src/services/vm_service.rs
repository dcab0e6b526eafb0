use std::collections::HashSet;
use std::process::Stdio;

use async_trait::async_trait;

use crate::config::{SCRIPT_CREATE_VMS, SCRIPT_DELETE_VMS, SCRIPT_LIST_VMS};
use crate::error::{AppError, AppResult};
use crate::services::HostScripts;

/// Arguments of a VM creation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationRequest {
    pub url: String,
    pub num_of_nodes: String,
    pub prefix: String,
}

/// Operations on the host's VMs.
#[async_trait]
pub trait VmCommands: Send + Sync {
    /// Names of the VMs currently running.
    async fn list_running(&self) -> AppResult<Vec<String>>;

    /// Launch creation in the background. Returns once the job is started;
    /// its outcome is never reported back.
    async fn start_creation(&self, request: &CreationRequest) -> AppResult<()>;

    /// Delete the named VMs and wait for the script to finish.
    async fn delete(&self, vm_ids: &[String]) -> AppResult<()>;
}

#[derive(Debug, Clone)]
pub struct ScriptVmCommands {
    scripts: HostScripts,
}

impl ScriptVmCommands {
    pub fn new(scripts: HostScripts) -> Self {
        Self { scripts }
    }
}

#[async_trait]
impl VmCommands for ScriptVmCommands {
    async fn list_running(&self) -> AppResult<Vec<String>> {
        let out = self.scripts.output(SCRIPT_LIST_VMS, &[]).await?;
        Ok(split_vm_listing(&out))
    }

    async fn start_creation(&self, request: &CreationRequest) -> AppResult<()> {
        let mut child = self
            .scripts
            .command(SCRIPT_CREATE_VMS)
            .arg(&request.url)
            .arg(&request.num_of_nodes)
            .arg(&request.prefix)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AppError::external(SCRIPT_CREATE_VMS, e.to_string()))?;

        let pid = child.id();
        tracing::info!(
            ?pid,
            url = %request.url,
            num_of_nodes = %request.num_of_nodes,
            prefix = %request.prefix,
            "Started VM creation"
        );

        // Detached: the reaper only logs, nobody waits on it.
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    tracing::info!(?pid, "VM creation script finished");
                }
                Ok(status) => {
                    tracing::warn!(?pid, %status, "VM creation script exited with failure");
                }
                Err(e) => {
                    tracing::error!(?pid, %e, "Failed to wait for VM creation script");
                }
            }
        });
        Ok(())
    }

    async fn delete(&self, vm_ids: &[String]) -> AppResult<()> {
        tracing::info!(?vm_ids, "Deleting VMs");
        let status = self
            .scripts
            .command(SCRIPT_DELETE_VMS)
            .args(vm_ids)
            .status()
            .await
            .map_err(|e| AppError::external(SCRIPT_DELETE_VMS, e.to_string()))?;
        if !status.success() {
            tracing::warn!(%status, ?vm_ids, "Delete script reported failure");
        }
        Ok(())
    }
}

/// Split the listing script's output into VM names.
pub fn split_vm_listing(out: &str) -> Vec<String> {
    out.split_whitespace().map(str::to_string).collect()
}

/// Separate a deletion request into names that may be deleted and protected
/// names that must be kept. Order of the request is preserved.
pub fn partition_deletions(
    requested: &[String],
    protected_hosts: &HashSet<String>,
) -> (Vec<String>, Vec<String>) {
    requested
        .iter()
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .partition(|name| !protected_hosts.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_yields_no_vms() {
        assert!(split_vm_listing("").is_empty());
        assert!(split_vm_listing(" \n\t").is_empty());
    }

    #[test]
    fn listing_splits_on_any_whitespace() {
        assert_eq!(
            split_vm_listing("host-1\nhost-2  host-3\n"),
            vec!["host-1", "host-2", "host-3"]
        );
    }

    #[test]
    fn protected_names_are_held_back_in_order() {
        let protected: HashSet<String> = ["master-0".to_string()].into_iter().collect();
        let requested = vec![
            "host-2".to_string(),
            "master-0".to_string(),
            "host-1".to_string(),
        ];
        let (allowed, refused) = partition_deletions(&requested, &protected);
        assert_eq!(allowed, vec!["host-2", "host-1"]);
        assert_eq!(refused, vec!["master-0"]);
    }
}
