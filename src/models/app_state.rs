use std::collections::HashSet;
use std::sync::Arc;

use crate::services::{CredentialStore, JobProbe, VmCommands};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialStore>,
    /// Hosts that must never be deleted (e.g. shared masters).
    pub protected_hosts: Arc<HashSet<String>>,
    pub vms: Arc<dyn VmCommands>,
    pub probe: Arc<dyn JobProbe>,
    pub refresh_seconds: u64,
}
