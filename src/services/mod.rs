pub mod create_service;
pub mod credential_service;
pub mod host_scripts;
pub mod process_service;
pub mod vm_service;

// Re-export commonly used types
pub use credential_service::{generate_password_hash, verify_password, CredentialStore};
pub use host_scripts::HostScripts;
pub use process_service::{phase_from_counts, JobProbe, ProcessCountProbe, SentinelProbe};
pub use vm_service::{partition_deletions, split_vm_listing, CreationRequest, ScriptVmCommands, VmCommands};
