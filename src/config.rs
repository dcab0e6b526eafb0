use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_USERS_FILE: &str = "../users";
pub const DEFAULT_SCRIPTS_DIR: &str = "./host_scripts";
pub const DEFAULT_REFRESH_SECONDS: u64 = 10;
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 600_000;

// scrypt parameters werkzeug uses when a hash omits them
pub const DEFAULT_SCRYPT_N: u64 = 32_768;
pub const DEFAULT_SCRYPT_R: u32 = 8;
pub const DEFAULT_SCRYPT_P: u32 = 1;
pub const SCRYPT_KEY_LEN: usize = 64;

// Form defaults
pub const DEFAULT_NUM_OF_NODES: &str = "3";
pub const DEFAULT_NODE_PREFIX: &str = "unset";

/// Number of `wget` / `virt-install` processes present on an idle host.
pub const IDLE_PROCESS_BASELINE: u32 = 2;

// External host scripts
pub const SCRIPT_LIST_VMS: &str = "get_running_vms.sh";
pub const SCRIPT_PROCESS_COUNT: &str = "get_running_process_count.sh";
pub const SCRIPT_CREATE_VMS: &str = "create_vms_from_iso_path.sh";
pub const SCRIPT_DELETE_VMS: &str = "delete_vms.sh";

pub const ALL_SCRIPTS: &[&str] = &[
    SCRIPT_LIST_VMS,
    SCRIPT_PROCESS_COUNT,
    SCRIPT_CREATE_VMS,
    SCRIPT_DELETE_VMS,
];

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_host() -> String {
    env::var("HOST")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn get_users_file() -> PathBuf {
    path_from_env("USERS_FILE", DEFAULT_USERS_FILE)
}

pub fn get_scripts_dir() -> PathBuf {
    path_from_env("SCRIPTS_DIR", DEFAULT_SCRIPTS_DIR)
}

pub fn get_job_status_file() -> Option<PathBuf> {
    env::var("JOB_STATUS_FILE")
        .ok()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

pub fn get_refresh_seconds() -> u64 {
    env::var("AUTO_REFRESH_SECONDS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_REFRESH_SECONDS)
}

pub fn get_protected_hosts() -> HashSet<String> {
    parse_host_list(&env::var("PROTECTED_HOSTS").unwrap_or_default())
}

/// Split a comma-separated host list, dropping blank entries.
pub fn parse_host_list(raw: &str) -> HashSet<String> {
    let mut set = HashSet::new();
    if !raw.trim().is_empty() {
        for name in raw.split(',') {
            let t = name.trim();
            if !t.is_empty() {
                set.insert(t.to_string());
            }
        }
    }
    set
}

fn path_from_env(key: &str, default: &str) -> PathBuf {
    let raw = env::var(key).unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        PathBuf::from(default)
    } else {
        PathBuf::from(trimmed)
    }
}
