use std::collections::HashMap;
use std::path::Path;

use hex::encode as hex_encode;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::{Sha256, Sha512};

use crate::config::{
    DEFAULT_PBKDF2_ITERATIONS, DEFAULT_SCRYPT_N, DEFAULT_SCRYPT_P, DEFAULT_SCRYPT_R, SCRYPT_KEY_LEN,
};
use crate::error::{AppError, AppResult};

/// Username to password-hash map, loaded once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read credential file {}: {}", path.display(), e))
        })?;
        let store = Self::parse(&text)?;
        tracing::info!(path = %path.display(), users = store.len(), "Loaded credentials");
        Ok(store)
    }

    /// Parse `username=hash` lines. Blank lines are skipped.
    pub fn parse(text: &str) -> AppResult<Self> {
        let mut users = HashMap::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (user, hash) = line.split_once('=').ok_or_else(|| {
                AppError::Config(format!("credential line {} has no '=' separator", idx + 1))
            })?;
            if !is_supported_hash(hash) {
                tracing::warn!(user, "Unsupported password hash method; this user cannot log in");
            }
            users.insert(user.to_string(), hash.to_string());
        }
        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn usernames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.users.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the username when the password matches its stored hash.
    pub fn verify(&self, username: &str, password: &str) -> Option<String> {
        let stored = self.users.get(username)?;
        if verify_password(stored, password) {
            Some(username.to_string())
        } else {
            None
        }
    }
}

pub fn generate_password_hash(password: &str) -> String {
    let mut salt_bytes = [0u8; 12];
    rand::rngs::OsRng.fill_bytes(&mut salt_bytes);
    let salt = hex_encode(salt_bytes);
    let mut dk = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), DEFAULT_PBKDF2_ITERATIONS, &mut dk);
    let hash_hex = hex_encode(dk);
    format!("pbkdf2:sha256:{}${}${}", DEFAULT_PBKDF2_ITERATIONS, salt, hash_hex)
}

/// Check a candidate against a werkzeug-style hash: either
/// `pbkdf2:<digest>[:<iterations>]$salt$hash` or `scrypt[:N:r:p]$salt$hash`.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let Some((method, salt, expected_hash)) = split_hash(stored) else {
        return false;
    };
    let Some(method) = parse_method(method) else {
        return false;
    };
    let computed = match method {
        HashMethod::Pbkdf2(Digest::Sha256, iterations) => {
            let mut dk = [0u8; 32];
            pbkdf2_hmac::<Sha256>(candidate.as_bytes(), salt.as_bytes(), iterations, &mut dk);
            hex_encode(dk)
        }
        HashMethod::Pbkdf2(Digest::Sha512, iterations) => {
            let mut dk = [0u8; 64];
            pbkdf2_hmac::<Sha512>(candidate.as_bytes(), salt.as_bytes(), iterations, &mut dk);
            hex_encode(dk)
        }
        HashMethod::Scrypt(params) => {
            let mut dk = [0u8; SCRYPT_KEY_LEN];
            if let Err(e) = scrypt::scrypt(candidate.as_bytes(), salt.as_bytes(), &params, &mut dk) {
                tracing::error!(%e, "scrypt derivation failed");
                return false;
            }
            hex_encode(dk)
        }
    };
    constant_time_eq(&computed, expected_hash)
}

enum Digest {
    Sha256,
    Sha512,
}

enum HashMethod {
    Pbkdf2(Digest, u32),
    Scrypt(scrypt::Params),
}

fn is_supported_hash(stored: &str) -> bool {
    split_hash(stored)
        .and_then(|(method, _, _)| parse_method(method))
        .is_some()
}

fn split_hash(stored: &str) -> Option<(&str, &str, &str)> {
    let mut parts = stored.splitn(3, '$');
    let method = parts.next()?;
    let salt = parts.next()?;
    let hash = parts.next()?;
    Some((method, salt, hash))
}

fn parse_method(method: &str) -> Option<HashMethod> {
    let mut parts = method.split(':');
    match parts.next()? {
        "pbkdf2" => {
            let digest = match parts.next().unwrap_or("sha256") {
                "sha256" => Digest::Sha256,
                "sha512" => Digest::Sha512,
                _ => return None,
            };
            let iterations = match parts.next() {
                Some(raw) => raw.parse::<u32>().ok().filter(|n| *n > 0)?,
                None => DEFAULT_PBKDF2_ITERATIONS,
            };
            Some(HashMethod::Pbkdf2(digest, iterations))
        }
        "scrypt" => {
            let (n, r, p) = match (parts.next(), parts.next(), parts.next()) {
                (None, _, _) => (DEFAULT_SCRYPT_N, DEFAULT_SCRYPT_R, DEFAULT_SCRYPT_P),
                (Some(n), Some(r), Some(p)) => (n.parse().ok()?, r.parse().ok()?, p.parse().ok()?),
                _ => return None,
            };
            scrypt_params(n, r, p)
        }
        _ => None,
    }
}

// N is stored as the cost itself; the crate takes its base-2 logarithm.
fn scrypt_params(n: u64, r: u32, p: u32) -> Option<HashMethod> {
    if n < 2 || !n.is_power_of_two() {
        return None;
    }
    let log_n = u8::try_from(n.trailing_zeros()).ok()?;
    scrypt::Params::new(log_n, r, p, SCRYPT_KEY_LEN)
        .ok()
        .map(HashMethod::Scrypt)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut v: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        v |= x ^ y;
    }
    v == 0
}
