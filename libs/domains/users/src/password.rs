//! Argon2id password hashing.
//!
//! Hashes are PHC strings with a per-hash random salt. The cost parameters
//! come from [`HashingConfig`] so deployments can tune them without a rebuild.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher as _, SaltString},
    Algorithm, Argon2, Params, Version,
};
use core_config::{env_parse_or, ConfigError, FromEnv};

use crate::error::{UserError, UserResult};

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl FromEnv for HashingConfig {
    /// - PASSWORD_HASH_MEMORY_KIB: defaults to 19456
    /// - PASSWORD_HASH_ITERATIONS: defaults to 2
    /// - PASSWORD_HASH_PARALLELISM: defaults to 1
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            memory_kib: env_parse_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env_parse_or("PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: env_parse_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        })
    }
}

/// Salted one-way password hasher. `Default` uses argon2's default cost.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher, rejecting parameter combinations argon2 does not accept.
    pub fn new(config: HashingConfig) -> UserResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash on the current thread.
    pub fn hash(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    /// Hash on tokio's blocking pool so request tasks are not stalled.
    pub async fn hash_blocking(&self, password: &str) -> UserResult<String> {
        let hasher = self.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::PasswordHash(e.to_string()))?
    }

    /// Check a plaintext password against a stored PHC string.
    #[cfg(test)]
    pub(crate) fn verify(&self, password: &str, hash: &str) -> UserResult<bool> {
        use argon2::password_hash::{PasswordHash, PasswordVerifier};

        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
