use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_users::HashingConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub hashing: HashingConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let hashing = HashingConfig::from_env()?; // Falls back to argon2 defaults

        Ok(Self {
            app: app_info!(),
            server,
            hashing,
            environment,
        })
    }
}
