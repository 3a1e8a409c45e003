use core_config::bus::BusConfig;
use core_config::server::ServerConfig;
use core_config::FromEnv;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub bus: BusConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let bus = BusConfig::from_env()?; // Required - will fail if BUS_URL is not set

        Ok(Self {
            server,
            bus,
            environment,
        })
    }
}
