use std::{env, fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        if let Ok(path) = env::var("GARDEN_CONFIG") {
            return Self::from_path(Path::new(&path));
        }

        let project_root = env::var("GARDEN_ROOT").unwrap_or_else(|_| ".".to_string());
        let default_path = Path::new(&project_root).join("config/garden.toml");
        if default_path.exists() {
            return Self::from_path(&default_path);
        }

        let example_path = Path::new(&project_root).join("config/garden.example.toml");
        if example_path.exists() {
            tracing::warn!("Using example configuration at {:?}", example_path);
            return Self::from_path(&example_path);
        }

        Ok(Self::default())
    }

    fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        Self::parse(&contents).with_context(|| format!("invalid config: {:?}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "BridgeConfig::default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "BridgeConfig::default_max_clients")]
    pub max_clients: usize,
}

impl BridgeConfig {
    fn default_listen_addr() -> String {
        "127.0.0.1:7878".into()
    }
    fn default_max_clients() -> usize {
        4
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            max_clients: Self::default_max_clients(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "SimulationConfig::default_pet_name")]
    pub pet_name: String,
    #[serde(default = "SimulationConfig::default_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "SimulationConfig::default_interval_ms")]
    pub cooldown_interval_ms: u64,
    #[serde(default = "SimulationConfig::default_interval_ms")]
    pub broadcast_interval_ms: u64,
}

impl SimulationConfig {
    fn default_pet_name() -> String {
        "Bloom".into()
    }
    fn default_interval_ms() -> u64 {
        1000
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Cooldowns are counted in seconds, so anything other than 1000ms here
    /// speeds up or slows down every cooldown.
    pub fn cooldown_interval(&self) -> Duration {
        Duration::from_millis(self.cooldown_interval_ms.max(1))
    }

    pub fn broadcast_interval(&self) -> Duration {
        Duration::from_millis(self.broadcast_interval_ms.max(1))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pet_name: Self::default_pet_name(),
            tick_interval_ms: Self::default_interval_ms(),
            cooldown_interval_ms: Self::default_interval_ms(),
            broadcast_interval_ms: Self::default_interval_ms(),
        }
    }
}
