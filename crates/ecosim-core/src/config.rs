//! Configuration types for the simulation.

use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Turns between periodic producer spawn waves
    pub spawn_interval: u64,
    /// Producers added per spawn wave
    pub spawn_count: u32,
    /// Placement attempts per producer during a spawn wave
    pub spawn_retry_budget: u32,
    /// Placement attempts per organism during initial population
    pub populate_retry_budget: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            seed: 0,
            spawn_interval: 5,
            spawn_count: 5,
            spawn_retry_budget: 50,
            populate_retry_budget: 100,
        }
    }
}

/// Driver run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// World configuration
    pub world: WorldConfig,
    /// Producers placed before the first turn
    pub initial_producers: u32,
    /// Herbivores placed before the first turn
    pub initial_herbivores: u32,
    /// Carnivores placed before the first turn
    pub initial_carnivores: u32,
    /// Stop after this many turns even if populations survive
    pub max_turns: u64,
    /// Turns between population reports
    pub report_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            initial_producers: 50,
            initial_herbivores: 15,
            initial_carnivores: 5,
            max_turns: 1_000,
            report_interval: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let world_config = WorldConfig::default();
        assert_eq!(world_config.width, 20);
        assert_eq!(world_config.height, 15);
        assert_eq!(world_config.spawn_interval, 5);
        assert_eq!(world_config.spawn_count, 5);

        let run_config = RunConfig::default();
        assert_eq!(run_config.initial_producers, 50);
        assert_eq!(run_config.initial_herbivores, 15);
        assert_eq!(run_config.initial_carnivores, 5);
    }

    #[test]
    fn test_run_config_serialization() {
        let config = RunConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.world.width, deserialized.world.width);
        assert_eq!(config.world.seed, deserialized.world.seed);
        assert_eq!(config.max_turns, deserialized.max_turns);
    }
}
