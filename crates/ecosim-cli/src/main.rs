//! Headless driver for the ecosystem simulation.
//!
//! Builds a world from an optional JSON config file, steps it until both
//! mobile kinds are extinct or the turn limit is reached, and reports
//! population statistics through tracing. Rendering, charting, and
//! interactive control are deliberately out of scope.

mod telemetry;

use anyhow::{Context, Result};
use ecosim_core::RunConfig;
use ecosim_world::World;
use tracing::info;

fn main() -> Result<()> {
    let config = load_config()?;
    telemetry::init_telemetry()?;

    info!(
        width = config.world.width,
        height = config.world.height,
        seed = config.world.seed,
        "starting ecosystem simulation"
    );

    let mut world = World::new(config.world.clone())?;
    world.populate_randomly(
        config.initial_producers,
        config.initial_herbivores,
        config.initial_carnivores,
    );

    let extinct = run(&mut world, &config);

    let stats = world.statistics();
    info!(
        turn = world.turn(),
        producers = stats.producers,
        herbivores = stats.herbivores,
        carnivores = stats.carnivores,
        extinct,
        "simulation finished"
    );
    Ok(())
}

/// Step the world until extinction or the turn limit. Returns whether the
/// mobile populations died out.
fn run(world: &mut World, config: &RunConfig) -> bool {
    while world.turn() < config.max_turns {
        world.simulate();

        if config.report_interval > 0 && world.turn() % config.report_interval == 0 {
            let stats = world.statistics();
            info!(
                turn = world.turn(),
                producers = stats.producers,
                herbivores = stats.herbivores,
                carnivores = stats.carnivores,
                "population report"
            );
        }

        if world.is_extinct() {
            info!(turn = world.turn(), "both mobile kinds extinct");
            return true;
        }
    }
    false
}

fn load_config() -> Result<RunConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))
        }
        None => Ok(RunConfig::default()),
    }
}
