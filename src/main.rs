//! Projectile Aim demo
//!
//! Solves a shot at a moving target across a small voxel arena, traces
//! both arcs through the blocks, and checks that a repeat solve is
//! bit-identical.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use projectile_aim::{
    TICK_RATE, VERSION,
    BlockPos, FiringSolution, ProfileRegistry, RaycastConfig, SolverConfig,
    TargetState, Vec3, VoxelGrid,
    ballistics::registry::registry,
    raycast, solve,
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Projectile Aim v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let loaded;
    let profiles = match std::env::var("PROFILE_REGISTRY") {
        Ok(path) => {
            loaded = ProfileRegistry::load(&path)
                .with_context(|| format!("Failed to load profile registry from {}", path))?;
            &loaded
        }
        Err(_) => registry(),
    };
    info!("Profiles: {}", profiles.kinds().collect::<Vec<_>>().join(", "));

    demo_shot(profiles)
}

/// Demo function to exercise the solver and raycaster.
fn demo_shot(profiles: &ProfileRegistry) -> Result<()> {
    info!("=== Solving Demo Shot ===");

    let solver_config = SolverConfig::from_env();
    let raycast_config = RaycastConfig::from_env();

    let bow = profiles
        .get("bow")
        .context("Registry has no 'bow' profile")?;

    // Arena: stone floor with a low wall between shooter and target.
    let mut world = VoxelGrid::new()
        .with_loaded_region(BlockPos::new(-16, -4, -16), BlockPos::new(48, 32, 16));
    world.fill(BlockPos::new(-16, -1, -16), BlockPos::new(48, -1, 16));
    world.fill(BlockPos::new(12, 0, -4), BlockPos::new(12, 1, 4));
    // Arrow slit
    world.clear(BlockPos::new(12, 1, 0));
    info!("World blocks: {}", world.len());

    let shooter = Vec3::new(0.5, 1.62, 0.5);
    let samples = [
        Vec3::new(24.5, 0.0, 0.5),
        Vec3::new(24.5, 0.0, 0.7),
        Vec3::new(24.5, 0.0, 0.9),
    ];
    let target = TargetState::from_samples(&samples, false)
        .context("Need at least one target sample")?;
    info!("Target at {} moving {}", target.position, target.velocity);

    let charge = Some(20.0);
    let latency = Some(2.0);

    let Some(arcs) = solve(bow, shooter, &target, charge, latency, &solver_config) else {
        warn!("Target out of range");
        return Ok(());
    };

    for (name, solution) in [("low", arcs.low), ("high", arcs.high)] {
        let Some(solution) = solution else {
            info!("{} arc: none", name);
            continue;
        };
        report_arc(name, &solution);

        let hits = raycast(bow, shooter, &solution, charge, &world, &raycast_config);
        match hits.first() {
            Some(hit) => info!(
                "{} arc blocked at {} (block {}) on tick {}",
                name, hit.point, hit.block, hit.tick
            ),
            None => info!("{} arc clear", name),
        }
    }

    // Verify determinism by solving again
    info!("=== Verifying Determinism ===");
    let hash = arcs.fingerprint();
    info!("Solution Hash: {}", hex::encode(hash));

    let replay = solve(bow, shooter, &target, charge, latency, &solver_config)
        .context("Repeat solve lost the target")?;
    let replay_hash = replay.fingerprint();
    info!("Replay Hash:   {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}

fn report_arc(name: &str, solution: &FiringSolution) {
    info!(
        "{} arc: yaw {:.4} rad, pitch {:.4} rad ({:.1}°), flight {:.2} ticks",
        name,
        solution.yaw,
        solution.pitch,
        solution.pitch.to_degrees(),
        solution.time_of_flight,
    );
    if let Some(destination) = solution.destination {
        info!("{} arc aims at {}", name, destination);
    }
}
