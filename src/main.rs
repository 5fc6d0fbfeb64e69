use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use gridfluid::config::{self, Config};
use gridfluid::solver::diagnostics::{divergence_energy, kinetic_energy, max_speed, total_mass};
use gridfluid::{FluidError, Simulation};
use log::{error, info};

/// Parse `--<name> <value>` from CLI args.
fn arg_value(name: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.windows(2).find(|w| w[0] == name).map(|w| w[1].clone())
}

/// Parse a `--steps` override; a present but malformed value is an error.
fn parse_steps(raw: Option<String>) -> gridfluid::Result<Option<usize>> {
    raw.map(|s| {
        s.parse()
            .map_err(|e| FluidError::Config(format!("--steps {s:?}: {e}")))
    })
    .transpose()
}

fn load_config() -> gridfluid::Result<Config> {
    match arg_value("--config") {
        Some(path) => config::load_from(Path::new(&path)),
        None => Ok(config::load()),
    }
}

/// Inject the configured impulse before `step` if it is due.
fn apply_impulse(sim: &mut Simulation, cfg: &Config, step: usize) -> gridfluid::Result<()> {
    let imp = &cfg.impulse;
    let due = if imp.every == 0 { step == 0 } else { step % imp.every == 0 };
    if due {
        let (x, y) = imp.position(sim.size());
        sim.splat_velocity(x, y, imp.vx, imp.vy)?;
        sim.splat_density(x, y, imp.density)?;
    }
    Ok(())
}

fn log_frame(sim: &Simulation) {
    let (vx, vy) = (sim.velocity_x(), sim.velocity_y());
    info!(
        "frame {:>5}  ke={:.6e}  |div|²={:.6e}  max|v|={:.4}  mass={:.4}",
        sim.frame_count(),
        kinetic_energy(vx, vy),
        divergence_energy(vx, vy),
        max_speed(vx, vy),
        total_mass(sim.density()),
    );
}

fn run() -> gridfluid::Result<()> {
    let mut cfg = load_config()?;
    if let Some(steps) = parse_steps(arg_value("--steps"))? {
        cfg.run.steps = steps;
    }

    let mut sim = Simulation::from_config(&cfg)?;
    info!(
        "grid {0}x{0}, {1} steps, dt={2}",
        sim.size(),
        cfg.run.steps,
        sim.params().dt
    );

    let start = Instant::now();
    for step in 0..cfg.run.steps {
        apply_impulse(&mut sim, &cfg, step)?;
        sim.step();
        if cfg.run.log_every > 0 && (step + 1) % cfg.run.log_every == 0 {
            log_frame(&sim);
        }
    }

    let elapsed = start.elapsed();
    let per_step = if cfg.run.steps > 0 {
        elapsed.as_micros() / cfg.run.steps as u128
    } else {
        0
    };
    info!("done in {:.2?} ({} us/step)", elapsed, per_step);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
