mod boundary;
mod core;
pub mod diagnostics;
mod params;
pub mod particle;

// Re-export public API
pub use boundary::{set_bnd, BoundaryKind};
pub use self::core::{advect, diffuse, lin_solve, project, RELAX_ITER};
pub use params::SolverParams;

use crate::state::SimState;
use particle::advect_particles;

/// Full fluid simulation step (split-operator stable fluids).
/// The order below is load-bearing: each projection cleans up the divergence
/// introduced by the stage before it.
pub fn fluid_step(state: &mut SimState, params: &SolverParams) {
    let dt = params.dt;

    // 1-2. Diffuse velocity
    diffuse(BoundaryKind::NormalX, &mut state.vx0, &state.vx, params.visc, dt);
    diffuse(BoundaryKind::NormalY, &mut state.vy0, &state.vy, params.visc, dt);

    // 3. Project diffused velocity
    project(&mut state.vx0, &mut state.vy0, &mut state.scratch_a, &mut state.scratch_b);

    // 4-5. Self-advect velocity along the projected field
    advect(BoundaryKind::NormalX, &mut state.vx, &state.vx0, &state.vx0, &state.vy0, dt);
    advect(BoundaryKind::NormalY, &mut state.vy, &state.vy0, &state.vx0, &state.vy0, dt);

    // 6. Project again
    project(&mut state.vx, &mut state.vy, &mut state.scratch_a, &mut state.scratch_b);

    // 7. Diffuse + advect density along the final velocity
    diffuse(BoundaryKind::None, &mut state.density0, &state.density, params.diff, dt);
    advect(BoundaryKind::None, &mut state.density, &state.density0, &state.vx, &state.vy, dt);

    // 8. Tracers
    advect_particles(state, dt);
}
