//! Real-time 2D incompressible fluid on a fixed square grid, solved with the
//! semi-Lagrangian "stable fluids" scheme: Gauss-Seidel implicit diffusion,
//! bilinear backtraced advection, and a truncated pressure projection.
//!
//! ```
//! use gridfluid::{Simulation, SolverParams};
//!
//! let mut sim = Simulation::new(32, SolverParams::default()).unwrap();
//! sim.splat_velocity(16, 16, 1.0, 0.0).unwrap();
//! sim.add_density(16, 16, 10.0).unwrap();
//! sim.step();
//! assert!(sim.density().get(16, 16).unwrap() < 10.0);
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod simulation;
pub mod solver;
pub mod state;

pub use error::{FluidError, Result};
pub use field::ScalarField;
pub use simulation::Simulation;
pub use solver::{BoundaryKind, SolverParams};
