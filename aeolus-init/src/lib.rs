//! Grid construction and initial-state composition for the Aeolus runtime.
//!
//! [`build_grid`] turns resolution parameters into an immutable
//! [`Grid`](aeolus_core::Grid) whose hybrid sigma-pressure coordinates are
//! guaranteed physically consistent. [`compose_state`] then merges every
//! component's declared defaults into a copy of that grid and validates
//! dimension consistency across the full set of declarations, producing the
//! state a simulation loop starts from.

mod compose;
mod grid;
mod hybrid;

pub use compose::{compose_state, ComposeError};
pub use grid::{
    build_grid, GridOptions, InvalidGridParameters, DEFAULT_MID_LEVEL_COUNT,
    ICE_INTERFACE_LEVEL_COUNT, REFERENCE_SURFACE_PRESSURE_PA,
};
pub use hybrid::{HybridLevels, TOP_OF_ATMOSPHERE_PRESSURE_PA};
