//! Model components for the Aeolus runtime, one per execution capability.
//!
//! Each component here declares its property groups against the contract in
//! `aeolus-core`, supplies defaults for quantities the grid does not carry,
//! and implements the calling signature its capability demands. They are
//! deliberately small pieces of physics, enough to drive a simulation loop
//! end to end and to serve as templates for writing real parameterizations.

mod pressure_thickness;
mod radiative_cooling;
mod surface_relaxation;
mod vertical_mixing;

use thiserror::Error;

pub use pressure_thickness::PressureThickness;
pub use radiative_cooling::GrayRadiativeCooling;
pub use surface_relaxation::SurfacePressureRelaxation;
pub use vertical_mixing::ImplicitVerticalMixing;

/// Errors a component may raise about the state it was handed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentDataError {
    /// A required quantity is absent from the model state.
    #[error("required quantity `{0}` is not present in the model state")]
    MissingQuantity(String),

    /// A quantity lacks the axis the computation operates along.
    #[error("quantity `{quantity}` has no usable `{dimension}` axis")]
    MissingAxis {
        quantity: String,
        dimension: String,
    },
}

impl ComponentDataError {
    pub(crate) fn missing(quantity: &str) -> Self {
        Self::MissingQuantity(quantity.to_string())
    }

    pub(crate) fn no_axis(quantity: &str, dimension: &str) -> Self {
        Self::MissingAxis {
            quantity: quantity.to_string(),
            dimension: dimension.to_string(),
        }
    }
}
