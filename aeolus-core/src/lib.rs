//! Core state model and component contract for the Aeolus model runtime.
//!
//! This crate defines the vocabulary shared by everything that runs inside
//! an Aeolus simulation: named array-valued [`Quantity`] fields, the
//! [`StateMap`] they live in, the [`Component`] trait through which model
//! physics declares its requirements, and the capability-based [`invoke`]
//! dispatcher that calls a component with the argument signature its
//! [`Capability`] demands.
//!
//! Grid construction and initial-state composition live in `aeolus-init`;
//! concrete physics components live in `aeolus-components`.

mod component;
mod dimensions;
mod dispatch;
mod quantity;
mod state;
mod timestep;

pub use component::{
    BoxError, Capability, Component, ComponentOutput, QuantityMap, SignatureMismatch,
};
pub use dimensions::{
    DimSpec, PropertyGroup, PropertyMap, PropertySpec, ICE_INTERFACE_LEVELS, INTERFACE_LEVELS,
    MID_LEVELS,
};
pub use dispatch::{invoke, DispatchError};
pub use quantity::Quantity;
pub use state::{Grid, StateMap};
pub use timestep::{Timestep, TimestepError};
