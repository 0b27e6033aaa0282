use thiserror::Error;

use crate::component::{BoxError, Capability, Component, ComponentOutput};
use crate::state::StateMap;
use crate::timestep::Timestep;

/// Errors raised while routing a component invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The component declares no recognized execution capability.
    #[error("component `{component}` does not declare a recognized execution capability")]
    UnknownComponentCapability { component: String },

    /// The component's capability takes a timestep, but none was supplied.
    #[error("the {capability} capability of component `{component}` requires a timestep")]
    MissingTimestep {
        component: String,
        capability: Capability,
    },

    /// The component itself failed; the source error is passed through
    /// unmodified.
    #[error("component `{component}` failed: {source}")]
    Component { component: String, source: BoxError },
}

/// Invokes a component with the argument signature its capability demands.
///
/// This is a pure routing contract. Capabilities that are functions of state
/// alone ([`Diagnostic`] and [`Tendency`]) are called with the state only; a
/// supplied `timestep` is not forwarded to them. Capabilities that advance
/// over time ([`Stepper`] and [`ImplicitTendency`]) require `timestep` and
/// receive exactly the supplied value. The component's numerical output is
/// returned as-is, never interpreted or validated here.
///
/// [`Diagnostic`]: Capability::Diagnostic
/// [`Tendency`]: Capability::Tendency
/// [`Stepper`]: Capability::Stepper
/// [`ImplicitTendency`]: Capability::ImplicitTendency
///
/// # Errors
///
/// - [`DispatchError::UnknownComponentCapability`] if the component declares
///   no recognized capability.
/// - [`DispatchError::MissingTimestep`] if the capability needs a timestep
///   and `timestep` is `None`.
/// - [`DispatchError::Component`] wrapping any failure raised inside the
///   component, with its source preserved unmodified.
pub fn invoke(
    component: &dyn Component,
    state: &StateMap,
    timestep: Option<Timestep>,
) -> Result<ComponentOutput, DispatchError> {
    let Some(capability) = component.capability() else {
        return Err(DispatchError::UnknownComponentCapability {
            component: component.name().to_string(),
        });
    };

    let result = if capability.requires_timestep() {
        let dt = timestep.ok_or_else(|| DispatchError::MissingTimestep {
            component: component.name().to_string(),
            capability,
        })?;
        component.call_with_timestep(state, dt)
    } else {
        component.call(state)
    };

    result.map_err(|source| DispatchError::Component {
        component: component.name().to_string(),
        source,
    })
}
