use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dimensions::{PropertyGroup, PropertyMap};
use crate::quantity::Quantity;
use crate::state::StateMap;
use crate::timestep::Timestep;

/// Boxed error type for failures raised inside a component.
///
/// Numerical failures belong to the component's own domain; the dispatcher
/// propagates them without reinterpretation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A mapping from quantity name to [`Quantity`], as produced by components.
pub type QuantityMap = BTreeMap<String, Quantity>;

/// The closed classification of component execution signatures.
///
/// Every component declares exactly one capability at construction time, and
/// [`invoke`](crate::invoke) switches on the tag to pick the calling
/// protocol. The first two capabilities are pure functions of state; the
/// last two additionally require a [`Timestep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Capability {
    /// Computes instantaneous diagnostics from the current state.
    Diagnostic,
    /// Computes time derivatives (and diagnostics) from the current state.
    Tendency,
    /// Advances state over a timestep, producing the next state.
    Stepper,
    /// Computes tendencies over a timestep using an implicit scheme.
    ImplicitTendency,
}

impl Capability {
    /// Whether this capability's calling signature takes a timestep.
    #[must_use]
    pub fn requires_timestep(&self) -> bool {
        matches!(self, Self::Stepper | Self::ImplicitTendency)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Diagnostic => "diagnostic",
            Self::Tendency => "tendency",
            Self::Stepper => "stepper",
            Self::ImplicitTendency => "implicit tendency",
        };
        write!(f, "{name}")
    }
}

/// What a component invocation produced, shaped by its [`Capability`].
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentOutput {
    /// Instantaneous diagnostic quantities.
    Diagnostics(QuantityMap),
    /// Time derivatives of prognostic quantities, plus any diagnostics.
    Tendencies {
        tendencies: QuantityMap,
        diagnostics: QuantityMap,
    },
    /// Quantities stepped forward to the end of the timestep, plus any
    /// diagnostics valid at the start of it.
    Step {
        next_state: QuantityMap,
        diagnostics: QuantityMap,
    },
}

impl ComponentOutput {
    /// The diagnostic quantities of this output, whatever its variant.
    #[must_use]
    pub fn diagnostics(&self) -> &QuantityMap {
        match self {
            Self::Diagnostics(diagnostics)
            | Self::Tendencies { diagnostics, .. }
            | Self::Step { diagnostics, .. } => diagnostics,
        }
    }
}

/// Error returned when a component is called through a signature its
/// capability does not implement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("component `{component}` does not implement the {expected} calling signature")]
pub struct SignatureMismatch {
    pub component: String,
    pub expected: &'static str,
}

/// The contract between model components and the Aeolus runtime.
///
/// A component declares what it needs and produces through up to four
/// property groups, announces its execution [`Capability`], provides default
/// values for declared quantities the grid does not supply, and exposes a
/// callable matching its capability's signature.
///
/// Components must not retain references to the state beyond a single
/// invocation; the composed state is owned by the caller orchestrating the
/// simulation loop.
///
/// Implementations override the property-group methods they use (the rest
/// default to empty) and exactly one of [`call`] or [`call_with_timestep`];
/// the unimplemented signature reports [`SignatureMismatch`].
///
/// [`call`]: Component::call
/// [`call_with_timestep`]: Component::call_with_timestep
pub trait Component {
    /// A stable name for this component, used in error reports.
    fn name(&self) -> &str;

    /// The execution capability this component was constructed with.
    ///
    /// Returning `None` means the component follows no recognized execution
    /// protocol, for example an adapter around a foreign framework whose
    /// calling convention this crate does not model. [`invoke`](crate::invoke)
    /// refuses such components.
    fn capability(&self) -> Option<Capability>;

    /// Quantities this component requires in the state before invocation.
    fn input_properties(&self) -> PropertyMap {
        PropertyMap::new()
    }

    /// Quantities this component steps forward (steppers only).
    fn output_properties(&self) -> PropertyMap {
        PropertyMap::new()
    }

    /// Quantities this component produces time derivatives for.
    fn tendency_properties(&self) -> PropertyMap {
        PropertyMap::new()
    }

    /// Quantities this component diagnoses from the state.
    fn diagnostic_properties(&self) -> PropertyMap {
        PropertyMap::new()
    }

    /// The declarations of one property group.
    fn properties(&self, group: PropertyGroup) -> PropertyMap {
        match group {
            PropertyGroup::Input => self.input_properties(),
            PropertyGroup::Output => self.output_properties(),
            PropertyGroup::Tendency => self.tendency_properties(),
            PropertyGroup::Diagnostic => self.diagnostic_properties(),
        }
    }

    /// Default value for a declared quantity that is absent from the state.
    ///
    /// The composer calls this only for quantities not already present,
    /// passing the working state read-only so defaults can take their shape
    /// from dimensions the grid has already bound. Returning `None` means
    /// this component cannot supply a default, which the composer reports as
    /// a configuration error.
    fn missing_value(&self, quantity: &str, state: &StateMap) -> Option<Quantity> {
        let _ = (quantity, state);
        None
    }

    /// Calls the component as a pure function of state.
    ///
    /// This is the signature for the [`Diagnostic`](Capability::Diagnostic)
    /// and [`Tendency`](Capability::Tendency) capabilities.
    ///
    /// # Errors
    ///
    /// Component-internal failures, boxed; the default implementation fails
    /// with [`SignatureMismatch`].
    fn call(&self, state: &StateMap) -> Result<ComponentOutput, BoxError> {
        let _ = state;
        Err(Box::new(SignatureMismatch {
            component: self.name().to_string(),
            expected: "state-only",
        }))
    }

    /// Calls the component with a timestep.
    ///
    /// This is the signature for the [`Stepper`](Capability::Stepper) and
    /// [`ImplicitTendency`](Capability::ImplicitTendency) capabilities.
    ///
    /// # Errors
    ///
    /// Component-internal failures, boxed; the default implementation fails
    /// with [`SignatureMismatch`].
    fn call_with_timestep(
        &self,
        state: &StateMap,
        timestep: Timestep,
    ) -> Result<ComponentOutput, BoxError> {
        let _ = (state, timestep);
        Err(Box::new(SignatureMismatch {
            component: self.name().to_string(),
            expected: "state-and-timestep",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    struct Inert;

    impl Component for Inert {
        fn name(&self) -> &str {
            "inert"
        }

        fn capability(&self) -> Option<Capability> {
            Some(Capability::Diagnostic)
        }
    }

    #[test]
    fn property_groups_default_to_empty() {
        let component = Inert;
        for group in PropertyGroup::ALL {
            assert!(component.properties(group).is_empty());
        }
    }

    #[test]
    fn unimplemented_signature_reports_mismatch() {
        let component = Inert;
        let state = StateMap::new(date(2000, 1, 1).at(0, 0, 0, 0));

        let err = component.call(&state).unwrap_err();
        let mismatch = err.downcast_ref::<SignatureMismatch>().unwrap();
        assert_eq!(mismatch.component, "inert");
        assert_eq!(mismatch.expected, "state-only");
    }

    #[test]
    fn timestep_requirement_follows_capability() {
        assert!(!Capability::Diagnostic.requires_timestep());
        assert!(!Capability::Tendency.requires_timestep());
        assert!(Capability::Stepper.requires_timestep());
        assert!(Capability::ImplicitTendency.requires_timestep());
    }
}
