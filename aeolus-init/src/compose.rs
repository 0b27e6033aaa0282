use std::collections::BTreeMap;

use thiserror::Error;

use aeolus_core::{Component, Grid, PropertyGroup, StateMap};

use crate::grid::{build_grid, GridOptions, InvalidGridParameters};

/// Errors raised while composing an initial state.
///
/// All of these are contract violations between independently authored
/// components (or between a component and the grid); none is transient and
/// none is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    /// Building the implicit default grid failed.
    #[error(transparent)]
    Grid(#[from] InvalidGridParameters),

    /// Two quantities disagree about the length of a shared dimension.
    #[error(
        "dimension `{dimension}` has conflicting lengths {expected} and {found} \
         (quantity `{quantity}`)"
    )]
    InconsistentDimensionLength {
        dimension: String,
        quantity: String,
        expected: usize,
        found: usize,
    },

    /// A quantity in the state lacks dimensions its declaration requires.
    #[error(
        "quantity `{quantity}` in the {group} properties of component `{component}` \
         is missing dimensions {missing:?}"
    )]
    MissingDimension {
        component: String,
        quantity: String,
        group: PropertyGroup,
        missing: Vec<String>,
    },

    /// A component declared a quantity the grid does not supply and provided
    /// no default value for it.
    #[error("component `{component}` declares `{quantity}` but provides no default value for it")]
    NoDefaultValue {
        component: String,
        quantity: String,
    },
}

/// Assembles the initial state for a set of components.
///
/// Starts from a copy of `grid` (or of an implicit default grid built with
/// [`GridOptions::default`] when `grid` is `None`) and synthesizes a default
/// quantity, via each component's [`missing_value`] provider, for every
/// declared quantity name not yet present. Merge order is deterministic:
/// components in slice order, property groups in input/output/tendency/
/// diagnostic order, quantity names in map order. The grid itself is never
/// mutated.
///
/// After all components are merged, two validation passes certify the
/// result: every dimension name shared between quantities must have a single
/// length, and every declared quantity present in the state must carry at
/// least the dimensions its declaration names (order-insensitive, wildcards
/// accepting any axis).
///
/// [`missing_value`]: Component::missing_value
///
/// # Errors
///
/// [`ComposeError`] describing the offending quantity, dimension, and
/// component; see the variant docs.
pub fn compose_state(
    components: &[&dyn Component],
    grid: Option<&Grid>,
) -> Result<StateMap, ComposeError> {
    let built;
    let grid = match grid {
        Some(grid) => grid,
        None => {
            built = build_grid(GridOptions::default())?;
            &built
        }
    };

    let mut state = grid.to_state();

    for component in components {
        for group in PropertyGroup::ALL {
            for (name, _spec) in component.properties(group) {
                if state.contains(&name) {
                    continue;
                }
                let quantity = component.missing_value(&name, &state).ok_or_else(|| {
                    ComposeError::NoDefaultValue {
                        component: component.name().to_string(),
                        quantity: name.clone(),
                    }
                })?;
                tracing::debug!(
                    component = component.name(),
                    quantity = name.as_str(),
                    %group,
                    "synthesized default quantity"
                );
                state.insert(name, quantity);
            }
        }
    }

    check_dimension_lengths(&state)?;
    check_declared_dimensions(&state, components)?;

    Ok(state)
}

/// Every dimension name must resolve to a single length across the state.
fn check_dimension_lengths(state: &StateMap) -> Result<(), ComposeError> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();

    for (name, quantity) in state {
        for (dim, length) in quantity.lengths() {
            match seen.get(dim) {
                Some(&expected) if expected != length => {
                    return Err(ComposeError::InconsistentDimensionLength {
                        dimension: dim.to_string(),
                        quantity: name.clone(),
                        expected,
                        found: length,
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(dim, length);
                }
            }
        }
    }

    Ok(())
}

/// Every declared quantity present in the state must carry the dimensions
/// its declaration names.
fn check_declared_dimensions(
    state: &StateMap,
    components: &[&dyn Component],
) -> Result<(), ComposeError> {
    for component in components {
        for group in PropertyGroup::ALL {
            for (name, spec) in component.properties(group) {
                let Some(quantity) = state.get(&name) else {
                    continue;
                };
                let missing = spec.missing_dimensions(&quantity.dims);
                if !missing.is_empty() {
                    return Err(ComposeError::MissingDimension {
                        component: component.name().to_string(),
                        quantity: name,
                        group,
                        missing,
                    });
                }
            }
        }
    }

    Ok(())
}
