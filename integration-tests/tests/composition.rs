//! State composition across the packaged components: default synthesis,
//! dimension-length agreement, and declaration checks.

use ndarray::Array1;

use aeolus_components::{
    GrayRadiativeCooling, ImplicitVerticalMixing, PressureThickness, SurfacePressureRelaxation,
};
use aeolus_core::{
    Capability, Component, PropertyMap, PropertySpec, Quantity, StateMap, MID_LEVELS,
};
use aeolus_init::{build_grid, compose_state, ComposeError, GridOptions};

#[test]
fn every_packaged_component_composes_against_one_state() {
    let thickness = PressureThickness;
    let cooling = GrayRadiativeCooling::default();
    let relaxation = SurfacePressureRelaxation::default();
    let mixing = ImplicitVerticalMixing::default();
    let components: Vec<&dyn Component> = vec![&thickness, &cooling, &relaxation, &mixing];

    let grid = build_grid(GridOptions::default().with_extents(4, 3).with_mid_levels(10)).unwrap();
    let state = compose_state(&components, Some(&grid)).unwrap();

    // Grid quantities survive, and the one missing input was synthesized
    // with the pressure field's shape.
    assert!(state.contains("air_pressure_on_interface_levels"));
    let temperature = state.get("air_temperature").unwrap();
    assert_eq!(temperature.dims, vec!["lat", "lon", MID_LEVELS]);
    assert_eq!(temperature.values.shape(), &[3, 4, 10]);
}

#[test]
fn composition_with_an_implicit_default_grid() {
    let cooling = GrayRadiativeCooling::default();
    let components: Vec<&dyn Component> = vec![&cooling];

    let state = compose_state(&components, None).unwrap();
    assert!(state.contains("air_pressure"));
    assert!(state.contains("air_temperature"));
    assert_eq!(
        state.get("air_pressure").unwrap().dim_len(MID_LEVELS),
        state.get("air_temperature").unwrap().dim_len(MID_LEVELS),
    );
}

/// Declares one quantity and synthesizes it with a fixed length, so two
/// instances can be pitted against each other.
struct FixedLengthColumn {
    name: &'static str,
    quantity: &'static str,
    dim: &'static str,
    len: usize,
}

impl Component for FixedLengthColumn {
    fn name(&self) -> &str {
        self.name
    }

    fn capability(&self) -> Option<Capability> {
        Some(Capability::Diagnostic)
    }

    fn input_properties(&self) -> PropertyMap {
        PropertyMap::from([(
            self.quantity.to_string(),
            PropertySpec::new("1", [self.dim]),
        )])
    }

    fn missing_value(&self, _quantity: &str, _state: &StateMap) -> Option<Quantity> {
        Some(Quantity::column(Array1::zeros(self.len), "1", self.dim))
    }
}

#[test]
fn conflicting_lengths_for_a_shared_dimension_are_rejected() {
    let first = FixedLengthColumn {
        name: "first",
        quantity: "aerosol_density",
        dim: "aerosol_modes",
        len: 7,
    };
    let second = FixedLengthColumn {
        name: "second",
        quantity: "aerosol_radius",
        dim: "aerosol_modes",
        len: 9,
    };
    let components: Vec<&dyn Component> = vec![&first, &second];

    let err = compose_state(&components, None).unwrap_err();
    let ComposeError::InconsistentDimensionLength {
        dimension,
        expected,
        found,
        ..
    } = err
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(dimension, "aerosol_modes");
    let mut lengths = [expected, found];
    lengths.sort_unstable();
    assert_eq!(lengths, [7, 9]);
}

#[test]
fn error_messages_name_the_conflicting_lengths() {
    let first = FixedLengthColumn {
        name: "first",
        quantity: "aerosol_density",
        dim: "aerosol_modes",
        len: 7,
    };
    let second = FixedLengthColumn {
        name: "second",
        quantity: "aerosol_radius",
        dim: "aerosol_modes",
        len: 9,
    };
    let components: Vec<&dyn Component> = vec![&first, &second];

    let message = compose_state(&components, None).unwrap_err().to_string();
    assert!(message.contains("aerosol_modes"));
    assert!(message.contains('7'));
    assert!(message.contains('9'));
}

#[test]
fn grid_is_not_mutated_by_composition() {
    let cooling = GrayRadiativeCooling::default();
    let components: Vec<&dyn Component> = vec![&cooling];

    let grid = build_grid(GridOptions::default()).unwrap();
    let before = grid.clone();
    let state = compose_state(&components, Some(&grid)).unwrap();

    assert_eq!(grid, before);
    assert!(state.contains("air_temperature"));
    assert!(!grid.contains("air_temperature"));
}
