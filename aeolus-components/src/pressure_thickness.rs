use ndarray::{Axis, Slice};

use aeolus_core::{
    BoxError, Capability, Component, ComponentOutput, PropertyMap, PropertySpec, Quantity,
    QuantityMap, StateMap, INTERFACE_LEVELS, MID_LEVELS,
};

use crate::ComponentDataError;

/// Diagnoses the pressure thickness of every model layer.
///
/// The thickness of a layer is the pressure drop across it,
/// `p_interface[k] - p_interface[k+1]`, a positive quantity on any
/// physically ordered column. Dynamical cores use it as the mass weighting
/// for vertical integrals.
#[derive(Debug, Clone, Copy, Default)]
pub struct PressureThickness;

impl Component for PressureThickness {
    fn name(&self) -> &str {
        "pressure_thickness"
    }

    fn capability(&self) -> Option<Capability> {
        Some(Capability::Diagnostic)
    }

    fn input_properties(&self) -> PropertyMap {
        PropertyMap::from([(
            "air_pressure_on_interface_levels".to_string(),
            PropertySpec::new("Pa", ["*", "*", INTERFACE_LEVELS]),
        )])
    }

    fn diagnostic_properties(&self) -> PropertyMap {
        PropertyMap::from([(
            "air_pressure_thickness".to_string(),
            PropertySpec::new("Pa", ["*", "*", MID_LEVELS]),
        )])
    }

    fn missing_value(&self, quantity: &str, state: &StateMap) -> Option<Quantity> {
        if quantity != "air_pressure_thickness" {
            return None;
        }
        // Zero until the first invocation fills it in.
        let pressure = state.get("air_pressure")?;
        Some(Quantity::new(
            ndarray::ArrayD::zeros(pressure.values.raw_dim()),
            "Pa",
            pressure.dims.clone(),
        ))
    }

    fn call(&self, state: &StateMap) -> Result<ComponentOutput, BoxError> {
        let name = "air_pressure_on_interface_levels";
        let p_interface = state
            .get(name)
            .ok_or_else(|| ComponentDataError::missing(name))?;

        let axis_index = p_interface
            .axis_of(INTERFACE_LEVELS)
            .filter(|&axis| p_interface.values.len_of(Axis(axis)) >= 2)
            .ok_or_else(|| ComponentDataError::no_axis(name, INTERFACE_LEVELS))?;
        let axis = Axis(axis_index);

        let n = p_interface.values.len_of(axis);
        let lower = p_interface
            .values
            .slice_axis(axis, Slice::from(..n - 1));
        let upper = p_interface.values.slice_axis(axis, Slice::from(1..));
        let thickness = &lower - &upper;

        let mut dims = p_interface.dims.clone();
        dims[axis_index] = MID_LEVELS.to_string();

        let mut diagnostics = QuantityMap::new();
        diagnostics.insert(
            "air_pressure_thickness".to_string(),
            Quantity::new(thickness, "Pa", dims),
        );
        Ok(ComponentOutput::Diagnostics(diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn thickness_is_the_pressure_drop_per_layer() {
        let mut state = StateMap::new(date(2000, 1, 1).at(0, 0, 0, 0));
        state.insert(
            "air_pressure_on_interface_levels",
            Quantity::column(vec![1000.0, 600.0, 300.0, 100.0], "Pa", INTERFACE_LEVELS),
        );

        let output = PressureThickness.call(&state).unwrap();
        let ComponentOutput::Diagnostics(diagnostics) = output else {
            panic!("expected diagnostics");
        };

        let thickness = &diagnostics["air_pressure_thickness"];
        let values: Vec<f64> = thickness.values.iter().copied().collect();
        assert_eq!(values, vec![400.0, 300.0, 200.0]);
        assert_eq!(thickness.dims, vec![MID_LEVELS]);
    }

    #[test]
    fn missing_interface_pressure_is_reported() {
        let state = StateMap::new(date(2000, 1, 1).at(0, 0, 0, 0));
        let err = PressureThickness.call(&state).unwrap_err();
        assert!(err.downcast_ref::<ComponentDataError>().is_some());
    }
}
