use ndarray::{ArrayD, Axis};

use aeolus_core::{
    BoxError, Capability, Component, ComponentOutput, PropertyMap, PropertySpec, Quantity,
    QuantityMap, StateMap, Timestep, MID_LEVELS,
};

use crate::ComponentDataError;

/// Implicit relaxation of temperature toward its column mean.
///
/// Solves `dT/dt = -k (T - mean(T))` with backward Euler, holding the
/// column mean at its start-of-step value:
///
/// ```text
/// T_next = (T + k dt mean(T)) / (1 + k dt)
/// ```
///
/// The returned tendency `(T_next - T) / dt` therefore depends on the
/// timestep, which is what distinguishes an implicit tendency component
/// from a plain one. The scheme damps without overshooting for any `dt`.
#[derive(Debug, Clone, Copy)]
pub struct ImplicitVerticalMixing {
    rate_per_second: f64,
}

impl ImplicitVerticalMixing {
    /// Mixing with the given relaxation rate, in s^-1.
    #[must_use]
    pub fn new(rate_per_second: f64) -> Self {
        Self { rate_per_second }
    }
}

impl Default for ImplicitVerticalMixing {
    /// Relaxation on a timescale of roughly three hours.
    fn default() -> Self {
        Self::new(1.0e-4)
    }
}

impl Component for ImplicitVerticalMixing {
    fn name(&self) -> &str {
        "implicit_vertical_mixing"
    }

    fn capability(&self) -> Option<Capability> {
        Some(Capability::ImplicitTendency)
    }

    fn input_properties(&self) -> PropertyMap {
        PropertyMap::from([(
            "air_temperature".to_string(),
            PropertySpec::new("degK", ["*", "*", MID_LEVELS]),
        )])
    }

    fn tendency_properties(&self) -> PropertyMap {
        PropertyMap::from([(
            "air_temperature".to_string(),
            PropertySpec::new("degK s^-1", ["*", "*", MID_LEVELS]),
        )])
    }

    fn missing_value(&self, quantity: &str, state: &StateMap) -> Option<Quantity> {
        if quantity != "air_temperature" {
            return None;
        }
        let pressure = state.get("air_pressure")?;
        Some(Quantity::new(
            ArrayD::from_elem(pressure.values.raw_dim(), 288.15),
            "degK",
            pressure.dims.clone(),
        ))
    }

    fn call_with_timestep(
        &self,
        state: &StateMap,
        timestep: Timestep,
    ) -> Result<ComponentOutput, BoxError> {
        let name = "air_temperature";
        let temperature = state
            .get(name)
            .ok_or_else(|| ComponentDataError::missing(name))?;

        let axis_index = temperature
            .axis_of(MID_LEVELS)
            .filter(|&axis| temperature.values.len_of(Axis(axis)) > 0)
            .ok_or_else(|| ComponentDataError::no_axis(name, MID_LEVELS))?;
        let axis = Axis(axis_index);

        let column_mean = temperature
            .values
            .mean_axis(axis)
            .ok_or_else(|| ComponentDataError::no_axis(name, MID_LEVELS))?
            .insert_axis(axis);

        let k_dt = self.rate_per_second * timestep.seconds();
        let t_next = (&temperature.values + &(column_mean * k_dt)) / (1.0 + k_dt);
        let tendency = (&t_next - &temperature.values) / timestep.seconds();

        let mut tendencies = QuantityMap::new();
        tendencies.insert(
            name.to_string(),
            Quantity::new(tendency, "degK s^-1", temperature.dims.clone()),
        );
        Ok(ComponentOutput::Tendencies {
            tendencies,
            diagnostics: QuantityMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use jiff::civil::date;

    fn state_with_column(values: Vec<f64>) -> StateMap {
        let mut state = StateMap::new(date(2000, 1, 1).at(0, 0, 0, 0));
        state.insert(
            "air_temperature",
            Quantity::column(values, "degK", MID_LEVELS),
        );
        state
    }

    #[test]
    fn mixing_damps_deviations_from_the_column_mean() {
        let state = state_with_column(vec![250.0, 290.0]);
        let dt = Timestep::from_hours(1.0).unwrap();

        let output = ImplicitVerticalMixing::new(1.0e-4)
            .call_with_timestep(&state, dt)
            .unwrap();
        let ComponentOutput::Tendencies { tendencies, .. } = output else {
            panic!("expected tendencies");
        };

        let tendency = &tendencies["air_temperature"];
        let cold = tendency.values[[0]];
        let warm = tendency.values[[1]];
        // Warming below the mean, cooling above it, symmetrically.
        assert!(cold > 0.0);
        assert!(warm < 0.0);
        assert_relative_eq!(cold, -warm, max_relative = 1e-12);
    }

    #[test]
    fn tendency_magnitude_depends_on_the_timestep() {
        let state = state_with_column(vec![250.0, 290.0]);
        let component = ImplicitVerticalMixing::default();

        let tendency_at = |hours: f64| {
            let dt = Timestep::from_hours(hours).unwrap();
            let ComponentOutput::Tendencies { tendencies, .. } =
                component.call_with_timestep(&state, dt).unwrap()
            else {
                panic!("expected tendencies");
            };
            tendencies["air_temperature"].values[[0]]
        };

        // Backward Euler: the effective rate weakens as the step grows.
        assert!(tendency_at(1.0) > tendency_at(10.0));
        assert!(tendency_at(10.0) > 0.0);
    }

    #[test]
    fn uniform_columns_are_left_alone() {
        let state = state_with_column(vec![280.0, 280.0, 280.0]);
        let dt = Timestep::from_seconds(600.0).unwrap();

        let output = ImplicitVerticalMixing::default()
            .call_with_timestep(&state, dt)
            .unwrap();
        let ComponentOutput::Tendencies { tendencies, .. } = output else {
            panic!("expected tendencies");
        };
        for value in tendencies["air_temperature"].values.iter() {
            assert_abs_diff_eq!(*value, 0.0, epsilon = 1e-12);
        }
    }
}
