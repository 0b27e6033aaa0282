use ndarray::ArrayD;

use aeolus_core::{
    BoxError, Capability, Component, ComponentOutput, PropertyMap, PropertySpec, Quantity,
    QuantityMap, StateMap, MID_LEVELS,
};

use crate::ComponentDataError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Gray-atmosphere radiative cooling.
///
/// Applies a uniform cooling rate to the temperature field, the textbook
/// stand-in for longwave emission when no radiative transfer scheme is
/// wired in. Tendencies are pure functions of the current state; this
/// component never sees a timestep.
#[derive(Debug, Clone, Copy)]
pub struct GrayRadiativeCooling {
    cooling_rate_k_per_day: f64,
}

impl GrayRadiativeCooling {
    /// A cooling rate of `rate` kelvin per day.
    #[must_use]
    pub fn new(cooling_rate_k_per_day: f64) -> Self {
        Self {
            cooling_rate_k_per_day,
        }
    }
}

impl Default for GrayRadiativeCooling {
    /// The canonical 1.5 K/day clear-sky tropospheric cooling.
    fn default() -> Self {
        Self::new(1.5)
    }
}

impl Component for GrayRadiativeCooling {
    fn name(&self) -> &str {
        "gray_radiative_cooling"
    }

    fn capability(&self) -> Option<Capability> {
        Some(Capability::Tendency)
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
        // An isothermal column shaped like the grid's pressure field.
        let pressure = state.get("air_pressure")?;
        Some(Quantity::new(
            ArrayD::from_elem(pressure.values.raw_dim(), 288.15),
            "degK",
            pressure.dims.clone(),
        ))
    }

    fn call(&self, state: &StateMap) -> Result<ComponentOutput, BoxError> {
        let temperature = state
            .get("air_temperature")
            .ok_or_else(|| ComponentDataError::missing("air_temperature"))?;

        let rate = -self.cooling_rate_k_per_day / SECONDS_PER_DAY;
        let tendency = ArrayD::from_elem(temperature.values.raw_dim(), rate);

        let mut tendencies = QuantityMap::new();
        tendencies.insert(
            "air_temperature".to_string(),
            Quantity::new(tendency, "degK s^-1", temperature.dims.clone()),
        );
        Ok(ComponentOutput::Tendencies {
            tendencies,
            diagnostics: QuantityMap::new(),
        })
    }
}
