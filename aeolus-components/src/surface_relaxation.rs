use uom::si::{
    f64::{Pressure, Time},
    pressure::pascal,
    time::{day, second},
};

use aeolus_core::{
    BoxError, Capability, Component, ComponentOutput, PropertyMap, PropertySpec, Quantity,
    QuantityMap, StateMap, Timestep,
};

use crate::ComponentDataError;

/// Relaxes surface pressure toward a reference value over each timestep.
///
/// The stepped field is the exact solution of `dp/dt = -(p - p_ref) / tau`
/// over the timestep, so the result is unconditionally stable for any
/// timestep length. A crude surrogate for mass fixers that keep a spun-up
/// model from drifting.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePressureRelaxation {
    reference: Pressure,
    timescale: Time,
}

impl SurfacePressureRelaxation {
    /// Relaxation toward `reference` on the given timescale.
    #[must_use]
    pub fn new(reference: Pressure, timescale: Time) -> Self {
        Self {
            reference,
            timescale,
        }
    }
}

impl Default for SurfacePressureRelaxation {
    /// Standard sea-level pressure on a three-day timescale.
    fn default() -> Self {
        Self::new(Pressure::new::<pascal>(101_325.0), Time::new::<day>(3.0))
    }
}

impl Component for SurfacePressureRelaxation {
    fn name(&self) -> &str {
        "surface_pressure_relaxation"
    }

    fn capability(&self) -> Option<Capability> {
        Some(Capability::Stepper)
    }

    fn input_properties(&self) -> PropertyMap {
        PropertyMap::from([(
            "surface_air_pressure".to_string(),
            PropertySpec::new("Pa", ["*", "*"]),
        )])
    }

    fn output_properties(&self) -> PropertyMap {
        PropertyMap::from([(
            "surface_air_pressure".to_string(),
            PropertySpec::new("Pa", ["*", "*"]),
        )])
    }

    fn diagnostic_properties(&self) -> PropertyMap {
        PropertyMap::from([(
            "surface_pressure_relaxation_weight".to_string(),
            PropertySpec::scalar("1"),
        )])
    }

    fn missing_value(&self, quantity: &str, _state: &StateMap) -> Option<Quantity> {
        match quantity {
            "surface_pressure_relaxation_weight" => Some(Quantity::scalar(0.0, "1")),
            _ => None,
        }
    }

    fn call_with_timestep(
        &self,
        state: &StateMap,
        timestep: Timestep,
    ) -> Result<ComponentOutput, BoxError> {
        let surface = state
            .get("surface_air_pressure")
            .ok_or_else(|| ComponentDataError::missing("surface_air_pressure"))?;

        let p_ref = self.reference.get::<pascal>();
        let tau = self.timescale.get::<second>();
        // Weight of the reference value after one timestep.
        let weight = 1.0 - (-timestep.seconds() / tau).exp();

        let next = surface.values.mapv(|p| p + weight * (p_ref - p));

        let mut next_state = QuantityMap::new();
        next_state.insert(
            "surface_air_pressure".to_string(),
            Quantity::new(next, "Pa", surface.dims.clone()),
        );

        let mut diagnostics = QuantityMap::new();
        diagnostics.insert(
            "surface_pressure_relaxation_weight".to_string(),
            Quantity::scalar(weight, "1"),
        );

        Ok(ComponentOutput::Step {
            next_state,
            diagnostics,
        })
    }
}
