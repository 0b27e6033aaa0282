use jiff::civil::{date, DateTime};
use ndarray::{Array1, Array2, Array3, ArrayD, IxDyn};
use thiserror::Error;
use uom::si::{f64::Pressure, pressure::pascal};

use aeolus_core::{Grid, Quantity, StateMap, ICE_INTERFACE_LEVELS, INTERFACE_LEVELS, MID_LEVELS};

use crate::hybrid::{
    column_is_ordered, mid_level_pressures, HybridLevels, TOP_OF_ATMOSPHERE_PRESSURE_PA,
};

/// Default number of atmospheric mid-levels.
pub const DEFAULT_MID_LEVEL_COUNT: usize = 28;

/// Fixed number of ice/land-surface coupling levels.
pub const ICE_INTERFACE_LEVEL_COUNT: usize = 10;

/// Standard sea-level pressure, in pascals.
pub const REFERENCE_SURFACE_PRESSURE_PA: f64 = 101_325.0;

/// Model time every grid starts at.
fn start_of_run() -> DateTime {
    date(2000, 1, 1).at(0, 0, 0, 0)
}

/// Resolution and naming parameters for [`build_grid`].
///
/// Horizontal extents default to 1, meaning the corresponding coordinate
/// quantity is omitted from the grid (field arrays keep a length-1 axis
/// under the configured name). Build options fluently:
///
/// ```
/// use aeolus_init::{build_grid, GridOptions};
///
/// let grid = build_grid(GridOptions::default().with_extents(4, 6).with_mid_levels(20))?;
/// # Ok::<(), aeolus_init::InvalidGridParameters>(())
/// ```
#[derive(Debug, Clone)]
pub struct GridOptions {
    pub nx: usize,
    pub ny: usize,
    pub nz_mid: usize,
    pub x_name: String,
    pub y_name: String,
    pub surface_pressure: Pressure,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            nx: 1,
            ny: 1,
            nz_mid: DEFAULT_MID_LEVEL_COUNT,
            x_name: "lon".to_string(),
            y_name: "lat".to_string(),
            surface_pressure: Pressure::new::<pascal>(REFERENCE_SURFACE_PRESSURE_PA),
        }
    }
}

impl GridOptions {
    /// Sets the horizontal extents (longitude points, latitude points).
    #[must_use]
    pub fn with_extents(mut self, nx: usize, ny: usize) -> Self {
        self.nx = nx;
        self.ny = ny;
        self
    }

    /// Sets the number of atmospheric mid-levels.
    #[must_use]
    pub fn with_mid_levels(mut self, nz_mid: usize) -> Self {
        self.nz_mid = nz_mid;
        self
    }

    /// Renames the horizontal dimension labels. Semantics are unchanged.
    #[must_use]
    pub fn with_axis_names(mut self, x_name: impl Into<String>, y_name: impl Into<String>) -> Self {
        self.x_name = x_name.into();
        self.y_name = y_name.into();
        self
    }

    /// Sets the surface pressure the vertical coordinate is anchored to.
    #[must_use]
    pub fn with_surface_pressure(mut self, surface_pressure: Pressure) -> Self {
        self.surface_pressure = surface_pressure;
        self
    }

    /// Builds the grid described by these options.
    ///
    /// # Errors
    ///
    /// See [`build_grid`].
    pub fn build(self) -> Result<Grid, InvalidGridParameters> {
        build_grid(self)
    }
}

/// Error returned for malformed resolution or pressure parameters.
///
/// Grid parameters are configuration, not data: a failure here indicates a
/// programming mistake and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid grid parameters: {reason}")]
pub struct InvalidGridParameters {
    reason: String,
}

impl InvalidGridParameters {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Human-readable description of the rejected parameter.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Builds an immutable grid with hybrid sigma-pressure vertical coordinates.
///
/// The returned grid always contains `time`, `air_pressure`,
/// `air_pressure_on_interface_levels`, `surface_air_pressure`, and
/// `height_on_ice_interface_levels`; `latitude` and `longitude` are present
/// only when the corresponding extent exceeds 1. Interface pressures run
/// strictly decreasing from the surface value to
/// [`TOP_OF_ATMOSPHERE_PRESSURE_PA`], and every mid-level pressure lies
/// strictly between its bounding interfaces. This ordering is checked as a
/// postcondition before the grid is returned, not left to callers.
///
/// # Errors
///
/// [`InvalidGridParameters`] when an extent is zero, `nz_mid` is zero, the
/// surface pressure is not positive, or the surface pressure does not exceed
/// the model-top pressure (no decreasing column can anchor to it).
pub fn build_grid(options: GridOptions) -> Result<Grid, InvalidGridParameters> {
    let GridOptions {
        nx,
        ny,
        nz_mid,
        x_name,
        y_name,
        surface_pressure,
    } = options;

    if nx == 0 || ny == 0 {
        return Err(InvalidGridParameters::new(format!(
            "horizontal extents must be positive, got nx={nx}, ny={ny}"
        )));
    }
    if nz_mid == 0 {
        return Err(InvalidGridParameters::new(
            "at least one mid-level is required",
        ));
    }

    let p_surf = surface_pressure.get::<pascal>();
    if p_surf <= 0.0 {
        return Err(InvalidGridParameters::new(format!(
            "surface pressure must be positive, got {p_surf} Pa"
        )));
    }
    if p_surf <= TOP_OF_ATMOSPHERE_PRESSURE_PA {
        return Err(InvalidGridParameters::new(format!(
            "surface pressure {p_surf} Pa must exceed the model-top pressure \
             {TOP_OF_ATMOSPHERE_PRESSURE_PA} Pa"
        )));
    }

    let levels = HybridLevels::new(nz_mid);
    let p_interface = levels.interface_pressures(p_surf);
    let p_mid = mid_level_pressures(&p_interface);

    if !column_is_ordered(&p_mid, &p_interface) {
        return Err(InvalidGridParameters::new(
            "hybrid coefficients produced a non-monotonic pressure column",
        ));
    }

    tracing::debug!(
        nx,
        ny,
        nz_mid,
        surface_pressure_pa = p_surf,
        "built hybrid sigma-pressure column"
    );

    let mut state = StateMap::new(start_of_run());

    state.insert(
        "air_pressure",
        Quantity::new(
            Array3::from_shape_fn((ny, nx, nz_mid), |(_, _, k)| p_mid[k]).into_dyn(),
            "Pa",
            [y_name.clone(), x_name.clone(), MID_LEVELS.to_string()],
        ),
    );
    state.insert(
        "air_pressure_on_interface_levels",
        Quantity::new(
            Array3::from_shape_fn((ny, nx, nz_mid + 1), |(_, _, k)| p_interface[k]).into_dyn(),
            "Pa",
            [y_name.clone(), x_name.clone(), INTERFACE_LEVELS.to_string()],
        ),
    );
    state.insert(
        "surface_air_pressure",
        Quantity::new(
            Array2::from_elem((ny, nx), p_surf).into_dyn(),
            "Pa",
            [y_name.clone(), x_name.clone()],
        ),
    );
    state.insert(
        "height_on_ice_interface_levels",
        Quantity::new(
            ArrayD::zeros(IxDyn(&[ICE_INTERFACE_LEVEL_COUNT])),
            "m",
            [ICE_INTERFACE_LEVELS],
        ),
    );

    if ny > 1 {
        let latitude =
            Array1::from_shape_fn(ny, |j| -90.0 + (j as f64 + 0.5) * 180.0 / ny as f64);
        state.insert(
            "latitude",
            Quantity::column(latitude, "degrees_north", y_name),
        );
    }
    if nx > 1 {
        let longitude = Array1::from_shape_fn(nx, |i| (i as f64 + 0.5) * 360.0 / nx as f64);
        state.insert(
            "longitude",
            Quantity::column(longitude, "degrees_east", x_name),
        );
    }

    Ok(Grid::new(state))
}
