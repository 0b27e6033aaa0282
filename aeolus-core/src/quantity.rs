use ndarray::{arr0, Array1, ArrayD};

/// A named array-valued physical field.
///
/// A `Quantity` pairs its numeric values with a unit string and an ordered
/// list of dimension names, one per array axis. Dimension names are drawn
/// from the model vocabulary: the horizontal axes (`"lon"`/`"lat"` by
/// default, renameable at grid construction) and the vertical axes
/// ([`MID_LEVELS`], [`INTERFACE_LEVELS`], [`ICE_INTERFACE_LEVELS`]).
///
/// [`MID_LEVELS`]: crate::MID_LEVELS
/// [`INTERFACE_LEVELS`]: crate::INTERFACE_LEVELS
/// [`ICE_INTERFACE_LEVELS`]: crate::ICE_INTERFACE_LEVELS
///
/// The `dims` list and the array shape are expected to have the same length;
/// composition validates dimension lengths across the whole state, so a
/// malformed quantity surfaces there rather than at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub values: ArrayD<f64>,
    pub units: String,
    pub dims: Vec<String>,
}

impl Quantity {
    /// Creates a quantity from an array, a unit string, and dimension names.
    #[must_use]
    pub fn new(
        values: ArrayD<f64>,
        units: impl Into<String>,
        dims: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            values,
            units: units.into(),
            dims: dims.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a dimensionless (zero-axis) quantity holding a single value.
    #[must_use]
    pub fn scalar(value: f64, units: impl Into<String>) -> Self {
        Self {
            values: arr0(value).into_dyn(),
            units: units.into(),
            dims: Vec::new(),
        }
    }

    /// Creates a one-dimensional quantity along a single named axis.
    #[must_use]
    pub fn column(
        values: impl Into<Array1<f64>>,
        units: impl Into<String>,
        dim: impl Into<String>,
    ) -> Self {
        Self {
            values: values.into().into_dyn(),
            units: units.into(),
            dims: vec![dim.into()],
        }
    }

    /// Returns the axis index of the named dimension, if present.
    #[must_use]
    pub fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// Returns the length of the named dimension, if present.
    #[must_use]
    pub fn dim_len(&self, dim: &str) -> Option<usize> {
        self.axis_of(dim).map(|axis| self.values.shape()[axis])
    }

    /// Iterates over `(dimension name, axis length)` pairs.
    pub fn lengths(&self) -> impl Iterator<Item = (&str, usize)> {
        self.dims
            .iter()
            .map(String::as_str)
            .zip(self.values.shape().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::Array3;

    use crate::dimensions::MID_LEVELS;

    #[test]
    fn scalar_quantity_has_no_dims() {
        let q = Quantity::scalar(101_325.0, "Pa");
        assert!(q.dims.is_empty());
        assert_eq!(q.values.ndim(), 0);
        assert_eq!(q.values.sum(), 101_325.0);
    }

    #[test]
    fn axis_lookup_by_dimension_name() {
        let q = Quantity::new(
            Array3::<f64>::zeros((3, 4, 5)).into_dyn(),
            "Pa",
            ["lat", "lon", MID_LEVELS],
        );
        assert_eq!(q.axis_of(MID_LEVELS), Some(2));
        assert_eq!(q.dim_len("lat"), Some(3));
        assert_eq!(q.dim_len("lon"), Some(4));
        assert_eq!(q.dim_len("height"), None);
    }

    #[test]
    fn lengths_pairs_dims_with_shape() {
        let q = Quantity::column(vec![0.0, 1.0], "m", "interface_levels");
        let pairs: Vec<_> = q.lengths().collect();
        assert_eq!(pairs, vec![("interface_levels", 2)]);
    }
}
