/// Pressure at the model top, in pascals.
pub const TOP_OF_ATMOSPHERE_PRESSURE_PA: f64 = 20.0;

/// Hybrid sigma-pressure coefficient table for one vertical column.
///
/// Interface pressures follow `p[k] = a[k] + b[k] * p_surface`, with `k = 0`
/// at the surface. The coefficients are fixed at construction and never
/// depend on the runtime surface pressure: `b` falls quadratically along a
/// uniform sigma ladder from 1 at the surface to 0 at the top, and `a`
/// compensates so the column spans exactly `p_surface` down to
/// [`TOP_OF_ATMOSPHERE_PRESSURE_PA`]. The quadratic ladder concentrates
/// levels near the surface, where terrain-following coordinates need them.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridLevels {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl HybridLevels {
    /// Builds the coefficient table for a column with `nz_mid` mid-levels.
    ///
    /// `nz_mid` must be at least 1; the grid builder validates this before
    /// constructing the table.
    #[must_use]
    pub fn new(nz_mid: usize) -> Self {
        let n_interface = nz_mid + 1;
        let mut a = Vec::with_capacity(n_interface);
        let mut b = Vec::with_capacity(n_interface);

        for k in 0..n_interface {
            let sigma = (n_interface - 1 - k) as f64 / nz_mid as f64;
            let b_k = sigma * sigma;
            a.push(TOP_OF_ATMOSPHERE_PRESSURE_PA * (1.0 - b_k));
            b.push(b_k);
        }

        Self { a, b }
    }

    /// Number of interface levels (always one more than mid-levels).
    #[must_use]
    pub fn n_interface_levels(&self) -> usize {
        self.a.len()
    }

    /// Number of mid-levels.
    #[must_use]
    pub fn n_mid_levels(&self) -> usize {
        self.a.len() - 1
    }

    /// Interface pressures for the given surface pressure, surface first.
    #[must_use]
    pub fn interface_pressures(&self, surface_pressure_pa: f64) -> Vec<f64> {
        self.a
            .iter()
            .zip(&self.b)
            .map(|(a, b)| a + b * surface_pressure_pa)
            .collect()
    }
}

/// Mid-level pressures as arithmetic means of bounding interface pressures.
#[must_use]
pub(crate) fn mid_level_pressures(interface: &[f64]) -> Vec<f64> {
    interface
        .windows(2)
        .map(|pair| 0.5 * (pair[0] + pair[1]))
        .collect()
}

/// Whether a column is physically ordered: interface and mid-level
/// pressures strictly decreasing with height, each mid-level strictly
/// between its bounding interfaces.
#[must_use]
pub(crate) fn column_is_ordered(mid: &[f64], interface: &[f64]) -> bool {
    let interfaces_decrease = interface.windows(2).all(|pair| pair[1] < pair[0]);
    let mids_decrease = mid.windows(2).all(|pair| pair[1] < pair[0]);
    let mids_between = mid
        .iter()
        .zip(interface.windows(2))
        .all(|(p, pair)| pair[1] < *p && *p < pair[0]);

    interfaces_decrease && mids_decrease && mids_between
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn column_spans_surface_to_top() {
        let levels = HybridLevels::new(28);
        let p = levels.interface_pressures(101_325.0);

        assert_eq!(p.len(), 29);
        assert_relative_eq!(p[0], 101_325.0);
        assert_relative_eq!(p[28], TOP_OF_ATMOSPHERE_PRESSURE_PA);
    }

    #[test]
    fn coefficients_combine_linearly_with_surface_pressure() {
        let levels = HybridLevels::new(10);
        let lo = levels.interface_pressures(9.0e4);
        let base = levels.interface_pressures(1.0e5);
        let hi = levels.interface_pressures(1.1e5);

        // Equal surface-pressure perturbations produce equal responses.
        for k in 0..levels.n_interface_levels() {
            assert_relative_eq!(hi[k] - base[k], base[k] - lo[k], max_relative = 1e-9);
        }
    }

    #[test]
    fn columns_are_ordered_for_a_range_of_level_counts() {
        for nz in [1, 2, 3, 7, 28, 60] {
            let levels = HybridLevels::new(nz);
            let interface = levels.interface_pressures(101_325.0);
            let mid = mid_level_pressures(&interface);

            assert_eq!(mid.len(), nz);
            assert!(
                column_is_ordered(&mid, &interface),
                "column with {nz} mid-levels is not ordered"
            );
        }
    }

    #[test]
    fn disordered_columns_are_detected() {
        assert!(!column_is_ordered(&[5.0, 6.0], &[10.0, 4.0, 1.0]));
        assert!(!column_is_ordered(&[7.0], &[5.0, 10.0]));
        assert!(column_is_ordered(&[7.0], &[10.0, 5.0]));
    }
}
