use std::collections::btree_map;
use std::collections::BTreeMap;

use jiff::civil::DateTime;

use crate::quantity::Quantity;

/// A mapping from quantity name to [`Quantity`], plus the model time.
///
/// `StateMap` is the working representation of model state: the grid
/// builder produces one (wrapped in a [`Grid`]), the state composer extends
/// a copy of it with component defaults, and components read it during
/// invocation.
///
/// The name `"time"` is reserved. Model time is a timestamp rather than a
/// units/dims quantity, so it is held in its own field; [`contains`] still
/// reports it as present to keep name-based lookups uniform.
///
/// [`contains`]: StateMap::contains
#[derive(Debug, Clone, PartialEq)]
pub struct StateMap {
    time: DateTime,
    quantities: BTreeMap<String, Quantity>,
}

impl StateMap {
    /// Creates an empty state at the given model time.
    #[must_use]
    pub fn new(time: DateTime) -> Self {
        Self {
            time,
            quantities: BTreeMap::new(),
        }
    }

    /// The model time.
    #[must_use]
    pub fn time(&self) -> DateTime {
        self.time
    }

    /// Replaces the model time.
    pub fn set_time(&mut self, time: DateTime) {
        self.time = time;
    }

    /// Inserts a quantity, returning the previous value under that name.
    pub fn insert(&mut self, name: impl Into<String>, quantity: Quantity) -> Option<Quantity> {
        self.quantities.insert(name.into(), quantity)
    }

    /// Looks up a quantity by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.quantities.get(name)
    }

    /// Looks up a quantity by name for in-place mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Quantity> {
        self.quantities.get_mut(name)
    }

    /// Whether the named quantity (or `"time"`) is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        name == "time" || self.quantities.contains_key(name)
    }

    /// Number of quantities, not counting `"time"`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Iterates over `(name, quantity)` pairs in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Quantity> {
        self.quantities.iter()
    }

    /// Iterates over quantity names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.quantities.keys().map(String::as_str)
    }

    /// Merges another mapping into this one, overwriting existing names.
    pub fn extend(&mut self, quantities: BTreeMap<String, Quantity>) {
        self.quantities.extend(quantities);
    }
}

impl<'a> IntoIterator for &'a StateMap {
    type Item = (&'a String, &'a Quantity);
    type IntoIter = btree_map::Iter<'a, String, Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An immutable set of base quantities produced by grid construction.
///
/// A `Grid` wraps a [`StateMap`] holding the pressure fields, coordinate
/// arrays, and time stamp that every simulation starts from. It is created
/// once per build call and never mutated afterward; state composition clones
/// it into a fresh `StateMap` via [`to_state`] and extends the copy.
///
/// Construct one with `aeolus_init::build_grid`, which is responsible for
/// the pressure-ordering guarantees documented there.
///
/// [`to_state`]: Grid::to_state
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    state: StateMap,
}

impl Grid {
    /// Wraps a finished state as an immutable grid.
    #[must_use]
    pub fn new(state: StateMap) -> Self {
        Self { state }
    }

    /// The model time the grid was built for.
    #[must_use]
    pub fn time(&self) -> DateTime {
        self.state.time()
    }

    /// Looks up a grid quantity by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.state.get(name)
    }

    /// Whether the named quantity (or `"time"`) is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.state.contains(name)
    }

    /// Iterates over `(name, quantity)` pairs in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Quantity> {
        self.state.iter()
    }

    /// Clones the grid contents into a fresh, mutable state.
    #[must_use]
    pub fn to_state(&self) -> StateMap {
        self.state.clone()
    }

    /// Consumes the grid, releasing its contents as a mutable state.
    #[must_use]
    pub fn into_state(self) -> StateMap {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    fn start_time() -> DateTime {
        date(2000, 1, 1).at(0, 0, 0, 0)
    }

    #[test]
    fn time_is_always_reported_present() {
        let state = StateMap::new(start_time());
        assert!(state.contains("time"));
        assert!(state.is_empty());
    }

    #[test]
    fn insert_and_lookup() {
        let mut state = StateMap::new(start_time());
        state.insert("surface_air_pressure", Quantity::scalar(1.0e5, "Pa"));

        assert!(state.contains("surface_air_pressure"));
        let q = state.get("surface_air_pressure").unwrap();
        assert_eq!(q.units, "Pa");
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn grid_round_trips_to_state() {
        let mut state = StateMap::new(start_time());
        state.insert("surface_air_pressure", Quantity::scalar(1.0e5, "Pa"));

        let grid = Grid::new(state);
        let mut copy = grid.to_state();
        copy.insert("extra", Quantity::scalar(0.0, "1"));

        // The grid is untouched by edits to the copy.
        assert!(!grid.contains("extra"));
        assert!(copy.contains("surface_air_pressure"));
        assert_eq!(copy.time(), grid.time());
    }
}
