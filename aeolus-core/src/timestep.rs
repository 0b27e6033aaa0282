use std::{fmt, ops::Deref};

use thiserror::Error;
use uom::{
    si::{f64::Time, time},
    Conversion,
};

/// A unit-safe, strictly positive duration handed to stepped components.
///
/// Capabilities that advance the model over time ([`Stepper`] and
/// [`ImplicitTendency`]) receive a `Timestep` through [`invoke`]. Wrapping
/// [`Time`] keeps the value unit-safe while enforcing that the duration is
/// strictly greater than zero; zero or negative durations fail with
/// [`TimestepError::NotPositive`] at construction, so downstream code never
/// has to re-check.
///
/// ```
/// use aeolus_core::Timestep;
/// use uom::si::time::hour;
///
/// let dt = Timestep::new::<hour>(1.0).unwrap();
/// assert_eq!(dt.seconds(), 3600.0);
/// ```
///
/// [`Stepper`]: crate::Capability::Stepper
/// [`ImplicitTendency`]: crate::Capability::ImplicitTendency
/// [`invoke`]: crate::invoke
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Timestep(Time);

/// Error type returned when constructing an invalid [`Timestep`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimestepError {
    #[error("timestep must be greater than zero, got {0} s")]
    NotPositive(f64),
}

impl Timestep {
    /// Constructs a `Timestep` from a numeric value and a [`uom`] time unit.
    ///
    /// # Errors
    ///
    /// Returns [`TimestepError::NotPositive`] if `value` is zero or negative.
    pub fn new<U>(value: f64) -> Result<Self, TimestepError>
    where
        U: time::Unit + Conversion<f64, T = f64>,
    {
        Self::from_time(Time::new::<U>(value))
    }

    /// Constructs a `Timestep` from an existing [`Time`] value.
    ///
    /// # Errors
    ///
    /// Returns [`TimestepError::NotPositive`] if the time is zero or negative.
    pub fn from_time(time: Time) -> Result<Self, TimestepError> {
        let seconds = time.get::<time::second>();
        if seconds > 0.0 {
            Ok(Self(time))
        } else {
            Err(TimestepError::NotPositive(seconds))
        }
    }

    /// Constructs a `Timestep` of the given number of seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimestepError::NotPositive`] if `seconds` is zero or negative.
    pub fn from_seconds(seconds: f64) -> Result<Self, TimestepError> {
        Self::new::<time::second>(seconds)
    }

    /// Constructs a `Timestep` of the given number of hours.
    ///
    /// # Errors
    ///
    /// Returns [`TimestepError::NotPositive`] if `hours` is zero or negative.
    pub fn from_hours(hours: f64) -> Result<Self, TimestepError> {
        Self::new::<time::hour>(hours)
    }

    /// The duration in seconds.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.0.get::<time::second>()
    }

    /// Consumes the `Timestep` and returns the underlying [`Time`] value.
    #[must_use]
    pub fn into_inner(self) -> Time {
        self.0
    }
}

impl TryFrom<Time> for Timestep {
    type Error = TimestepError;

    fn try_from(time: Time) -> Result<Self, Self::Error> {
        Self::from_time(time)
    }
}

/// Dereferences to the inner [`Time`] value for unit-safe arithmetic.
impl Deref for Timestep {
    type Target = Time;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.seconds();
        write!(f, "{s} s")
    }
}
