use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimension name of the atmospheric mid-levels (layer centers).
pub const MID_LEVELS: &str = "mid_levels";

/// Dimension name of the atmospheric interface levels (layer boundaries).
///
/// There is always exactly one more interface level than mid-levels.
pub const INTERFACE_LEVELS: &str = "interface_levels";

/// Dimension name of the ice/land-surface coupling levels.
///
/// Their count is fixed and independent of the atmospheric level count.
pub const ICE_INTERFACE_LEVELS: &str = "ice_interface_levels";

/// One entry of a declared dimension list.
///
/// Requirement declarations describe each axis of a quantity either by a
/// concrete dimension name or by [`DimSpec::Wildcard`], which accepts any
/// concrete dimension at that position. The literal `"*"` converts to the
/// wildcard, so declarations read naturally:
///
/// ```
/// use aeolus_core::{DimSpec, PropertySpec, MID_LEVELS};
///
/// let spec = PropertySpec::new("degK", ["*", "*", MID_LEVELS]);
/// assert_eq!(spec.dims[0], DimSpec::Wildcard);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DimSpec {
    /// Accepts any concrete dimension in this position.
    Wildcard,
    /// Requires the named dimension to be present on the quantity.
    Name(String),
}

impl DimSpec {
    /// Whether this entry is satisfied by the given concrete dimension name.
    #[must_use]
    pub fn matches(&self, concrete: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Name(name) => name == concrete,
        }
    }
}

impl From<&str> for DimSpec {
    fn from(value: &str) -> Self {
        if value == "*" {
            Self::Wildcard
        } else {
            Self::Name(value.to_string())
        }
    }
}

impl From<String> for DimSpec {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl fmt::Display for DimSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => write!(f, "*"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Declared units and dimensions for one quantity in a property group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertySpec {
    pub units: String,
    pub dims: Vec<DimSpec>,
}

impl PropertySpec {
    /// Creates a spec from a unit string and a dimension list.
    ///
    /// Entries convert via [`DimSpec::from`], so `"*"` means wildcard.
    #[must_use]
    pub fn new(
        units: impl Into<String>,
        dims: impl IntoIterator<Item = impl Into<DimSpec>>,
    ) -> Self {
        Self {
            units: units.into(),
            dims: dims.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a spec for a dimensionless (zero-axis) quantity.
    #[must_use]
    pub fn scalar(units: impl Into<String>) -> Self {
        Self {
            units: units.into(),
            dims: Vec::new(),
        }
    }

    /// Returns the declared dimension names absent from `actual`.
    ///
    /// The check is order-insensitive and ignores wildcards: a concrete
    /// dimension list satisfies this spec when it is a superset of the
    /// declared names. Resolution is purely structural; no state is
    /// consulted.
    #[must_use]
    pub fn missing_dimensions(&self, actual: &[String]) -> Vec<String> {
        self.dims
            .iter()
            .filter_map(|spec| match spec {
                DimSpec::Wildcard => None,
                DimSpec::Name(name) if actual.iter().any(|dim| dim == name) => None,
                DimSpec::Name(name) => Some(name.clone()),
            })
            .collect()
    }

    /// Whether a concrete dimension list satisfies this declaration.
    #[must_use]
    pub fn dims_satisfied_by(&self, actual: &[String]) -> bool {
        self.missing_dimensions(actual).is_empty()
    }
}

/// Declared quantities of one property group, keyed by quantity name.
pub type PropertyMap = BTreeMap<String, PropertySpec>;

/// The four property groups a component may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyGroup {
    Input,
    Output,
    Tendency,
    Diagnostic,
}

impl PropertyGroup {
    /// All groups, in the order composition processes them.
    pub const ALL: [Self; 4] = [Self::Input, Self::Output, Self::Tendency, Self::Diagnostic];
}

impl fmt::Display for PropertyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Tendency => "tendency",
            Self::Diagnostic => "diagnostic",
        };
        write!(f, "{name}")
    }
}
