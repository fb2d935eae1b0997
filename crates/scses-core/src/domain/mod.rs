pub mod errors;

pub use errors::{ScsesError, ScsesResult};

use std::fmt::{Display, Formatter};

/// Boundary topology of the simulated region: one open boundary pair with
/// independent offsets, or a symmetric cell where both offsets are forced
/// equal to the lower-side value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemTopology {
    Single,
    Double,
}

impl SystemTopology {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
        }
    }

    /// Parses an external topology tag. Unrecognised tags are configuration
    /// errors and are rejected here, before any geometry is derived.
    pub fn from_tag(tag: &str) -> ScsesResult<Self> {
        match tag {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            _ => Err(ScsesError::UnknownSystem {
                system: tag.to_string(),
            }),
        }
    }
}

impl Display for SystemTopology {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Reduction applied to the segregation energies of co-located sites.
/// `Min` keeps only the lowest-energy occupancy per species, appropriate in
/// the low-temperature limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregationMethod {
    #[default]
    Mean,
    Min,
}

impl AggregationMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Min => "min",
        }
    }

    pub fn from_tag(tag: &str) -> ScsesResult<Self> {
        match tag {
            "mean" => Ok(Self::Mean),
            "min" => Ok(Self::Min),
            _ => Err(ScsesError::UnknownAggregationMethod {
                method: tag.to_string(),
            }),
        }
    }
}

impl Display for AggregationMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}
