use std::path::PathBuf;

pub type ScsesResult<T> = Result<T, ScsesError>;

/// Failure modes of the setup pipeline. All of these surface synchronously to
/// the immediate caller; there is no transient class and nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScsesError {
    #[error("failed to read sites file '{path}': {message}")]
    SitesFileRead { path: PathBuf, message: String },
    #[error("malformed site input line: '{line}'")]
    InputFormat { line: String },
    #[error("site '{label}' has {species} defect species but {energies} segregation energies")]
    EnergyCountMismatch {
        label: String,
        species: usize,
        energies: usize,
    },
    #[error("site '{label}' has {species} defect species but {scaling} scaling factors")]
    ScalingCountMismatch {
        label: String,
        species: usize,
        scaling: usize,
    },
    #[error("site '{site}' has no defect labelled '{label}'")]
    DefectLabelNotFound { site: String, label: String },
    #[error("no defect species record for label '{label}'")]
    UnknownDefectSpecies { label: String },
    #[error("unknown site-energy aggregation method '{method}', expected 'mean' or 'min'")]
    UnknownAggregationMethod { method: String },
    #[error("unknown boundary system '{system}', expected 'single' or 'double'")]
    UnknownSystem { system: String },
    #[error("invalid x-limits: lower bound {lower} exceeds upper bound {upper}")]
    InvalidXLimits { lower: f64, upper: f64 },
    #[error("no site below the lower x-limit {limit} to anchor the boundary")]
    NoSiteBelowLowerLimit { limit: f64 },
    #[error("no site above the upper x-limit {limit} to anchor the boundary")]
    NoSiteAboveUpperLimit { limit: f64 },
    #[error("boundary offsets need at least 2 distinct interior x coordinates, got {count}")]
    TooFewInteriorSites { count: usize },
}
