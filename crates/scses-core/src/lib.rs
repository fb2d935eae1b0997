//! Setup pipeline for a one-dimensional space-charge / dopant-segregation
//! calculation.
//!
//! The crate ingests raw site records (an x coordinate plus one segregation
//! energy per defect species), validates and clusters them, partitions them
//! into an interior region plus the two boundary-adjacent neighbours, and
//! aggregates coincident site energies per grid point. The differential
//! solver that consumes this geometry lives outside the crate.

pub mod domain;
pub mod grid;
pub mod sites;
pub mod species;
pub mod structure;

pub use domain::{AggregationMethod, ScsesError, ScsesResult, SystemTopology};
pub use grid::GridPoint;
pub use sites::{
    DEFAULT_CLUSTERING_THRESHOLD, DefectData, SiteData, cluster_site_coords, sites_data_from_file,
    sites_data_from_lines,
};
pub use species::{DefectAtSite, DefectSpecies, Site};
pub use structure::StructureData;
