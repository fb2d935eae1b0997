//! Partitioning of a sorted site sequence into the interior calculation
//! region and its boundary-adjacent neighbours, plus the boundary-offset
//! geometry derived from that split.

use crate::domain::{ScsesError, ScsesResult, SystemTopology};
use crate::sites::{SiteData, sites_data_from_file};
use std::path::Path;

/// Splits a coordinate-sorted site sequence at a window.
///
/// Binary search locates the left insertion index of `lower` and the right
/// insertion index of `upper`, so a site exactly on either bound stays
/// interior. Returns the interior slice plus the pair of records immediately
/// outside the window, which anchor the boundary derivatives.
pub fn split_sites_data(
    sites_data: Vec<SiteData>,
    x_limits: (f64, f64),
) -> ScsesResult<(Vec<SiteData>, (SiteData, SiteData))> {
    if x_limits.0 > x_limits.1 {
        return Err(ScsesError::InvalidXLimits {
            lower: x_limits.0,
            upper: x_limits.1,
        });
    }

    let index_lower = sites_data.partition_point(|sd| sd.x < x_limits.0);
    let index_upper = sites_data.partition_point(|sd| sd.x <= x_limits.1);

    if index_lower == 0 {
        return Err(ScsesError::NoSiteBelowLowerLimit { limit: x_limits.0 });
    }
    if index_upper >= sites_data.len() {
        return Err(ScsesError::NoSiteAboveUpperLimit { limit: x_limits.1 });
    }

    let lower_adjacent = sites_data[index_lower - 1].clone();
    let upper_adjacent = sites_data[index_upper].clone();
    let inner_sites_data = sites_data[index_lower..index_upper].to_vec();
    Ok((inner_sites_data, (lower_adjacent, upper_adjacent)))
}

/// All structural information a space-charge calculation needs: the interior
/// defect sites, the two boundary-adjacent sites, and the cell geometry.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureData {
    sites_data: Vec<SiteData>,
    adjacent_sites_data: (SiteData, SiteData),
    x_limits: (f64, f64),
    b: f64,
    c: f64,
    site_x_coords: Vec<f64>,
    system: SystemTopology,
}

impl StructureData {
    /// Builds the region container from a coordinate-sorted, clustered site
    /// sequence covering more than the window. The offset formulas reference
    /// the second and second-to-last interior coordinates, so fewer than two
    /// distinct interior coordinates is rejected here.
    pub fn new(
        sites_data: Vec<SiteData>,
        x_limits: (f64, f64),
        b: f64,
        c: f64,
        system: SystemTopology,
    ) -> ScsesResult<Self> {
        let (inner_sites_data, adjacent_sites_data) = split_sites_data(sites_data, x_limits)?;
        let site_x_coords = unique_x_coords(&inner_sites_data);
        if site_x_coords.len() < 2 {
            return Err(ScsesError::TooFewInteriorSites {
                count: site_x_coords.len(),
            });
        }
        Ok(Self {
            sites_data: inner_sites_data,
            adjacent_sites_data,
            x_limits,
            b,
            c,
            site_x_coords,
            system,
        })
    }

    /// Reads the whole sites file (no window filtering, so the records just
    /// outside the window survive to become the adjacent pair), then
    /// partitions against `x_limits`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_file(
        path: &Path,
        x_limits: (f64, f64),
        b: f64,
        c: f64,
        system: SystemTopology,
        clustering_threshold: f64,
        site_charge: bool,
    ) -> ScsesResult<Self> {
        let sites_data = sites_data_from_file(
            path,
            (f64::NEG_INFINITY, f64::INFINITY),
            clustering_threshold,
            site_charge,
        )?;
        Self::new(sites_data, x_limits, b, c, system)
    }

    /// Interior sites, sorted ascending by coordinate.
    pub fn sites_data(&self) -> &[SiteData] {
        &self.sites_data
    }

    /// The records immediately below the lower and above the upper bound.
    pub fn adjacent_sites_data(&self) -> (&SiteData, &SiteData) {
        (&self.adjacent_sites_data.0, &self.adjacent_sites_data.1)
    }

    pub fn x_limits(&self) -> (f64, f64) {
        self.x_limits
    }

    /// Length of the b dimension of the cell, perpendicular to x.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Length of the c dimension of the cell, perpendicular to x.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Sorted unique x coordinates of the interior sites.
    pub fn site_x_coords(&self) -> &[f64] {
        &self.site_x_coords
    }

    pub fn system(&self) -> SystemTopology {
        self.system
    }

    /// Half-gap boundary offsets for the first-derivative stencils.
    ///
    /// The lower offset is half the gap from the second interior coordinate
    /// to the lower adjacent record; the upper offset mirrors it at the top
    /// of the region. A `Double` system is symmetric, so both offsets take
    /// the lower-side value.
    pub fn limits(&self) -> (f64, f64) {
        let min_offset = (self.site_x_coords[1] - self.adjacent_sites_data.0.x) / 2.0;
        let max_offset = (self.adjacent_sites_data.1.x
            - self.site_x_coords[self.site_x_coords.len() - 2])
            / 2.0;
        match self.system {
            SystemTopology::Single => (min_offset, max_offset),
            SystemTopology::Double => (min_offset, min_offset),
        }
    }

    /// Raw (non-halved) gaps from the outermost interior coordinates to
    /// their adjacent records, for the Laplacian stencils at the boundary.
    pub fn limits_for_laplacian(&self) -> (f64, f64) {
        let lower_gap = self.site_x_coords[0] - self.adjacent_sites_data.0.x;
        let upper_gap =
            self.adjacent_sites_data.1.x - self.site_x_coords[self.site_x_coords.len() - 1];
        match self.system {
            SystemTopology::Single => (lower_gap, upper_gap),
            SystemTopology::Double => (lower_gap, lower_gap),
        }
    }
}

fn unique_x_coords(sites_data: &[SiteData]) -> Vec<f64> {
    let mut coords: Vec<f64> = sites_data.iter().map(|sd| sd.x).collect();
    coords.sort_by(|a, b| a.total_cmp(b));
    coords.dedup();
    coords
}
