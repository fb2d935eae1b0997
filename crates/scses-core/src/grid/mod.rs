//! Per-grid-point aggregation of co-located site energies.

use crate::domain::AggregationMethod;
use crate::species::Site;

/// One discretised location in the solver's mesh, holding the sites whose
/// defect energies occupy it. `volume` is the cell volume represented by the
/// point, used for charge-density normalisation downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    pub x: f64,
    pub volume: f64,
    sites: Vec<Site>,
}

impl GridPoint {
    pub fn new(x: f64, volume: f64) -> Self {
        Self {
            x,
            volume,
            sites: Vec::new(),
        }
    }

    pub fn add_site(&mut self, site: Site) {
        self.sites.push(site);
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Mutable access for the solver's in-place energy assignment.
    pub fn sites_mut(&mut self) -> &mut [Site] {
        &mut self.sites
    }

    /// One aggregate segregation energy per defect species across all sites
    /// at this point, or `None` for a point with no sites. An empty point is
    /// a normal outcome, not an error; callers must handle the absence.
    pub fn average_site_energy(&self, method: AggregationMethod) -> Option<Vec<f64>> {
        if self.sites.is_empty() {
            return None;
        }
        let energies: Vec<Vec<f64>> = self.sites.iter().map(Site::energies).collect();
        Some(average_energies(&energies, method))
    }
}

/// Column-wise reduction of stacked per-site energy vectors (rows = sites,
/// columns = species). All rows are assumed to share one species ordering;
/// that is a precondition of the mesh construction, not checked here.
pub fn average_energies(energies: &[Vec<f64>], method: AggregationMethod) -> Vec<f64> {
    let species_count = energies.first().map_or(0, Vec::len);
    (0..species_count)
        .map(|column| {
            let column_values = energies.iter().map(|row| row[column]);
            match method {
                AggregationMethod::Mean => {
                    column_values.sum::<f64>() / energies.len() as f64
                }
                AggregationMethod::Min => column_values.fold(f64::INFINITY, f64::min),
            }
        })
        .collect()
}
