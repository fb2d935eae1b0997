//! Tolerance-based clustering of near-duplicate site coordinates.
//!
//! Relaxed structures often report the same physical site at coordinates that
//! differ by less than the numerical noise of the relaxation. Each such
//! cluster must collapse to a single grid coordinate or the downstream mesh
//! grows spurious points with near-zero spacing.

use super::SiteData;

/// Collapses the x coordinates of records that sit within
/// `distance_threshold` of each other onto the arithmetic mean of the
/// cluster's original coordinates.
///
/// Membership chains: records are visited in ascending-coordinate order and a
/// record joins the open cluster when it lies within the threshold of the
/// most recently added member's original coordinate (not the evolving mean).
/// The caller-visible record order is preserved, so the input does not need
/// to be sorted; only the coordinates are rewritten.
pub fn cluster_site_coords(
    mut sites_data: Vec<SiteData>,
    distance_threshold: f64,
) -> Vec<SiteData> {
    let mut order: Vec<usize> = (0..sites_data.len()).collect();
    order.sort_by(|&a, &b| sites_data[a].x.total_cmp(&sites_data[b].x));

    let mut cluster: Vec<usize> = Vec::new();
    let mut reference_x = f64::NAN;
    for &index in &order {
        let x = sites_data[index].x;
        if cluster.is_empty() || (x - reference_x).abs() <= distance_threshold {
            cluster.push(index);
        } else {
            collapse_cluster(&mut sites_data, &cluster);
            cluster.clear();
            cluster.push(index);
        }
        reference_x = x;
    }
    collapse_cluster(&mut sites_data, &cluster);

    sites_data
}

fn collapse_cluster(sites_data: &mut [SiteData], cluster: &[usize]) {
    if cluster.is_empty() {
        return;
    }
    let mean = cluster.iter().map(|&i| sites_data[i].x).sum::<f64>() / cluster.len() as f64;
    for &index in cluster {
        sites_data[index].x = mean;
    }
}
