use scses_core::{
    AggregationMethod, DEFAULT_CLUSTERING_THRESHOLD, DefectSpecies, GridPoint, Site,
    StructureData, SystemTopology,
};
use std::io::Write;
use std::rc::Rc;
use tempfile::NamedTempFile;

// Five sites spaced 1.0 apart, one defect species, with the outer pair
// outside the calculation window (-1.0, 1.0).
const SITES: &str = "A 0.0 -2.0 Vo -0.1\n\
                     A 0.0 -1.0 Vo -0.2\n\
                     A 0.0 0.0 Vo -0.3\n\
                     A 0.0 1.0 Vo -0.4\n\
                     A 0.0 2.0 Vo -0.5\n";

fn structure_from(contents: &str, system: SystemTopology) -> StructureData {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(contents.as_bytes())
        .expect("temp file should be writable");
    StructureData::from_file(
        file.path(),
        (-1.0, 1.0),
        2.0,
        3.0,
        system,
        DEFAULT_CLUSTERING_THRESHOLD,
        false,
    )
    .expect("structure should build")
}

#[test]
fn from_file_partitions_interior_and_adjacent_sites() {
    let structure = structure_from(SITES, SystemTopology::Single);

    let interior: Vec<f64> = structure.sites_data().iter().map(|sd| sd.x).collect();
    assert_eq!(interior, vec![-1.0, 0.0, 1.0]);

    let (lower, upper) = structure.adjacent_sites_data();
    assert_eq!(lower.x, -2.0);
    assert_eq!(upper.x, 2.0);

    assert_eq!(structure.x_limits(), (-1.0, 1.0));
    assert_eq!(structure.b(), 2.0);
    assert_eq!(structure.c(), 3.0);
    assert_eq!(structure.site_x_coords(), &[-1.0, 0.0, 1.0]);
}

#[test]
fn single_system_offsets_are_half_the_local_adjacent_gaps() {
    let structure = structure_from(SITES, SystemTopology::Single);
    // Evenly spaced sites: both half-gaps equal the site spacing.
    assert_eq!(structure.limits(), (1.0, 1.0));
    assert_eq!(structure.limits_for_laplacian(), (1.0, 1.0));
}

#[test]
fn double_system_offsets_always_match_on_both_sides() {
    // Uneven upper spacing so single/double actually differ.
    let sites = "A 0.0 -2.0 Vo -0.1\n\
                 A 0.0 -1.0 Vo -0.2\n\
                 A 0.0 0.0 Vo -0.3\n\
                 A 0.0 1.0 Vo -0.4\n\
                 A 0.0 3.0 Vo -0.5\n";

    let single = structure_from(sites, SystemTopology::Single);
    assert_eq!(single.limits(), (1.0, 1.5));
    assert_eq!(single.limits_for_laplacian(), (1.0, 2.0));

    let double = structure_from(sites, SystemTopology::Double);
    assert_eq!(double.limits(), (1.0, 1.0));
    assert_eq!(double.limits_for_laplacian(), (1.0, 1.0));
}

#[test]
fn interior_sites_feed_grid_point_aggregation() {
    let structure = structure_from(SITES, SystemTopology::Single);
    let species = vec![Rc::new(DefectSpecies {
        label: "Vo".to_string(),
        valence: 2.0,
        mole_fraction: 0.05,
        mobility: 0.0,
        fixed: false,
    })];

    let mut point = GridPoint::new(0.0, structure.b() * structure.c());
    for site_data in structure.sites_data() {
        let site = Site::from_site_data(site_data, &species).expect("site should build");
        point.add_site(site);
    }

    let mean = point
        .average_site_energy(AggregationMethod::Mean)
        .expect("point has sites");
    assert_eq!(mean.len(), 1);
    assert!((mean[0] - (-0.3)).abs() < 1.0e-12);

    assert_eq!(
        point.average_site_energy(AggregationMethod::Min),
        Some(vec![-0.4])
    );
}
