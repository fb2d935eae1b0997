//! Defect species records and the sites instantiated against them.
//!
//! Species definitions come from an external provider (one record per
//! species, shared across every site that hosts it); a [`Site`] pairs those
//! shared records with this site's segregation energies.

use crate::domain::{ScsesError, ScsesResult};
use crate::sites::SiteData;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// One point-defect species and its physical parameters. `fixed` selects the
/// Mott-Schottky picture (immobile dopants) over Gouy-Chapman redistribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectSpecies {
    pub label: String,
    pub valence: f64,
    pub mole_fraction: f64,
    #[serde(default)]
    pub mobility: f64,
    #[serde(default)]
    pub fixed: bool,
}

/// A defect species as it occurs at one concrete site: the shared species
/// parameters plus this site's segregation energy. `energy` is the one field
/// the downstream solver reassigns in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DefectAtSite {
    pub label: String,
    pub valence: f64,
    pub mole_fraction: f64,
    pub mobility: f64,
    pub energy: f64,
    pub fixed: bool,
}

/// A site instantiated against a concrete ordered set of defect species.
///
/// `defect_species`, `defect_energies`, and `scaling` always have equal
/// lengths; the constructor rejects anything else, so no consumer needs to
/// re-check.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    label: String,
    x: f64,
    defect_species: Vec<Rc<DefectSpecies>>,
    defect_energies: Vec<f64>,
    scaling: Vec<f64>,
    valence: f64,
    defects: Vec<DefectAtSite>,
}

impl Site {
    /// Builds a site. `scaling` defaults to 1.0 per species and `valence`
    /// to 0.0 when not supplied; mismatched lengths are cardinality errors
    /// and nothing is constructed.
    pub fn new(
        label: impl Into<String>,
        x: f64,
        defect_species: Vec<Rc<DefectSpecies>>,
        defect_energies: Vec<f64>,
        scaling: Option<Vec<f64>>,
        valence: Option<f64>,
    ) -> ScsesResult<Self> {
        let label = label.into();
        if defect_species.len() != defect_energies.len() {
            return Err(ScsesError::EnergyCountMismatch {
                label,
                species: defect_species.len(),
                energies: defect_energies.len(),
            });
        }
        let scaling = match scaling {
            Some(scaling) => {
                if scaling.len() != defect_species.len() {
                    return Err(ScsesError::ScalingCountMismatch {
                        label,
                        species: defect_species.len(),
                        scaling: scaling.len(),
                    });
                }
                scaling
            }
            None => vec![1.0; defect_species.len()],
        };

        let defects = defect_species
            .iter()
            .zip(&defect_energies)
            .map(|(species, &energy)| DefectAtSite {
                label: species.label.clone(),
                valence: species.valence,
                mole_fraction: species.mole_fraction,
                mobility: species.mobility,
                energy,
                fixed: species.fixed,
            })
            .collect();

        Ok(Self {
            label,
            x,
            defect_species,
            defect_energies,
            scaling,
            valence: valence.unwrap_or(0.0),
            defects,
        })
    }

    /// Instantiates a parsed input record against the provider's species
    /// list, matching each defect entry to its species by label. A parsed
    /// site charge becomes the site valence.
    pub fn from_site_data(
        site_data: &SiteData,
        species: &[Rc<DefectSpecies>],
    ) -> ScsesResult<Self> {
        let defect_species = site_data
            .defect_data
            .iter()
            .map(|dd| {
                species
                    .iter()
                    .find(|s| s.label == dd.label)
                    .cloned()
                    .ok_or_else(|| ScsesError::UnknownDefectSpecies {
                        label: dd.label.clone(),
                    })
            })
            .collect::<ScsesResult<Vec<Rc<DefectSpecies>>>>()?;

        Self::new(
            site_data.label.clone(),
            site_data.x,
            defect_species,
            site_data.defect_energies(),
            None,
            site_data.charge,
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn defect_species(&self) -> &[Rc<DefectSpecies>] {
        &self.defect_species
    }

    pub fn defect_energies(&self) -> &[f64] {
        &self.defect_energies
    }

    pub fn scaling(&self) -> &[f64] {
        &self.scaling
    }

    pub fn valence(&self) -> f64 {
        self.valence
    }

    pub fn defects(&self) -> &[DefectAtSite] {
        &self.defects
    }

    /// Per-defect segregation energies, ordered as `defect_species`.
    pub fn energies(&self) -> Vec<f64> {
        self.defects.iter().map(|defect| defect.energy).collect()
    }

    /// The defect occupancy with the given species label.
    pub fn defect_with_label(&self, label: &str) -> ScsesResult<&DefectAtSite> {
        self.defects
            .iter()
            .find(|defect| defect.label == label)
            .ok_or_else(|| self.label_error(label))
    }

    /// Mutable lookup used by the solver to assign per-species energies in
    /// place before aggregation runs.
    pub fn defect_with_label_mut(&mut self, label: &str) -> ScsesResult<&mut DefectAtSite> {
        let error = self.label_error(label);
        self.defects
            .iter_mut()
            .find(|defect| defect.label == label)
            .ok_or(error)
    }

    fn label_error(&self, label: &str) -> ScsesError {
        ScsesError::DefectLabelNotFound {
            site: self.label.clone(),
            label: label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DefectSpecies, Site};
    use crate::domain::ScsesError;
    use crate::sites::SiteData;
    use std::rc::Rc;

    fn species(n: usize) -> Vec<Rc<DefectSpecies>> {
        let labels = ["a", "b", "c", "d", "e"];
        let valences = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let mole_fractions = [0.15, 0.25, 0.35, 0.45, 0.55];
        let mobilities = [0.1, 0.2, 0.3, 0.4, 0.5];
        (0..n)
            .map(|i| {
                Rc::new(DefectSpecies {
                    label: labels[i].to_string(),
                    valence: valences[i],
                    mole_fraction: mole_fractions[i],
                    mobility: mobilities[i],
                    fixed: false,
                })
            })
            .collect()
    }

    #[test]
    fn site_defaults_scaling_and_valence() {
        let site = Site::new("A", 1.5, species(2), vec![-0.2, 0.2], None, None)
            .expect("site should build");
        assert_eq!(site.label(), "A");
        assert_eq!(site.x(), 1.5);
        assert_eq!(site.defect_energies(), &[-0.2, 0.2]);
        assert_eq!(site.scaling(), &[1.0, 1.0]);
        assert_eq!(site.valence(), 0.0);
    }

    #[test]
    fn site_accepts_explicit_scaling_and_valence() {
        let site = Site::new(
            "B",
            1.5,
            species(2),
            vec![-0.2, 0.2],
            Some(vec![0.5, 0.4]),
            Some(-2.0),
        )
        .expect("site should build");
        assert_eq!(site.scaling(), &[0.5, 0.4]);
        assert_eq!(site.valence(), -2.0);
    }

    #[test]
    fn mismatched_energy_count_is_a_cardinality_error() {
        let error = Site::new("A", 1.5, species(1), vec![-0.2, 0.2], None, None)
            .expect_err("one species cannot take two energies");
        assert_eq!(
            error,
            ScsesError::EnergyCountMismatch {
                label: "A".to_string(),
                species: 1,
                energies: 2,
            }
        );
    }

    #[test]
    fn mismatched_scaling_count_is_a_cardinality_error() {
        let error = Site::new("A", 1.5, species(2), vec![-0.2, 0.2], Some(vec![0.5]), None)
            .expect_err("two species cannot take one scaling factor");
        assert_eq!(
            error,
            ScsesError::ScalingCountMismatch {
                label: "A".to_string(),
                species: 2,
                scaling: 1,
            }
        );
    }

    #[test]
    fn defects_carry_species_parameters_and_site_energies() {
        let site = Site::new("A", 1.5, species(2), vec![-0.2, 0.2], None, None)
            .expect("site should build");
        assert_eq!(site.defects().len(), 2);
        assert_eq!(site.defects()[0].label, "a");
        assert_eq!(site.defects()[0].valence, -2.0);
        assert_eq!(site.defects()[0].energy, -0.2);
        assert_eq!(site.energies(), vec![-0.2, 0.2]);
    }

    #[test]
    fn defect_with_label_finds_the_matching_occupancy() {
        let site = Site::new("A", 1.5, species(2), vec![-0.2, 0.2], None, None)
            .expect("site should build");
        assert_eq!(site.defect_with_label("b").expect("label exists").energy, 0.2);
    }

    #[test]
    fn defect_with_label_rejects_an_unknown_label() {
        let site = Site::new("A", 1.5, species(2), vec![-0.2, 0.2], None, None)
            .expect("site should build");
        let error = site
            .defect_with_label("banana")
            .expect_err("label does not exist");
        assert_eq!(
            error,
            ScsesError::DefectLabelNotFound {
                site: "A".to_string(),
                label: "banana".to_string(),
            }
        );
    }

    #[test]
    fn solver_can_reassign_an_energy_in_place() {
        let mut site = Site::new("A", 1.5, species(2), vec![-0.2, 0.2], None, None)
            .expect("site should build");
        site.defect_with_label_mut("a").expect("label exists").energy = -0.35;
        assert_eq!(site.energies(), vec![-0.35, 0.2]);
    }

    #[test]
    fn from_site_data_matches_species_by_label() {
        let site_data = SiteData::from_input_string("A -2.0 1.5 a -0.2 b 0.2", true, true)
            .expect("line should parse");
        let site = Site::from_site_data(&site_data, &species(2)).expect("site should build");
        assert_eq!(site.energies(), vec![-0.2, 0.2]);
        assert_eq!(site.valence(), -2.0);
        assert_eq!(site.defect_species()[1].label, "b");
    }

    #[test]
    fn from_site_data_rejects_an_unknown_species_label() {
        let site_data = SiteData::from_input_string("A 0.0 1.5 z -0.2", true, false)
            .expect("line should parse");
        let error = Site::from_site_data(&site_data, &species(2))
            .expect_err("species 'z' is not defined");
        assert_eq!(
            error,
            ScsesError::UnknownDefectSpecies {
                label: "z".to_string()
            }
        );
    }

    #[test]
    fn defect_species_deserializes_with_defaulted_fields() {
        let species: DefectSpecies =
            serde_json::from_str(r#"{"label": "Vo", "valence": 2.0, "mole_fraction": 0.05}"#)
                .expect("record should deserialize");
        assert_eq!(species.mobility, 0.0);
        assert!(!species.fixed);
    }
}
