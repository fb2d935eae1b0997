mod cluster;
mod parser;

pub use cluster::cluster_site_coords;
pub use parser::input_string_is_valid_syntax;

use crate::domain::{ScsesError, ScsesResult};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Default coordinate separation (in metres) below which two input records
/// describe the same physical site.
pub const DEFAULT_CLUSTERING_THRESHOLD: f64 = 1.0e-10;

/// One defect species entry on an input site: the species label and the
/// segregation energy of that species at this site.
#[derive(Debug, Clone, PartialEq)]
pub struct DefectData {
    pub label: String,
    pub energy: f64,
}

/// One explicit defect site as read from a sites input file.
///
/// `x` is rewritten by [`cluster_site_coords`]; everything else is fixed at
/// parse time. `charge` carries the site charge token only when charge-aware
/// parsing was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteData {
    pub label: String,
    pub x: f64,
    pub defect_data: Vec<DefectData>,
    pub charge: Option<f64>,
}

impl SiteData {
    /// Parses one input line. With `validate_input` the line is checked
    /// against the grammar first and a failing line surfaces as
    /// [`ScsesError::InputFormat`]; without it the caller has already
    /// validated the whole file.
    pub fn from_input_string(
        line: &str,
        validate_input: bool,
        site_charge: bool,
    ) -> ScsesResult<Self> {
        if validate_input && !input_string_is_valid_syntax(line) {
            return Err(ScsesError::InputFormat {
                line: line.trim().to_string(),
            });
        }
        parser::parse_site_line(line, site_charge)
    }

    /// Segregation energies in defect-entry order.
    pub fn defect_energies(&self) -> Vec<f64> {
        self.defect_data.iter().map(|dd| dd.energy).collect()
    }

    /// Defect species labels in defect-entry order.
    pub fn defect_labels(&self) -> Vec<&str> {
        self.defect_data.iter().map(|dd| dd.label.as_str()).collect()
    }

    /// Renders the record back into the input-file grammar. A parsed charge
    /// is echoed; otherwise the structural charge column is written as 0.0.
    pub fn as_input_string(&self) -> String {
        let mut line = format!("{} {} {}", self.label, self.charge.unwrap_or(0.0), self.x);
        for dd in &self.defect_data {
            let _ = write!(line, " {} {}", dd.label, dd.energy);
        }
        line
    }
}

/// Reads, validates, filters, sorts, and clusters a sites input file.
///
/// Records with `x` outside `x_limits` (inclusive at both bounds) are
/// discarded; the survivors come back sorted ascending by coordinate with
/// near-duplicate coordinates collapsed. A single malformed line aborts the
/// whole read with no partial results.
pub fn sites_data_from_file(
    path: &Path,
    x_limits: (f64, f64),
    clustering_threshold: f64,
    site_charge: bool,
) -> ScsesResult<Vec<SiteData>> {
    let source = fs::read_to_string(path).map_err(|source| ScsesError::SitesFileRead {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;
    sites_data_from_lines(source.lines(), x_limits, clustering_threshold, site_charge)
}

/// Line-level core of [`sites_data_from_file`]. Blank lines are skipped;
/// every remaining line is validated before any record is built.
pub fn sites_data_from_lines<'a, I>(
    lines: I,
    x_limits: (f64, f64),
    clustering_threshold: f64,
    site_charge: bool,
) -> ScsesResult<Vec<SiteData>>
where
    I: IntoIterator<Item = &'a str>,
{
    let input_lines: Vec<&str> = lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    for line in &input_lines {
        if !input_string_is_valid_syntax(line) {
            return Err(ScsesError::InputFormat {
                line: (*line).to_string(),
            });
        }
    }

    let mut sites_data = input_lines
        .iter()
        .map(|line| SiteData::from_input_string(line, false, site_charge))
        .collect::<ScsesResult<Vec<SiteData>>>()?;

    sites_data.retain(|sd| x_limits.0 <= sd.x && sd.x <= x_limits.1);
    sites_data.sort_by(|a, b| a.x.total_cmp(&b.x));

    Ok(cluster_site_coords(sites_data, clustering_threshold))
}
