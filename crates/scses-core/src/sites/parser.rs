//! Line-level grammar for sites input files.
//!
//! One site per line, whitespace-separated:
//!
//! ```text
//! <site_label> <site_charge> <x> <defect_label> <energy> [<defect_label> <energy> ...]
//! ```
//!
//! Labels must not parse as numbers, which catches shifted or missing fields
//! without needing a column count per defect species.

use super::{DefectData, SiteData};
use crate::domain::{ScsesError, ScsesResult};

/// Checks a raw input line against the sites-file grammar without building
/// anything. Used to reject a whole file before any record is constructed.
pub fn input_string_is_valid_syntax(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 || tokens.len() % 2 == 0 {
        return false;
    }
    if is_numeric(tokens[0]) || !is_numeric(tokens[1]) || !is_numeric(tokens[2]) {
        return false;
    }
    tokens[3..]
        .chunks(2)
        .all(|pair| !is_numeric(pair[0]) && is_numeric(pair[1]))
}

/// Parses one validated line into a [`SiteData`]. The site charge token is
/// always present in the grammar but only lands in the record when
/// `site_charge` parsing is requested.
pub(super) fn parse_site_line(line: &str, site_charge: bool) -> ScsesResult<SiteData> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 {
        return Err(format_error(line));
    }

    let label = tokens[0].to_string();
    let charge_token: f64 = tokens[1].parse().map_err(|_| format_error(line))?;
    let x: f64 = tokens[2].parse().map_err(|_| format_error(line))?;

    let mut defect_data = Vec::with_capacity((tokens.len() - 3) / 2);
    for pair in tokens[3..].chunks(2) {
        let [defect_label, energy_token] = pair else {
            return Err(format_error(line));
        };
        let energy: f64 = energy_token.parse().map_err(|_| format_error(line))?;
        defect_data.push(DefectData {
            label: (*defect_label).to_string(),
            energy,
        });
    }

    Ok(SiteData {
        label,
        x,
        defect_data,
        charge: site_charge.then_some(charge_token),
    })
}

fn is_numeric(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

fn format_error(line: &str) -> ScsesError {
    ScsesError::InputFormat {
        line: line.trim().to_string(),
    }
}
