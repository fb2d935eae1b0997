use anyhow::Context;
use clap::Parser;
use scses_core::{
    AggregationMethod, DEFAULT_CLUSTERING_THRESHOLD, DefectSpecies, GridPoint, Site,
    StructureData, SystemTopology,
};
use serde::Serialize;
use std::path::PathBuf;
use std::rc::Rc;

pub fn run_from_env() -> i32 {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(CliError::Usage(message)) => {
            eprintln!("{message}");
            2
        }
        Err(CliError::Pipeline(error)) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Testable entry point: parses the given arguments (without the program
/// name), runs the setup pipeline, and prints the structure summary as JSON.
pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("scses-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    let cli = match Cli::try_parse_from(&full_args) {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    print!("{err}");
                    Ok(0)
                }
                _ => Err(CliError::Usage(err.to_string())),
            };
        }
    };

    let summary = build_summary(&cli)?;
    let rendered =
        serde_json::to_string_pretty(&summary).context("failed to render structure summary")?;
    println!("{rendered}");
    Ok(0)
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Pipeline(#[from] anyhow::Error),
}

#[derive(Parser)]
#[command(
    name = "scses-rs",
    about = "Prepare 1-D space-charge calculation geometry from a sites file"
)]
struct Cli {
    /// Sites input file, one site record per line
    sites_file: PathBuf,

    /// Lower x bound of the calculation region
    #[arg(long, allow_negative_numbers = true)]
    x_min: f64,

    /// Upper x bound of the calculation region
    #[arg(long, allow_negative_numbers = true)]
    x_max: f64,

    /// Length of the b cell dimension, perpendicular to x
    #[arg(long, default_value_t = 1.0)]
    b: f64,

    /// Length of the c cell dimension, perpendicular to x
    #[arg(long, default_value_t = 1.0)]
    c: f64,

    /// Boundary system: 'single' or 'double'
    #[arg(long, default_value = "single")]
    system: String,

    /// Coordinate separation below which sites are merged
    #[arg(long, default_value_t = DEFAULT_CLUSTERING_THRESHOLD)]
    clustering_threshold: f64,

    /// Parse the site charge column into the records
    #[arg(long)]
    site_charge: bool,

    /// Defect species definitions (JSON array); enables per-point aggregates
    #[arg(long)]
    species: Option<PathBuf>,

    /// Site-energy aggregation method: 'mean' or 'min'
    #[arg(long, default_value = "mean")]
    method: String,
}

#[derive(Debug, Serialize)]
struct StructureSummary {
    sites_file: String,
    system: &'static str,
    x_limits: (f64, f64),
    b: f64,
    c: f64,
    interior_site_count: usize,
    site_x_coords: Vec<f64>,
    adjacent_x: (f64, f64),
    limits: (f64, f64),
    limits_for_laplacian: (f64, f64),
    #[serde(skip_serializing_if = "Option::is_none")]
    grid_points: Option<Vec<GridPointSummary>>,
}

#[derive(Debug, Serialize)]
struct GridPointSummary {
    x: f64,
    site_count: usize,
    average_site_energy: Option<Vec<f64>>,
}

fn build_summary(cli: &Cli) -> anyhow::Result<StructureSummary> {
    let system = SystemTopology::from_tag(&cli.system)?;
    let method = AggregationMethod::from_tag(&cli.method)?;

    let structure = StructureData::from_file(
        &cli.sites_file,
        (cli.x_min, cli.x_max),
        cli.b,
        cli.c,
        system,
        cli.clustering_threshold,
        cli.site_charge,
    )?;
    tracing::info!(
        sites = structure.sites_data().len(),
        coords = structure.site_x_coords().len(),
        system = %system,
        "structure data prepared"
    );

    let grid_points = match &cli.species {
        Some(path) => Some(aggregate_grid_points(&structure, path, method)?),
        None => None,
    };

    let (lower_adjacent, upper_adjacent) = structure.adjacent_sites_data();
    Ok(StructureSummary {
        sites_file: cli.sites_file.display().to_string(),
        system: system.as_str(),
        x_limits: structure.x_limits(),
        b: structure.b(),
        c: structure.c(),
        interior_site_count: structure.sites_data().len(),
        site_x_coords: structure.site_x_coords().to_vec(),
        adjacent_x: (lower_adjacent.x, upper_adjacent.x),
        limits: structure.limits(),
        limits_for_laplacian: structure.limits_for_laplacian(),
        grid_points,
    })
}

fn aggregate_grid_points(
    structure: &StructureData,
    species_path: &PathBuf,
    method: AggregationMethod,
) -> anyhow::Result<Vec<GridPointSummary>> {
    let source = std::fs::read_to_string(species_path)
        .with_context(|| format!("failed to read species file '{}'", species_path.display()))?;
    let species: Vec<DefectSpecies> = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse species file '{}'", species_path.display()))?;
    let species: Vec<Rc<DefectSpecies>> = species.into_iter().map(Rc::new).collect();
    tracing::info!(species = species.len(), "defect species loaded");

    // Unit-depth column volume; the solver owns the real mesh volumes.
    let volume = structure.b() * structure.c();
    structure
        .site_x_coords()
        .iter()
        .map(|&x| {
            let mut point = GridPoint::new(x, volume);
            // Clustering already collapsed coincident sites onto identical
            // coordinates, so a total-order equality match is exact.
            let co_located = structure
                .sites_data()
                .iter()
                .filter(|sd| sd.x.total_cmp(&x).is_eq());
            for site_data in co_located {
                point.add_site(Site::from_site_data(site_data, &species)?);
            }
            Ok(GridPointSummary {
                x,
                site_count: point.sites().len(),
                average_site_energy: point.average_site_energy(method),
            })
        })
        .collect()
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
