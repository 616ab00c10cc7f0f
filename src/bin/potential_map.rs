use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use heiles::{config::setup::SetupConfig, output, surface};
use log::info;

#[derive(Debug, clap::Parser)]
#[command(
    name = "potential_map",
    about = "Evaluate the Hénon-Heiles potential over a grid and write it as CSV."
)]
pub struct PotentialCli {
    /// Setup YAML; the reference grid ([-0.75, 0.75], step 0.05) is used
    /// when omitted.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    #[arg(short = 'o', long = "out", default_value = "potential.csv")]
    pub out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = PotentialCli::parse();

    let setup = match &args.config {
        Some(path) => SetupConfig::parse(path)?,
        None => SetupConfig::default(),
    };

    let grid = surface::Grid::from_config(&setup.grid);
    let field = surface::potential_field(&grid);
    let (nx, ny) = grid.shape();
    info!("Evaluated potential on a {}x{} grid", nx, ny);

    output::write_potential_field(&args.out, &grid, &field)?;
    info!("Wrote {}", args.out.display());
    Ok(())
}
