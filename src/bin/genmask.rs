use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;

use rand::SeedableRng;
use rand::rngs::StdRng;

use voxel_pore::artifact::geom_output::write_geometry_scripts;
use voxel_pore::artifact::info::print_build_info;
use voxel_pore::artifact::mask_output::{mask_file_name, write_mask};
use voxel_pore::lattice::bonds::BondLattice;
use voxel_pore::lattice::sample::sample_mask;
use voxel_pore::lattice::warp::LensGeometry;
use voxel_pore::micro::calibrate::{GrowthConfig, calibrate};

/// Generate a shotgun microstructure, warp a bond lattice into the lens
/// domain and emit the per-bond mask plus the geometry-tool block scripts.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// The desired volume fraction
	#[arg(default_value_t = 0.5)]
	p: f64,

	/// Lattice sites on an edge
	#[arg(long, default_value_t = 21)]
	sites: usize,

	/// RNG seed for reproducible runs
	#[arg(long)]
	seed: Option<u64>,
}

fn main() -> Result<()> {
	env_logger::Builder::from_default_env()
		.filter_level(log::LevelFilter::Info)
		.init();
	print_build_info();

	let args = Args::parse();
	let start = Instant::now();

	let config = GrowthConfig {
		target_fraction: args.p,
		..GrowthConfig::default()
	};
	let geometry = LensGeometry::default();

	info!(
		"Nphys = {}, Nres = {}, M = {}, p = {}",
		config.edge, args.sites, config.block_edge, config.target_fraction
	);

	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let grid = calibrate(&config, &mut rng)?;

	info!("generating lattice");
	let lattice = BondLattice::cubic(args.sites);

	info!("warping lattice");
	let mask = sample_mask(&grid, &lattice, &geometry);

	let mask_name = mask_file_name(Local::now());
	write_mask(&mask_name, &mask).with_context(|| format!("writing {}", mask_name))?;
	info!("total time {:.6} sec", start.elapsed().as_secs_f64());

	let script_start = Instant::now();
	let outer_nm = geometry.outer_radius * 1e9;
	let inner_nm = geometry.inner_radius * 1e9;
	write_geometry_scripts(&grid, inner_nm, outer_nm, Path::new("."))
		.context("writing geometry block scripts")?;
	info!(
		"built java code and wrote it in {:.6} sec",
		script_start.elapsed().as_secs_f64()
	);

	Ok(())
}
