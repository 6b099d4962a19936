use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;

use rand::SeedableRng;
use rand::rngs::StdRng;

use voxel_pore::artifact::info::print_build_info;
use voxel_pore::artifact::psd_output::{density_file_name, write_density};
use voxel_pore::micro::calibrate::{GrowthConfig, calibrate};
use voxel_pore::pore::bubble::{PoreConfig, sample_batch};
use voxel_pore::pore::obstacles::ObstacleSet;
use voxel_pore::pore::psd::PoreSizeDistribution;

/// Generate a discrete pore space and estimate its pore-size distribution.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// The desired volume fraction
	#[arg(default_value_t = 0.5)]
	p: f64,

	/// Accepted pore samples per batch
	#[arg(long, default_value_t = 100)]
	samples: usize,

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
	info!(
		"Nphys = {}, M = {}, p = {}",
		config.edge, config.block_edge, config.target_fraction
	);

	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let grid = calibrate(&config, &mut rng)?;

	let pore_config = PoreConfig {
		samples: args.samples,
		..PoreConfig::default()
	};
	let obstacles = ObstacleSet::from_grid(&grid, pore_config.space_edge);

	info!("calculating pore size distribution");
	let samples = sample_batch(&obstacles, &pore_config, &mut rng)?;
	let radii: Vec<f64> = samples.iter().map(|sample| sample.radius).collect();
	let distribution = PoreSizeDistribution::from_radii(&radii, 100);

	let density_name = density_file_name(Local::now());
	write_density(&density_name, &distribution)
		.with_context(|| format!("writing {}", density_name))?;

	let largest = radii.iter().copied().fold(0.0, f64::max);
	info!(
		"{} pores fitted, largest radius {:.4}, wrote {}",
		radii.len(),
		largest,
		density_name
	);
	info!("total time {:.6} sec", start.elapsed().as_secs_f64());

	Ok(())
}
