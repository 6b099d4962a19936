use log::info;
use rand::Rng;
use thiserror::Error;

use crate::micro::fill::{dilate_blocks, scatter_seeds, seed_probability};
use crate::micro::grid::OccupancyGrid;

/// Parameters for calibrated microstructure growth
#[derive(Debug, Clone)]
pub struct GrowthConfig {
	pub edge: usize,  // Number of voxels along each axis of the physical cube
	pub block_edge: usize,  // Edge of the dilated solid blocks
	pub target_fraction: f64,  // Desired solid volume fraction
	pub tolerance: f64,  // Acceptable |realized - target|
	pub max_attempts: usize,  // Trial grids before giving up
}

impl Default for GrowthConfig {
	fn default() -> Self {
		Self {
			edge: 25,
			block_edge: 2,
			target_fraction: 0.5,
			tolerance: 1e-3,
			max_attempts: 200,
		}
	}
}

#[derive(Debug, Error)]
pub enum CalibrationError {
	#[error("target volume fraction {0} is outside (0, 1)")]
	InvalidTarget(f64),
	#[error("grid edge and block edge must be nonzero")]
	InvalidGrid,
	#[error("volume fraction did not converge within {attempts} trial grids (last fraction {last_fraction})")]
	DidNotConverge { attempts: usize, last_fraction: f64 },
}

/// Grow trial grids until the realized solid fraction matches the target.
///
/// The map from scaling factor to realized fraction is treated as locally
/// linear: two fixed trial factors initialize a secant slope, and Newton
/// steps refine the factor from there. Block overlap makes the realized
/// fraction fall short of the nominal seed density, which is what the
/// factor compensates for. A vanishing slope restarts the two-point
/// initialization with fresh draws.
pub fn calibrate<R: Rng>(
	config: &GrowthConfig,
	rng: &mut R,
) -> Result<OccupancyGrid, CalibrationError> {
	let target = config.target_fraction;
	if !(target > 0.0 && target < 1.0) {
		return Err(CalibrationError::InvalidTarget(target));
	}
	if config.edge == 0 || config.block_edge == 0 {
		return Err(CalibrationError::InvalidGrid);
	}

	let mut attempts = 0usize;
	let (mut fac, mut grid, mut ratio, mut deriv) = init_secant(config, rng, &mut attempts);

	while (target - ratio).abs() > config.tolerance {
		if attempts >= config.max_attempts {
			return Err(CalibrationError::DidNotConverge {
				attempts,
				last_fraction: ratio,
			});
		}
		if deriv == 0.0 {
			(fac, grid, ratio, deriv) = init_secant(config, rng, &mut attempts);
			continue;
		}

		let fac_old = fac;
		fac -= (target - ratio) / deriv;
		let ratio_old = ratio;
		(grid, ratio) = trial_grid(config, fac, rng, &mut attempts);
		deriv = ((target - ratio_old) - (target - ratio)) / (fac_old - fac);
	}

	Ok(grid)
}

/// Grow one trial grid and log its realized fraction
fn trial_grid<R: Rng>(
	config: &GrowthConfig,
	factor: f64,
	rng: &mut R,
	attempts: &mut usize,
) -> (OccupancyGrid, f64) {
	let probability = seed_probability(factor, config.target_fraction, config.block_edge);
	let mut grid = scatter_seeds(config.edge, probability, rng);
	dilate_blocks(&mut grid);
	let ratio = grid.solid_fraction();
	*attempts += 1;
	info!("volume fraction = {:.6}", ratio);
	(grid, ratio)
}

/// Two trial factors bracket the nominal density and seed the secant slope
fn init_secant<R: Rng>(
	config: &GrowthConfig,
	rng: &mut R,
	attempts: &mut usize,
) -> (f64, OccupancyGrid, f64, f64) {
	let fac1 = 1.0;
	let fac2 = 1.01;
	let target = config.target_fraction;

	let (_, ratio1) = trial_grid(config, fac1, rng, attempts);
	let (grid2, ratio2) = trial_grid(config, fac2, rng, attempts);
	let deriv = ((target - ratio1) - (target - ratio2)) / (fac1 - fac2);
	(fac2, grid2, ratio2, deriv)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn converges_to_target_fraction() {
		let config = GrowthConfig::default();
		let mut rng = StdRng::seed_from_u64(11);
		let grid = calibrate(&config, &mut rng).unwrap();
		let fraction = grid.solid_fraction();
		assert!(
			(fraction - config.target_fraction).abs() <= config.tolerance,
			"fraction {} misses target {}",
			fraction,
			config.target_fraction
		);
	}

	#[test]
	fn rejects_target_outside_unit_interval() {
		let config = GrowthConfig {
			target_fraction: 1.5,
			..GrowthConfig::default()
		};
		let mut rng = StdRng::seed_from_u64(0);
		assert!(matches!(
			calibrate(&config, &mut rng),
			Err(CalibrationError::InvalidTarget(_))
		));
	}

	#[test]
	fn bounded_attempts_report_divergence() {
		// An unreachable tolerance exhausts the attempt budget.
		let config = GrowthConfig {
			tolerance: 0.0,
			max_attempts: 5,
			..GrowthConfig::default()
		};
		let mut rng = StdRng::seed_from_u64(3);
		match calibrate(&config, &mut rng) {
			Err(CalibrationError::DidNotConverge { attempts, .. }) => assert!(attempts >= 5),
			other => panic!("expected divergence, got {:?}", other.map(|g| g.solid_fraction())),
		}
	}
}
