use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use nalgebra::Vector3;
use rand::Rng;
use thiserror::Error;

use crate::pore::obstacles::ObstacleSet;

/// Parameters for one pore-size sampling batch
#[derive(Debug, Clone)]
pub struct PoreConfig {
	pub samples: usize,  // Accepted pore fits per batch
	pub space_edge: f64,  // Physical edge of the domain cube
	pub max_point_retries: usize,  // Rejection-sampling draws per query point
	pub max_fit_retries: usize,  // Failed maximizations tolerated per sample
	pub max_iterations: usize,  // Simplex iterations per maximization
}

impl Default for PoreConfig {
	fn default() -> Self {
		Self {
			samples: 100,
			space_edge: 50.0,
			max_point_retries: 10_000,
			max_fit_retries: 50,
			max_iterations: 800,
		}
	}
}

#[derive(Debug, Error)]
pub enum PoreError {
	#[error("obstacle set is empty")]
	EmptyObstacleSet,
	#[error("no feasible query point found within {0} draws")]
	NoFeasiblePoint(usize),
	#[error("empty-sphere maximization did not converge within {0} restarts")]
	DidNotConverge(usize),
}

/// One accepted pore sample: the query point it is anchored to, the fitted
/// sphere center and the maximal empty-sphere radius
#[derive(Debug, Clone)]
pub struct PoreSample {
	pub query: Vector3<f64>,
	pub center: Vector3<f64>,
	pub radius: f64,
}

/// Fit the largest empty sphere that still contains a random query point.
/// A failed maximization discards the trial and redraws the query point.
pub fn fit_pore<R: Rng>(
	obstacles: &ObstacleSet,
	config: &PoreConfig,
	rng: &mut R,
) -> Result<PoreSample, PoreError> {
	if obstacles.centers.is_empty() {
		return Err(PoreError::EmptyObstacleSet);
	}

	let mut query = feasible_point(obstacles, config, rng)?;
	for _ in 0..config.max_fit_retries {
		match maximize_bubble(obstacles, config, &query) {
			Some(sample) => return Ok(sample),
			None => {
				warn!("maximization failed");
				query = feasible_point(obstacles, config, rng)?;
			}
		}
	}
	Err(PoreError::DidNotConverge(config.max_fit_retries))
}

/// Collect a whole batch of accepted pore samples
pub fn sample_batch<R: Rng>(
	obstacles: &ObstacleSet,
	config: &PoreConfig,
	rng: &mut R,
) -> Result<Vec<PoreSample>, PoreError> {
	let pb = ProgressBar::new(config.samples as u64);
	pb.set_style(
		ProgressStyle::default_bar()
		.template("Fitting pores: [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
		.unwrap()
		.progress_chars("#>-"),
	);

	let mut samples = Vec::with_capacity(config.samples);
	for _ in 0..config.samples {
		samples.push(fit_pore(obstacles, config, rng)?);
		pb.inc(1);
	}

	pb.finish_and_clear();
	Ok(samples)
}

/// Draw query points until one clears every obstacle by a safety margin
fn feasible_point<R: Rng>(
	obstacles: &ObstacleSet,
	config: &PoreConfig,
	rng: &mut R,
) -> Result<Vector3<f64>, PoreError> {
	let cutoff = obstacles.radius * 2.0_f64.sqrt() * 1.01;
	for _ in 0..config.max_point_retries {
		let point = Vector3::new(
			rng.random::<f64>() * config.space_edge,
			rng.random::<f64>() * config.space_edge,
			rng.random::<f64>() * config.space_edge,
		);
		if !obstacles.crowds(&point, cutoff) {
			return Ok(point);
		}
	}
	Err(PoreError::NoFeasiblePoint(config.max_point_retries))
}

// Exact-penalty weight on the anchoring constraint. Both the clearance and
// the constraint are 1-Lipschitz, so any weight above 1 keeps the optimum
// feasible.
const PENALTY: f64 = 4.0;

/// Penalized objective: negative clearance plus a penalty for letting the
/// sphere detach from the query point
fn objective(obstacles: &ObstacleSet, query: &Vector3<f64>, point: &Vector3<f64>) -> f64 {
	let clearance = obstacles.clearance(point);
	let detachment = ((query - point).norm() - clearance).max(0.0);
	-clearance + PENALTY * detachment
}

/// Maximize the empty-sphere radius around `query` with a Nelder-Mead
/// simplex search. The sphere center stays inside the domain cube and must
/// keep the query point inside the sphere.
///
/// Returns `None` when the simplex fails to converge, the center is not
/// finite, or the anchoring constraint ends up violated; the caller treats
/// all three as a retryable failure.
fn maximize_bubble(
	obstacles: &ObstacleSet,
	config: &PoreConfig,
	query: &Vector3<f64>,
) -> Option<PoreSample> {
	let clamp = |point: Vector3<f64>| {
		Vector3::new(
			point.x.clamp(0.0, config.space_edge),
			point.y.clamp(0.0, config.space_edge),
			point.z.clamp(0.0, config.space_edge),
		)
	};
	let evaluate = |point: Vector3<f64>| {
		let value = objective(obstacles, query, &point);
		(point, value)
	};

	let step = obstacles.radius.max(config.space_edge * 1e-3);
	let mut simplex = vec![
		evaluate(*query),
		evaluate(clamp(query + Vector3::new(step, 0.0, 0.0))),
		evaluate(clamp(query + Vector3::new(0.0, step, 0.0))),
		evaluate(clamp(query + Vector3::new(0.0, 0.0, step))),
	];

	let mut converged = false;
	for _ in 0..config.max_iterations {
		simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

		let best = simplex[0];
		let spread = simplex[3].1 - best.1;
		let extent = simplex
			.iter()
			.skip(1)
			.map(|(point, _)| (point - best.0).norm())
			.fold(0.0, f64::max);
		if spread.abs() < 1e-9 && extent < 1e-7 {
			converged = true;
			break;
		}

		let centroid = (simplex[0].0 + simplex[1].0 + simplex[2].0) / 3.0;
		let worst = simplex[3];

		let (reflected, f_reflected) = evaluate(clamp(centroid + (centroid - worst.0)));
		if f_reflected < best.1 {
			let (expanded, f_expanded) = evaluate(clamp(centroid + 2.0 * (centroid - worst.0)));
			simplex[3] = if f_expanded < f_reflected {
				(expanded, f_expanded)
			} else {
				(reflected, f_reflected)
			};
		} else if f_reflected < simplex[2].1 {
			simplex[3] = (reflected, f_reflected);
		} else {
			let toward = if f_reflected < worst.1 { reflected } else { worst.0 };
			let (contracted, f_contracted) = evaluate(clamp(centroid + 0.5 * (toward - centroid)));
			if f_contracted < worst.1.min(f_reflected) {
				simplex[3] = (contracted, f_contracted);
			} else {
				for vertex in 1..4 {
					simplex[vertex] =
						evaluate(clamp(best.0 + 0.5 * (simplex[vertex].0 - best.0)));
				}
			}
		}
	}

	if !converged {
		return None;
	}

	simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
	let center = simplex[0].0;
	if !(center.x.is_finite() && center.y.is_finite() && center.z.is_finite()) {
		return None;
	}

	let radius = obstacles.clearance(&center);
	let detachment = (query - center).norm() - radius;
	if radius <= 0.0 || detachment > radius * 1e-6 {
		return None;
	}

	Some(PoreSample {
		query: *query,
		center,
		radius,
	})
}

#[cfg(test)]
mod tests {
	use approx::assert_relative_eq;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use crate::micro::grid::OccupancyGrid;

	use super::*;

	fn single_obstacle() -> ObstacleSet {
		let mut grid = OccupancyGrid::new(5);
		grid.fill_voxel_ijk(2, 2, 2);
		ObstacleSet::from_grid(&grid, 50.0)
	}

	#[test]
	fn bubble_grows_away_from_a_single_obstacle() {
		let obstacles = single_obstacle();
		let config = PoreConfig::default();
		let query = Vector3::new(10.0, 10.0, 10.0);

		let sample = maximize_bubble(&obstacles, &config, &query).unwrap();

		// The only obstacle sits at the domain center, so the sphere center
		// runs into a corner of the domain cube.
		assert_relative_eq!(
			sample.radius,
			obstacles.clearance(&sample.center),
			max_relative = 1e-9
		);
		assert!((sample.query - sample.center).norm() <= sample.radius * (1.0 + 1e-6));
		assert!(sample.radius > 25.0);
	}

	#[test]
	fn fit_pore_respects_the_anchoring_invariant() {
		let mut grid = OccupancyGrid::new(8);
		for &(i, j, k) in &[(0, 0, 0), (7, 0, 3), (3, 6, 2), (5, 5, 7), (1, 4, 6)] {
			grid.fill_voxel_ijk(i, j, k);
		}
		let obstacles = ObstacleSet::from_grid(&grid, 50.0);
		let config = PoreConfig::default();
		let mut rng = StdRng::seed_from_u64(42);

		for _ in 0..5 {
			let sample = fit_pore(&obstacles, &config, &mut rng).unwrap();
			assert_relative_eq!(
				sample.radius,
				obstacles.clearance(&sample.center),
				max_relative = 1e-9
			);
			assert!(
				(sample.query - sample.center).norm() <= sample.radius * (1.0 + 1e-6),
				"query escaped the fitted sphere"
			);
		}
	}

	#[test]
	fn empty_obstacle_set_is_an_error() {
		let obstacles = ObstacleSet::from_grid(&OccupancyGrid::new(5), 50.0);
		let config = PoreConfig::default();
		let mut rng = StdRng::seed_from_u64(0);
		assert!(matches!(
			fit_pore(&obstacles, &config, &mut rng),
			Err(PoreError::EmptyObstacleSet)
		));
	}
}
