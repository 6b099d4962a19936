use nalgebra::Vector3;

use crate::micro::grid::OccupancyGrid;

/// Solid voxels of an occupancy grid, viewed as fixed-radius spherical
/// obstacles in physical coordinates
pub struct ObstacleSet {
	pub centers: Vec<Vector3<f64>>,  // Solid voxel centers
	pub radius: f64,  // Obstacle radius, half the voxel side
	pub space_edge: f64,  // Physical edge of the domain cube
}

impl ObstacleSet {
	/// Convert the solid voxel centers of `grid` into physical coordinates
	pub fn from_grid(grid: &OccupancyGrid, space_edge: f64) -> Self {
		let n = grid.edge as f64;
		let side = space_edge / n;

		let centers = grid
			.data
			.iter_ones()
			.map(|index| {
				let (i, j, k) = grid.index_to_ijk(index);
				Vector3::new(
					(i as f64 + 0.5) / n * space_edge,
					(j as f64 + 0.5) / n * space_edge,
					(k as f64 + 0.5) / n * space_edge,
				)
			})
			.collect();

		Self {
			centers,
			radius: side / 2.0,
			space_edge,
		}
	}

	/// Distance from `point` to the nearest obstacle surface
	pub fn clearance(&self, point: &Vector3<f64>) -> f64 {
		let nearest = self
			.centers
			.iter()
			.map(|center| (center - point).norm())
			.fold(f64::INFINITY, f64::min);
		nearest - self.radius
	}

	/// Whether any obstacle center lies within `cutoff` of `point`
	pub fn crowds(&self, point: &Vector3<f64>, cutoff: f64) -> bool {
		self.centers
			.iter()
			.any(|center| (center - point).norm() <= cutoff)
	}
}
