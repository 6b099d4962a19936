use nalgebra::Vector3;

use crate::lattice::bonds::BondLattice;
use crate::lattice::warp::{LensGeometry, warp_midpoint};
use crate::micro::grid::OccupancyGrid;

/// Map a physical coordinate into grid index space, rounded and clamped.
/// Planar components span [-r2, r2]; the axial component spans [-r2, 0].
pub fn grid_index(geometry: &LensGeometry, edge: usize, point: &Vector3<f64>) -> (usize, usize, usize) {
	let r2 = geometry.outer_radius;
	let span = (edge - 1) as f64;
	let to_index = |value: f64| (value.round().max(0.0) as usize).min(edge - 1);

	let i = to_index((point.x / r2 / 2.0 + 0.5) * span);
	let j = to_index((point.y / r2 / 2.0 + 0.5) * span);
	let k = to_index(span * (point.z / r2 + 1.0));
	(i, j, k)
}

/// Warp every bond midpoint and look the occupancy grid up at it.
/// One boolean per bond, in bond storage order.
pub fn sample_mask(grid: &OccupancyGrid, lattice: &BondLattice, geometry: &LensGeometry) -> Vec<bool> {
	lattice
		.midpoints()
		.into_iter()
		.map(|midpoint| {
			let point = warp_midpoint(geometry, lattice.sites_per_edge, midpoint);
			let (i, j, k) = grid_index(geometry, grid.edge, &point);
			grid.get_voxel_ijk(i, j, k)
		})
		.collect()
}
