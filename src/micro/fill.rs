use rand::Rng;

use crate::micro::grid::OccupancyGrid;

/// Per-voxel Bernoulli probability for a trial scaling factor.
/// The nominal probability is the target fraction spread over one block volume.
pub fn seed_probability(factor: f64, target_fraction: f64, block_edge: usize) -> f64 {
	let nominal = target_fraction / block_edge.pow(3) as f64;
	(factor * nominal).clamp(0.0, 1.0)
}

/// Scatter independent Bernoulli seeds over a fresh grid
pub fn scatter_seeds<R: Rng>(edge: usize, probability: f64, rng: &mut R) -> OccupancyGrid {
	let mut grid = OccupancyGrid::new(edge);
	for index in 0..grid.total_voxels {
		if rng.random::<f64>() < probability {
			grid.fill_voxel_index(index);
		}
	}
	grid
}

/// Expand every seed voxel into its forward 2x2x2 block.
///
/// Each of the seven forward offsets (+i, +j, +k and their combinations) is
/// applied only where the seed has room along the involved axes. Offset
/// targets are clamped to the last flat index, and the last voxel's
/// pre-dilation value is restored at the end.
pub fn dilate_blocks(grid: &mut OccupancyGrid) {
	let edge = grid.edge;
	let max_index = grid.total_voxels - 1;
	let last = grid.get_voxel_index(max_index);

	let stride_j = edge;
	let stride_k = edge * edge;

	// Seeds are collected up front; the writes below must not grow the set.
	let seeds: Vec<usize> = grid.data.iter_ones().collect();

	for &seed in &seeds {
		let room_i = seed % edge < edge - 1;
		let room_j = seed % stride_k < (edge - 1) * edge;
		let room_k = seed < (edge - 1) * stride_k;

		if room_i {
			grid.fill_voxel_index((seed + 1).min(max_index));
		}
		if room_j {
			grid.fill_voxel_index((seed + stride_j).min(max_index));
		}
		if room_k {
			grid.fill_voxel_index((seed + stride_k).min(max_index));
		}
		if room_i && room_j {
			grid.fill_voxel_index((seed + 1 + stride_j).min(max_index));
		}
		if room_i && room_k {
			grid.fill_voxel_index((seed + 1 + stride_k).min(max_index));
		}
		if room_j && room_k {
			grid.fill_voxel_index((seed + stride_j + stride_k).min(max_index));
		}
		if room_i && room_j && room_k {
			grid.fill_voxel_index((seed + 1 + stride_j + stride_k).min(max_index));
		}
	}

	grid.set_voxel_index(max_index, last);
}
