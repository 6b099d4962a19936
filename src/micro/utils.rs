use crate::micro::grid::OccupancyGrid;

impl OccupancyGrid {
	/// Convert (i, j, k) to a linear index
	#[inline]
	pub fn ijk_to_index(&self, i: usize, j: usize, k: usize) -> usize {
		i + j * self.edge + k * self.edge * self.edge
	}

	/// Convert a linear index back to (i, j, k)
	#[inline]
	pub fn index_to_ijk(&self, index: usize) -> (usize, usize, usize) {
		let plane = self.edge * self.edge;
		let k = index / plane;
		let j = (index % plane) / self.edge;
		let i = index % self.edge;
		(i, j, k)
	}

	/// Get a voxel value by linear index (panics if out of bounds)
	#[inline]
	pub fn get_voxel_index(&self, index: usize) -> bool {
		self.data[index]
	}

	/// Get a voxel value using (i, j, k) coordinates
	#[inline]
	pub fn get_voxel_ijk(&self, i: usize, j: usize, k: usize) -> bool {
		let index = self.ijk_to_index(i, j, k);
		self.get_voxel_index(index)
	}

	/// Set a voxel value by linear index (panics if out of bounds)
	#[inline]
	pub fn set_voxel_index(&mut self, index: usize, value: bool) {
		self.data.set(index, value);
	}

	/// Set a voxel value using (i, j, k) coordinates (assumes valid bounds)
	#[inline]
	pub fn set_voxel_ijk(&mut self, i: usize, j: usize, k: usize, value: bool) {
		let index = self.ijk_to_index(i, j, k);
		self.set_voxel_index(index, value);
	}

	/// Set a voxel to `true`
	#[inline]
	pub fn fill_voxel_ijk(&mut self, i: usize, j: usize, k: usize) {
		self.set_voxel_ijk(i, j, k, true);
	}

	/// Set a voxel to `true` using linear index
	#[inline]
	pub fn fill_voxel_index(&mut self, index: usize) {
		self.set_voxel_index(index, true);
	}

	/// Count the number of solid voxels
	pub fn count_filled(&self) -> usize {
		self.data.count_ones()
	}

	/// Fraction of the grid that is solid
	pub fn solid_fraction(&self) -> f64 {
		self.count_filled() as f64 / self.total_voxels as f64
	}
}

#[cfg(test)]
mod tests {
	use crate::micro::grid::OccupancyGrid;

	#[test]
	fn index_round_trip() {
		let grid = OccupancyGrid::new(5);
		for index in 0..grid.total_voxels {
			let (i, j, k) = grid.index_to_ijk(index);
			assert_eq!(grid.ijk_to_index(i, j, k), index);
		}
	}

	#[test]
	fn fraction_counts_solid_voxels() {
		let mut grid = OccupancyGrid::new(4);
		assert_eq!(grid.solid_fraction(), 0.0);
		grid.fill_voxel_ijk(0, 0, 0);
		grid.fill_voxel_ijk(3, 3, 3);
		assert_eq!(grid.count_filled(), 2);
		assert_eq!(grid.solid_fraction(), 2.0 / 64.0);
	}
}
