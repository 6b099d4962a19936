use bitvec::vec::BitVec;

/// Cubic two-phase occupancy grid with bit-packed storage
#[derive(Clone, PartialEq)]
pub struct OccupancyGrid {
	pub edge: usize,  // Number of voxels along each axis
	pub total_voxels: usize, // Total number of voxels, edge^3
	pub data: BitVec,  // 1-bit per voxel storage
}

impl OccupancyGrid {
	/// Create a new occupancy grid, fully allocated with all voxels set to `false`
	pub fn new(edge: usize) -> Self {
		let total_voxels = edge * edge * edge;

		Self {
			edge,
			total_voxels,
			data: BitVec::repeat(false, total_voxels), // Pre-allocate full grid
		}
	}
}
