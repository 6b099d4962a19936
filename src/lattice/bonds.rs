/// Simple cubic nearest-neighbor bond lattice
pub struct BondLattice {
	pub sites_per_edge: usize,  // Lattice sites along each axis
	pub bonds: Vec<(usize, usize)>,  // Site id pairs, low id first
}

impl BondLattice {
	/// Build the lattice, keeping each undirected bond once
	pub fn cubic(sites_per_edge: usize) -> Self {
		let n = sites_per_edge;
		let mut bonds = Vec::with_capacity(3 * n * n * (n.saturating_sub(1)));
		for k in 0..n {
			for j in 0..n {
				for i in 0..n {
					let site = i + j * n + k * n * n;
					if i + 1 < n {
						bonds.push((site, site + 1));
					}
					if j + 1 < n {
						bonds.push((site, site + n));
					}
					if k + 1 < n {
						bonds.push((site, site + n * n));
					}
				}
			}
		}
		Self {
			sites_per_edge: n,
			bonds,
		}
	}

	/// Decode a flat site id into (i, j, k) lattice coordinates
	#[inline]
	pub fn site_to_ijk(&self, site: usize) -> (usize, usize, usize) {
		let n = self.sites_per_edge;
		(site % n, (site / n) % n, site / (n * n))
	}

	/// Midpoint of every bond, in half-integer lattice units
	pub fn midpoints(&self) -> Vec<[f64; 3]> {
		self.bonds
			.iter()
			.map(|&(u, v)| {
				let (iu, ju, ku) = self.site_to_ijk(u);
				let (iv, jv, kv) = self.site_to_ijk(v);
				[
					0.5 * (iu + iv) as f64,
					0.5 * (ju + jv) as f64,
					0.5 * (ku + kv) as f64,
				]
			})
			.collect()
	}
}
