use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use nalgebra::Vector3;

/// Physical lens geometry the lattice is bent into
#[derive(Debug, Clone)]
pub struct LensGeometry {
	pub inner_radius: f64,  // r1, inner shell radius
	pub outer_radius: f64,  // r2, outer shell radius
	pub aspect: f64,  // Planar edge divisor, d = aspect * r1
}

impl Default for LensGeometry {
	fn default() -> Self {
		Self {
			inner_radius: 8e-9,
			outer_radius: 25e-9,
			aspect: 4.0,
		}
	}
}

impl LensGeometry {
	/// Planar edge length of the undeformed lattice square
	pub fn planar_edge(&self) -> f64 {
		self.aspect * self.inner_radius
	}

	/// Axial length of the undeformed lattice.
	/// Chosen so the lattice volume balances the shell volume between the
	/// inner and outer radius.
	pub fn axial_length(&self) -> f64 {
		let d = self.planar_edge();
		(self.outer_radius.powi(3) - (d / self.aspect).powi(3)) / (d * d) / 3.0 * 2.0 * PI
	}
}

/// Quarter-plane angular sectors of the square domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
	North,
	West,
	South,
	East,
}

impl Sector {
	/// Classify a planar point by its polar angle
	pub fn of(x: f64, y: f64) -> Self {
		let angle = y.atan2(x);
		if (FRAC_PI_4..3.0 * FRAC_PI_4).contains(&angle) {
			Sector::North
		} else if angle >= 3.0 * FRAC_PI_4 || angle < -3.0 * FRAC_PI_4 {
			Sector::West
		} else if angle < -FRAC_PI_4 {
			Sector::South
		} else {
			Sector::East
		}
	}
}

/// Area-preserving square-to-disk warp, sector by sector.
///
/// Returns the warped radius and angle. Within each sector the radius is
/// linear in the dominant coordinate and the angle is a linear blend of the
/// minor one. A point whose divisor coordinate is exactly zero keeps the
/// default angle `PI` instead of dividing by zero; in practice only the
/// origin lands there.
pub fn square_to_disk(x: f64, y: f64) -> (f64, f64) {
	let sqrt_pi = PI.sqrt();
	let mut radius = 0.0;
	let mut angle = PI;

	match Sector::of(x, y) {
		Sector::North => {
			radius = 2.0 * y / sqrt_pi;
			if y != 0.0 {
				angle = FRAC_PI_2 * (1.0 - x / y / 2.0);
			}
		}
		Sector::West => {
			radius = -2.0 * x / sqrt_pi;
			if x != 0.0 {
				angle = PI * (1.0 + y / x / 4.0);
			}
		}
		Sector::South => {
			radius = -2.0 * y / sqrt_pi;
			if y != 0.0 {
				angle = FRAC_PI_2 * (3.0 - x / y / 2.0);
			}
		}
		Sector::East => {
			radius = 2.0 * x / sqrt_pi;
			if x != 0.0 {
				angle = PI * (2.0 + y / x / 4.0);
			}
		}
	}

	(radius, angle)
}

/// Radial cube-to-sphere warp.
///
/// The radial coordinate follows a cube-root volume-conservation relation in
/// the depth, the polar angle follows the warped planar radius, and the
/// azimuth is the planar warped angle.
pub fn disk_to_sphere(
	geometry: &LensGeometry,
	planar_radius: f64,
	phi: f64,
	depth: f64,
) -> Vector3<f64> {
	let d = geometry.planar_edge();
	let rho = ((d / geometry.aspect).powi(3) - depth * d * d * 3.0 / 2.0 / PI).cbrt();
	let theta = PI * (1.0 - planar_radius * PI.sqrt() / d / 2.0);

	Vector3::new(
		rho * theta.sin() * phi.cos(),
		rho * theta.sin() * phi.sin(),
		rho * theta.cos(),
	)
}

/// Normalize a bond midpoint into the physical square/axial domain.
/// Planar components span [-d/2, d/2]; the axial component spans [-l, 0].
pub fn normalize_midpoint(
	geometry: &LensGeometry,
	sites_per_edge: usize,
	midpoint: [f64; 3],
) -> (f64, f64, f64) {
	let d = geometry.planar_edge();
	let l = geometry.axial_length();
	let span = (sites_per_edge - 1) as f64;

	let x = d * (midpoint[0] / span - 0.5);
	let y = d * (midpoint[1] / span - 0.5);
	let z = -l * midpoint[2] / span;
	(x, y, z)
}

/// Warp one bond midpoint all the way into physical coordinates
pub fn warp_midpoint(
	geometry: &LensGeometry,
	sites_per_edge: usize,
	midpoint: [f64; 3],
) -> Vector3<f64> {
	let (x, y, z) = normalize_midpoint(geometry, sites_per_edge, midpoint);
	let (radius, phi) = square_to_disk(x, y);
	disk_to_sphere(geometry, radius, phi, z)
}
