/// Empirical pore-size distribution over a batch of fitted pore radii
pub struct PoreSizeDistribution {
	pub radii: Vec<f64>,  // Evenly spaced sample radii from 0 to the maximum
	pub survival: Vec<f64>,  // Fraction of pores at least as large
	pub density: Vec<f64>,  // Negative gradient of the survival curve
	pub step: f64,  // Spacing between sample radii
}

impl PoreSizeDistribution {
	/// Build the distribution over `bins` evenly spaced sample radii.
	///
	/// The survival convention is used rather than the cumulative one: each
	/// sample radius carries the fraction of pores at least that large, and
	/// the probability density is the negated finite-difference derivative
	/// of that curve.
	pub fn from_radii(pore_radii: &[f64], bins: usize) -> Self {
		assert!(bins >= 2, "need at least two sample radii");
		assert!(!pore_radii.is_empty(), "need at least one pore radius");

		let max = pore_radii.iter().copied().fold(0.0, f64::max);
		let step = max / (bins - 1) as f64;
		let count = pore_radii.len() as f64;

		let radii: Vec<f64> = (0..bins).map(|bin| bin as f64 * step).collect();
		let survival: Vec<f64> = radii
			.iter()
			.map(|&sample| {
				pore_radii.iter().filter(|&&radius| radius >= sample).count() as f64 / count
			})
			.collect();
		let density = negated_gradient(&survival, step);

		Self {
			radii,
			survival,
			density,
			step,
		}
	}
}

/// Negated first-order finite-difference gradient: central differences in
/// the interior, one-sided at both ends
fn negated_gradient(values: &[f64], step: f64) -> Vec<f64> {
	let n = values.len();
	(0..n)
		.map(|index| {
			let slope = if index == 0 {
				(values[1] - values[0]) / step
			} else if index == n - 1 {
				(values[n - 1] - values[n - 2]) / step
			} else {
				(values[index + 1] - values[index - 1]) / (2.0 * step)
			};
			-slope
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use approx::assert_relative_eq;

	use super::*;

	#[test]
	fn survival_and_density_on_a_known_batch() {
		let distribution = PoreSizeDistribution::from_radii(&[1.0, 1.0, 2.0, 4.0], 5);

		assert_relative_eq!(distribution.step, 1.0);
		assert_eq!(distribution.radii, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
		assert_eq!(distribution.survival, vec![1.0, 1.0, 0.5, 0.25, 0.25]);

		assert_relative_eq!(distribution.density[0], 0.0);
		assert_relative_eq!(distribution.density[1], 0.25);
		assert_relative_eq!(distribution.density[2], 0.375);
		assert_relative_eq!(distribution.density[3], 0.125);
		assert_relative_eq!(distribution.density[4], 0.0);
	}

	#[test]
	fn survival_never_increases() {
		let radii = [0.3, 1.7, 0.9, 2.4, 0.1, 1.1, 3.3];
		let distribution = PoreSizeDistribution::from_radii(&radii, 100);
		for window in distribution.survival.windows(2) {
			assert!(window[1] <= window[0]);
		}
	}

	#[test]
	fn density_is_nonnegative_up_to_noise() {
		let radii = [0.5, 0.8, 1.2, 1.9, 2.2, 2.3, 3.0];
		let distribution = PoreSizeDistribution::from_radii(&radii, 100);
		for &density in &distribution.density {
			assert!(density >= -1e-12);
		}
	}
}
