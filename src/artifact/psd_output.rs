use std::fs::File;
use std::io::{Result, Write};
use std::path::Path;

use chrono::{DateTime, Local};

use crate::pore::psd::PoreSizeDistribution;

/// Timestamped density artifact name, `psd_<YYMMDD_HHMMSS>.csv`
pub fn density_file_name(now: DateTime<Local>) -> String {
	format!("psd_{}.csv", now.format("%y%m%d_%H%M%S"))
}

/// Write the density curve as `radius,density` rows for the external
/// plotting collaborator
pub fn write_density<P: AsRef<Path>>(path: P, distribution: &PoreSizeDistribution) -> Result<()> {
	let mut file = File::create(path)?;
	writeln!(file, "radius,density")?;
	for (radius, density) in distribution.radii.iter().zip(&distribution.density) {
		writeln!(file, "{:?},{:?}", radius, density)?;
	}
	Ok(())
}
