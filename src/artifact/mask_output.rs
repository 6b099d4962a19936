use std::fs::File;
use std::io::{Result, Write};
use std::path::Path;

use chrono::{DateTime, Local};

/// Timestamped mask artifact name, `mask_<YYMMDD_HHMMSS>.npy`
pub fn mask_file_name(now: DateTime<Local>) -> String {
	format!("mask_{}.npy", now.format("%y%m%d_%H%M%S"))
}

/// Write a per-bond boolean mask as a NumPy `.npy` version 1.0 array.
///
/// The layout is the npy format spec verbatim: magic string, version,
/// little-endian header length, a python dict literal padded with spaces to
/// a 64-byte boundary and closed by a newline, then one `|b1` byte per
/// element in C order.
pub fn write_mask<P: AsRef<Path>>(path: P, mask: &[bool]) -> Result<()> {
	let mut header = format!(
		"{{'descr': '|b1', 'fortran_order': False, 'shape': ({},), }}",
		mask.len()
	);
	let unpadded = 6 + 2 + 2 + header.len() + 1;
	let padding = (64 - unpadded % 64) % 64;
	header.push_str(&" ".repeat(padding));
	header.push('\n');

	let mut file = File::create(path)?;
	file.write_all(b"\x93NUMPY")?;
	file.write_all(&[1u8, 0u8])?;
	file.write_all(&(header.len() as u16).to_le_bytes())?;
	file.write_all(header.as_bytes())?;

	let payload: Vec<u8> = mask.iter().map(|&bit| bit as u8).collect();
	file.write_all(&payload)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use chrono::TimeZone;

	use super::*;

	#[test]
	fn file_name_embeds_the_timestamp() {
		let stamp = Local.with_ymd_and_hms(2024, 3, 7, 16, 5, 9).unwrap();
		assert_eq!(mask_file_name(stamp), "mask_240307_160509.npy");
	}

	#[test]
	fn npy_layout_is_well_formed() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("mask.npy");
		write_mask(&path, &[true, false, true]).unwrap();

		let bytes = fs::read(&path).unwrap();
		assert_eq!(&bytes[..6], b"\x93NUMPY");
		assert_eq!(&bytes[6..8], &[1, 0]);

		let header_len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
		assert_eq!((10 + header_len) % 64, 0);

		let header = std::str::from_utf8(&bytes[10..10 + header_len]).unwrap();
		assert!(header.starts_with("{'descr': '|b1', 'fortran_order': False, 'shape': (3,), }"));
		assert!(header.ends_with('\n'));

		assert_eq!(&bytes[10 + header_len..], &[1, 0, 1]);
	}
}
