use std::fs::File;
use std::io::{Result, Write};
use std::path::Path;

use crate::micro::grid::OccupancyGrid;

/// Voxel centers of one phase in physical nanometers, restricted to the
/// open annular shell between the inner and outer radius.
///
/// Planar axes are centered on the domain axis; the axial coordinate starts
/// at the near face.
pub fn shell_centers(
	grid: &OccupancyGrid,
	solid: bool,
	inner_nm: f64,
	outer_nm: f64,
) -> Vec<[f64; 3]> {
	let n = grid.edge as f64;
	let mut centers = Vec::new();

	for index in 0..grid.total_voxels {
		if grid.get_voxel_index(index) != solid {
			continue;
		}
		let (i, j, k) = grid.index_to_ijk(index);
		let x = (i as f64 - 0.5 * (n - 1.0)) / (0.5 * n) * outer_nm;
		let y = (j as f64 - 0.5 * (n - 1.0)) / (0.5 * n) * outer_nm;
		let z = (k as f64 + 0.5) / n * outer_nm;

		let dist = (x * x + y * y + z * z).sqrt();
		if dist < outer_nm && dist > inner_nm {
			centers.push([x, y, z]);
		}
	}
	centers
}

fn join_axis(centers: &[[f64; 3]], axis: usize) -> String {
	centers
		.iter()
		.map(|center| format!("{:?}", center[axis]))
		.collect::<Vec<_>>()
		.join(",")
}

/// Emit one block/copy script for the external geometry-modeling tool.
/// The template text is fixed; only the size strings and the three
/// displacement lists are substituted.
pub fn write_block_script<P: AsRef<Path>>(
	path: P,
	block: &str,
	copy: &str,
	sizes: [f64; 2],
	centers: &[[f64; 3]],
) -> Result<()> {
	let mut script = format!(
		"    model.geom(\"geom1\").feature(\"{}\").set(\"pos\", new String[]{{\"0.0\", \"0.0\", \"0.0\"}});\n",
		block
	);
	script += &format!(
		"    model.geom(\"geom1\").feature(\"{}\").set(\"size\", new String[]{{\"{:?}\", \"{:?}\", \"{:?}\"}});\n",
		block, sizes[0], sizes[0], sizes[1]
	);
	script += &format!("    model.geom(\"geom1\").create(\"{}\", \"Copy\");\n", copy);
	script += &format!(
		"    model.geom(\"geom1\").feature(\"{}\").set(\"displx\", \"{}\");\n",
		copy,
		join_axis(centers, 0)
	);
	script += &format!(
		"    model.geom(\"geom1\").feature(\"{}\").set(\"disply\", \"{}\");\n",
		copy,
		join_axis(centers, 1)
	);
	script += &format!(
		"    model.geom(\"geom1\").feature(\"{}\").set(\"displz\", \"{}\");\n",
		copy,
		join_axis(centers, 2)
	);

	let mut file = File::create(path)?;
	file.write_all(script.as_bytes())?;
	Ok(())
}

/// Write the solid-phase and complement block scripts
/// (`cube-java-1.txt` and `cube-java-2.txt`)
pub fn write_geometry_scripts(
	grid: &OccupancyGrid,
	inner_nm: f64,
	outer_nm: f64,
	dir: &Path,
) -> Result<()> {
	let n = grid.edge as f64;
	let sizes = [2.0 * outer_nm / n, outer_nm / n];

	let solid = shell_centers(grid, true, inner_nm, outer_nm);
	write_block_script(dir.join("cube-java-1.txt"), "blk1", "copy1", sizes, &solid)?;

	let empty = shell_centers(grid, false, inner_nm, outer_nm);
	write_block_script(dir.join("cube-java-2.txt"), "blk2", "copy2", sizes, &empty)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn shell_filter_keeps_the_annulus() {
		let mut grid = OccupancyGrid::new(25);
		grid.fill_voxel_ijk(12, 12, 10);  // on the axis, inside the shell
		grid.fill_voxel_ijk(12, 12, 20);  // deeper along the axis, still inside
		grid.fill_voxel_ijk(0, 0, 24);  // outside the outer radius
		grid.fill_voxel_ijk(12, 12, 2);  // inside the inner radius

		let centers = shell_centers(&grid, true, 8.0, 25.0);
		assert_eq!(centers.len(), 2);
		for center in &centers {
			let dist = (center[0] * center[0] + center[1] * center[1] + center[2] * center[2]).sqrt();
			assert!(dist > 8.0 && dist < 25.0);
		}
	}

	#[test]
	fn scripts_reproduce_the_template_text() {
		let dir = tempfile::tempdir().unwrap();
		let mut grid = OccupancyGrid::new(25);
		grid.fill_voxel_ijk(12, 12, 10);
		write_geometry_scripts(&grid, 8.0, 25.0, dir.path()).unwrap();

		let solid = fs::read_to_string(dir.path().join("cube-java-1.txt")).unwrap();
		assert!(solid.starts_with(
			"    model.geom(\"geom1\").feature(\"blk1\").set(\"pos\", new String[]{\"0.0\", \"0.0\", \"0.0\"});\n"
		));
		assert!(solid.contains(
			"    model.geom(\"geom1\").feature(\"blk1\").set(\"size\", new String[]{\"2.0\", \"2.0\", \"1.0\"});\n"
		));
		assert!(solid.contains("    model.geom(\"geom1\").create(\"copy1\", \"Copy\");\n"));
		assert!(solid.contains("set(\"displx\", \"0.0\");\n"));
		assert!(solid.contains("set(\"disply\", \"0.0\");\n"));
		assert!(solid.contains("set(\"displz\", \"10.5\");\n"));

		let empty = fs::read_to_string(dir.path().join("cube-java-2.txt")).unwrap();
		assert!(empty.contains("feature(\"blk2\")"));
		assert!(empty.contains("create(\"copy2\", \"Copy\")"));
	}
}
