pub mod micro {
	pub mod grid;
	pub mod utils;
	pub mod fill;
	pub mod calibrate;
}
pub mod lattice {
	pub mod bonds;
	pub mod warp;
	pub mod sample;
}
pub mod pore {
	pub mod obstacles;
	pub mod bubble;
	pub mod psd;
}
pub mod artifact {
	pub mod info;
	pub mod mask_output;
	pub mod geom_output;
	pub mod psd_output;
}
