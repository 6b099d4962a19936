use std::env;
use std::sync::Once;

/// Print program and build information (only prints once)
pub fn print_build_info() {
	static PRINT_BUILD_ONCE: Once = Once::new();
	PRINT_BUILD_ONCE.call_once(|| {
		let program_name = env::current_exe()
			.ok()
			.as_ref()
			.and_then(|path| path.file_name())
			.and_then(|name| name.to_str())
			.unwrap_or(env!("CARGO_PKG_NAME"))
			.to_string();

		eprintln!("Program: {}", program_name);
		eprintln!(
			"Compiled on: {} at {}",
			env!("COMPILE_DATE"),
			env!("COMPILE_TIME")
		);
		eprintln!("Version: {}\n", env!("CARGO_PKG_VERSION"));
	});
}
