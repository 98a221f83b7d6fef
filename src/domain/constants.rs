pub const DEFAULT_FIXTURES_DIR: &str = "tests/testfiles";
pub const DEFAULT_PATTERN: &str = r"\.xml$";
pub const DEFAULT_OUTPUT_DIR: &str = "svgs";
pub const DEFAULT_BINARY: &str = "target/release/mathimg";
pub const DEFAULT_BUILD_COMMAND: &str = "cargo build --release -p mathimg";
pub const DEFAULT_JOBS: usize = 8;

/// Extension the renderer appends when its output argument is a directory.
pub const OUTPUT_EXTENSION: &str = "svg";

/// Trailing renderer stderr lines kept per outcome.
pub const STDERR_TAIL_LINES: usize = 20;
