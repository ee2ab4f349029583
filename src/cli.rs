use std::path::PathBuf;

use palc::Parser;

/// CLI arguments
#[derive(Parser)]
#[command(name = "lao", long_about = "An interpreter for the LAO teaching language")]
pub struct Cli {
	/// Path to a LAO source file; the program is read from standard input
	/// when omitted
	pub source: Option<PathBuf>,
}
