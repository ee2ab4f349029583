use std::{fs::read_to_string, io::{self, Read}, process::ExitCode};

use lao::{Lao, LaoError, cli::Cli};
use owo_colors::OwoColorize;
use palc::Parser;

fn main() -> ExitCode {
	let cli = Cli::parse();
	let source = match &cli.source {
		Some(path) => read_to_string(path),
		None => {
			let mut source = String::new();
			io::stdin().read_to_string(&mut source).map(|_| source)
		}
	};
	let source = match source {
		Ok(source) => source,
		Err(error) => {
			eprintln!("{}", format!("Failed to read source: {error}").red());
			return ExitCode::FAILURE;
		}
	};

	let stdin = io::stdin();
	match Lao.run(&source, stdin.lock(), io::stdout().lock()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			render_error(&source, &error);
			ExitCode::FAILURE
		}
	}
}

/// Print the diagnostic, and when it carries coordinates, the offending
/// source line with a caret under the failing column.
fn render_error(source: &str, error: &LaoError) {
	eprintln!("{}", error.red());
	if let Some((line, column)) = error.coordinates() {
		if let Some(text) = source.lines().nth(line - 1) {
			eprintln!("  {}", text.bright_black());
			eprintln!("  {}{}", " ".repeat(column - 1), "^".red());
		}
	}
}
