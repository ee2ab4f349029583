use std::{
	fs::read_to_string,
	io::{self, BufRead, Write},
	path::Path,
};

use anyhow::Context;

use crate::{LaoError, interpreter::Interpreter, parser::Parser, scanner::Scanner};

/// The interpreter pipeline: source text in, side effects out.
///
/// Scanning, parsing, and execution compose strictly downstream; the only
/// state that survives a run is whatever the program printed.
pub struct Lao;

impl Lao {
	/// Run a source file, wiring `read` to standard input and `print` to
	/// standard output.
	pub fn run_file(&self, path: &Path) -> Result<(), LaoError> {
		let source = read_to_string(path).context("Failed to open source file")?;
		let stdin = io::stdin();
		self.run(&source, stdin.lock(), io::stdout().lock())
	}

	/// Run a program against explicit input and output handles.
	pub fn run<R: BufRead, W: Write>(&self, source: &str, input: R, out: W) -> Result<(), LaoError> {
		let mut scanner = Scanner::new(source);
		let statements = Parser::new(&mut scanner).parse()?;
		Interpreter::new(input, out).execute(&statements)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	fn run(source: &str) -> Result<String, LaoError> {
		let mut out = Vec::new();
		Lao.run(source, Cursor::new(&b""[..]), &mut out)?;
		Ok(String::from_utf8(out).unwrap())
	}

	#[test]
	fn runs_a_complete_program() {
		let source = "rem greet twice\nz = \"hello\"\nprint z\nprint z\nend .";
		assert_eq!(run(source).unwrap(), "hello\nhello\n");
	}

	#[test]
	fn empty_source_is_a_successful_no_op() { assert_eq!(run("").unwrap(), ""); }

	#[test]
	fn stage_errors_map_to_their_variant() {
		assert!(matches!(run("a = @").unwrap_err(), LaoError::Scan(_)));
		assert!(matches!(run("end").unwrap_err(), LaoError::Parse(_)));
		assert!(matches!(run("print b").unwrap_err(), LaoError::Runtime(_)));
	}
}
