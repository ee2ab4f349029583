pub mod interpreter;
pub mod parser;
pub mod scanner;

use crate::error::{interpreter::RuntimeError, parser::{ParseError, ParserError}, scanner::ScanError};

/// LaoError is the top-level error type for the interpreter pipeline. Each
/// stage keeps its own error shape; this enum is what the driver and the CLI
/// see.
#[derive(thiserror::Error, Debug)]
pub enum LaoError {
	/// Internal fault, should never happen.
	#[error("InternalError: {0}")]
	Internal(#[from] anyhow::Error),
	#[error("Scan error: {0}")]
	Scan(#[from] ScanError),
	#[error("Parse error: {0}")]
	Parse(#[from] ParseError),
	#[error("Runtime error: {0}")]
	Runtime(#[from] RuntimeError),
}

impl From<ParserError> for LaoError {
	fn from(error: ParserError) -> Self {
		match error {
			ParserError::Scan(e) => LaoError::Scan(e),
			ParserError::Parse(e) => LaoError::Parse(e),
		}
	}
}

impl LaoError {
	/// Source coordinates of the failure, when the stage that produced it
	/// attaches them. Runtime errors carry none.
	pub fn coordinates(&self) -> Option<(usize, usize)> {
		match self {
			LaoError::Scan(e) => Some(e.coordinates()),
			LaoError::Parse(e) => Some(e.coordinates()),
			_ => None,
		}
	}
}
