use crate::error::scanner::ScanError;

/// Errors that can occur while parsing: either the scanner failed to produce
/// the next token, or the token stream does not form a valid statement.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	#[error(transparent)]
	Scan(#[from] ScanError),
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// A syntactic failure, carrying the coordinates of the offending token.
#[derive(thiserror::Error, Debug)]
#[error("line {line} column {column}: {kind}")]
pub struct ParseError {
	line:   usize,
	column: usize,
	kind:   ParseErrorKind,
}

impl ParseError {
	pub(crate) fn new(line: usize, column: usize, kind: ParseErrorKind) -> Self { Self { line, column, kind } }

	pub fn coordinates(&self) -> (usize, usize) { (self.line, self.column) }
}

#[derive(Debug)]
pub enum ParseErrorKind {
	/// A token no rule accepts at this position.
	UnexpectedToken(String),
	/// An assignment statement without `=` after the variable.
	ExpectAssignment,
	/// An `if` condition not followed by `then`.
	ExpectThen,
	/// `end` not terminated by a `.`.
	ExpectPeriodAfterEnd,
	/// An identifier whose leading character maps to no declared type.
	InvalidIdentifier(String),
	/// A statement that needs a variable name and did not get one.
	ExpectVariable,
	/// A keyword on the same line as `print`, where its argument would go.
	KeywordArgument(String),
	/// `goto` without a label name on the same line.
	ExpectLabelName,
}

impl std::fmt::Display for ParseErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorKind::*;
		match self {
			UnexpectedToken(t) => write!(f, "Unexpected token '{t}'"),
			ExpectAssignment => write!(f, "Expected '=' after the variable"),
			ExpectThen => write!(f, "Expected 'then' after the condition"),
			ExpectPeriodAfterEnd => write!(f, "Expected '.' after 'end'"),
			InvalidIdentifier(n) => write!(f, "Invalid identifier '{n}' used as a variable"),
			ExpectVariable => write!(f, "Expected a variable name"),
			KeywordArgument(k) => write!(f, "Expected a variable, string, or number, found keyword '{k}'"),
			ExpectLabelName => write!(f, "Expected a label name after 'goto'"),
		}
	}
}
