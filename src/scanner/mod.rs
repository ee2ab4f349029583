//! Lexical analysis for LAO source text.
//!
//! The scanner is a cursor, not a batch lexer: `current` returns the most
//! recently recognized token and `advance` steps one token forward, which is
//! exactly the single-token lookahead the parser needs. Whitespace and
//! newlines only separate tokens; statement boundaries fall out of the token
//! kinds alone.
//!
//! Most of the language is recognized by inspecting the leading byte of the
//! next lexeme. The one genuinely stateful corner is numeric literals, which
//! are driven by a small DFA so that signed integers, fractions, and
//! exponents all come out of a single recognizer.

mod token;

use TokenKind::*;
pub(crate) use token::*;

use crate::error::scanner::{ScanError, ScanErrorKind};

/// A cursor over LAO source text that yields one token at a time.
pub(crate) struct Scanner<'a> {
	/// Program source text.
	source:   &'a str,
	/// Byte offset of the next unconsumed character.
	position: usize,
	/// 1-based line of the cursor.
	line:     usize,
	/// 1-based column of the cursor; newlines reset it.
	column:   usize,
	/// The most recently recognized token.
	current:  Token<'a>,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		Self { source, position: 0, line: 1, column: 1, current: Token::new(End, "", 1, 1) }
	}

	/// The most recently recognized token.
	pub fn current(&self) -> Token<'a> { self.current }

	/// Recognize the next token, reporting whether more input remains. Once
	/// the input is exhausted `current` yields the `End` sentinel forever.
	pub fn advance(&mut self) -> Result<bool, ScanError> {
		self.skip_whitespace();
		let Some(ch) = self.peek() else {
			self.current = Token::new(End, "", self.line, self.column);
			return Ok(false);
		};
		match ch {
			c if c.is_ascii_alphabetic() => self.identifier_or_keyword(),
			c if c.is_ascii_digit() => self.number()?,
			'+' | '-' => self.number()?,
			'.' => self.operator_or_period()?,
			'=' => self.emit(Assignment, 1),
			'"' => self.string()?,
			other => return Err(self.fail(ScanErrorKind::UnexpectedCharacter(other))),
		}
		Ok(true)
	}

	fn rest(&self) -> &'a str { &self.source[self.position..] }

	fn peek(&self) -> Option<char> { self.rest().chars().next() }

	fn fail(&self, kind: ScanErrorKind) -> ScanError { ScanError::new(self.line, self.column, kind) }

	fn skip_whitespace(&mut self) {
		while let Some(ch) = self.peek() {
			if !ch.is_ascii_whitespace() {
				break;
			}
			if ch == '\n' {
				self.line += 1;
				self.column = 1;
			} else {
				self.column += 1;
			}
			self.position += 1;
		}
	}

	/// Emit a token of `len` bytes starting at the cursor and step over it.
	fn emit(&mut self, kind: TokenKind, len: usize) {
		self.current = Token::new(kind, &self.rest()[..len], self.line, self.column);
		self.position += len;
		self.column += len;
	}

	/// A maximal run of letters; digits do not extend identifiers. A trailing
	/// colon turns the run into a label declaration.
	fn identifier_or_keyword(&mut self) {
		let len = self.rest().find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(self.rest().len());
		if self.rest()[len..].starts_with(':') {
			self.emit(Label, len + 1);
		} else if is_keyword(&self.rest()[..len].to_ascii_lowercase()) {
			self.emit(Keyword, len);
		} else {
			self.emit(Identifier, len);
		}
	}

	/// Dotted runs extend to the next whitespace and must match one of the
	/// operator tables; a lone `.` is the period that terminates `end`.
	fn operator_or_period(&mut self) -> Result<(), ScanError> {
		let len = self.rest().find(|c: char| c.is_ascii_whitespace()).unwrap_or(self.rest().len());
		let lexeme = &self.rest()[..len];
		let kind = match lexeme.to_ascii_lowercase().as_str() {
			".add." | ".sub." | ".mul." | ".div." => ArithmeticOp,
			".gt." | ".lt." | ".ge." | ".le." | ".eq." | ".ne." => RelationalOp,
			".not." | ".and." | ".or." => LogicalOp,
			"." => Period,
			_ => return Err(self.fail(ScanErrorKind::UnknownOperator(lexeme.to_string()))),
		};
		self.emit(kind, len);
		Ok(())
	}

	/// A string literal runs to the next `"`; the token value keeps both
	/// quotes. Reaching end of input first is a scan failure.
	fn string(&mut self) -> Result<(), ScanError> {
		let Some(inner) = self.rest()[1..].find('"') else {
			return Err(self.fail(ScanErrorKind::UnterminatedString));
		};
		let len = inner + 2;
		let lexeme = &self.rest()[..len];
		self.current = Token::new(String, lexeme, self.line, self.column);
		self.position += len;
		match lexeme.rfind('\n') {
			Some(at) => {
				self.line += lexeme.matches('\n').count();
				self.column = len - at;
			}
			None => self.column += len,
		}
		Ok(())
	}

	/// Drive the numeric DFA over the upcoming characters. The lexeme is the
	/// accepted prefix; a run that ends outside an accepting state (for
	/// example a bare `+` or `1.` with no fraction digits) is a scan failure.
	fn number(&mut self) -> Result<(), ScanError> {
		let mut state = NumberState::Initial;
		let mut len = 0;
		for ch in self.rest().chars() {
			match next_state(state, ch) {
				Some(next) => {
					state = next;
					len += ch.len_utf8();
				}
				None => break,
			}
		}
		let kind = match state {
			NumberState::Integer => Integer,
			NumberState::Frac | NumberState::Exp => Real,
			_ => return Err(self.fail(ScanErrorKind::MalformedNumber(self.rest()[..len].to_string()))),
		};
		self.emit(kind, len);
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
	Initial,
	BeginSigned,
	Signed,
	Integer,
	BeginFrac,
	Frac,
	BeginExp,
	BeginSignedExp,
	Exp,
}

fn next_state(state: NumberState, ch: char) -> Option<NumberState> {
	use NumberState::*;
	match state {
		Initial if ch.is_ascii_digit() => Some(Integer),
		Initial if ch == '+' || ch == '-' => Some(BeginSigned),
		BeginSigned if ch.is_ascii_digit() => Some(Signed),
		Signed if ch.is_ascii_digit() => Some(Integer),
		Integer if ch.is_ascii_digit() => Some(Integer),
		Integer if ch == '.' => Some(BeginFrac),
		Integer if ch.eq_ignore_ascii_case(&'e') => Some(BeginExp),
		BeginFrac | Frac if ch.is_ascii_digit() => Some(Frac),
		Frac if ch.eq_ignore_ascii_case(&'e') => Some(BeginExp),
		BeginExp if ch == '+' || ch == '-' => Some(BeginSignedExp),
		BeginExp | BeginSignedExp if ch.is_ascii_digit() => Some(Exp),
		// the exponent absorbs periods, so 1.22e2.22 scans as one real
		Exp if ch.is_ascii_digit() || ch == '.' => Some(Exp),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scan_all(input: &str) -> Result<Vec<Token<'_>>, ScanError> {
		let mut scanner = Scanner::new(input);
		let mut tokens = Vec::new();
		while scanner.advance()? {
			tokens.push(scanner.current());
		}
		Ok(tokens)
	}

	fn scan(input: &str, ok: bool) { assert_eq!(scan_all(input).is_ok(), ok, "input: {input:?}"); }

	#[test]
	fn recognizes_identifiers_and_keywords() {
		let tokens = scan_all("print then if allow person xyz").unwrap();
		let expected = [
			(Keyword, "print", 1),
			(Keyword, "then", 7),
			(Keyword, "if", 12),
			(Identifier, "allow", 15),
			(Identifier, "person", 21),
			(Identifier, "xyz", 28),
		];
		assert_eq!(tokens.len(), expected.len());
		for (token, (kind, value, column)) in tokens.iter().zip(expected) {
			assert_eq!((token.kind, token.value, token.line, token.column), (kind, value, 1, column));
		}
	}

	#[test]
	fn keywords_are_case_insensitive() {
		let tokens = scan_all("PRINT Rem GoTo").unwrap();
		assert!(tokens.iter().all(|t| t.kind == Keyword));
		assert_eq!(tokens[0].value, "PRINT");
	}

	#[test]
	fn recognizes_numbers() {
		let tokens = scan_all("1 1.2 1.22e2.22 1.2E2.5 -12 2e10").unwrap();
		let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
		assert_eq!(kinds, vec![Integer, Real, Real, Real, Integer, Real]);
		assert_eq!(tokens[2].value, "1.22e2.22");
		assert_eq!(tokens[4].value, "-12");
	}

	#[test]
	fn rejects_incomplete_numbers() {
		// a sign with a single digit never reaches an accepting state
		scan("-1", false);
		scan("+", false);
		scan("1.", false);
		scan("3e", false);
	}

	#[test]
	fn recognizes_operators_and_period() {
		let tokens = scan_all(". .add. .SUB. .lt. .ne. .and. .NOT. =").unwrap();
		let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
		assert_eq!(
			kinds,
			vec![Period, ArithmeticOp, ArithmeticOp, RelationalOp, RelationalOp, LogicalOp, LogicalOp, Assignment]
		);
	}

	#[test]
	fn rejects_unknown_dotted_runs() {
		scan(".bogus.", false);
		scan(".3", false);
	}

	#[test]
	fn recognizes_strings_with_quotes() {
		let tokens = scan_all("z = \"hello world\"").unwrap();
		assert_eq!(tokens[2].kind, String);
		assert_eq!(tokens[2].value, "\"hello world\"");
	}

	#[test]
	fn rejects_unterminated_strings() { scan("\"dangling", false); }

	#[test]
	fn rejects_unknown_characters() {
		scan("@", false);
		scan("a = ~3", false);
	}

	#[test]
	fn recognizes_labels() {
		let tokens = scan_all("loop:\ngoto loop").unwrap();
		assert_eq!(tokens[0].kind, Label);
		assert_eq!(tokens[0].value, "loop:");
		assert_eq!((tokens[1].kind, tokens[2].kind), (Keyword, Identifier));
	}

	#[test]
	fn tracks_lines_and_columns() {
		let source = "a = 1\n  print a";
		let tokens = scan_all(source).unwrap();
		assert_eq!((tokens[3].value, tokens[3].line, tokens[3].column), ("print", 2, 3));
		// every token's coordinates point back at its own lexeme
		for token in &tokens {
			let line = source.lines().nth(token.line - 1).unwrap();
			assert_eq!(&line[token.column - 1..token.column - 1 + token.value.len()], token.value);
		}
	}

	#[test]
	fn end_sentinel_repeats_after_exhaustion() {
		let mut scanner = Scanner::new("a");
		assert!(scanner.advance().unwrap());
		assert!(!scanner.advance().unwrap());
		assert_eq!(scanner.current().kind, End);
		assert!(!scanner.advance().unwrap());
		assert_eq!(scanner.current().kind, End);
	}

	#[test]
	fn scanning_is_idempotent() {
		let source = "g = 1.5 .mul. 2\nif g .gt. 2.0 then print g\nend .";
		assert_eq!(scan_all(source).unwrap(), scan_all(source).unwrap());
	}
}
