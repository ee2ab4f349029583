//! Recursive-descent parsing with precedence climbing.
//!
//! The parser pulls tokens from a borrowed scanner one at a time and builds
//! the program as a flat `Vec<Statement>`. Statements dispatch on the current
//! token kind; expressions are parsed as an atom followed by a climb that
//! consumes operators only while their precedence exceeds the caller's
//! threshold, which yields left-associative trees without a grammar rule per
//! level.
//!
//! Two climbs exist. Assignment right-hand sides climb the arithmetic
//! operators only, so a trailing relational clause is left for the top-level
//! loop to step over. Conditions climb the full table; since `.mul.`/`.div.`
//! and `.add.`/`.sub.` sit above every relational operator, relational
//! operands may themselves be arithmetic expressions.
//!
//! The parser aborts on the first syntactic error, which carries the
//! coordinates of the offending token.

pub(crate) mod expression;

use crate::{
	error::parser::{ParseError, ParseErrorKind, ParserError},
	parser::expression::{ArithmeticOp, ConditionalOp, Expression, VarType, Variable},
	scanner::{Scanner, Token, TokenKind},
	statement::Statement,
};

pub(crate) struct Parser<'s, 'src> {
	scanner: &'s mut Scanner<'src>,
}

impl<'s, 'src> Parser<'s, 'src> {
	pub fn new(scanner: &'s mut Scanner<'src>) -> Self { Self { scanner } }

	/// Parse the whole program. Tokens the statement grammar does not accept
	/// at the top level are stepped over rather than rejected.
	pub fn parse(mut self) -> Result<Vec<Statement>, ParserError> {
		self.scanner.advance()?;
		let mut statements = Vec::new();
		loop {
			match self.scanner.current().kind {
				TokenKind::Identifier | TokenKind::Keyword | TokenKind::Label => statements.push(self.statement()?),
				TokenKind::End => return Ok(statements),
				_ => {
					self.scanner.advance()?;
				}
			}
		}
	}

	/// A single statement; also used for the branch of `if ... then`.
	fn statement(&mut self) -> Result<Statement, ParserError> {
		let token = self.scanner.current();
		match token.kind {
			TokenKind::Identifier => self.assignment_statement(),
			TokenKind::Keyword => self.keyword_statement(),
			TokenKind::Label => self.label_statement(),
			_ => Err(self.fail(token, ParseErrorKind::UnexpectedToken(token.value.to_string()))),
		}
	}

	fn keyword_statement(&mut self) -> Result<Statement, ParserError> {
		let token = self.scanner.current();
		match token.value.to_ascii_lowercase().as_str() {
			"if" => self.if_statement(),
			"read" => self.read_statement(),
			"print" => self.print_statement(),
			"rem" => self.rem_statement(),
			"end" => self.end_statement(),
			"goto" => self.goto_statement(),
			other => Err(self.fail(token, ParseErrorKind::UnexpectedToken(other.to_string()))),
		}
	}

	/// `IDENT = <atom> [arithmetic climb]`
	fn assignment_statement(&mut self) -> Result<Statement, ParserError> {
		let target = self.variable()?;
		let token = self.scanner.current();
		if token.kind != TokenKind::Assignment {
			return Err(self.fail(token, ParseErrorKind::ExpectAssignment));
		}
		self.scanner.advance()?;
		let atom = self.atom()?;
		let value = self.arithmetic_expression(atom, 0)?;
		Ok(Statement::Assignment { target, value })
	}

	/// `if <condition> then <statement>`
	fn if_statement(&mut self) -> Result<Statement, ParserError> {
		self.scanner.advance()?;
		let condition = self.condition()?;
		let token = self.scanner.current();
		if token.kind != TokenKind::Keyword || !token.value.eq_ignore_ascii_case("then") {
			return Err(self.fail(token, ParseErrorKind::ExpectThen));
		}
		self.scanner.advance()?;
		let then_branch = self.statement()?;
		Ok(Statement::If { condition, then_branch: Box::new(then_branch) })
	}

	/// `print` takes at most one literal or variable, and only from its own
	/// source line; a keyword there is an error, a later line means no
	/// argument.
	fn print_statement(&mut self) -> Result<Statement, ParserError> {
		let line = self.scanner.current().line;
		self.scanner.advance()?;
		let token = self.scanner.current();
		if token.kind == TokenKind::End || token.line > line {
			return Ok(Statement::Print(None));
		}
		if token.kind == TokenKind::Keyword {
			return Err(self.fail(token, ParseErrorKind::KeywordArgument(token.value.to_string())));
		}
		let argument = self.atom()?;
		Ok(Statement::Print(Some(argument)))
	}

	fn read_statement(&mut self) -> Result<Statement, ParserError> {
		self.scanner.advance()?;
		Ok(Statement::Read(self.variable()?))
	}

	/// A comment runs to the end of its source line; the tokens are discarded.
	fn rem_statement(&mut self) -> Result<Statement, ParserError> {
		let line = self.scanner.current().line;
		while self.scanner.current().line == line && self.scanner.current().kind != TokenKind::End {
			self.scanner.advance()?;
		}
		Ok(Statement::Rem)
	}

	/// `end` must be terminated by a period.
	fn end_statement(&mut self) -> Result<Statement, ParserError> {
		let token = self.scanner.current();
		self.scanner.advance()?;
		if self.scanner.current().kind != TokenKind::Period {
			return Err(self.fail(token, ParseErrorKind::ExpectPeriodAfterEnd));
		}
		self.scanner.advance()?;
		Ok(Statement::End)
	}

	/// `goto <IDENT>` on the same line; the identifier names a label.
	fn goto_statement(&mut self) -> Result<Statement, ParserError> {
		let line = self.scanner.current().line;
		self.scanner.advance()?;
		let token = self.scanner.current();
		if token.kind != TokenKind::Identifier || token.line != line {
			return Err(self.fail(token, ParseErrorKind::ExpectLabelName));
		}
		self.scanner.advance()?;
		Ok(Statement::Goto(token.value.to_ascii_lowercase()))
	}

	/// An `IDENT:` token at statement start declares a jump target.
	fn label_statement(&mut self) -> Result<Statement, ParserError> {
		let token = self.scanner.current();
		self.scanner.advance()?;
		Ok(Statement::Label(token.value.trim_end_matches(':').to_ascii_lowercase()))
	}

	/// An identifier becomes a variable reference; its declared type is a pure
	/// function of the lowercased leading character.
	fn variable(&mut self) -> Result<Variable, ParserError> {
		let token = self.scanner.current();
		if token.kind != TokenKind::Identifier {
			return Err(self.fail(token, ParseErrorKind::ExpectVariable));
		}
		let name = token.value.to_ascii_lowercase();
		let Some(ty) = name.chars().next().and_then(VarType::from_leading) else {
			return Err(self.fail(token, ParseErrorKind::InvalidIdentifier(name)));
		};
		self.scanner.advance()?;
		Ok(Variable { name, ty })
	}

	/// A terminal expression: literal or variable reference.
	fn atom(&mut self) -> Result<Expression, ParserError> {
		let token = self.scanner.current();
		let expression = match token.kind {
			TokenKind::Integer => Expression::Integer(token.value.to_string()),
			TokenKind::Real => Expression::Real(token.value.to_string()),
			TokenKind::String => Expression::String(token.value.to_string()),
			TokenKind::Identifier => return Ok(Expression::Variable(self.variable()?)),
			_ => return Err(self.fail(token, ParseErrorKind::UnexpectedToken(token.value.to_string()))),
		};
		self.scanner.advance()?;
		Ok(expression)
	}

	/// Climb arithmetic operators above `min_prec`, left-associatively.
	fn arithmetic_expression(&mut self, mut left: Expression, min_prec: u8) -> Result<Expression, ParserError> {
		loop {
			let token = self.scanner.current();
			if token.kind != TokenKind::ArithmeticOp {
				return Ok(left);
			}
			let Some(op) = ArithmeticOp::from_lexeme(token.value) else { return Ok(left) };
			if op.precedence() <= min_prec {
				return Ok(left);
			}
			self.scanner.advance()?;
			let atom = self.atom()?;
			let right = self.arithmetic_expression(atom, op.precedence())?;
			left = Expression::Arithmetic { left: Box::new(left), op, right: Box::new(right) };
		}
	}

	fn condition(&mut self) -> Result<Expression, ParserError> {
		let left = self.condition_atom()?;
		self.condition_expression(left, 0)
	}

	/// A condition operand: an ordinary atom, or prefix `.not.` applied to a
	/// climb at its own precedence.
	fn condition_atom(&mut self) -> Result<Expression, ParserError> {
		let token = self.scanner.current();
		if token.kind == TokenKind::LogicalOp {
			let Some(op @ ConditionalOp::Not) = ConditionalOp::from_lexeme(token.value) else {
				return Err(self.fail(token, ParseErrorKind::UnexpectedToken(token.value.to_string())));
			};
			self.scanner.advance()?;
			let operand = self.condition_atom()?;
			let right = self.condition_expression(operand, op.precedence())?;
			return Ok(Expression::Conditional { left: None, op, right: Box::new(right) });
		}
		self.atom()
	}

	/// Climb the full operator table above `min_prec`. Arithmetic operators
	/// outrank every conditional operator, so they nest inside relational
	/// operands.
	fn condition_expression(&mut self, mut left: Expression, min_prec: u8) -> Result<Expression, ParserError> {
		loop {
			let token = self.scanner.current();
			match token.kind {
				TokenKind::LogicalOp | TokenKind::RelationalOp => {
					let Some(op) = ConditionalOp::from_lexeme(token.value) else { return Ok(left) };
					if op.precedence() <= min_prec {
						return Ok(left);
					}
					self.scanner.advance()?;
					let atom = self.condition_atom()?;
					let right = self.condition_expression(atom, op.precedence())?;
					left = Expression::Conditional { left: Some(Box::new(left)), op, right: Box::new(right) };
				}
				TokenKind::ArithmeticOp => {
					let Some(op) = ArithmeticOp::from_lexeme(token.value) else { return Ok(left) };
					if op.precedence() <= min_prec {
						return Ok(left);
					}
					self.scanner.advance()?;
					let atom = self.atom()?;
					let right = self.condition_expression(atom, op.precedence())?;
					left = Expression::Arithmetic { left: Box::new(left), op, right: Box::new(right) };
				}
				_ => return Ok(left),
			}
		}
	}

	fn fail(&self, token: Token<'_>, kind: ParseErrorKind) -> ParserError {
		ParseError::new(token.line, token.column, kind).into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(input: &'static str) -> Vec<Statement> {
		let mut scanner = Scanner::new(input);
		Parser::new(&mut scanner).parse().unwrap()
	}

	fn parse_error(input: &'static str) -> ParserError {
		let mut scanner = Scanner::new(input);
		Parser::new(&mut scanner).parse().unwrap_err()
	}

	/// The right-hand side of the first assignment, rendered in prefix form.
	fn rhs(input: &'static str) -> String {
		match &parse(input)[0] {
			Statement::Assignment { value, .. } => value.to_string(),
			other => panic!("expected assignment, got {other:?}"),
		}
	}

	/// The condition of the first if statement, rendered in prefix form.
	fn condition_of(input: &'static str) -> String {
		match &parse(input)[0] {
			Statement::If { condition, .. } => condition.to_string(),
			other => panic!("expected if statement, got {other:?}"),
		}
	}

	#[test]
	fn parses_assignment_with_precedence() {
		assert_eq!(rhs("a = 2 .add. 3 .mul. 4"), "(.add. 2 (.mul. 3 4))");
		assert_eq!(rhs("a = 2 .mul. 3 .add. 4"), "(.add. (.mul. 2 3) 4)");
		assert_eq!(rhs("a = 1 .sub. 2 .sub. 3"), "(.sub. (.sub. 1 2) 3)");
		assert_eq!(rhs("a = 8 .div. 4 .div. 2"), "(.div. (.div. 8 4) 2)");
	}

	#[test]
	fn parses_atoms() {
		assert_eq!(rhs("a = 42"), "42");
		assert_eq!(rhs("g = 1.5"), "1.5");
		assert_eq!(rhs("z = \"hi\""), "\"hi\"");
		assert_eq!(rhs("a = b"), "b");
	}

	#[test]
	fn assignment_target_types_follow_first_letter() {
		for (source, ty) in [("alpha = 1", VarType::Integer), ("m = 1.0", VarType::Real), ("word = \"w\"", VarType::String)] {
			match &parse(source)[0] {
				Statement::Assignment { target, .. } => assert_eq!(target.ty, ty),
				other => panic!("expected assignment, got {other:?}"),
			}
		}
	}

	#[test]
	fn variable_names_are_lowercased() {
		match &parse("Alpha = 1")[0] {
			Statement::Assignment { target, .. } => assert_eq!(target.name, "alpha"),
			other => panic!("expected assignment, got {other:?}"),
		}
	}

	#[test]
	fn parses_conditions() {
		assert_eq!(condition_of("if 3 .gt. 2 then print"), "(.gt. 3 2)");
		assert_eq!(condition_of("if a .eq. 1 .and. b .eq. 2 then print"), "(.and. (.eq. a 1) (.eq. b 2))");
		assert_eq!(condition_of("if a .eq. 1 .or. a .eq. 2 then print"), "(.or. (.eq. a 1) (.eq. a 2))");
	}

	#[test]
	fn not_is_prefix_and_binds_between_and_and_equality() {
		assert_eq!(condition_of("if .not. a .eq. b then print"), "(.not. (.eq. a b))");
		assert_eq!(
			condition_of("if .not. a .eq. b .and. c .gt. 2 then print"),
			"(.and. (.not. (.eq. a b)) (.gt. c 2))"
		);
	}

	#[test]
	fn arithmetic_nests_inside_relational_operands() {
		assert_eq!(condition_of("if a .add. 1 .gt. 2 .mul. 3 then print"), "(.gt. (.add. a 1) (.mul. 2 3))");
	}

	#[test]
	fn parses_statement_forms() {
		let statements = parse("rem a comment .add. junk\nprint\nprint a\nread g\nend .");
		assert!(matches!(statements[0], Statement::Rem));
		assert!(matches!(statements[1], Statement::Print(None)));
		assert!(matches!(statements[2], Statement::Print(Some(Expression::Variable(_)))));
		assert!(matches!(statements[3], Statement::Read(_)));
		assert!(matches!(statements[4], Statement::End));
	}

	#[test]
	fn parses_if_with_nested_statement() {
		let statements = parse("if 3 .gt. 2 then print \"yes\"");
		match &statements[0] {
			Statement::If { then_branch, .. } => {
				assert!(matches!(**then_branch, Statement::Print(Some(Expression::String(_)))))
			}
			other => panic!("expected if statement, got {other:?}"),
		}
	}

	#[test]
	fn parses_labels_and_goto() {
		let statements = parse("Loop:\na = 1\ngoto LOOP");
		assert_eq!(statements[0], Statement::Label("loop".to_string()));
		assert_eq!(statements[2], Statement::Goto("loop".to_string()));
	}

	#[test]
	fn if_then_may_nest_goto() {
		let statements = parse("if a .gt. 0 then goto loop");
		match &statements[0] {
			Statement::If { then_branch, .. } => assert_eq!(**then_branch, Statement::Goto("loop".to_string())),
			other => panic!("expected if statement, got {other:?}"),
		}
	}

	#[test]
	fn statements_after_end_are_still_parsed() {
		let statements = parse("end .\nprint \"unreached\"");
		assert!(matches!(statements[0], Statement::End));
		assert!(matches!(statements[1], Statement::Print(Some(_))));
	}

	#[test]
	fn stray_top_level_tokens_are_skipped() {
		// the trailing relational clause is not part of the assignment grammar
		let statements = parse("a = 1 .lt. 2");
		assert_eq!(statements.len(), 1);
		assert_eq!(rhs("a = 1 .lt. 2"), "1");
	}

	#[test]
	fn rejects_assignment_without_equals() {
		assert!(matches!(parse_error("a 1"), ParserError::Parse(_)));
	}

	#[test]
	fn rejects_if_without_then() {
		let error = parse_error("if 3 .gt. 2 print \"x\"");
		let ParserError::Parse(e) = error else { panic!("expected parse error") };
		assert_eq!(e.coordinates(), (1, 13));
	}

	#[test]
	fn rejects_end_without_period() {
		assert!(matches!(parse_error("end"), ParserError::Parse(_)));
	}

	#[test]
	fn rejects_keyword_as_print_argument() {
		assert!(matches!(parse_error("print read"), ParserError::Parse(_)));
	}

	#[test]
	fn rejects_goto_without_target_on_same_line() {
		assert!(matches!(parse_error("goto\nloop"), ParserError::Parse(_)));
		assert!(matches!(parse_error("a = 1\ngoto"), ParserError::Parse(_)));
	}

	#[test]
	fn scan_failures_surface_through_the_parser() {
		assert!(matches!(parse_error("a = @"), ParserError::Scan(_)));
	}
}
