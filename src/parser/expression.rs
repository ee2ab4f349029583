//! Expression nodes and the operator tables they are built from.
//!
//! Literals keep their source lexeme: the interpreter parses them at
//! evaluation time, so a literal the host numeric parser rejects fails there
//! and not earlier. The `Display` impls render the tree in a parenthesized
//! prefix form, which the parser tests compare against.

use std::fmt;

/// Arithmetic operator mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArithmeticOp {
	Add,
	Sub,
	Mul,
	Div,
}

impl ArithmeticOp {
	/// `.mul.` and `.div.` bind tighter than `.add.` and `.sub.`. The levels
	/// continue the conditional table, so one climb can mix both families.
	pub fn precedence(self) -> u8 {
		match self {
			ArithmeticOp::Add | ArithmeticOp::Sub => 6,
			ArithmeticOp::Mul | ArithmeticOp::Div => 7,
		}
	}

	pub fn from_lexeme(lexeme: &str) -> Option<Self> {
		match lexeme.to_ascii_lowercase().as_str() {
			".add." => Some(ArithmeticOp::Add),
			".sub." => Some(ArithmeticOp::Sub),
			".mul." => Some(ArithmeticOp::Mul),
			".div." => Some(ArithmeticOp::Div),
			_ => None,
		}
	}

	pub fn mnemonic(self) -> &'static str {
		match self {
			ArithmeticOp::Add => ".add.",
			ArithmeticOp::Sub => ".sub.",
			ArithmeticOp::Mul => ".mul.",
			ArithmeticOp::Div => ".div.",
		}
	}
}

/// Logical and relational operator mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConditionalOp {
	And,
	Or,
	Not,
	Lt,
	Le,
	Gt,
	Ge,
	Eq,
	Ne,
}

impl ConditionalOp {
	pub fn precedence(self) -> u8 {
		use ConditionalOp::*;
		match self {
			Or => 1,
			And => 2,
			Not => 3,
			Eq | Ne => 4,
			Lt | Le | Gt | Ge => 5,
		}
	}

	pub fn from_lexeme(lexeme: &str) -> Option<Self> {
		use ConditionalOp::*;
		match lexeme.to_ascii_lowercase().as_str() {
			".and." => Some(And),
			".or." => Some(Or),
			".not." => Some(Not),
			".lt." => Some(Lt),
			".le." => Some(Le),
			".gt." => Some(Gt),
			".ge." => Some(Ge),
			".eq." => Some(Eq),
			".ne." => Some(Ne),
			_ => None,
		}
	}

	pub fn mnemonic(self) -> &'static str {
		use ConditionalOp::*;
		match self {
			And => ".and.",
			Or => ".or.",
			Not => ".not.",
			Lt => ".lt.",
			Le => ".le.",
			Gt => ".gt.",
			Ge => ".ge.",
			Eq => ".eq.",
			Ne => ".ne.",
		}
	}
}

/// The static type a variable's name implies by its first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VarType {
	Integer,
	Real,
	String,
}

impl VarType {
	/// `a`-`f` integer, `g`-`n` real, `o`-`z` (and digits) string. The same
	/// name always has the same type; there are no declarations.
	pub fn from_leading(ch: char) -> Option<Self> {
		match ch.to_ascii_lowercase() {
			'a'..='f' => Some(VarType::Integer),
			'g'..='n' => Some(VarType::Real),
			'o'..='z' | '0'..='9' => Some(VarType::String),
			_ => None,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			VarType::Integer => "integer",
			VarType::Real => "real",
			VarType::String => "string",
		}
	}
}

impl fmt::Display for VarType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// A variable reference: lowercased name plus the type the name implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Variable {
	pub name: String,
	pub ty:   VarType,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Expression {
	/// An integer literal, kept as its source lexeme until evaluation.
	Integer(String),
	/// A real literal, kept as its source lexeme until evaluation.
	Real(String),
	/// A string literal; the lexeme keeps its surrounding quotes.
	String(String),
	Variable(Variable),
	Arithmetic {
		left:  Box<Expression>,
		op:    ArithmeticOp,
		right: Box<Expression>,
	},
	/// `left` is absent for unary `.not.`.
	Conditional {
		left:  Option<Box<Expression>>,
		op:    ConditionalOp,
		right: Box<Expression>,
	},
}

impl fmt::Display for Expression {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Integer(text) | Self::Real(text) | Self::String(text) => f.write_str(text),
			Self::Variable(variable) => f.write_str(&variable.name),
			Self::Arithmetic { left, op, right } => write!(f, "({} {left} {right})", op.mnemonic()),
			Self::Conditional { left: Some(left), op, right } => write!(f, "({} {left} {right})", op.mnemonic()),
			Self::Conditional { left: None, op, right } => write!(f, "({} {right})", op.mnemonic()),
		}
	}
}
