//! The runtime value domain and its coercion rules.
//!
//! Everything about mixed-type behavior lives here: integer widening against
//! reals, string concatenation under `.add.`, lexicographic string
//! comparison, and the formatting of numerics when they meet a string.

use std::{cmp::Ordering, fmt};

use Value::*;
use anyhow::anyhow;

use crate::{
	error::interpreter::RuntimeError,
	parser::expression::{ArithmeticOp, ConditionalOp, VarType},
};

/// A dynamically tagged runtime value.
///
/// Booleans only ever exist as intermediate condition results; assignment
/// type checking keeps them out of the symbol table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
	Integer(i64),
	Real(f64),
	Str(String),
	Boolean(bool),
}

impl fmt::Display for Value {
	/// Integers format in base 10, reals with exactly six fractional digits,
	/// strings as their stored text.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Integer(n) => write!(f, "{n}"),
			Real(n) => write!(f, "{n:.6}"),
			Str(s) => f.write_str(s),
			Boolean(b) => write!(f, "{b}"),
		}
	}
}

impl Value {
	pub fn type_name(&self) -> &'static str {
		match self {
			Integer(_) => "integer",
			Real(_) => "real",
			Str(_) => "string",
			Boolean(_) => "boolean",
		}
	}

	/// Whether this value may be stored in a variable of the given declared
	/// type.
	pub fn matches(&self, ty: VarType) -> bool {
		matches!(
			(self, ty),
			(Integer(_), VarType::Integer) | (Real(_), VarType::Real) | (Str(_), VarType::String)
		)
	}

	/// The mixed-mode arithmetic table. Two integers stay integer (division
	/// truncates toward zero); an integer widens against a real; `.add.`
	/// doubles as concatenation when either side is a string, formatting
	/// reals with six fractional digits. Every other pairing fails.
	pub fn arithmetic(&self, op: ArithmeticOp, right: &Value) -> Result<Value, RuntimeError> {
		Ok(match (self, right) {
			(Integer(l), Integer(r)) => match op {
				ArithmeticOp::Add => Integer(l + r),
				ArithmeticOp::Sub => Integer(l - r),
				ArithmeticOp::Mul => Integer(l * r),
				ArithmeticOp::Div if *r == 0 => return Err(RuntimeError::DivisionByZero),
				ArithmeticOp::Div => Integer(l / r),
			},
			(Integer(l), Real(r)) => real_arithmetic(*l as f64, op, *r),
			(Real(l), Integer(r)) => real_arithmetic(*l, op, *r as f64),
			(Real(l), Real(r)) => real_arithmetic(*l, op, *r),
			(Integer(l), Str(r)) if op == ArithmeticOp::Add => Str(format!("{l}{r}")),
			(Real(l), Str(r)) if op == ArithmeticOp::Add => Str(format!("{l:.6}{r}")),
			(Str(l), Integer(r)) if op == ArithmeticOp::Add => Str(format!("{l}{r}")),
			(Str(l), Real(r)) if op == ArithmeticOp::Add => Str(format!("{l}{r:.6}")),
			(Str(l), Str(r)) if op == ArithmeticOp::Add => Str(format!("{l}{r}")),
			_ => {
				return Err(RuntimeError::InvalidOperands {
					op:    op.mnemonic(),
					left:  self.type_name(),
					right: right.type_name(),
				});
			}
		})
	}

	/// Relational comparison. An integer widens against a real; strings
	/// compare lexicographically; a number never compares against a string.
	pub fn compare(&self, op: ConditionalOp, right: &Value) -> Result<bool, RuntimeError> {
		let ordering = match (self, right) {
			(Integer(l), Integer(r)) => l.partial_cmp(r),
			(Integer(l), Real(r)) => (*l as f64).partial_cmp(r),
			(Real(l), Integer(r)) => l.partial_cmp(&(*r as f64)),
			(Real(l), Real(r)) => l.partial_cmp(r),
			(Str(l), Str(r)) => Some(l.cmp(r)),
			_ => {
				return Err(RuntimeError::InvalidComparison { left: self.type_name(), right: right.type_name() });
			}
		};
		Ok(match op {
			ConditionalOp::Lt => ordering == Some(Ordering::Less),
			ConditionalOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
			ConditionalOp::Gt => ordering == Some(Ordering::Greater),
			ConditionalOp::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
			ConditionalOp::Eq => ordering == Some(Ordering::Equal),
			ConditionalOp::Ne => ordering != Some(Ordering::Equal),
			ConditionalOp::And | ConditionalOp::Or | ConditionalOp::Not => {
				return Err(anyhow!("{} is not a relational operator", op.mnemonic()).into());
			}
		})
	}
}

fn real_arithmetic(left: f64, op: ArithmeticOp, right: f64) -> Value {
	Real(match op {
		ArithmeticOp::Add => left + right,
		ArithmeticOp::Sub => left - right,
		ArithmeticOp::Mul => left * right,
		ArithmeticOp::Div => left / right,
	})
}
