//! Tree-walking execution of a parsed program.
//!
//! The interpreter walks the statement sequence through an index cursor
//! rather than a plain iterator, because `goto` can move the cursor anywhere
//! a label was declared, backwards included. Labels are indexed once up
//! front; `end .` and `goto` travel out of nested statements as signal
//! variants of [`RuntimeError`], which the execution loop intercepts.
//!
//! All I/O goes through the injected reader and writer. The interpreter is
//! strictly single-threaded and synchronous; a blocking `read` simply blocks.

pub(crate) mod value;

use std::{
	collections::HashMap,
	io::{BufRead, Write},
};

use anyhow::anyhow;
use value::Value;

use crate::{
	error::interpreter::RuntimeError,
	parser::expression::{ConditionalOp, Expression, VarType, Variable},
	statement::Statement,
	symbols::SymbolTable,
};

pub(crate) struct Interpreter<R, W> {
	symbols: SymbolTable,
	input:   R,
	out:     W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
	pub fn new(input: R, out: W) -> Self { Self { symbols: SymbolTable::new(), input, out } }

	/// Run the program to completion. `end .` terminates successfully; any
	/// real runtime error aborts.
	pub fn execute(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
		let labels: HashMap<&str, usize> = statements
			.iter()
			.enumerate()
			.filter_map(|(index, statement)| match statement {
				Statement::Label(name) => Some((name.as_str(), index)),
				_ => None,
			})
			.collect();

		let mut cursor = 0;
		while let Some(statement) = statements.get(cursor) {
			match self.execute_statement(statement) {
				Ok(()) => cursor += 1,
				Err(RuntimeError::Halt) => return Ok(()),
				Err(RuntimeError::Jump(target)) => match labels.get(target.as_str()) {
					Some(&index) => cursor = index + 1,
					None => return Err(RuntimeError::UnknownLabel(target)),
				},
				Err(error) => return Err(error),
			}
		}
		Ok(())
	}

	fn execute_statement(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
		match statement {
			Statement::Rem | Statement::Label(_) => Ok(()),
			Statement::Assignment { target, value } => {
				let value = self.evaluate(value)?;
				if !value.matches(target.ty) {
					return Err(RuntimeError::AssignmentMismatch(target.ty.name()));
				}
				self.symbols.define(&target.name, value);
				Ok(())
			}
			Statement::Print(argument) => self.print(argument.as_ref()),
			Statement::Read(variable) => self.read(variable),
			Statement::If { condition, then_branch } => match self.evaluate(condition)? {
				Value::Boolean(true) => self.execute_statement(then_branch),
				Value::Boolean(false) => Ok(()),
				_ => Err(RuntimeError::InvalidCondition),
			},
			Statement::End => Err(RuntimeError::Halt),
			Statement::Goto(target) => Err(RuntimeError::Jump(target.clone())),
		}
	}

	fn evaluate(&self, expression: &Expression) -> Result<Value, RuntimeError> {
		match expression {
			Expression::Integer(text) => {
				text.parse().map(Value::Integer).map_err(|_| RuntimeError::InvalidNumber(text.clone()))
			}
			Expression::Real(text) => {
				text.parse().map(Value::Real).map_err(|_| RuntimeError::InvalidNumber(text.clone()))
			}
			Expression::String(text) => Ok(Value::Str(text.trim_matches('"').to_string())),
			Expression::Variable(variable) => self
				.symbols
				.get(&variable.name)
				.cloned()
				.ok_or_else(|| RuntimeError::UndefinedVariable(variable.name.clone())),
			Expression::Arithmetic { left, op, right } => {
				let left = self.evaluate(left)?;
				let right = self.evaluate(right)?;
				left.arithmetic(*op, &right)
			}
			Expression::Conditional { left, op, right } => self.evaluate_conditional(left.as_deref(), *op, right),
		}
	}

	/// Logical operators demand booleans on both sides and do not
	/// short-circuit; relational operators delegate to the value domain.
	fn evaluate_conditional(
		&self,
		left: Option<&Expression>,
		op: ConditionalOp,
		right: &Expression,
	) -> Result<Value, RuntimeError> {
		if op == ConditionalOp::Not {
			return match self.evaluate(right)? {
				Value::Boolean(operand) => Ok(Value::Boolean(!operand)),
				_ => Err(RuntimeError::NotBoolean),
			};
		}
		let left = left.ok_or_else(|| anyhow!("{} is missing its left operand", op.mnemonic()))?;
		let left = self.evaluate(left)?;
		let right = self.evaluate(right)?;
		match op {
			ConditionalOp::And | ConditionalOp::Or => match (left, right) {
				(Value::Boolean(l), Value::Boolean(r)) => {
					Ok(Value::Boolean(if op == ConditionalOp::And { l && r } else { l || r }))
				}
				_ => Err(RuntimeError::NotBoolean),
			},
			relational => left.compare(relational, &right).map(Value::Boolean),
		}
	}

	/// Without an argument, `print` emits a blank line. A variable formats by
	/// its declared type; numeric literals print their source lexeme
	/// verbatim; string literals lose their quotes.
	fn print(&mut self, argument: Option<&Expression>) -> Result<(), RuntimeError> {
		match argument {
			None => writeln!(self.out)?,
			Some(Expression::Variable(variable)) => {
				let value = self
					.symbols
					.get(&variable.name)
					.ok_or_else(|| RuntimeError::UnassignedVariable(variable.name.clone()))?;
				writeln!(self.out, "{value}")?;
			}
			Some(Expression::String(text)) => writeln!(self.out, "{}", text.trim_matches('"'))?,
			Some(Expression::Integer(text) | Expression::Real(text)) => writeln!(self.out, "{text}")?,
			Some(other) => return Err(anyhow!("print argument {other} is not a literal or variable").into()),
		}
		Ok(())
	}

	/// Reads one whitespace-delimited word and parses it per the target's
	/// declared type.
	fn read(&mut self, variable: &Variable) -> Result<(), RuntimeError> {
		let word = self.next_word()?;
		let mismatch = || RuntimeError::ReadMismatch { name: variable.name.clone(), ty: variable.ty.name() };
		let value = match variable.ty {
			VarType::Integer => word.parse().map(Value::Integer).map_err(|_| mismatch())?,
			VarType::Real => word.parse().map(Value::Real).map_err(|_| mismatch())?,
			VarType::String => Value::Str(word),
		};
		self.symbols.define(&variable.name, value);
		Ok(())
	}

	fn next_word(&mut self) -> Result<String, RuntimeError> {
		let mut word = String::new();
		loop {
			let (used, done) = {
				let available = self.input.fill_buf()?;
				if available.is_empty() {
					break;
				}
				let mut used = 0;
				let mut done = false;
				for &byte in available {
					if byte.is_ascii_whitespace() {
						if word.is_empty() {
							used += 1;
							continue;
						}
						done = true;
						break;
					}
					word.push(byte as char);
					used += 1;
				}
				(used, done)
			};
			self.input.consume(used);
			if done {
				break;
			}
		}
		if word.is_empty() {
			return Err(RuntimeError::EndOfInput);
		}
		Ok(word)
	}
}
