/// Errors raised while executing a program.
///
/// `Halt` and `Jump` are control-flow signals rather than failures: the
/// execution loop intercepts them before they can surface, the same way a
/// `break` or `return` would travel through a deeper call stack.
#[derive(thiserror::Error, Debug)]
pub enum RuntimeError {
	/// Internal fault; should never surface for a well-formed program tree.
	#[error("{0}")]
	Internal(#[from] anyhow::Error),
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// An expression referenced a variable before its first assignment.
	#[error("No variable named {0}")]
	UndefinedVariable(String),
	/// `print` referenced a variable before its first assignment.
	#[error("Unable to find variable {0}")]
	UnassignedVariable(String),
	/// The evaluated right-hand side does not match the target's declared type.
	#[error("invalid assignment to variable type {0}")]
	AssignmentMismatch(&'static str),
	/// An `if` condition evaluated to something other than a boolean.
	#[error("Invalid condition")]
	InvalidCondition,
	/// A logical operator was given a non-boolean operand.
	#[error("unable to convert expression to boolean")]
	NotBoolean,
	#[error("cannot apply {op} to {left} and {right}")]
	InvalidOperands { op: &'static str, left: &'static str, right: &'static str },
	#[error("cannot compare {left} and {right}")]
	InvalidComparison { left: &'static str, right: &'static str },
	#[error("division by zero")]
	DivisionByZero,
	/// A literal the scanner accepted but the host numeric parser rejects,
	/// e.g. a real with a fractional exponent.
	#[error("invalid number literal '{0}'")]
	InvalidNumber(String),
	#[error("no label named {0}")]
	UnknownLabel(String),
	/// `read` hit end of input before finding a word.
	#[error("unexpected end of input")]
	EndOfInput,
	/// `read` found a word that does not parse as the target's declared type.
	#[error("unable to read a {ty} value for variable {name}")]
	ReadMismatch { name: String, ty: &'static str },
	/// Raised by `end .`; mapped to a clean exit by the execution loop.
	#[error("end of program")]
	Halt,
	/// Raised by `goto`; resolved to a statement index by the execution loop.
	#[error("jump to label {0}")]
	Jump(String),
}
