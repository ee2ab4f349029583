//! An interpreter for LAO, a small line-oriented teaching language in the
//! spirit of early FORTRAN and BASIC.
//!
//! A program is a sequence of statements built from dotted operator
//! mnemonics (`.add.`, `.lt.`, `.and.`) and implicitly typed variables: the
//! first letter of a name decides whether it holds an integer (`a`-`f`), a
//! real (`g`-`n`), or a string (`o`-`z`).
//!
//! ```text
//! rem compute and print a sum
//! a = 2 .add. 3
//! if a .gt. 4 then print a
//! end .
//! ```
//!
//! Source text flows strictly forward through three stages. The scanner is a
//! cursor over the raw bytes that yields typed tokens carrying their source
//! coordinates. The parser pulls tokens one at a time and climbs operator
//! precedence to build statement nodes. The interpreter walks the statements
//! against a flat symbol table, enforcing assignment-time type
//! compatibility, reading from an injected input source and printing to an
//! injected output sink. The one wrinkle in the forward flow is `goto`,
//! which turns the interpreter's iteration into an index cursor over the
//! statement list.

pub mod cli;
mod error;
mod interpreter;
mod lao;
mod parser;
mod scanner;
mod statement;
mod symbols;

pub use error::{
	LaoError,
	interpreter::RuntimeError,
	parser::{ParseError, ParserError},
	scanner::{ScanError, ScanErrorKind},
};
pub use lao::Lao;
