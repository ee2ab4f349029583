use std::collections::HashMap;

use crate::interpreter::value::Value;

/// A flat mapping from lowercased variable name to current value.
///
/// Created empty, mutated only by assignment and `read`, discarded when the
/// program terminates. A variable has no value at all until its first store.
pub(crate) struct SymbolTable {
	values: HashMap<String, Value>,
}

impl SymbolTable {
	pub fn new() -> Self { Self { values: HashMap::new() } }

	/// Stores both first definitions and redefinitions.
	pub fn define(&mut self, name: &str, value: Value) { self.values.insert(name.to_string(), value); }

	pub fn get(&self, name: &str) -> Option<&Value> { self.values.get(name) }
}
