/// Flat registry of declared variable names for the single global frame.
///
/// Insertion order is preserved so the emitter declares (and prints)
/// variables in first-assignment order. Names are never removed.
#[derive(Debug, Default)]
pub struct SymbolTable {
    names: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` if absent. Redeclaration is a no-op, not an error.
    pub fn declare(&mut self, name: &str) {
        if !self.is_declared(name) {
            self.names.push(name.to_string());
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
