//! Maps symbolic names to RAM or ROM addresses.
use std::collections::HashMap;

/// A 15-bit Hack memory address. Stored in 16 bits; range is checked at encode time.
pub type Address = u16;

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: Address = 16;

/// Names present in every table before assembly begins.
pub const RESERVED: [(&str, Address); 23] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", 0x4000),
    ("KBD", 0x6000),
];

#[derive(Clone, Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, Address>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table seeded with the reserved symbols.
    pub fn new() -> Self {
        let symbols = RESERVED.iter()
            .map(|(name, addr)| ((*name).to_owned(), *addr))
            .collect();
        SymbolTable { symbols }
    }

    /// Binds `name` to `addr`, replacing any previous binding.
    pub fn insert<S: Into<String>>(&mut self, name: S, addr: Address) {
        self.symbols.insert(name.into(), addr);
    }

    /// Removes `name` and returns the address it was bound to.
    pub fn remove(&mut self, name: &str) -> Option<Address> {
        self.symbols.remove(name)
    }

    /// Removes every symbol bound to `addr`, returning how many were removed.
    pub fn remove_address(&mut self, addr: Address) -> usize {
        let before = self.symbols.len();
        self.symbols.retain(|_, a| *a != addr);
        before - self.symbols.len()
    }

    pub fn get(&self, name: &str) -> Option<Address> {
        self.symbols.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn is_reserved(name: &str) -> bool {
        RESERVED.iter().any(|(n, _)| *n == name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All entries ordered by address, then by name.
    pub fn sorted(&self) -> Vec<(&str, Address)> {
        let mut entries: Vec<(&str, Address)> = self.symbols.iter()
            .map(|(name, addr)| (name.as_str(), *addr))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
