//! String interning.
//!
//! Identifiers and property names are interned once and handled as `Atom`
//! values afterwards, so name comparison in member maps and scope tables is a
//! `u32` comparison.

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Handle to an interned string.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty string. Always interned at index 0.
    pub const EMPTY: Atom = Atom(0);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only string table.
#[derive(Debug)]
pub struct Interner {
    map: FxHashMap<Arc<str>, Atom>,
    strings: Vec<Arc<str>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        let empty: Arc<str> = Arc::from("");
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), Atom::EMPTY);
        Interner {
            map,
            strings: vec![empty],
        }
    }

    /// Intern `text`, returning the existing atom when it was seen before.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.map.get(text) {
            return atom;
        }
        let arc: Arc<str> = Arc::from(text);
        let atom = Atom(self.strings.len() as u32);
        self.strings.push(arc.clone());
        self.map.insert(arc, atom);
        atom
    }

    /// Look up an atom without interning.
    pub fn get(&self, text: &str) -> Option<Atom> {
        self.map.get(text).copied()
    }

    /// Resolve an atom back to its text. Unknown atoms resolve to "".
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.strings
            .get(atom.index())
            .cloned()
            .unwrap_or_else(|| self.strings[0].clone())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        // The empty string is always present.
        self.strings.len() <= 1
    }
}

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod tests;
