//! Interned identifiers.
//!
//! Names compare as `u32`s. The interner is owned by a `Module` and is
//! single-threaded: one engine processes one module at a time.

use rustc_hash::FxHashMap;
use std::fmt;

/// Interned identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, pre-interned at index 0. Used for anonymous
    /// functions and nameless declarations.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// String interner mapping text to dense `Name` indices.
#[derive(Clone, Debug)]
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut interner = StringInterner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        interner.intern("");
        interner
    }

    /// Intern `text`, returning the existing name if already present.
    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.map.get(text) {
            return name;
        }
        let name = Name(crate::to_u32(self.strings.len()));
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.map.insert(boxed, name);
        name
    }

    /// Look up a name without interning it.
    pub fn get(&self, text: &str) -> Option<Name> {
        self.map.get(text).copied()
    }

    /// The text of `name`, or `""` for names from another interner.
    pub fn lookup(&self, name: Name) -> &str {
        self.strings.get(name.index()).map_or("", |text| text)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Drop every name except the pre-interned empty string.
    pub fn clear(&mut self) {
        self.map.clear();
        self.strings.clear();
        self.intern("");
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedups() {
        let mut interner = StringInterner::new();
        let a = interner.intern("main");
        let b = interner.intern("main");
        let c = interner.intern("log");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.lookup(c), "log");
    }

    #[test]
    fn test_empty_is_preinterned() {
        let mut interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert!(Name::EMPTY.is_empty());
    }

    #[test]
    fn test_clear_keeps_empty() {
        let mut interner = StringInterner::new();
        interner.intern("x");
        interner.clear();
        assert_eq!(interner.len(), 1);
        assert_eq!(interner.get("x"), None);
        assert_eq!(interner.get(""), Some(Name::EMPTY));
    }
}
