//! Interned name identifiers.
//!
//! A [`Symbol`] is the id the [`StringInterner`](crate::StringInterner)
//! hands out for a string. Identifiers, type names and keywords in the syntax
//! tree are stored as symbols so scope lookups compare `u32`s.
//!
//! ```
//! use pgsl_mem::Symbol;
//!
//! let a = Symbol::new(7);
//! assert_eq!(a, Symbol::new(7));
//! assert_eq!(a.as_usize(), 7);
//! ```

use std::fmt;

/// Id of an interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Creates a symbol from a raw id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Raw id as an index.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for Symbol {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_roundtrip_id() {
        let sym = Symbol::from(42);
        assert_eq!(sym.as_u32(), 42);
        assert_eq!(sym.as_usize(), 42);
    }

    #[test]
    fn test_symbol_ordering() {
        assert!(Symbol::new(1) < Symbol::new(2));
        assert_ne!(Symbol::new(1), Symbol::new(2));
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::new(3).to_string(), "#3");
    }
}
