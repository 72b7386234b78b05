//! String interning with id based references.
//!
//! The interner keeps two views of the same data:
//! - `strings`: symbol id to string, for resolving names in diagnostics and
//!   emitted code
//! - `symbols`: string to symbol id, for interning
//!
//! PGSL keywords and the builtin type names are interned first, in a fixed
//! order, so their ids are identical across interners and sessions.
//!
//! ```
//! use pgsl_mem::StringInterner;
//!
//! let mut interner = StringInterner::new();
//! let a = interner.intern("albedo");
//! let b = interner.intern("albedo");
//! assert_eq!(a, b);
//! assert_eq!(interner.resolve(a), Some("albedo"));
//! assert!(interner.is_keyword(interner.get("while").unwrap()));
//! ```

use crate::symbol::Symbol;

#[cfg(feature = "symbols")]
use hashbrown::HashMap;

#[cfg(not(feature = "symbols"))]
use std::collections::HashMap;

/// Reserved words of the language, interned with ids `0..KEYWORDS.len()`.
pub const KEYWORDS: &[&str] = &[
    "const", "let", "private", "workgroup", "uniform", "storage", "handle",
    "function", "struct", "return", "if", "else", "while", "do", "for",
    "break", "continue", "discard", "true", "false",
];

/// Builtin type names, interned directly after the keywords.
pub const BUILTIN_TYPES: &[&str] = &[
    "Boolean", "Integer", "UnsignedInteger", "Float", "Float16",
    "Vector2", "Vector3", "Vector4",
    "Matrix2x2", "Matrix2x3", "Matrix2x4",
    "Matrix3x2", "Matrix3x3", "Matrix3x4",
    "Matrix4x2", "Matrix4x3", "Matrix4x4",
    "Array", "Pointer", "Sampler", "SamplerComparison",
    "Texture1d", "Texture2d", "Texture3d", "TextureCube", "Void",
];

/// Bidirectional string/symbol table.
#[derive(Debug, Clone)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    symbols: HashMap<Box<str>, Symbol>,
}

impl StringInterner {
    /// Creates an interner holding the keywords and builtin type names.
    #[must_use]
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(KEYWORDS.len() + BUILTIN_TYPES.len()),
            symbols: HashMap::new(),
        };

        for name in KEYWORDS.iter().chain(BUILTIN_TYPES) {
            interner.intern(name);
        }

        interner
    }

    /// Interns `s`, returning the existing symbol when it was seen before.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.symbols.get(s) {
            return sym;
        }

        let sym = Symbol::new(self.strings.len() as u32);
        self.strings.push(s.into());
        self.symbols.insert(s.into(), sym);
        sym
    }

    /// Looks up `s` without interning it.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.symbols.get(s).copied()
    }

    /// Resolves a symbol back to its string.
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.as_usize()).map(AsRef::as_ref)
    }

    /// Number of interned strings, keywords included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always false; the reserved words are present from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Whether `sym` is one of [`KEYWORDS`].
    #[must_use]
    pub fn is_keyword(&self, sym: Symbol) -> bool {
        sym.as_usize() < KEYWORDS.len()
    }

    /// Whether `sym` is one of [`BUILTIN_TYPES`].
    #[must_use]
    pub fn is_builtin_type(&self, sym: Symbol) -> bool {
        let id = sym.as_usize();
        id >= KEYWORDS.len() && id < KEYWORDS.len() + BUILTIN_TYPES.len()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
