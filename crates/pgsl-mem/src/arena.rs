//! Append-only arena addressed by typed indices.
//!
//! Values are never removed, so an [`Idx`] handed out by an arena stays valid
//! for the arena's lifetime. Indices are plain `u32`s tagged with the element
//! type; comparing two indices compares identity, not contents.
//!
//! ```
//! use pgsl_mem::Arena;
//!
//! let mut arena = Arena::new();
//! let a = arena.alloc("first");
//! let b = arena.alloc("first");
//! assert_ne!(a, b);
//! assert_eq!(arena[a], arena[b]);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Typed index into an [`Arena<T>`].
pub struct Idx<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Idx<T> {
    /// Creates an index from its raw value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Raw value of the index.
    #[must_use]
    pub const fn into_raw(self) -> u32 {
        self.raw
    }

    const fn as_usize(self) -> usize {
        self.raw as usize
    }
}

// Manual impls: derives would require `T: Clone` and friends.
impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Idx<T> {}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for Idx<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.raw)
    }
}

impl<T> fmt::Display for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Append-only storage owning its elements.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    data: Vec<T>,
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty arena with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Moves `value` into the arena and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` elements.
    pub fn alloc(&mut self, value: T) -> Idx<T> {
        let raw = u32::try_from(self.data.len()).expect("arena index overflow");
        self.data.push(value);
        Idx::from_raw(raw)
    }

    /// Returns the element at `idx`, if it belongs to this arena.
    #[must_use]
    pub fn get(&self, idx: Idx<T>) -> Option<&T> {
        self.data.get(idx.as_usize())
    }

    /// Mutable variant of [`Arena::get`].
    pub fn get_mut(&mut self, idx: Idx<T>) -> Option<&mut T> {
        self.data.get_mut(idx.as_usize())
    }

    /// Number of allocated elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing was allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over all elements with their indices, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Idx<T>, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, value)| (Idx::from_raw(i as u32), value))
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Idx<T>> for Arena<T> {
    type Output = T;

    fn index(&self, idx: Idx<T>) -> &T {
        &self.data[idx.as_usize()]
    }
}

impl<T> IndexMut<Idx<T>> for Arena<T> {
    fn index_mut(&mut self, idx: Idx<T>) -> &mut T {
        &mut self.data[idx.as_usize()]
    }
}
