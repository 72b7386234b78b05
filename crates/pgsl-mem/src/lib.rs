//! Memory and identity primitives for the PGSL front end.
//!
//! - [`Symbol`] and [`StringInterner`]: deduplicated names with `u32` ids
//! - [`Arena`] and [`Idx`]: append-only storage addressed by typed indices,
//!   used to own syntax tree nodes without reference counting

pub mod arena;
pub mod interner;
pub mod symbol;

pub use arena::{Arena, Idx};
pub use interner::StringInterner;
pub use symbol::Symbol;
