//! Type system core: resolved types, their relations and memory layout.
//!
//! - [`ty`] - [`TypeDefinition`] and its capability flags and cast relations
//! - [`layout`] - WGSL alignment and size of host-shareable types
//! - [`display`] - PGSL and WGSL spellings of types

pub mod display;
pub mod layout;
pub mod ty;

pub use display::{TypeDisplay, TypeNaming};
pub use layout::MemoryLayout;
pub use ty::{ArrayLength, ScalarType, StructType, TextureDimension, TypeDefinition};
