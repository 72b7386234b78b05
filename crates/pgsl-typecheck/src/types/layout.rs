//! Memory layout of host-shareable types.
//!
//! Uniform and storage bindings are read by the host, so their layout
//! follows WGSL's alignment rules:
//!
//! | type            | alignment          | size                         |
//! |-----------------|--------------------|------------------------------|
//! | `i32 u32 f32`   | 4                  | 4                            |
//! | `f16`           | 2                  | 2                            |
//! | `vec2<T>`       | 2 * size(T)        | 2 * size(T)                  |
//! | `vec3<T>`       | 4 * size(T)        | 3 * size(T)                  |
//! | `vec4<T>`       | 4 * size(T)        | 4 * size(T)                  |
//! | `matCxR<T>`     | align(vecR)        | C * roundUp(align, vecR)     |
//! | `array<E, N>`   | align(E)           | N * roundUp(align(E), E)     |
//! | `struct`        | max member align   | roundUp(align, end of last)  |
//!
//! A runtime sized array has no fixed size; its element stride is reported
//! as the variable part of the layout instead.

use crate::trace::ValidationTrace;
use crate::types::{ArrayLength, ScalarType, TypeDefinition};

/// Alignment and size of a type in host-shareable memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Required byte alignment
    pub alignment: u32,
    /// Size of the fixed part in bytes
    pub fixed_size: u32,
    /// Per-element size of a trailing runtime sized array
    pub variable_size: Option<u32>,
}

impl MemoryLayout {
    const fn fixed(alignment: u32, size: u32) -> Self {
        Self {
            alignment,
            fixed_size: size,
            variable_size: None,
        }
    }

    /// Distance between consecutive elements of an array of this layout.
    #[must_use]
    pub const fn stride(&self) -> u32 {
        round_up(self.alignment, self.fixed_size)
    }
}

/// Rounds `value` up to a multiple of `alignment`.
#[must_use]
pub const fn round_up(alignment: u32, value: u32) -> u32 {
    if alignment == 0 {
        return value;
    }
    value.div_ceil(alignment) * alignment
}

fn vector_layout(dimension: u8, inner: ScalarType) -> Option<MemoryLayout> {
    let scalar = inner.byte_size()?;
    let dimension = u32::from(dimension);
    let alignment = if dimension == 2 { 2 * scalar } else { 4 * scalar };
    Some(MemoryLayout::fixed(alignment, dimension * scalar))
}

impl TypeDefinition {
    /// Layout of the type, or `None` when it is not host-shareable.
    #[must_use]
    pub fn memory_layout(&self, trace: &ValidationTrace) -> Option<MemoryLayout> {
        match self {
            TypeDefinition::Scalar(scalar) => {
                let size = scalar.byte_size()?;
                Some(MemoryLayout::fixed(size, size))
            }
            TypeDefinition::Vector { dimension, inner } => vector_layout(*dimension, *inner),
            TypeDefinition::Matrix { columns, rows, inner } => {
                let column = vector_layout(*rows, *inner)?;
                Some(MemoryLayout::fixed(
                    column.alignment,
                    u32::from(*columns) * column.stride(),
                ))
            }
            TypeDefinition::Array { inner, length } => {
                let element = inner.memory_layout(trace)?;
                if element.variable_size.is_some() {
                    return None;
                }
                match length {
                    ArrayLength::Fixed(count) => Some(MemoryLayout::fixed(
                        element.alignment,
                        count * element.stride(),
                    )),
                    ArrayLength::Variable => Some(MemoryLayout {
                        alignment: element.alignment,
                        fixed_size: 0,
                        variable_size: Some(element.stride()),
                    }),
                }
            }
            TypeDefinition::Struct(ty) => {
                let definition = trace.struct_definition(ty.declaration)?;
                let mut alignment = 0;
                let mut end = 0;
                let mut variable_size = None;

                for member in &definition.members {
                    let layout = member.ty.memory_layout(trace)?;
                    alignment = alignment.max(layout.alignment);
                    end = round_up(layout.alignment, end) + layout.fixed_size;
                    variable_size = layout.variable_size;
                }

                Some(MemoryLayout {
                    alignment,
                    fixed_size: round_up(alignment, end),
                    variable_size,
                })
            }
            _ => None,
        }
    }
}
