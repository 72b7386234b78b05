//! Resolved types of the PGSL type system.
//!
//! [`TypeDefinition`] is what every expression, annotation and declaration
//! resolves into during validation. It is distinct from the syntax tree's
//! type declaration nodes, which only name a type and its template arguments.
//!
//! # Relations
//!
//! Three relations drive validation:
//!
//! - [`TypeDefinition::equals`]: structural equality, nominal for structs
//! - [`TypeDefinition::is_implicit_castable_into`]: assignment compatibility
//! - [`TypeDefinition::is_explicit_castable_into`]: conversion compatibility
//!
//! Every implicit cast is also a valid explicit cast. `Void` takes part in
//! neither cast relation, not even onto itself.

use crate::trace::ValidationTrace;
use pgsl_mem::Symbol;
use pgsl_syntax::NodeId;

/// Scalar component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `Boolean` / `bool`
    Boolean,
    /// `Integer` / `i32`
    Integer,
    /// `UnsignedInteger` / `u32`
    UnsignedInteger,
    /// `Float` / `f32`
    Float,
    /// `Float16` / `f16`, gated behind the f16 extension
    Float16,
}

impl ScalarType {
    /// Whether the scalar takes part in arithmetic.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, ScalarType::Boolean)
    }

    /// `Integer` or `UnsignedInteger`.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, ScalarType::Integer | ScalarType::UnsignedInteger)
    }

    /// `Float` or `Float16`.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, ScalarType::Float | ScalarType::Float16)
    }

    /// Whether the scalar can be negated.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, ScalarType::Integer | ScalarType::Float | ScalarType::Float16)
    }

    /// Size in bytes inside host-shareable memory, `None` for booleans.
    #[must_use]
    pub const fn byte_size(self) -> Option<u32> {
        match self {
            ScalarType::Boolean => None,
            ScalarType::Float16 => Some(2),
            ScalarType::Integer | ScalarType::UnsignedInteger | ScalarType::Float => Some(4),
        }
    }
}

/// Element count of an array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayLength {
    /// `Array<T, N>`
    Fixed(u32),
    /// `Array<T>`, sized at runtime by the bound buffer
    Variable,
}

/// Dimensionality of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureDimension {
    /// `Texture1d`
    D1,
    /// `Texture2d`
    D2,
    /// `Texture3d`
    D3,
    /// `TextureCube`
    Cube,
}

/// A user declared struct, identified by its declaration node.
///
/// Two struct types are equal only when they come from the same declaration.
/// Property types live in the trace's struct registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructType {
    /// Declared name
    pub name: Symbol,
    /// The struct declaration node
    pub declaration: NodeId,
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDefinition {
    /// No value. The result of functions declared `-> Void`.
    Void,

    /// Stands in for a type or expression that failed to resolve. A
    /// diagnostic was pushed when it was produced; checks on values of this
    /// type are skipped.
    Unresolved,

    /// A scalar.
    Scalar(ScalarType),

    /// `VectorN<T>` with `N` in `2..=4`.
    Vector {
        /// Component count
        dimension: u8,
        /// Component type
        inner: ScalarType,
    },

    /// `MatrixCxR<T>` with float components.
    Matrix {
        /// Column count
        columns: u8,
        /// Row count
        rows: u8,
        /// Component type
        inner: ScalarType,
    },

    /// `Array<T>` or `Array<T, N>`.
    Array {
        /// Element type
        inner: Box<TypeDefinition>,
        /// Element count
        length: ArrayLength,
    },

    /// A declared struct.
    Struct(StructType),

    /// `Pointer<T>`.
    Pointer(Box<TypeDefinition>),

    /// A memory view produced by naming a storage binding. Loads implicitly
    /// into its inner type.
    Reference(Box<TypeDefinition>),

    /// `Texture1d<T>` and friends.
    Texture {
        /// Dimensionality
        dimension: TextureDimension,
        /// Sampled component type
        sampled: ScalarType,
    },

    /// `Sampler` or `SamplerComparison`.
    Sampler {
        /// Whether this is a comparison sampler
        comparison: bool,
    },
}

impl TypeDefinition {
    /// `Boolean`.
    pub const BOOLEAN: TypeDefinition = TypeDefinition::Scalar(ScalarType::Boolean);
    /// `Integer`.
    pub const INTEGER: TypeDefinition = TypeDefinition::Scalar(ScalarType::Integer);
    /// `UnsignedInteger`.
    pub const UNSIGNED_INTEGER: TypeDefinition = TypeDefinition::Scalar(ScalarType::UnsignedInteger);
    /// `Float`.
    pub const FLOAT: TypeDefinition = TypeDefinition::Scalar(ScalarType::Float);

    /// Whether this is `Void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, TypeDefinition::Void)
    }

    /// Whether this is the marker of a failed resolution.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, TypeDefinition::Unresolved)
    }

    /// Whether this is the scalar `Boolean`.
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeDefinition::Scalar(ScalarType::Boolean))
    }

    /// The scalar, or the component scalar of a vector or matrix.
    #[must_use]
    pub fn component(&self) -> Option<ScalarType> {
        match self {
            TypeDefinition::Scalar(scalar) => Some(*scalar),
            TypeDefinition::Vector { inner, .. } | TypeDefinition::Matrix { inner, .. } => {
                Some(*inner)
            }
            _ => None,
        }
    }

    /// The type a value of this type loads into.
    #[must_use]
    pub fn loaded(&self) -> &TypeDefinition {
        match self {
            TypeDefinition::Reference(inner) => inner.loaded(),
            other => other,
        }
    }

    /// Structural equality. Structs compare by declaration.
    #[must_use]
    pub fn equals(&self, trace: &ValidationTrace, other: &TypeDefinition) -> bool {
        match (self, other) {
            (TypeDefinition::Array { inner: a, length: la }, TypeDefinition::Array { inner: b, length: lb }) => {
                la == lb && a.equals(trace, b)
            }
            (TypeDefinition::Pointer(a), TypeDefinition::Pointer(b))
            | (TypeDefinition::Reference(a), TypeDefinition::Reference(b)) => a.equals(trace, b),
            (TypeDefinition::Struct(a), TypeDefinition::Struct(b)) => {
                a.declaration == b.declaration
            }
            (a, b) => a == b,
        }
    }

    /// Whether a value of this type can be used where `target` is expected
    /// without a conversion.
    #[must_use]
    pub fn is_implicit_castable_into(&self, trace: &ValidationTrace, target: &TypeDefinition) -> bool {
        if !self.is_concrete() || !target.is_concrete() {
            return false;
        }
        if self.equals(trace, target) {
            return true;
        }

        match self {
            TypeDefinition::Reference(inner) => inner.is_implicit_castable_into(trace, target),
            _ => false,
        }
    }

    /// Whether `Target(value)` is a valid conversion of a value of this type.
    #[must_use]
    pub fn is_explicit_castable_into(&self, trace: &ValidationTrace, target: &TypeDefinition) -> bool {
        if !self.is_concrete() || !target.is_concrete() {
            return false;
        }
        if self.is_implicit_castable_into(trace, target) {
            return true;
        }
        if !target.is_constructible(trace) {
            return false;
        }

        match (self.loaded(), target) {
            (TypeDefinition::Scalar(_), TypeDefinition::Scalar(_)) => true,
            (
                TypeDefinition::Vector { dimension: a, .. },
                TypeDefinition::Vector { dimension: b, .. },
            ) => a == b,
            (
                TypeDefinition::Matrix { columns: ca, rows: ra, .. },
                TypeDefinition::Matrix { columns: cb, rows: rb, .. },
            ) => ca == cb && ra == rb,
            _ => false,
        }
    }

    /// Scalar types only.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeDefinition::Scalar(_))
    }

    /// Vectors, matrices, arrays and structs.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            TypeDefinition::Vector { .. }
                | TypeDefinition::Matrix { .. }
                | TypeDefinition::Array { .. }
                | TypeDefinition::Struct(_)
        )
    }

    /// Whether the `value[index]` form applies.
    #[must_use]
    pub fn is_indexable(&self) -> bool {
        matches!(
            self.loaded(),
            TypeDefinition::Vector { .. } | TypeDefinition::Matrix { .. } | TypeDefinition::Array { .. }
        )
    }

    /// Scalars and composites: the types that live in plain memory.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.is_scalar() || self.is_composite()
    }

    /// Every type that describes actual values: neither `Void` nor
    /// unresolved, also for nested types.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        match self {
            TypeDefinition::Void | TypeDefinition::Unresolved => false,
            TypeDefinition::Array { inner, .. }
            | TypeDefinition::Pointer(inner)
            | TypeDefinition::Reference(inner) => inner.is_concrete(),
            _ => true,
        }
    }

    /// Whether a variable can hold a value of this type.
    #[must_use]
    pub fn is_storable(&self, trace: &ValidationTrace) -> bool {
        match self {
            TypeDefinition::Texture { .. } | TypeDefinition::Sampler { .. } => true,
            TypeDefinition::Array { inner, .. } => inner.is_storable(trace),
            TypeDefinition::Struct(ty) => trace
                .struct_definition(ty.declaration)
                .is_some_and(|def| def.members.iter().all(|member| member.ty.is_storable(trace))),
            other => other.is_plain(),
        }
    }

    /// Whether values of this type can be shared with the host, which
    /// uniform and storage bindings require.
    #[must_use]
    pub fn is_host_shareable(&self, trace: &ValidationTrace) -> bool {
        match self {
            TypeDefinition::Scalar(scalar)
            | TypeDefinition::Vector { inner: scalar, .. }
            | TypeDefinition::Matrix { inner: scalar, .. } => scalar.is_numeric(),
            TypeDefinition::Array { inner, .. } => inner.is_host_shareable(trace),
            TypeDefinition::Struct(ty) => trace
                .struct_definition(ty.declaration)
                .is_some_and(|def| def.members.iter().all(|member| member.ty.is_host_shareable(trace))),
            _ => false,
        }
    }

    /// Whether the type's size is known at shader creation time.
    #[must_use]
    pub fn is_fixed_footprint(&self, trace: &ValidationTrace) -> bool {
        match self {
            TypeDefinition::Scalar(_)
            | TypeDefinition::Vector { .. }
            | TypeDefinition::Matrix { .. } => true,
            TypeDefinition::Array {
                inner,
                length: ArrayLength::Fixed(_),
            } => inner.is_fixed_footprint(trace),
            TypeDefinition::Struct(ty) => trace
                .struct_definition(ty.declaration)
                .is_some_and(|def| def.members.iter().all(|member| member.ty.is_fixed_footprint(trace))),
            _ => false,
        }
    }

    /// Whether a value can be built with `Type(...)`.
    #[must_use]
    pub fn is_constructible(&self, trace: &ValidationTrace) -> bool {
        match self {
            TypeDefinition::Scalar(_)
            | TypeDefinition::Vector { .. }
            | TypeDefinition::Matrix { .. } => true,
            TypeDefinition::Array {
                inner,
                length: ArrayLength::Fixed(_),
            } => inner.is_constructible(trace),
            TypeDefinition::Struct(ty) => trace
                .struct_definition(ty.declaration)
                .is_some_and(|def| def.members.iter().all(|member| member.ty.is_constructible(trace))),
            _ => false,
        }
    }

    /// Textures and samplers, which only bind to `handle` declarations.
    #[must_use]
    pub fn is_handle(&self) -> bool {
        matches!(self, TypeDefinition::Texture { .. } | TypeDefinition::Sampler { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec3(inner: ScalarType) -> TypeDefinition {
        TypeDefinition::Vector { dimension: 3, inner }
    }

    #[test]
    fn test_equality() {
        let trace = ValidationTrace::default();
        assert!(TypeDefinition::FLOAT.equals(&trace, &TypeDefinition::FLOAT));
        assert!(!TypeDefinition::FLOAT.equals(&trace, &TypeDefinition::INTEGER));
        assert!(vec3(ScalarType::Float).equals(&trace, &vec3(ScalarType::Float)));
        assert!(!vec3(ScalarType::Float).equals(&trace, &vec3(ScalarType::Integer)));
        assert!(TypeDefinition::Void.equals(&trace, &TypeDefinition::Void));
    }

    #[test]
    fn test_struct_equality_is_nominal() {
        let trace = ValidationTrace::default();
        let name = Symbol::new(100);
        let a = TypeDefinition::Struct(StructType { name, declaration: NodeId::from_raw(1) });
        let b = TypeDefinition::Struct(StructType { name, declaration: NodeId::from_raw(2) });
        assert!(a.equals(&trace, &a.clone()));
        assert!(!a.equals(&trace, &b));
    }

    #[test]
    fn test_void_casts_nowhere() {
        let trace = ValidationTrace::default();
        let void = TypeDefinition::Void;
        assert!(!void.is_implicit_castable_into(&trace, &void));
        assert!(!void.is_explicit_castable_into(&trace, &void));
        assert!(!void.is_explicit_castable_into(&trace, &TypeDefinition::FLOAT));
        assert!(!TypeDefinition::FLOAT.is_implicit_castable_into(&trace, &void));
    }

    #[test]
    fn test_unresolved_is_not_void() {
        let trace = ValidationTrace::default();
        let unresolved = TypeDefinition::Unresolved;
        assert!(unresolved.is_unresolved());
        assert!(!unresolved.is_void());
        assert!(!TypeDefinition::Void.is_unresolved());
        assert!(!unresolved.is_concrete());
        assert!(!unresolved.equals(&trace, &TypeDefinition::Void));
        assert!(!unresolved.is_implicit_castable_into(&trace, &TypeDefinition::FLOAT));
        assert!(!TypeDefinition::FLOAT.is_explicit_castable_into(&trace, &unresolved));
    }

    #[test]
    fn test_reference_loads_implicitly() {
        let trace = ValidationTrace::default();
        let reference = TypeDefinition::Reference(Box::new(TypeDefinition::FLOAT));
        assert!(reference.is_implicit_castable_into(&trace, &TypeDefinition::FLOAT));
        assert!(!TypeDefinition::FLOAT.is_implicit_castable_into(&trace, &reference));
    }

    #[test]
    fn test_explicit_scalar_and_vector_conversions() {
        let trace = ValidationTrace::default();
        assert!(TypeDefinition::INTEGER.is_explicit_castable_into(&trace, &TypeDefinition::FLOAT));
        assert!(TypeDefinition::BOOLEAN.is_explicit_castable_into(&trace, &TypeDefinition::UNSIGNED_INTEGER));
        assert!(!TypeDefinition::INTEGER.is_implicit_castable_into(&trace, &TypeDefinition::FLOAT));

        assert!(vec3(ScalarType::Integer).is_explicit_castable_into(&trace, &vec3(ScalarType::Float)));
        let vec2 = TypeDefinition::Vector { dimension: 2, inner: ScalarType::Float };
        assert!(!vec3(ScalarType::Float).is_explicit_castable_into(&trace, &vec2));
        assert!(!TypeDefinition::FLOAT.is_explicit_castable_into(&trace, &vec2));
    }

    #[test]
    fn test_explicit_includes_implicit() {
        let trace = ValidationTrace::default();
        let samples = [
            TypeDefinition::FLOAT,
            TypeDefinition::BOOLEAN,
            vec3(ScalarType::UnsignedInteger),
            TypeDefinition::Sampler { comparison: false },
            TypeDefinition::Array {
                inner: Box::new(TypeDefinition::FLOAT),
                length: ArrayLength::Variable,
            },
            TypeDefinition::Reference(Box::new(TypeDefinition::INTEGER)),
        ];
        for from in &samples {
            for to in &samples {
                if from.is_implicit_castable_into(&trace, to) {
                    assert!(from.is_explicit_castable_into(&trace, to), "{from:?} -> {to:?}");
                }
            }
        }
    }

    #[test]
    fn test_capability_flags() {
        let trace = ValidationTrace::default();
        let runtime_array = TypeDefinition::Array {
            inner: Box::new(TypeDefinition::FLOAT),
            length: ArrayLength::Variable,
        };
        let sampler = TypeDefinition::Sampler { comparison: true };

        assert!(TypeDefinition::BOOLEAN.is_storable(&trace));
        assert!(!TypeDefinition::BOOLEAN.is_host_shareable(&trace));
        assert!(runtime_array.is_host_shareable(&trace));
        assert!(!runtime_array.is_fixed_footprint(&trace));
        assert!(!runtime_array.is_constructible(&trace));
        assert!(runtime_array.is_indexable());
        assert!(sampler.is_storable(&trace));
        assert!(!sampler.is_plain());
        assert!(sampler.is_handle());
        assert!(!TypeDefinition::Void.is_concrete());
        assert!(vec3(ScalarType::Float).is_composite());
        assert!(!TypeDefinition::FLOAT.is_composite());
    }
}
