//! Type spelling.
//!
//! Types are printed in two dialects: PGSL names (`Vector3<Float>`) for
//! diagnostics and WGSL names (`vec3<f32>`) for emitted code. Struct names
//! are symbols, so both need the interner.

use crate::types::{ArrayLength, ScalarType, TextureDimension, TypeDefinition};
use pgsl_mem::StringInterner;
use std::fmt;

/// Which language a type is spelled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNaming {
    /// Source names, used in diagnostics
    Pgsl,
    /// Target names, used by the code generator
    Wgsl,
}

/// Display wrapper resolving struct names through an interner.
pub struct TypeDisplay<'a> {
    ty: &'a TypeDefinition,
    interner: &'a StringInterner,
    naming: TypeNaming,
}

impl TypeDefinition {
    /// Displays the type with its PGSL name.
    #[must_use]
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> TypeDisplay<'a> {
        TypeDisplay {
            ty: self,
            interner,
            naming: TypeNaming::Pgsl,
        }
    }

    /// Displays the type with its WGSL name.
    #[must_use]
    pub fn wgsl<'a>(&'a self, interner: &'a StringInterner) -> TypeDisplay<'a> {
        TypeDisplay {
            ty: self,
            interner,
            naming: TypeNaming::Wgsl,
        }
    }
}

impl ScalarType {
    /// PGSL type name.
    #[must_use]
    pub const fn pgsl_name(self) -> &'static str {
        match self {
            ScalarType::Boolean => "Boolean",
            ScalarType::Integer => "Integer",
            ScalarType::UnsignedInteger => "UnsignedInteger",
            ScalarType::Float => "Float",
            ScalarType::Float16 => "Float16",
        }
    }

    /// WGSL type name.
    #[must_use]
    pub const fn wgsl_name(self) -> &'static str {
        match self {
            ScalarType::Boolean => "bool",
            ScalarType::Integer => "i32",
            ScalarType::UnsignedInteger => "u32",
            ScalarType::Float => "f32",
            ScalarType::Float16 => "f16",
        }
    }

    fn name(self, naming: TypeNaming) -> &'static str {
        match naming {
            TypeNaming::Pgsl => self.pgsl_name(),
            TypeNaming::Wgsl => self.wgsl_name(),
        }
    }
}

impl TextureDimension {
    fn name(self, naming: TypeNaming) -> &'static str {
        match (naming, self) {
            (TypeNaming::Pgsl, TextureDimension::D1) => "Texture1d",
            (TypeNaming::Pgsl, TextureDimension::D2) => "Texture2d",
            (TypeNaming::Pgsl, TextureDimension::D3) => "Texture3d",
            (TypeNaming::Pgsl, TextureDimension::Cube) => "TextureCube",
            (TypeNaming::Wgsl, TextureDimension::D1) => "texture_1d",
            (TypeNaming::Wgsl, TextureDimension::D2) => "texture_2d",
            (TypeNaming::Wgsl, TextureDimension::D3) => "texture_3d",
            (TypeNaming::Wgsl, TextureDimension::Cube) => "texture_cube",
        }
    }
}

impl TypeDisplay<'_> {
    fn format_type(&self, ty: &TypeDefinition, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let naming = self.naming;
        match ty {
            TypeDefinition::Void => match naming {
                TypeNaming::Pgsl => write!(f, "Void"),
                TypeNaming::Wgsl => Ok(()),
            },
            TypeDefinition::Unresolved => match naming {
                TypeNaming::Pgsl => write!(f, "<unresolved>"),
                TypeNaming::Wgsl => Ok(()),
            },
            TypeDefinition::Scalar(scalar) => write!(f, "{}", scalar.name(naming)),
            TypeDefinition::Vector { dimension, inner } => match naming {
                TypeNaming::Pgsl => write!(f, "Vector{dimension}<{}>", inner.pgsl_name()),
                TypeNaming::Wgsl => write!(f, "vec{dimension}<{}>", inner.wgsl_name()),
            },
            TypeDefinition::Matrix { columns, rows, inner } => match naming {
                TypeNaming::Pgsl => write!(f, "Matrix{columns}x{rows}<{}>", inner.pgsl_name()),
                TypeNaming::Wgsl => write!(f, "mat{columns}x{rows}<{}>", inner.wgsl_name()),
            },
            TypeDefinition::Array { inner, length } => {
                let keyword = match naming {
                    TypeNaming::Pgsl => "Array",
                    TypeNaming::Wgsl => "array",
                };
                write!(f, "{keyword}<")?;
                self.format_type(inner, f)?;
                if let ArrayLength::Fixed(count) = length {
                    write!(f, ", {count}")?;
                }
                write!(f, ">")
            }
            TypeDefinition::Struct(ty) => {
                write!(f, "{}", self.interner.resolve(ty.name).unwrap_or("<struct>"))
            }
            TypeDefinition::Pointer(inner) => {
                match naming {
                    TypeNaming::Pgsl => write!(f, "Pointer<")?,
                    TypeNaming::Wgsl => write!(f, "ptr<function, ")?,
                }
                self.format_type(inner, f)?;
                write!(f, ">")
            }
            TypeDefinition::Reference(inner) => match naming {
                TypeNaming::Pgsl => {
                    write!(f, "Reference<")?;
                    self.format_type(inner, f)?;
                    write!(f, ">")
                }
                TypeNaming::Wgsl => self.format_type(inner, f),
            },
            TypeDefinition::Texture { dimension, sampled } => {
                write!(f, "{}<{}>", dimension.name(naming), sampled.name(naming))
            }
            TypeDefinition::Sampler { comparison } => match (naming, comparison) {
                (TypeNaming::Pgsl, false) => write!(f, "Sampler"),
                (TypeNaming::Pgsl, true) => write!(f, "SamplerComparison"),
                (TypeNaming::Wgsl, false) => write!(f, "sampler"),
                (TypeNaming::Wgsl, true) => write!(f, "sampler_comparison"),
            },
        }
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_type(self.ty, f)
    }
}
