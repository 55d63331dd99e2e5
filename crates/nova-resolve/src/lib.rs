//! Declaration-level symbol resolution for Java.
//!
//! Given an [`nova_hir::ItemTree`] and a [`TypeSolver`], a [`SymbolResolver`]
//! answers questions about type declarations: their names and nesting, their
//! direct and transitive supertypes, the fields and methods they declare or
//! inherit, and whether one is assignable to another. Lookups of unqualified
//! names walk outward through [`Context`]s, from a type body to its enclosing
//! types and finally its compilation unit.
//!
//! Records get dedicated treatment: their superclass is always
//! `java.lang.Record`, their components surface as fields and accessor
//! methods, and they report no constructors.

mod ancestors;
mod assignability;
mod context;
pub mod decl;
mod error;
mod members;
mod resolver;
mod solver;

pub use ancestors::AncestorOps;
pub use assignability::{is_assignable, AssignabilityOps};
pub use context::Context;
pub use decl::{
    AnnotationDeclaration, ClassDeclaration, DeclarationKind, DeclaredAnnotation,
    EnumDeclaration, InterfaceDeclaration, RecordDeclaration, TypeAdapter, TypeDeclaration,
    TypeParameterDeclaration,
};
pub use error::ResolveError;
pub use members::{
    ConstructorDeclaration, FieldDeclaration, MemberOps, MethodDeclaration, MethodUsage,
};
pub use resolver::{NodeRef, SymbolResolver, WellKnownTypes};
pub use solver::{CombinedTypeSolver, MemoryTypeSolver, TypeSolver};

/// Tracing target for resolver diagnostics.
pub const TRACE_TARGET: &str = "nova.resolve";
