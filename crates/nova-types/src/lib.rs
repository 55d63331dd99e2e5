//! Resolved type model shared by the resolver and its consumers.
//!
//! Types here are "types as used at a point": a declaration plus the type
//! arguments bound at that use site. Declarations themselves are referenced by
//! [`nova_hir::ItemId`], so this crate never needs access to the resolver.

mod format;
mod lazy;
mod symbol_ref;
mod ty;

pub use lazy::LazyType;
pub use nova_hir::{AccessSpecifier, PrimitiveType};
pub use symbol_ref::SymbolReference;
pub use ty::{ResolvedReferenceType, ResolvedType, ResolvedWildcard, TypeParamOwner, TypeVar};
