//! Core shared types for Nova.
//!
//! This crate is intentionally small: it only carries the name types shared by
//! the declaration tree and the resolver.

mod name;

pub use name::{Name, PackageName, QualifiedName, TypeName};
