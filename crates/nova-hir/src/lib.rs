//! Declaration tree for Java sources.
//!
//! The resolver never parses text: it consumes an [`ItemTree`] that has already
//! been lowered from syntax. The tree is an arena of compilation units and type
//! declarations (classes, interfaces, enums, records and annotation types) with
//! stable ids and parent links for lexical navigation.

pub mod ids;
pub mod item_tree;
mod jdk;
pub mod type_ref;

pub use ids::{ItemId, UnitId};
pub use item_tree::{
    AccessSpecifier, Annotation, CompilationUnit, ConstructorDecl, EnumConstant, FieldDecl,
    ImportDecl, ItemKind, ItemParent, ItemTree, MethodDecl, ParamDecl, RecordComponent, TypeDecl,
    TypeItem, TypeParam,
};
pub use type_ref::{ClassOrInterfaceType, PrimitiveType, TypeRef, WildcardRef};
