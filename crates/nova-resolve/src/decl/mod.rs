//! Resolved views of type declarations.
//!
//! Each declaration kind is a small `Copy` handle over an [`ItemId`]; all data
//! lives in the [`nova_hir::ItemTree`] behind a [`SymbolResolver`]. Kind-specific
//! behavior is expressed through [`DeclarationKind`] hooks, and the shared
//! algorithms ([`AncestorOps`], [`MemberOps`], [`AssignabilityOps`]) are provided
//! on top of those hooks.

use std::collections::HashSet;
use std::fmt;

use nova_core::{Name, PackageName, TypeName};
use nova_hir::{AccessSpecifier, ClassOrInterfaceType, ItemId, ItemKind};
use nova_types::{ResolvedReferenceType, ResolvedType, SymbolReference};

use crate::ancestors::{self, AncestorOps};
use crate::assignability::{self, AssignabilityOps};
use crate::context::Context;
use crate::members::{
    self, ConstructorDeclaration, FieldDeclaration, MemberOps, MethodDeclaration, MethodUsage,
};
use crate::{NodeRef, ResolveError, SymbolResolver};

mod adapter;
mod class;
mod record;
mod type_param;

pub use adapter::{DeclaredAnnotation, TypeAdapter};
pub use class::{AnnotationDeclaration, ClassDeclaration, EnumDeclaration, InterfaceDeclaration};
pub use record::RecordDeclaration;
pub use type_param::TypeParameterDeclaration;

/// Hooks every class-like declaration kind provides.
///
/// The defaults describe an ordinary class body; kinds override what differs.
pub trait DeclarationKind: Copy + fmt::Debug {
    fn adapter(&self) -> TypeAdapter;

    fn to_declaration(&self) -> TypeDeclaration;

    fn item(&self) -> ItemId {
        self.adapter().item()
    }

    /// Whether this is the universal base type.
    fn is_object(&self, db: &SymbolResolver<'_>) -> bool {
        self.item() == db.well_known().object
    }

    /// The direct superclass, or `None` where the kind has none.
    fn super_class(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError>;

    /// Superclass-position candidate for ancestor enumeration.
    fn ancestor_super(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        self.super_class(db)
    }

    /// Superinterface clauses as written in source.
    fn interface_types<'a>(&self, db: &SymbolResolver<'a>) -> &'a [ClassOrInterfaceType] {
        &db.tree().item(self.item()).implements
    }

    /// Fields declared directly by this type, in declaration order.
    fn declared_fields(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<FieldDeclaration>, ResolveError> {
        members::body_fields(db, self.item(), false)
    }

    fn constructors(&self, db: &SymbolResolver<'_>) -> Vec<ConstructorDeclaration> {
        members::declared_constructors(db, self.item())
    }

    fn solve_type(
        &self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> Result<SymbolReference<TypeDeclaration>, ResolveError> {
        self.adapter().solve_type_in_scope(db, name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeDeclaration {
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Record(RecordDeclaration),
    Annotation(AnnotationDeclaration),
    TypeParameter(TypeParameterDeclaration),
}

/// Dispatch to the class-like variants; type parameters get their own arm.
macro_rules! dispatch {
    ($self:expr, $decl:ident => $class_like:expr, $param:ident => $type_param:expr) => {
        match $self {
            TypeDeclaration::Class($decl) => $class_like,
            TypeDeclaration::Interface($decl) => $class_like,
            TypeDeclaration::Enum($decl) => $class_like,
            TypeDeclaration::Record($decl) => $class_like,
            TypeDeclaration::Annotation($decl) => $class_like,
            TypeDeclaration::TypeParameter($param) => $type_param,
        }
    };
}

impl TypeDeclaration {
    pub(crate) fn for_item(item: ItemId, kind: ItemKind) -> Self {
        let adapter = TypeAdapter::new_unchecked(item);
        match kind {
            ItemKind::Class => TypeDeclaration::Class(ClassDeclaration::new(adapter)),
            ItemKind::Interface => TypeDeclaration::Interface(InterfaceDeclaration::new(adapter)),
            ItemKind::Enum => TypeDeclaration::Enum(EnumDeclaration::new(adapter)),
            ItemKind::Record => TypeDeclaration::Record(RecordDeclaration::new(adapter)),
            ItemKind::Annotation => {
                TypeDeclaration::Annotation(AnnotationDeclaration::new(adapter))
            }
        }
    }

    /// The backing item; `None` for type parameters.
    pub fn item(&self) -> Option<ItemId> {
        dispatch!(self, decl => Some(decl.item()), _param => None)
    }

    pub fn is_class(&self) -> bool {
        matches!(self, TypeDeclaration::Class(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, TypeDeclaration::Interface(_) | TypeDeclaration::Annotation(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, TypeDeclaration::Enum(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, TypeDeclaration::Record(_))
    }

    pub fn is_annotation(&self) -> bool {
        matches!(self, TypeDeclaration::Annotation(_))
    }

    pub fn is_type_parameter(&self) -> bool {
        matches!(self, TypeDeclaration::TypeParameter(_))
    }

    pub fn as_record(&self) -> Option<RecordDeclaration> {
        match self {
            TypeDeclaration::Record(record) => Some(*record),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<TypeParameterDeclaration> {
        match self {
            TypeDeclaration::TypeParameter(param) => Some(*param),
            _ => None,
        }
    }

    pub fn name(&self, db: &SymbolResolver<'_>) -> Name {
        dispatch!(
            self,
            decl => decl.adapter().name(db.tree()).clone(),
            param => param.name(db).clone()
        )
    }

    pub fn qualified_name(&self, db: &SymbolResolver<'_>) -> TypeName {
        dispatch!(
            self,
            decl => decl.adapter().qualified_name(db.tree()),
            param => param.qualified_name(db)
        )
    }

    pub fn package_name(&self, db: &SymbolResolver<'_>) -> PackageName {
        dispatch!(
            self,
            decl => decl.adapter().package_name(db.tree()),
            param => TypeAdapter::new_unchecked(param.declaring_item()).package_name(db.tree())
        )
    }

    pub fn class_name(&self, db: &SymbolResolver<'_>) -> String {
        dispatch!(
            self,
            decl => decl.adapter().class_name(db.tree()),
            param => format!(
                "{}.{}",
                TypeAdapter::new_unchecked(param.declaring_item()).class_name(db.tree()),
                param.name(db)
            )
        )
    }

    pub fn access_specifier(&self, db: &SymbolResolver<'_>) -> AccessSpecifier {
        dispatch!(
            self,
            decl => decl.adapter().access_specifier(db.tree()),
            _param => AccessSpecifier::Public
        )
    }

    pub fn type_parameters(&self, db: &SymbolResolver<'_>) -> Vec<TypeParameterDeclaration> {
        dispatch!(self, decl => decl.adapter().type_parameters(db.tree()), _param => Vec::new())
    }

    pub fn internal_types(&self, db: &SymbolResolver<'_>) -> Vec<TypeDeclaration> {
        dispatch!(self, decl => decl.adapter().internal_types(db), _param => Vec::new())
    }

    pub fn container_type(&self, db: &SymbolResolver<'_>) -> Option<TypeDeclaration> {
        dispatch!(self, decl => decl.adapter().container_type(db), _param => None)
    }

    pub fn has_internal_type(&self, db: &SymbolResolver<'_>, qualified_name: &str) -> bool {
        dispatch!(
            self,
            decl => decl.adapter().has_internal_type(db.tree(), qualified_name),
            _param => false
        )
    }

    pub fn declared_annotations(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<DeclaredAnnotation>, ResolveError> {
        dispatch!(self, decl => decl.adapter().declared_annotations(db), _param => Ok(Vec::new()))
    }

    pub fn has_direct_annotation(
        &self,
        db: &SymbolResolver<'_>,
        qualified_name: &str,
    ) -> Result<bool, ResolveError> {
        dispatch!(
            self,
            decl => decl.adapter().has_direct_annotation(db, qualified_name),
            _param => Ok(false)
        )
    }

    pub fn super_class(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        dispatch!(self, decl => decl.super_class(db), _param => Ok(None))
    }

    pub fn interfaces(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        dispatch!(self, decl => decl.interfaces(db), param => param.reference_bounds(db))
    }

    pub fn ancestors(
        &self,
        db: &SymbolResolver<'_>,
        accept_incomplete: bool,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        dispatch!(
            self,
            decl => decl.ancestors(db, accept_incomplete),
            param => param.ancestors(db, accept_incomplete)
        )
    }

    pub fn all_ancestors(
        &self,
        db: &SymbolResolver<'_>,
        accept_incomplete: bool,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        ancestors::all_ancestors_of(db, *self, accept_incomplete)
    }

    pub fn declared_fields(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<FieldDeclaration>, ResolveError> {
        dispatch!(self, decl => decl.declared_fields(db), _param => Ok(Vec::new()))
    }

    pub fn all_fields(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<FieldDeclaration>, ResolveError> {
        dispatch!(self, decl => decl.all_fields(db), _param => Ok(Vec::new()))
    }

    pub fn field(
        &self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> Result<SymbolReference<FieldDeclaration>, ResolveError> {
        dispatch!(self, decl => decl.field(db, name), _param => Ok(SymbolReference::Unsolved))
    }

    pub fn declared_methods(&self, db: &SymbolResolver<'_>) -> HashSet<MethodDeclaration> {
        dispatch!(self, decl => decl.declared_methods(db), _param => HashSet::new())
    }

    pub fn constructors(&self, db: &SymbolResolver<'_>) -> Vec<ConstructorDeclaration> {
        dispatch!(self, decl => decl.constructors(db), _param => Vec::new())
    }

    /// Best-effort subtype test; unresolvable supertypes are skipped.
    pub fn can_be_assigned_to(
        &self,
        db: &SymbolResolver<'_>,
        other: &TypeDeclaration,
    ) -> Result<bool, ResolveError> {
        assignability::can_be_assigned(db, *self, other, false)
    }

    /// Like [`TypeDeclaration::can_be_assigned_to`], but an unresolvable
    /// supertype is an error.
    pub fn try_can_be_assigned_to(
        &self,
        db: &SymbolResolver<'_>,
        other: &TypeDeclaration,
    ) -> Result<bool, ResolveError> {
        assignability::can_be_assigned(db, *self, other, true)
    }

    pub fn is_assignable_by(
        &self,
        db: &SymbolResolver<'_>,
        other: &TypeDeclaration,
    ) -> Result<bool, ResolveError> {
        dispatch!(
            self,
            decl => decl.is_assignable_by(db, other),
            _param => Err(ResolveError::UnsupportedOperation(
                "assignability to a type parameter declaration"
            ))
        )
    }

    pub fn is_assignable_by_type(
        &self,
        db: &SymbolResolver<'_>,
        ty: &ResolvedType,
    ) -> Result<bool, ResolveError> {
        dispatch!(
            self,
            decl => decl.is_assignable_by_type(db, ty),
            _param => Err(ResolveError::UnsupportedOperation(
                "assignability to a type parameter declaration"
            ))
        )
    }

    /// Resolve `name` as seen from inside this declaration.
    pub fn solve_type(
        &self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> Result<SymbolReference<TypeDeclaration>, ResolveError> {
        dispatch!(
            self,
            decl => decl.solve_type(db, name),
            param => Context::TypeBody(param.declaring_item()).solve_type(db, name)
        )
    }

    /// The lexical context of this declaration's body.
    pub fn context(&self) -> Context {
        dispatch!(
            self,
            decl => Context::TypeBody(decl.item()),
            param => Context::TypeBody(param.declaring_item())
        )
    }

    pub fn solve_symbol(
        &self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> Result<SymbolReference<FieldDeclaration>, ResolveError> {
        self.context().solve_symbol(db, name)
    }

    pub fn solve_method(
        &self,
        db: &SymbolResolver<'_>,
        name: &str,
        arg_types: &[ResolvedType],
        static_only: bool,
    ) -> Result<SymbolReference<MethodDeclaration>, ResolveError> {
        self.context().solve_method(db, name, arg_types, static_only)
    }

    pub fn solve_method_as_usage(
        &self,
        db: &SymbolResolver<'_>,
        name: &str,
        arg_types: &[ResolvedType],
    ) -> Result<Option<MethodUsage>, ResolveError> {
        self.context().solve_method_as_usage(db, name, arg_types)
    }

    /// Usage-at-node queries are answered by the expression resolver, not by
    /// declarations.
    pub fn get_usage(&self, _node: NodeRef) -> Result<ResolvedType, ResolveError> {
        Err(ResolveError::UnsupportedOperation(
            "usage of a node from a type declaration",
        ))
    }

}
