use nova_hir::ClassOrInterfaceType;
use nova_types::{ResolvedReferenceType, ResolvedType};

use crate::decl::{DeclarationKind, TypeAdapter, TypeDeclaration};
use crate::members::{self, FieldDeclaration};
use crate::{ResolveError, SymbolResolver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassDeclaration {
    adapter: TypeAdapter,
}

impl ClassDeclaration {
    pub(crate) fn new(adapter: TypeAdapter) -> Self {
        Self { adapter }
    }
}

impl DeclarationKind for ClassDeclaration {
    fn adapter(&self) -> TypeAdapter {
        self.adapter
    }

    fn to_declaration(&self) -> TypeDeclaration {
        TypeDeclaration::Class(*self)
    }

    fn super_class(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        if self.is_object(db) {
            return Ok(None);
        }
        match db.tree().item(self.item()).extends.first() {
            Some(ty) => db.to_reference_type(self.item(), ty).map(Some),
            None => Ok(Some(db.object_type())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceDeclaration {
    adapter: TypeAdapter,
}

impl InterfaceDeclaration {
    pub(crate) fn new(adapter: TypeAdapter) -> Self {
        Self { adapter }
    }
}

impl DeclarationKind for InterfaceDeclaration {
    fn adapter(&self) -> TypeAdapter {
        self.adapter
    }

    fn to_declaration(&self) -> TypeDeclaration {
        TypeDeclaration::Interface(*self)
    }

    fn super_class(
        &self,
        _db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        Ok(None)
    }

    /// A root interface still has `Object` as its ancestor.
    fn ancestor_super(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        if db.tree().item(self.item()).extends.is_empty() {
            Ok(Some(db.object_type()))
        } else {
            Ok(None)
        }
    }

    fn interface_types<'a>(&self, db: &SymbolResolver<'a>) -> &'a [ClassOrInterfaceType] {
        &db.tree().item(self.item()).extends
    }

    fn declared_fields(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<FieldDeclaration>, ResolveError> {
        members::body_fields(db, self.item(), true)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumDeclaration {
    adapter: TypeAdapter,
}

impl EnumDeclaration {
    pub(crate) fn new(adapter: TypeAdapter) -> Self {
        Self { adapter }
    }

    pub fn constant_names<'a>(&self, db: &SymbolResolver<'a>) -> impl Iterator<Item = &'a str> {
        db.tree()
            .item(self.item())
            .enum_constants
            .iter()
            .map(|constant| constant.name.as_str())
    }
}

impl DeclarationKind for EnumDeclaration {
    fn adapter(&self) -> TypeAdapter {
        self.adapter
    }

    fn to_declaration(&self) -> TypeDeclaration {
        TypeDeclaration::Enum(*self)
    }

    /// `Enum<Self>`.
    fn super_class(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        let this = ResolvedReferenceType::raw(self.item(), self.adapter.qualified_name(db.tree()));
        db.configured_type(&db.config().enum_base_type, vec![ResolvedType::Reference(this)])
            .map(Some)
    }

    fn declared_fields(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<FieldDeclaration>, ResolveError> {
        let mut fields = members::enum_constant_fields(db, self.item());
        fields.extend(members::body_fields(db, self.item(), false)?);
        Ok(fields)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationDeclaration {
    adapter: TypeAdapter,
}

impl AnnotationDeclaration {
    pub(crate) fn new(adapter: TypeAdapter) -> Self {
        Self { adapter }
    }
}

impl DeclarationKind for AnnotationDeclaration {
    fn adapter(&self) -> TypeAdapter {
        self.adapter
    }

    fn to_declaration(&self) -> TypeDeclaration {
        TypeDeclaration::Annotation(*self)
    }

    fn super_class(
        &self,
        _db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        Ok(None)
    }

    fn ancestor_super(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        db.configured_type(&db.config().annotation_base_type, Vec::new())
            .map(Some)
    }

    fn interface_types<'a>(&self, _db: &SymbolResolver<'a>) -> &'a [ClassOrInterfaceType] {
        &[]
    }

    fn declared_fields(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<FieldDeclaration>, ResolveError> {
        members::body_fields(db, self.item(), true)
    }
}
