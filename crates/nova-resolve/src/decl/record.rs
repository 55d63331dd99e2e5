use nova_types::ResolvedReferenceType;

use crate::decl::{DeclarationKind, TypeAdapter, TypeDeclaration};
use crate::members::{self, ConstructorDeclaration, FieldDeclaration};
use crate::{ResolveError, SymbolResolver};

/// A `record` declaration.
///
/// Its superclass is always `java.lang.Record`, its components surface as
/// fields ahead of the body's own fields, and it reports no constructors.
/// Type lookup from inside a record follows the shared class-body order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordDeclaration {
    adapter: TypeAdapter,
}

impl RecordDeclaration {
    pub(crate) fn new(adapter: TypeAdapter) -> Self {
        Self { adapter }
    }

    /// The fields induced by the record header, in header order.
    pub fn components(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<FieldDeclaration>, ResolveError> {
        members::component_fields(db, self.item())
    }

    pub fn has_component(&self, db: &SymbolResolver<'_>, name: &str) -> bool {
        db.tree()
            .item(self.item())
            .components
            .iter()
            .any(|component| component.name == name)
    }
}

impl DeclarationKind for RecordDeclaration {
    fn adapter(&self) -> TypeAdapter {
        self.adapter
    }

    fn to_declaration(&self) -> TypeDeclaration {
        TypeDeclaration::Record(*self)
    }

    /// Records cannot extend anything; any `extends` clause is ignored.
    fn super_class(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Option<ResolvedReferenceType>, ResolveError> {
        Ok(Some(db.record_type()))
    }

    fn declared_fields(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<FieldDeclaration>, ResolveError> {
        let mut fields = self.components(db)?;
        fields.extend(members::body_fields(db, self.item(), false)?);
        Ok(fields)
    }

    // Canonical and compact constructors are not modelled.
    fn constructors(&self, _db: &SymbolResolver<'_>) -> Vec<ConstructorDeclaration> {
        Vec::new()
    }
}
