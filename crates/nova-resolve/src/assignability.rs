//! Subtype tests between declarations, and assignment compatibility between
//! resolved types.

use std::collections::HashSet;

use nova_core::TypeName;
use nova_types::{ResolvedReferenceType, ResolvedType, ResolvedWildcard};

use crate::decl::{DeclarationKind, TypeDeclaration, TypeParameterDeclaration};
use crate::{ResolveError, SymbolResolver};

const CLONEABLE: &str = "java.lang.Cloneable";
const SERIALIZABLE: &str = "java.io.Serializable";

pub trait AssignabilityOps: DeclarationKind {
    /// Whether a value of this type can be assigned to `other`. Type
    /// arguments are not compared. Unresolvable supertypes are skipped.
    fn can_be_assigned_to(
        &self,
        db: &SymbolResolver<'_>,
        other: &TypeDeclaration,
    ) -> Result<bool, ResolveError> {
        can_be_assigned(db, self.to_declaration(), other, false)
    }

    /// Like [`AssignabilityOps::can_be_assigned_to`], but an unresolvable
    /// supertype fails the query.
    fn try_can_be_assigned_to(
        &self,
        db: &SymbolResolver<'_>,
        other: &TypeDeclaration,
    ) -> Result<bool, ResolveError> {
        can_be_assigned(db, self.to_declaration(), other, true)
    }

    /// Whether a value of type `other` can be assigned to this type.
    fn is_assignable_by(
        &self,
        db: &SymbolResolver<'_>,
        other: &TypeDeclaration,
    ) -> Result<bool, ResolveError> {
        if self.is_object(db) {
            return Ok(true);
        }
        let own = self.adapter().qualified_name(db.tree());
        if other.qualified_name(db) == own {
            return Ok(true);
        }
        Ok(other
            .all_ancestors(db, false)?
            .iter()
            .any(|ancestor| *ancestor.qualified_name() == own))
    }

    fn is_assignable_by_type(
        &self,
        db: &SymbolResolver<'_>,
        ty: &ResolvedType,
    ) -> Result<bool, ResolveError> {
        match db.force(ty)? {
            ResolvedType::Null => Ok(true),
            ResolvedType::Reference(reference) => {
                self.is_assignable_by(db, &db.declaration_of(reference.type_declaration()))
            }
            ResolvedType::TypeVariable(var) => self.is_assignable_by(
                db,
                &TypeDeclaration::TypeParameter(TypeParameterDeclaration::from_var(&var)),
            ),
            ResolvedType::Array(_) => {
                let own = self.adapter().qualified_name(db.tree());
                Ok(self.is_object(db) || own == CLONEABLE || own == SERIALIZABLE)
            }
            ResolvedType::Primitive(_)
            | ResolvedType::Void
            | ResolvedType::Wildcard(_)
            | ResolvedType::Lazy(_) => Err(ResolveError::UnsupportedOperation(
                "assignability of a non-reference type to a declaration",
            )),
        }
    }
}

impl<T: DeclarationKind> AssignabilityOps for T {}

pub(crate) fn can_be_assigned(
    db: &SymbolResolver<'_>,
    this: TypeDeclaration,
    other: &TypeDeclaration,
    strict: bool,
) -> Result<bool, ResolveError> {
    let target = other.qualified_name(db);
    let mut visiting = HashSet::new();
    walk(db, this, &target, strict, &mut visiting)
}

fn walk(
    db: &SymbolResolver<'_>,
    this: TypeDeclaration,
    target: &TypeName,
    strict: bool,
    visiting: &mut HashSet<TypeName>,
) -> Result<bool, ResolveError> {
    let own = this.qualified_name(db);
    if own == *target {
        return Ok(true);
    }
    // Already explored through another path (diamonds, cycles).
    if !visiting.insert(own) {
        return Ok(false);
    }

    let supertypes = match this {
        TypeDeclaration::TypeParameter(param) => vec![param.ancestors(db, !strict)],
        TypeDeclaration::Class(decl) => direct_supertypes(db, decl),
        TypeDeclaration::Interface(decl) => direct_supertypes(db, decl),
        TypeDeclaration::Enum(decl) => direct_supertypes(db, decl),
        TypeDeclaration::Record(decl) => direct_supertypes(db, decl),
        TypeDeclaration::Annotation(decl) => direct_supertypes(db, decl),
    };
    for supertypes in supertypes {
        let supertypes = match supertypes {
            Ok(supertypes) => supertypes,
            Err(err) if !strict && err.is_unresolved() => continue,
            Err(err) => return Err(err),
        };
        for supertype in supertypes {
            let next = db.declaration_of(supertype.type_declaration());
            if walk(db, next, target, strict, visiting)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// The superclass candidate followed by each superinterface, resolved one by
/// one so that a failing clause does not hide the others.
fn direct_supertypes<D: DeclarationKind>(
    db: &SymbolResolver<'_>,
    decl: D,
) -> Vec<Result<Vec<ResolvedReferenceType>, ResolveError>> {
    let mut out = vec![decl.ancestor_super(db).map(|sup| sup.into_iter().collect())];
    out.extend(
        decl.interface_types(db)
            .iter()
            .map(|ty| db.to_reference_type(decl.item(), ty).map(|r| vec![r])),
    );
    out
}

/// Assignment compatibility of a value of type `from` to a slot of type `to`.
///
/// Covers identity, primitive widening, `null`, reference subtyping (type
/// arguments are not compared) and array covariance. Type variables accept
/// any reference.
pub fn is_assignable(
    db: &SymbolResolver<'_>,
    from: &ResolvedType,
    to: &ResolvedType,
) -> Result<bool, ResolveError> {
    let from = db.force(from)?;
    let to = db.force(to)?;
    if from == to {
        return Ok(true);
    }
    match (&from, &to) {
        (ResolvedType::Primitive(from), ResolvedType::Primitive(to)) => Ok(from.widens_to(*to)),
        (ResolvedType::Primitive(_) | ResolvedType::Void, _)
        | (_, ResolvedType::Primitive(_) | ResolvedType::Void) => Ok(false),
        (ResolvedType::Null, _) => Ok(true),
        (_, ResolvedType::TypeVariable(_)) => Ok(true),
        (_, ResolvedType::Wildcard(ResolvedWildcard::Extends(bound))) => {
            is_assignable(db, &from, bound)
        }
        (_, ResolvedType::Wildcard(_)) => Ok(true),
        (ResolvedType::Array(from_component), ResolvedType::Array(to_component)) => {
            if from_component.is_primitive() || to_component.is_primitive() {
                Ok(from_component == to_component)
            } else {
                is_assignable(db, from_component, to_component)
            }
        }
        (ResolvedType::Array(_), ResolvedType::Reference(to)) => db
            .declaration_of(to.type_declaration())
            .is_assignable_by_type(db, &from),
        (_, ResolvedType::Array(_)) => Ok(false),
        (ResolvedType::Reference(from), ResolvedType::Reference(to)) => db
            .declaration_of(from.type_declaration())
            .can_be_assigned_to(db, &db.declaration_of(to.type_declaration())),
        (ResolvedType::TypeVariable(var), ResolvedType::Reference(to)) => {
            TypeDeclaration::TypeParameter(TypeParameterDeclaration::from_var(var))
                .can_be_assigned_to(db, &db.declaration_of(to.type_declaration()))
        }
        _ => Ok(false),
    }
}
