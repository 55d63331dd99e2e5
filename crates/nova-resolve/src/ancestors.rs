//! Direct and transitive supertypes of a declaration.

use std::collections::HashSet;

use nova_core::TypeName;
use nova_types::ResolvedReferenceType;

use crate::decl::{DeclarationKind, TypeDeclaration};
use crate::members::force_edge;
use crate::{ResolveError, SymbolResolver, TRACE_TARGET};

pub trait AncestorOps: DeclarationKind {
    /// Resolved superinterface clauses, in source order.
    fn interfaces(
        &self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        self.interface_types(db)
            .iter()
            .map(|ty| db.to_reference_type(self.item(), ty))
            .collect()
    }

    /// Direct supertypes: the superclass (when present) followed by the
    /// superinterfaces in source order.
    ///
    /// With `accept_incomplete`, supertypes that cannot be resolved are left
    /// out; otherwise the first one fails the query. Supertypes naming one of
    /// the declaration's own nested types are never reported.
    fn ancestors(
        &self,
        db: &SymbolResolver<'_>,
        accept_incomplete: bool,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        db.cached_ancestors(self.item(), accept_incomplete, || {
            compute_ancestors(db, *self, accept_incomplete)
        })
    }

    fn all_ancestors(
        &self,
        db: &SymbolResolver<'_>,
        accept_incomplete: bool,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        all_ancestors_of(db, self.to_declaration(), accept_incomplete)
    }
}

impl<T: DeclarationKind> AncestorOps for T {}

fn compute_ancestors<D: DeclarationKind>(
    db: &SymbolResolver<'_>,
    decl: D,
    accept_incomplete: bool,
) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
    if decl.is_object(db) {
        return Ok(Vec::new());
    }

    let tree = db.tree();
    let adapter = decl.adapter();
    let mut ancestors = Vec::new();
    let mut admit = |candidate: Result<ResolvedReferenceType, ResolveError>| {
        match candidate {
            Ok(ancestor) => {
                if !adapter.has_internal_type(tree, ancestor.qualified_name().as_str()) {
                    ancestors.push(ancestor);
                }
                Ok(())
            }
            Err(err) if accept_incomplete && err.is_unresolved() => {
                tracing::debug!(
                    target: TRACE_TARGET,
                    ty = %adapter.qualified_name(tree),
                    error = %err,
                    "skipping unresolved ancestor"
                );
                Ok(())
            }
            Err(err) => Err(err),
        }
    };

    match decl.ancestor_super(db) {
        Ok(Some(superclass)) => admit(Ok(superclass))?,
        Ok(None) => {}
        Err(err) => admit(Err(err))?,
    }
    for ty in decl.interface_types(db) {
        admit(db.to_reference_type(decl.item(), ty))?;
    }
    Ok(ancestors)
}

/// Every transitive supertype, depth-first in ancestor order, each reported
/// once. Type arguments are carried along each edge, so `all_ancestors` of
/// `class A extends B<String>` with `class B<T> implements I<T>` reports
/// `I<String>`.
pub(crate) fn all_ancestors_of(
    db: &SymbolResolver<'_>,
    decl: TypeDeclaration,
    accept_incomplete: bool,
) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
    let mut seen = HashSet::new();
    seen.insert(decl.qualified_name(db));
    let mut out = Vec::new();
    collect(db, decl, None, accept_incomplete, &mut seen, &mut out)?;
    Ok(out)
}

fn collect(
    db: &SymbolResolver<'_>,
    decl: TypeDeclaration,
    view: Option<&ResolvedReferenceType>,
    accept_incomplete: bool,
    seen: &mut HashSet<TypeName>,
    out: &mut Vec<ResolvedReferenceType>,
) -> Result<(), ResolveError> {
    for ancestor in decl.ancestors(db, accept_incomplete)? {
        let edge = if accept_incomplete {
            force_edge(db, &ancestor)?
        } else {
            db.force_reference(&ancestor)?
        };
        let edge = match view {
            Some(view) => edge.viewed_through(view),
            None => edge,
        };
        if !seen.insert(edge.qualified_name().clone()) {
            continue;
        }
        out.push(edge.clone());
        let next = db.declaration_of(edge.type_declaration());
        collect(db, next, Some(&edge), accept_incomplete, seen, out)?;
    }
    Ok(())
}
