use nova_core::{Name, TypeName};
use nova_hir::{ItemId, ItemTree, TypeParam, TypeRef};
use nova_types::{ResolvedReferenceType, ResolvedType, TypeParamOwner, TypeVar};

use crate::decl::TypeAdapter;
use crate::resolver::TypeScope;
use crate::{ResolveError, SymbolResolver, TRACE_TARGET};

/// A type parameter of a generic type or method, viewed as a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeParameterDeclaration {
    owner: TypeParamOwner,
    index: u32,
}

impl TypeParameterDeclaration {
    pub(crate) fn new(owner: TypeParamOwner, index: u32) -> Self {
        Self { owner, index }
    }

    pub(crate) fn from_var(var: &TypeVar) -> Self {
        Self::new(var.owner, var.index)
    }

    pub fn owner(self) -> TypeParamOwner {
        self.owner
    }

    pub fn index(self) -> u32 {
        self.index
    }

    /// The type declaring this parameter, or the type declaring its method.
    pub fn declaring_item(self) -> ItemId {
        match self.owner {
            TypeParamOwner::Type(item) => item,
            TypeParamOwner::Method { owner, .. } => owner,
        }
    }

    fn scope(self) -> TypeScope {
        match self.owner {
            TypeParamOwner::Type(item) => TypeScope::body(item),
            TypeParamOwner::Method { owner, index } => TypeScope::method(owner, index),
        }
    }

    fn param(self, tree: &ItemTree) -> &TypeParam {
        let params = match self.owner {
            TypeParamOwner::Type(item) => &tree.item(item).type_params,
            TypeParamOwner::Method { owner, index } => {
                &tree.item(owner).methods[index as usize].type_params
            }
        };
        &params[self.index as usize]
    }

    pub fn name<'a>(self, db: &SymbolResolver<'a>) -> &'a Name {
        &self.param(db.tree()).name
    }

    /// `pkg.Owner.T`, or `pkg.Owner.method.T` for a method type parameter.
    pub fn qualified_name(self, db: &SymbolResolver<'_>) -> TypeName {
        let tree = db.tree();
        let owner = TypeAdapter::new_unchecked(self.declaring_item()).qualified_name(tree);
        match self.owner {
            TypeParamOwner::Type(_) => TypeName::new(format!("{owner}.{}", self.name(db))),
            TypeParamOwner::Method { owner: item, index } => TypeName::new(format!(
                "{owner}.{}.{}",
                tree.item(item).methods[index as usize].name,
                self.name(db)
            )),
        }
    }

    pub fn as_type_var(self, db: &SymbolResolver<'_>) -> TypeVar {
        TypeVar {
            owner: self.owner,
            index: self.index,
            name: self.name(db).clone(),
        }
    }

    /// Declared bounds, converted in the scope that declares the parameter.
    pub fn bounds(self, db: &SymbolResolver<'_>) -> Result<Vec<ResolvedType>, ResolveError> {
        self.param(db.tree())
            .bounds
            .iter()
            .map(|bound| db.convert_in(&TypeRef::Class(bound.clone()), self.scope()))
            .collect()
    }

    /// Bounds that name a class or interface; bounds that are themselves type
    /// variables are not followed.
    pub fn reference_bounds(
        self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        Ok(self
            .bounds(db)?
            .into_iter()
            .filter_map(|bound| match bound {
                ResolvedType::Reference(reference) => Some(reference),
                _ => None,
            })
            .collect())
    }

    /// The bounds, or `Object` for an unbounded parameter.
    pub fn ancestors(
        self,
        db: &SymbolResolver<'_>,
        accept_incomplete: bool,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        let mut ancestors = Vec::new();
        for bound in &self.param(db.tree()).bounds {
            match db.convert_in(&TypeRef::Class(bound.clone()), self.scope()) {
                Ok(ResolvedType::Reference(reference)) => ancestors.push(reference),
                Ok(_) => {}
                Err(err) if accept_incomplete && err.is_unresolved() => {
                    tracing::debug!(
                        target: TRACE_TARGET,
                        bound = %bound,
                        error = %err,
                        "skipping unresolved type parameter bound"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        if ancestors.is_empty() {
            ancestors.push(db.object_type());
        }
        Ok(ancestors)
    }
}
