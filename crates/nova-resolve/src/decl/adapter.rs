//! Logic shared by every declaration kind that is derived purely from a node's
//! lexical nesting: names, nested types, the containing type and annotations.

use nova_core::{Name, PackageName, QualifiedName, TypeName};
use nova_hir::{AccessSpecifier, ItemId, ItemParent, ItemTree};
use nova_types::{SymbolReference, TypeParamOwner};

use crate::context::Context;
use crate::decl::{
    AnnotationDeclaration, DeclarationKind, TypeDeclaration, TypeParameterDeclaration,
};
use crate::{ResolveError, SymbolResolver, TRACE_TARGET};

/// An annotation usage on a declaration, with the annotation type it names
/// when that type could be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredAnnotation {
    pub name: QualifiedName,
    pub declaration: Option<AnnotationDeclaration>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeAdapter {
    item: ItemId,
}

impl TypeAdapter {
    /// Wrap `item`, checking that it belongs to `tree` and that its enclosing
    /// chain ends in a compilation unit.
    pub fn new(tree: &ItemTree, item: ItemId) -> Result<Self, ResolveError> {
        let mut current = item;
        // A well-formed chain is never longer than the number of items.
        for _ in 0..=tree.len() {
            let Some(data) = tree.get(current) else {
                return Err(ResolveError::ProgrammingInvariant(format!(
                    "{current:?} is not part of the declaration tree"
                )));
            };
            match data.parent {
                ItemParent::Unit(unit) => {
                    if tree.get_unit(unit).is_none() {
                        return Err(ResolveError::ProgrammingInvariant(format!(
                            "{current:?} refers to a missing compilation unit {unit:?}"
                        )));
                    }
                    return Ok(Self { item });
                }
                ItemParent::Type(outer) => current = outer,
            }
        }
        Err(ResolveError::ProgrammingInvariant(format!(
            "{item:?} has no enclosing compilation unit"
        )))
    }

    /// Wrap an item already known to be well-formed (a validated item, or a
    /// member/container of one).
    pub(crate) fn new_unchecked(item: ItemId) -> Self {
        Self { item }
    }

    pub fn item(self) -> ItemId {
        self.item
    }

    pub fn name(self, tree: &ItemTree) -> &Name {
        &tree.item(self.item).name
    }

    pub fn package_name(self, tree: &ItemTree) -> PackageName {
        tree.unit(tree.item(self.item).unit).package.clone()
    }

    /// Name relative to the package: `Outer.Inner` for a member type.
    pub fn class_name(self, tree: &ItemTree) -> String {
        let mut segments = vec![tree.item(self.item).name.as_str()];
        let mut parent = tree.item(self.item).parent;
        while let ItemParent::Type(outer) = parent {
            let data = tree.item(outer);
            segments.push(data.name.as_str());
            parent = data.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    pub fn qualified_name(self, tree: &ItemTree) -> TypeName {
        Self::qualified_name_in(tree, self.item)
    }

    pub(crate) fn qualified_name_in(tree: &ItemTree, item: ItemId) -> TypeName {
        let adapter = Self::new_unchecked(item);
        TypeName::new(
            adapter
                .package_name(tree)
                .qualify(&adapter.class_name(tree)),
        )
    }

    pub fn access_specifier(self, tree: &ItemTree) -> AccessSpecifier {
        tree.item(self.item).access
    }

    pub fn type_parameters(self, tree: &ItemTree) -> Vec<TypeParameterDeclaration> {
        (0..tree.item(self.item).type_params.len())
            .map(|idx| TypeParameterDeclaration::new(TypeParamOwner::Type(self.item), idx as u32))
            .collect()
    }

    pub fn internal_types(self, db: &SymbolResolver<'_>) -> Vec<TypeDeclaration> {
        db.tree()
            .item(self.item)
            .members
            .iter()
            .map(|member| db.declaration_of(*member))
            .collect()
    }

    pub fn container_type(self, db: &SymbolResolver<'_>) -> Option<TypeDeclaration> {
        match db.tree().item(self.item).parent {
            ItemParent::Type(outer) => Some(db.declaration_of(outer)),
            ItemParent::Unit(_) => None,
        }
    }

    /// Whether a type named `qualified_name` is nested, at any depth, in this declaration.
    pub fn has_internal_type(self, tree: &ItemTree, qualified_name: &str) -> bool {
        tree.item(self.item).members.iter().any(|member| {
            Self::qualified_name_in(tree, *member) == qualified_name
                || Self::new_unchecked(*member).has_internal_type(tree, qualified_name)
        })
    }

    /// Annotation usages, resolved in the scope enclosing the declaration.
    pub fn declared_annotations(
        self,
        db: &SymbolResolver<'_>,
    ) -> Result<Vec<DeclaredAnnotation>, ResolveError> {
        let tree = db.tree();
        let scope = Context::TypeBody(self.item).parent(tree).ok_or_else(|| {
            ResolveError::ProgrammingInvariant("parent context unexpectedly empty".to_string())
        })?;
        tree.item(self.item)
            .annotations
            .iter()
            .map(|annotation| {
                let declaration = match scope.solve_type(db, &annotation.name.to_dotted())? {
                    SymbolReference::Solved(TypeDeclaration::Annotation(decl)) => Some(decl),
                    _ => None,
                };
                Ok(DeclaredAnnotation {
                    name: annotation.name.clone(),
                    declaration,
                })
            })
            .collect()
    }

    pub fn has_direct_annotation(
        self,
        db: &SymbolResolver<'_>,
        qualified_name: &str,
    ) -> Result<bool, ResolveError> {
        Ok(self
            .declared_annotations(db)?
            .iter()
            .filter_map(|annotation| annotation.declaration)
            .any(|decl| decl.adapter().qualified_name(db.tree()) == qualified_name))
    }

    /// Names visible from inside the declaration without consulting its
    /// enclosing scope: its type parameters and its member types, including
    /// dotted paths through member types (`Inner.Deeper`).
    pub fn solve_type(
        self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> SymbolReference<TypeDeclaration> {
        let tree = db.tree();
        if !name.contains('.') {
            let params = &tree.item(self.item).type_params;
            if let Some(idx) = params.iter().position(|param| param.name == name) {
                return SymbolReference::solved(TypeDeclaration::TypeParameter(
                    TypeParameterDeclaration::new(TypeParamOwner::Type(self.item), idx as u32),
                ));
            }
        }
        Self::member_type_path(tree, self.item, name)
            .map(|member| db.declaration_of(member))
            .into()
    }

    pub(crate) fn member_type_path(tree: &ItemTree, item: ItemId, path: &str) -> Option<ItemId> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let member = tree
            .item(item)
            .members
            .iter()
            .copied()
            .find(|member| tree.item(*member).name == head)?;
        match rest {
            Some(rest) => Self::member_type_path(tree, member, rest),
            None => Some(member),
        }
    }

    /// Scoped lookup shared by class-like declarations.
    ///
    /// Order: the declaration's own simple name, then [`TypeAdapter::solve_type`],
    /// then `Own.Rest` re-resolved as `Rest` from this declaration, then the
    /// enclosing lexical context.
    pub(crate) fn solve_type_in_scope(
        self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> Result<SymbolReference<TypeDeclaration>, ResolveError> {
        let tree = db.tree();
        let own = self.name(tree).as_str();
        if own == name {
            return Ok(SymbolReference::solved(db.declaration_of(self.item)));
        }

        let local = self.solve_type(db, name);
        if local.is_solved() {
            return Ok(local);
        }

        if let Some(rest) = name.strip_prefix(own).and_then(|rest| rest.strip_prefix('.')) {
            if !rest.is_empty() {
                return self.solve_type_in_scope(db, rest);
            }
        }

        let parent = Context::TypeBody(self.item).parent(tree).ok_or_else(|| {
            ResolveError::ProgrammingInvariant("parent context unexpectedly empty".to_string())
        })?;
        tracing::trace!(
            target: TRACE_TARGET,
            name,
            from = %self.qualified_name(tree),
            "delegating type lookup to enclosing context"
        );
        parent.solve_type(db, name)
    }
}
