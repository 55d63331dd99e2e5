use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use nova_config::ResolutionConfig;
use nova_hir::{ClassOrInterfaceType, ItemId, ItemTree, TypeRef, WildcardRef};
use nova_types::{
    LazyType, ResolvedReferenceType, ResolvedType, ResolvedWildcard, SymbolReference,
    TypeParamOwner, TypeVar,
};

use crate::context::Context;
use crate::decl::{TypeAdapter, TypeDeclaration, TypeParameterDeclaration};
use crate::members::FieldDeclaration;
use crate::{ResolveError, TypeSolver, TRACE_TARGET};

/// A reference to a syntax node that may denote a type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Type(ItemId),
    TypeParameter { owner: ItemId, index: u32 },
    EnumConstant { owner: ItemId, index: u32 },
    Field { owner: ItemId, index: u32 },
    Method { owner: ItemId, index: u32 },
}

/// Root types looked up once when the resolver is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: ItemId,
    pub record: ItemId,
}

/// Where a type reference is written: a type body, optionally inside one of
/// its generic methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TypeScope {
    pub(crate) context: ItemId,
    pub(crate) method: Option<u32>,
}

impl TypeScope {
    pub(crate) fn body(context: ItemId) -> Self {
        Self {
            context,
            method: None,
        }
    }

    pub(crate) fn method(context: ItemId, method: u32) -> Self {
        Self {
            context,
            method: Some(method),
        }
    }
}

/// Entry point for declaration-level resolution over one [`ItemTree`].
///
/// Results of the ancestor and field queries are memoised for the lifetime of
/// the resolver. The resolver is single-threaded; build one per thread.
pub struct SymbolResolver<'a> {
    tree: &'a ItemTree,
    solver: &'a dyn TypeSolver,
    config: ResolutionConfig,
    well_known: WellKnownTypes,
    ancestors: RefCell<HashMap<(ItemId, bool), Vec<ResolvedReferenceType>>>,
    fields: RefCell<HashMap<ItemId, Vec<FieldDeclaration>>>,
    expanding: RefCell<HashSet<ItemId>>,
    /// Bumped whenever a field expansion is cut at a cycle.
    field_cuts: Cell<u64>,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(tree: &'a ItemTree, solver: &'a dyn TypeSolver) -> Result<Self, ResolveError> {
        Self::with_config(tree, solver, ResolutionConfig::default())
    }

    pub fn with_config(
        tree: &'a ItemTree,
        solver: &'a dyn TypeSolver,
        config: ResolutionConfig,
    ) -> Result<Self, ResolveError> {
        let well_known = WellKnownTypes {
            object: well_known_type(tree, solver, &config.object_type)?,
            record: well_known_type(tree, solver, &config.record_base_type)?,
        };
        tracing::debug!(
            target: TRACE_TARGET,
            items = tree.len(),
            object = %config.object_type,
            record = %config.record_base_type,
            "symbol resolver ready"
        );
        Ok(Self {
            tree,
            solver,
            config,
            well_known,
            ancestors: RefCell::new(HashMap::new()),
            fields: RefCell::new(HashMap::new()),
            expanding: RefCell::new(HashSet::new()),
            field_cuts: Cell::new(0),
        })
    }

    pub fn tree(&self) -> &'a ItemTree {
        self.tree
    }

    pub fn type_solver(&self) -> &'a dyn TypeSolver {
        self.solver
    }

    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    pub fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    /// The declaration for `item`, validating that it is well-formed.
    pub fn declaration(&self, item: ItemId) -> Result<TypeDeclaration, ResolveError> {
        TypeAdapter::new(self.tree, item)?;
        Ok(self.declaration_of(item))
    }

    /// Like [`SymbolResolver::declaration`] for ids that are already known to
    /// be well-formed (members and ancestors of validated declarations).
    pub(crate) fn declaration_of(&self, item: ItemId) -> TypeDeclaration {
        TypeDeclaration::for_item(item, self.tree.item(item).kind)
    }

    /// Map a syntax node to the type declaration it introduces.
    pub fn to_type_declaration(&self, node: NodeRef) -> Result<TypeDeclaration, ResolveError> {
        match node {
            NodeRef::Type(item) => self.declaration(item),
            NodeRef::TypeParameter { owner, index } => {
                self.declaration(owner)?;
                if index as usize >= self.tree.item(owner).type_params.len() {
                    return Err(ResolveError::ProgrammingInvariant(format!(
                        "{owner:?} has no type parameter #{index}"
                    )));
                }
                Ok(TypeDeclaration::TypeParameter(
                    TypeParameterDeclaration::new(TypeParamOwner::Type(owner), index),
                ))
            }
            NodeRef::EnumConstant { owner, .. } => match self.declaration(owner)? {
                decl @ TypeDeclaration::Enum(_) => Ok(decl),
                _ => Err(ResolveError::ProgrammingInvariant(format!(
                    "enum constant outside of an enum declaration ({owner:?})"
                ))),
            },
            NodeRef::Field { .. } | NodeRef::Method { .. } => Err(
                ResolveError::UnsupportedOperation("member nodes do not declare a type"),
            ),
        }
    }

    /// Look a fully qualified name up through the type solver.
    pub fn solve_type(
        &self,
        qualified_name: &str,
    ) -> Result<SymbolReference<TypeDeclaration>, ResolveError> {
        match self.solver.try_solve_type(qualified_name) {
            SymbolReference::Solved(item) => Ok(SymbolReference::solved(self.declaration(item)?)),
            SymbolReference::Unsolved => Ok(SymbolReference::Unsolved),
        }
    }

    /// Convert a syntactic type written inside the body of `context`.
    pub fn convert(&self, ty: &TypeRef, context: ItemId) -> Result<ResolvedType, ResolveError> {
        self.convert_in(ty, TypeScope::body(context))
    }

    pub(crate) fn convert_in(
        &self,
        ty: &TypeRef,
        scope: TypeScope,
    ) -> Result<ResolvedType, ResolveError> {
        match ty {
            TypeRef::Primitive(primitive) => Ok(ResolvedType::Primitive(*primitive)),
            TypeRef::Void => Ok(ResolvedType::Void),
            TypeRef::Array(component) => Ok(ResolvedType::Array(Box::new(
                self.convert_in(component, scope)?,
            ))),
            TypeRef::Wildcard(WildcardRef::Unbounded) => {
                Ok(ResolvedType::Wildcard(ResolvedWildcard::Unbounded))
            }
            TypeRef::Wildcard(WildcardRef::Extends(bound)) => Ok(ResolvedType::Wildcard(
                ResolvedWildcard::Extends(Box::new(self.convert_in(bound, scope)?)),
            )),
            TypeRef::Wildcard(WildcardRef::Super(bound)) => Ok(ResolvedType::Wildcard(
                ResolvedWildcard::Super(Box::new(self.convert_in(bound, scope)?)),
            )),
            TypeRef::Class(class) => self.convert_class(class, scope),
        }
    }

    fn convert_class(
        &self,
        class: &ClassOrInterfaceType,
        scope: TypeScope,
    ) -> Result<ResolvedType, ResolveError> {
        if let (None, Some(method)) = (&class.scope, scope.method) {
            let params = &self.tree.item(scope.context).methods[method as usize].type_params;
            if let Some(index) = params.iter().position(|param| param.name == class.name) {
                return Ok(ResolvedType::TypeVariable(TypeVar {
                    owner: TypeParamOwner::Method {
                        owner: scope.context,
                        index: method,
                    },
                    index: index as u32,
                    name: class.name.clone(),
                }));
            }
        }

        let name = class.qualified_text();
        let decl = match Context::TypeBody(scope.context).solve_type(self, &name)? {
            SymbolReference::Solved(decl) => decl,
            SymbolReference::Unsolved => return Err(ResolveError::UnresolvedSymbol(name)),
        };
        match decl {
            TypeDeclaration::TypeParameter(param) => {
                Ok(ResolvedType::TypeVariable(param.as_type_var(self)))
            }
            _ => {
                let Some(item) = decl.item() else {
                    return Err(ResolveError::ProgrammingInvariant(format!(
                        "type declaration for `{name}` has no backing item"
                    )));
                };
                let type_args = match &class.type_args {
                    Some(args) => args
                        .iter()
                        .map(|arg| self.convert_in(arg, scope))
                        .collect::<Result<Vec<_>, _>>()?,
                    None => Vec::new(),
                };
                Ok(ResolvedType::Reference(ResolvedReferenceType::new(
                    item,
                    decl.qualified_name(self),
                    type_args,
                )))
            }
        }
    }

    /// Resolve every lazy layer in `ty`, converting each at most once.
    pub fn force(&self, ty: &ResolvedType) -> Result<ResolvedType, ResolveError> {
        match ty {
            ResolvedType::Lazy(lazy) => {
                let resolved =
                    lazy.get_or_try_init(|source, context| self.convert(source, context))?;
                self.force(resolved)
            }
            ResolvedType::Reference(reference) => {
                Ok(ResolvedType::Reference(self.force_reference(reference)?))
            }
            ResolvedType::Array(component) => {
                Ok(ResolvedType::Array(Box::new(self.force(component)?)))
            }
            ResolvedType::Wildcard(ResolvedWildcard::Extends(bound)) => Ok(ResolvedType::Wildcard(
                ResolvedWildcard::Extends(Box::new(self.force(bound)?)),
            )),
            ResolvedType::Wildcard(ResolvedWildcard::Super(bound)) => Ok(ResolvedType::Wildcard(
                ResolvedWildcard::Super(Box::new(self.force(bound)?)),
            )),
            ResolvedType::Primitive(_)
            | ResolvedType::Void
            | ResolvedType::Null
            | ResolvedType::TypeVariable(_)
            | ResolvedType::Wildcard(ResolvedWildcard::Unbounded) => Ok(ty.clone()),
        }
    }

    pub(crate) fn force_reference(
        &self,
        reference: &ResolvedReferenceType,
    ) -> Result<ResolvedReferenceType, ResolveError> {
        let type_args = reference
            .type_arguments()
            .iter()
            .map(|arg| self.force(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResolvedReferenceType::new(
            reference.type_declaration(),
            reference.qualified_name().clone(),
            type_args,
        ))
    }

    /// Resolve a supertype clause written on `context`.
    ///
    /// The name is looked up from inside the declaration; a scoped name that
    /// fails as written is retried as `Scope.Name`. Type arguments are kept
    /// lazy so that self-referential clauses (`Comparable<Pair>` on `Pair`)
    /// resolve without recursion.
    pub fn to_reference_type(
        &self,
        context: ItemId,
        ty: &ClassOrInterfaceType,
    ) -> Result<ResolvedReferenceType, ResolveError> {
        let decl = self.declaration_of(context);
        let mut solved = decl.solve_type(self, &ty.qualified_text())?;
        if !solved.is_solved() {
            if let Some(scope) = &ty.scope {
                solved = decl.solve_type(self, &format!("{}.{}", scope.name, ty.name))?;
            }
        }
        let target = match solved {
            SymbolReference::Solved(target) => target,
            SymbolReference::Unsolved => {
                return Err(ResolveError::UnresolvedAncestor(ty.name.to_string()))
            }
        };
        let Some(item) = target.item() else {
            // A type variable cannot be a supertype.
            return Err(ResolveError::UnresolvedAncestor(ty.name.to_string()));
        };
        let name = target.qualified_name(self);
        Ok(match &ty.type_args {
            Some(args) => ResolvedReferenceType::new(
                item,
                name,
                args.iter()
                    .map(|arg| ResolvedType::Lazy(LazyType::new(arg.clone(), context)))
                    .collect(),
            ),
            None => ResolvedReferenceType::raw(item, name),
        })
    }

    pub(crate) fn object_type(&self) -> ResolvedReferenceType {
        self.well_known_reference(self.well_known.object)
    }

    pub(crate) fn record_type(&self) -> ResolvedReferenceType {
        self.well_known_reference(self.well_known.record)
    }

    fn well_known_reference(&self, item: ItemId) -> ResolvedReferenceType {
        ResolvedReferenceType::raw(item, TypeAdapter::qualified_name_in(self.tree, item))
    }

    /// A configured root type (such as the enum base) used as an implicit supertype.
    pub(crate) fn configured_type(
        &self,
        qualified_name: &str,
        type_args: Vec<ResolvedType>,
    ) -> Result<ResolvedReferenceType, ResolveError> {
        match self.solver.try_solve_type(qualified_name) {
            SymbolReference::Solved(item) => {
                let decl = self.declaration(item)?;
                Ok(ResolvedReferenceType::new(
                    item,
                    decl.qualified_name(self),
                    type_args,
                ))
            }
            SymbolReference::Unsolved => {
                Err(ResolveError::UnresolvedAncestor(qualified_name.to_string()))
            }
        }
    }

    pub(crate) fn cached_ancestors(
        &self,
        item: ItemId,
        accept_incomplete: bool,
        compute: impl FnOnce() -> Result<Vec<ResolvedReferenceType>, ResolveError>,
    ) -> Result<Vec<ResolvedReferenceType>, ResolveError> {
        if let Some(hit) = self.ancestors.borrow().get(&(item, accept_incomplete)) {
            return Ok(hit.clone());
        }
        let computed = compute()?;
        self.ancestors
            .borrow_mut()
            .insert((item, accept_incomplete), computed.clone());
        Ok(computed)
    }

    pub(crate) fn cached_fields(&self, item: ItemId) -> Option<Vec<FieldDeclaration>> {
        self.fields.borrow().get(&item).cloned()
    }

    pub(crate) fn cache_fields(&self, item: ItemId, fields: Vec<FieldDeclaration>) {
        self.fields.borrow_mut().insert(item, fields);
    }

    /// Number of field expansions cut so far. A result computed while this
    /// changed depends on where the cycle was entered and must not be cached.
    pub(crate) fn field_cuts(&self) -> u64 {
        self.field_cuts.get()
    }

    /// Mark `item` as having its inherited fields collected. Returns `None`
    /// when it already is, i.e. the hierarchy loops back onto it.
    pub(crate) fn begin_field_expansion(&self, item: ItemId) -> Option<ExpansionGuard<'_>> {
        if !self.expanding.borrow_mut().insert(item) {
            self.field_cuts.set(self.field_cuts.get() + 1);
            return None;
        }
        Some(ExpansionGuard {
            expanding: &self.expanding,
            item,
        })
    }
}

pub(crate) struct ExpansionGuard<'r> {
    expanding: &'r RefCell<HashSet<ItemId>>,
    item: ItemId,
}

impl Drop for ExpansionGuard<'_> {
    fn drop(&mut self) {
        self.expanding.borrow_mut().remove(&self.item);
    }
}

fn well_known_type(
    tree: &ItemTree,
    solver: &dyn TypeSolver,
    qualified_name: &str,
) -> Result<ItemId, ResolveError> {
    let item = solver
        .try_solve_type(qualified_name)
        .into_option()
        .ok_or_else(|| ResolveError::MissingWellKnownType(qualified_name.to_string()))?;
    TypeAdapter::new(tree, item)?;
    Ok(item)
}
