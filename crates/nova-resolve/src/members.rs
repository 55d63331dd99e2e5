//! Fields, methods and constructors of type declarations.

use std::collections::HashSet;

use nova_core::Name;
use nova_hir::{AccessSpecifier, ItemId, TypeRef};
use nova_types::{LazyType, ResolvedReferenceType, ResolvedType, SymbolReference, TypeParamOwner};

use crate::assignability::is_assignable;
use crate::decl::{DeclarationKind, TypeDeclaration, TypeParameterDeclaration};
use crate::resolver::TypeScope;
use crate::{ResolveError, SymbolResolver, TRACE_TARGET};

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDeclaration {
    name: Name,
    ty: ResolvedType,
    access: AccessSpecifier,
    is_static: bool,
    is_volatile: bool,
    declaring_type: ItemId,
    is_derived: bool,
}

impl FieldDeclaration {
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The field's type, as seen from the declaration the field was looked up on.
    ///
    /// A type that does not resolve is kept as an unforced
    /// [`ResolvedType::Lazy`]; [`FieldDeclaration::resolved_type`] reports why.
    pub fn ty(&self) -> &ResolvedType {
        &self.ty
    }

    /// The field's type with every lazy layer forced.
    pub fn resolved_type(&self, db: &SymbolResolver<'_>) -> Result<ResolvedType, ResolveError> {
        db.force(&self.ty)
    }

    pub fn access_specifier(&self) -> AccessSpecifier {
        self.access
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_volatile(&self) -> bool {
        self.is_volatile
    }

    pub fn declaring_type(&self) -> ItemId {
        self.declaring_type
    }

    /// `true` for fields induced by a record header.
    pub fn is_derived(&self) -> bool {
        self.is_derived
    }

    fn with_type(mut self, ty: ResolvedType) -> Self {
        self.ty = ty;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum MethodKind {
    Declared(u32),
    /// The implicit accessor of a record component.
    RecordAccessor(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MethodDeclaration {
    owner: ItemId,
    kind: MethodKind,
}

impl MethodDeclaration {
    pub(crate) fn declared(owner: ItemId, index: u32) -> Self {
        Self {
            owner,
            kind: MethodKind::Declared(index),
        }
    }

    pub(crate) fn record_accessor(owner: ItemId, component: u32) -> Self {
        Self {
            owner,
            kind: MethodKind::RecordAccessor(component),
        }
    }

    pub fn declaring_type(self) -> ItemId {
        self.owner
    }

    pub fn is_record_accessor(self) -> bool {
        matches!(self.kind, MethodKind::RecordAccessor(_))
    }

    pub fn name<'a>(self, db: &SymbolResolver<'a>) -> &'a Name {
        let item = db.tree().item(self.owner);
        match self.kind {
            MethodKind::Declared(index) => &item.methods[index as usize].name,
            MethodKind::RecordAccessor(index) => &item.components[index as usize].name,
        }
    }

    pub fn is_static(self, db: &SymbolResolver<'_>) -> bool {
        match self.kind {
            MethodKind::Declared(index) => {
                db.tree().item(self.owner).methods[index as usize].is_static
            }
            MethodKind::RecordAccessor(_) => false,
        }
    }

    pub fn access_specifier(self, db: &SymbolResolver<'_>) -> AccessSpecifier {
        match self.kind {
            MethodKind::Declared(index) => {
                db.tree().item(self.owner).methods[index as usize].access
            }
            MethodKind::RecordAccessor(_) => AccessSpecifier::Public,
        }
    }

    pub fn param_count(self, db: &SymbolResolver<'_>) -> usize {
        match self.kind {
            MethodKind::Declared(index) => {
                db.tree().item(self.owner).methods[index as usize].params.len()
            }
            MethodKind::RecordAccessor(_) => 0,
        }
    }

    pub fn type_parameters(self, db: &SymbolResolver<'_>) -> Vec<TypeParameterDeclaration> {
        let MethodKind::Declared(index) = self.kind else {
            return Vec::new();
        };
        let owner = TypeParamOwner::Method {
            owner: self.owner,
            index,
        };
        (0..db.tree().item(self.owner).methods[index as usize].type_params.len())
            .map(|param| TypeParameterDeclaration::new(owner, param as u32))
            .collect()
    }

    pub fn param_types(self, db: &SymbolResolver<'_>) -> Result<Vec<ResolvedType>, ResolveError> {
        match self.kind {
            MethodKind::Declared(index) => {
                let scope = TypeScope::method(self.owner, index);
                db.tree().item(self.owner).methods[index as usize]
                    .params
                    .iter()
                    .map(|param| db.convert_in(&param.ty, scope))
                    .collect()
            }
            MethodKind::RecordAccessor(_) => Ok(Vec::new()),
        }
    }

    pub fn return_type(self, db: &SymbolResolver<'_>) -> Result<ResolvedType, ResolveError> {
        let item = db.tree().item(self.owner);
        match self.kind {
            MethodKind::Declared(index) => db.convert_in(
                &item.methods[index as usize].return_ty,
                TypeScope::method(self.owner, index),
            ),
            MethodKind::RecordAccessor(index) => {
                db.convert(&item.components[index as usize].ty, self.owner)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstructorDeclaration {
    owner: ItemId,
    index: u32,
}

impl ConstructorDeclaration {
    pub fn declaring_type(self) -> ItemId {
        self.owner
    }

    pub fn access_specifier(self, db: &SymbolResolver<'_>) -> AccessSpecifier {
        db.tree().item(self.owner).constructors[self.index as usize].access
    }

    pub fn param_types(self, db: &SymbolResolver<'_>) -> Result<Vec<ResolvedType>, ResolveError> {
        db.tree().item(self.owner).constructors[self.index as usize]
            .params
            .iter()
            .map(|param| db.convert(&param.ty, self.owner))
            .collect()
    }
}

/// A method together with its signature as seen from the call site's receiver.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodUsage {
    declaration: MethodDeclaration,
    param_types: Vec<ResolvedType>,
    return_type: ResolvedType,
}

impl MethodUsage {
    pub fn declaration(&self) -> MethodDeclaration {
        self.declaration
    }

    pub fn param_types(&self) -> &[ResolvedType] {
        &self.param_types
    }

    pub fn return_type(&self) -> &ResolvedType {
        &self.return_type
    }
}

/// Member queries shared by every class-like declaration kind.
pub trait MemberOps: DeclarationKind {
    /// Own fields followed by the fields of each resolvable ancestor, with the
    /// ancestor's type arguments applied. Unresolvable ancestors contribute
    /// nothing.
    fn all_fields(&self, db: &SymbolResolver<'_>) -> Result<Vec<FieldDeclaration>, ResolveError> {
        let item = self.item();
        if let Some(fields) = db.cached_fields(item) {
            return Ok(fields);
        }
        let Some(_guard) = db.begin_field_expansion(item) else {
            tracing::warn!(
                target: TRACE_TARGET,
                ty = %self.adapter().qualified_name(db.tree()),
                "cyclic type hierarchy; inherited fields are cut at the cycle"
            );
            return self.declared_fields(db);
        };
        let cuts = db.field_cuts();

        let mut fields = self.declared_fields(db)?;
        for ancestor in self.to_declaration().ancestors(db, true)? {
            let edge = force_edge(db, &ancestor)?;
            let inherited = db.declaration_of(edge.type_declaration()).all_fields(db)?;
            fields.extend(inherited.into_iter().map(|field| {
                let ty = edge.use_this_type_parameters_on_the_given_type(field.ty());
                field.with_type(ty)
            }));
        }
        if db.field_cuts() == cuts {
            db.cache_fields(item, fields.clone());
        }
        Ok(fields)
    }

    fn field(
        &self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> Result<SymbolReference<FieldDeclaration>, ResolveError> {
        Ok(self
            .all_fields(db)?
            .into_iter()
            .find(|field| field.name() == name)
            .into())
    }

    fn has_field(&self, db: &SymbolResolver<'_>, name: &str) -> Result<bool, ResolveError> {
        Ok(self.field(db, name)?.is_solved())
    }

    /// Methods written in the declaration body. Record accessors are implicit
    /// and only surface through method lookup.
    fn declared_methods(&self, db: &SymbolResolver<'_>) -> HashSet<MethodDeclaration> {
        let item = self.item();
        (0..db.tree().item(item).methods.len())
            .map(|index| MethodDeclaration::declared(item, index as u32))
            .collect()
    }
}

impl<T: DeclarationKind> MemberOps for T {}

/// Force the type arguments of an ancestor edge so they can be substituted.
/// An argument that does not resolve leaves the edge as written.
pub(crate) fn force_edge(
    db: &SymbolResolver<'_>,
    ancestor: &ResolvedReferenceType,
) -> Result<ResolvedReferenceType, ResolveError> {
    match db.force_reference(ancestor) {
        Ok(edge) => Ok(edge),
        Err(err) if err.is_unresolved() => {
            tracing::debug!(
                target: TRACE_TARGET,
                ancestor = %ancestor.qualified_name(),
                error = %err,
                "keeping unresolved type arguments unforced"
            );
            Ok(ancestor.clone())
        }
        Err(err) => Err(err),
    }
}

/// Convert a field or component type. One that does not resolve stays lazy so
/// the field itself is still reported.
fn member_type(
    db: &SymbolResolver<'_>,
    ty: &TypeRef,
    item: ItemId,
) -> Result<ResolvedType, ResolveError> {
    match db.convert(ty, item) {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.is_unresolved() => {
            tracing::debug!(
                target: TRACE_TARGET,
                ty = %ty,
                error = %err,
                "leaving member type unresolved"
            );
            Ok(ResolvedType::Lazy(LazyType::new(ty.clone(), item)))
        }
        Err(err) => Err(err),
    }
}

pub(crate) fn body_fields(
    db: &SymbolResolver<'_>,
    item: ItemId,
    interface_body: bool,
) -> Result<Vec<FieldDeclaration>, ResolveError> {
    db.tree()
        .item(item)
        .fields
        .iter()
        .map(|field| {
            Ok(FieldDeclaration {
                name: field.name.clone(),
                ty: member_type(db, &field.ty, item)?,
                access: if interface_body {
                    AccessSpecifier::Public
                } else {
                    field.access
                },
                is_static: interface_body || field.is_static,
                is_volatile: field.is_volatile,
                declaring_type: item,
                is_derived: false,
            })
        })
        .collect()
}

pub(crate) fn component_fields(
    db: &SymbolResolver<'_>,
    item: ItemId,
) -> Result<Vec<FieldDeclaration>, ResolveError> {
    db.tree()
        .item(item)
        .components
        .iter()
        .map(|component| {
            Ok(FieldDeclaration {
                name: component.name.clone(),
                ty: member_type(db, &component.ty, item)?,
                access: AccessSpecifier::Private,
                is_static: false,
                is_volatile: false,
                declaring_type: item,
                is_derived: true,
            })
        })
        .collect()
}

pub(crate) fn enum_constant_fields(db: &SymbolResolver<'_>, item: ItemId) -> Vec<FieldDeclaration> {
    let this = ResolvedType::Reference(ResolvedReferenceType::raw(
        item,
        db.declaration_of(item).qualified_name(db),
    ));
    db.tree()
        .item(item)
        .enum_constants
        .iter()
        .map(|constant| FieldDeclaration {
            name: constant.name.clone(),
            ty: this.clone(),
            access: AccessSpecifier::Public,
            is_static: true,
            is_volatile: false,
            declaring_type: item,
            is_derived: false,
        })
        .collect()
}

pub(crate) fn declared_constructors(
    db: &SymbolResolver<'_>,
    item: ItemId,
) -> Vec<ConstructorDeclaration> {
    (0..db.tree().item(item).constructors.len())
        .map(|index| ConstructorDeclaration {
            owner: item,
            index: index as u32,
        })
        .collect()
}

/// A method found by [`find_method`], with the ancestor edge it was reached
/// through (`None` when declared on the searched type itself).
pub(crate) struct MethodMatch {
    pub(crate) method: MethodDeclaration,
    view: Option<ResolvedReferenceType>,
}

impl MethodMatch {
    pub(crate) fn into_usage(self, db: &SymbolResolver<'_>) -> Result<MethodUsage, ResolveError> {
        let param_types = self
            .method
            .param_types(db)?
            .iter()
            .map(|param| apply_view(self.view.as_ref(), param))
            .collect();
        let return_type = apply_view(self.view.as_ref(), &self.method.return_type(db)?);
        Ok(MethodUsage {
            declaration: self.method,
            param_types,
            return_type,
        })
    }
}

fn apply_view(view: Option<&ResolvedReferenceType>, ty: &ResolvedType) -> ResolvedType {
    match view {
        Some(view) => view.use_this_type_parameters_on_the_given_type(ty),
        None => ty.clone(),
    }
}

/// Search `decl` and then its ancestors (depth-first, in ancestor order) for
/// the most specific applicable method named `name`.
pub(crate) fn find_method(
    db: &SymbolResolver<'_>,
    decl: TypeDeclaration,
    name: &str,
    arg_types: &[ResolvedType],
    static_only: bool,
) -> Result<Option<MethodMatch>, ResolveError> {
    let mut visited = HashSet::new();
    find_method_in(db, decl, None, name, arg_types, static_only, &mut visited)
}

fn find_method_in(
    db: &SymbolResolver<'_>,
    decl: TypeDeclaration,
    view: Option<ResolvedReferenceType>,
    name: &str,
    arg_types: &[ResolvedType],
    static_only: bool,
    visited: &mut HashSet<ItemId>,
) -> Result<Option<MethodMatch>, ResolveError> {
    let Some(item) = decl.item() else {
        return Ok(None);
    };
    if !visited.insert(item) {
        return Ok(None);
    }

    let data = db.tree().item(item);
    let mut candidates = Vec::new();
    for (index, method) in data.methods.iter().enumerate() {
        if method.name != name
            || method.params.len() != arg_types.len()
            || (static_only && !method.is_static)
        {
            continue;
        }
        let declaration = MethodDeclaration::declared(item, index as u32);
        let params = match declaration.param_types(db) {
            Ok(params) => params,
            Err(err) if err.is_unresolved() => {
                tracing::debug!(
                    target: TRACE_TARGET,
                    method = %method.name,
                    error = %err,
                    "skipping overload with unresolved parameter types"
                );
                continue;
            }
            Err(err) => return Err(err),
        };
        let params: Vec<_> = params
            .iter()
            .map(|param| apply_view(view.as_ref(), param))
            .collect();
        if is_applicable(db, arg_types, &params)? {
            candidates.push((declaration, params));
        }
    }

    // An explicit zero-argument method shadows the implicit accessor.
    if decl.is_record() && arg_types.is_empty() && !static_only {
        let explicit = data
            .methods
            .iter()
            .any(|method| method.name == name && method.params.is_empty());
        let component = data.components.iter().position(|c| c.name == name);
        if let (false, Some(component)) = (explicit, component) {
            candidates.push((
                MethodDeclaration::record_accessor(item, component as u32),
                Vec::new(),
            ));
        }
    }

    if let Some(method) = most_specific(db, &candidates)? {
        return Ok(Some(MethodMatch { method, view }));
    }

    for ancestor in decl.ancestors(db, true)? {
        let edge = force_edge(db, &ancestor)?;
        let edge = match &view {
            Some(view) => edge.viewed_through(view),
            None => edge,
        };
        let next = db.declaration_of(edge.type_declaration());
        if let Some(found) =
            find_method_in(db, next, Some(edge), name, arg_types, static_only, visited)?
        {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn is_applicable(
    db: &SymbolResolver<'_>,
    arg_types: &[ResolvedType],
    params: &[ResolvedType],
) -> Result<bool, ResolveError> {
    for (arg, param) in arg_types.iter().zip(params) {
        if !is_assignable(db, arg, param)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// The candidate whose parameters are each assignable to every other
/// candidate's; the first candidate when none is strictly more specific.
fn most_specific(
    db: &SymbolResolver<'_>,
    candidates: &[(MethodDeclaration, Vec<ResolvedType>)],
) -> Result<Option<MethodDeclaration>, ResolveError> {
    if candidates.len() <= 1 {
        return Ok(candidates.first().map(|(method, _)| *method));
    }
    for (method, params) in candidates {
        let mut more_specific = true;
        for (_, other) in candidates {
            if !is_applicable(db, params, other)? {
                more_specific = false;
                break;
            }
        }
        if more_specific {
            return Ok(Some(*method));
        }
    }
    Ok(candidates.first().map(|(method, _)| *method))
}
