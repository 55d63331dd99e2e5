//! Lexical contexts and the lookups that walk outward through them.

use nova_hir::{ImportDecl, ItemId, ItemParent, ItemTree, UnitId};
use nova_types::{ResolvedType, SymbolReference};

use crate::decl::{TypeAdapter, TypeDeclaration};
use crate::members::{self, FieldDeclaration, MethodDeclaration, MethodUsage};
use crate::{ResolveError, SymbolResolver, TRACE_TARGET};

/// A scope names are looked up in. Each context knows its enclosing one; a
/// compilation unit is the outermost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    CompilationUnit(UnitId),
    TypeBody(ItemId),
}

impl Context {
    pub fn parent(self, tree: &ItemTree) -> Option<Context> {
        match self {
            Context::CompilationUnit(_) => None,
            Context::TypeBody(item) => Some(match tree.item(item).parent {
                ItemParent::Unit(unit) => Context::CompilationUnit(unit),
                ItemParent::Type(outer) => Context::TypeBody(outer),
            }),
        }
    }

    pub fn solve_type(
        self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> Result<SymbolReference<TypeDeclaration>, ResolveError> {
        match self {
            Context::TypeBody(item) => db.declaration_of(item).solve_type(db, name),
            Context::CompilationUnit(unit) => solve_in_unit(db, unit, name),
        }
    }

    /// Find a field named `name`, own and inherited fields first, then the
    /// enclosing contexts.
    pub fn solve_symbol(
        self,
        db: &SymbolResolver<'_>,
        name: &str,
    ) -> Result<SymbolReference<FieldDeclaration>, ResolveError> {
        let Context::TypeBody(item) = self else {
            return Ok(SymbolReference::Unsolved);
        };
        let fields = db.declaration_of(item).all_fields(db)?;
        if let Some(field) = fields.into_iter().find(|field| field.name() == name) {
            return Ok(SymbolReference::solved(field));
        }
        match self.parent(db.tree()) {
            Some(parent) => parent.solve_symbol(db, name),
            None => Ok(SymbolReference::Unsolved),
        }
    }

    pub fn solve_method(
        self,
        db: &SymbolResolver<'_>,
        name: &str,
        arg_types: &[ResolvedType],
        static_only: bool,
    ) -> Result<SymbolReference<MethodDeclaration>, ResolveError> {
        let Context::TypeBody(item) = self else {
            return Ok(SymbolReference::Unsolved);
        };
        let decl = db.declaration_of(item);
        if let Some(found) = members::find_method(db, decl, name, arg_types, static_only)? {
            return Ok(SymbolReference::solved(found.method));
        }
        match self.parent(db.tree()) {
            Some(parent) => {
                tracing::trace!(
                    target: TRACE_TARGET,
                    name,
                    "method not found; trying enclosing context"
                );
                parent.solve_method(db, name, arg_types, static_only)
            }
            None => Ok(SymbolReference::Unsolved),
        }
    }

    /// Like [`Context::solve_method`], but returns the signature as seen
    /// through the receiver chain that led to the method.
    pub fn solve_method_as_usage(
        self,
        db: &SymbolResolver<'_>,
        name: &str,
        arg_types: &[ResolvedType],
    ) -> Result<Option<MethodUsage>, ResolveError> {
        let Context::TypeBody(item) = self else {
            return Ok(None);
        };
        let decl = db.declaration_of(item);
        if let Some(found) = members::find_method(db, decl, name, arg_types, false)? {
            return found.into_usage(db).map(Some);
        }
        match self.parent(db.tree()) {
            Some(parent) => parent.solve_method_as_usage(db, name, arg_types),
            None => Ok(None),
        }
    }
}

/// Lookup order in a compilation unit: its own top-level types (and members
/// reached through them), single-type imports, the unit's package, on-demand
/// imports, `java.lang`, and finally `name` as a fully qualified name.
fn solve_in_unit(
    db: &SymbolResolver<'_>,
    unit: UnitId,
    name: &str,
) -> Result<SymbolReference<TypeDeclaration>, ResolveError> {
    let tree = db.tree();
    let data = tree.unit(unit);
    let (head, rest) = match name.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (name, None),
    };

    for &item in &data.types {
        if tree.item(item).name != head {
            continue;
        }
        let found = match rest {
            Some(rest) => TypeAdapter::member_type_path(tree, item, rest),
            None => Some(item),
        };
        if let Some(found) = found {
            return Ok(SymbolReference::solved(db.declaration_of(found)));
        }
    }

    for import in &data.imports {
        let ImportDecl::TypeSingle { ty } = import else {
            continue;
        };
        if !ty.last().is_some_and(|last| *last == head) {
            continue;
        }
        let target = match rest {
            Some(rest) => format!("{}.{rest}", ty.to_dotted()),
            None => ty.to_dotted(),
        };
        let solved = db.solve_type(&target)?;
        if solved.is_solved() {
            return Ok(solved);
        }
    }

    let solved = db.solve_type(&data.package.qualify(name))?;
    if solved.is_solved() {
        return Ok(solved);
    }

    for import in &data.imports {
        let ImportDecl::TypeStar { package } = import else {
            continue;
        };
        let solved = db.solve_type(&package.qualify(name))?;
        if solved.is_solved() {
            return Ok(solved);
        }
    }

    let solved = db.solve_type(&format!("java.lang.{name}"))?;
    if solved.is_solved() {
        return Ok(solved);
    }

    db.solve_type(name)
}
