//! The type lookup service consulted for names a declaration cannot resolve
//! from its own lexical scope.

use std::collections::HashMap;

use nova_hir::{ItemId, ItemTree};
use nova_types::SymbolReference;

use crate::decl::TypeAdapter;
use crate::ResolveError;

/// Looks up type declarations by qualified name (`java.util.Map.Entry`).
///
/// Returned ids must belong to the [`ItemTree`] the resolver was built over.
pub trait TypeSolver {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<ItemId>;

    /// Direct variant for types that must exist.
    fn solve_type(&self, qualified_name: &str) -> Result<ItemId, ResolveError> {
        self.try_solve_type(qualified_name)
            .into_option()
            .ok_or_else(|| ResolveError::UnresolvedSymbol(qualified_name.to_string()))
    }
}

/// Indexes every type declaration of an [`ItemTree`], nested ones included,
/// by qualified name.
#[derive(Debug, Default, Clone)]
pub struct MemoryTypeSolver {
    types: HashMap<String, ItemId>,
}

impl MemoryTypeSolver {
    pub fn new(tree: &ItemTree) -> Self {
        let mut types = HashMap::with_capacity(tree.len());
        for (id, _) in tree.items() {
            let name = TypeAdapter::qualified_name_in(tree, id);
            types.insert(name.as_str().to_string(), id);
        }
        Self { types }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeSolver for MemoryTypeSolver {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<ItemId> {
        self.types.get(qualified_name).copied().into()
    }
}

/// Chains several solvers; the first one that resolves a name wins.
#[derive(Default)]
pub struct CombinedTypeSolver<'a> {
    solvers: Vec<&'a dyn TypeSolver>,
}

impl<'a> CombinedTypeSolver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, solver: &'a dyn TypeSolver) -> Self {
        self.solvers.push(solver);
        self
    }
}

impl TypeSolver for CombinedTypeSolver<'_> {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<ItemId> {
        self.solvers
            .iter()
            .map(|solver| solver.try_solve_type(qualified_name))
            .find(SymbolReference::is_solved)
            .unwrap_or(SymbolReference::Unsolved)
    }
}
