use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A named type, method or field could not be found.
    #[error("unresolved symbol `{0}`")]
    UnresolvedSymbol(String),
    /// A superclass or superinterface reference could not be resolved.
    #[error("unresolved ancestor `{0}`")]
    UnresolvedAncestor(String),
    /// The operation has no meaning for this kind of declaration.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// The declaration tree is malformed; never swallow this.
    #[error("invariant violated: {0}")]
    ProgrammingInvariant(String),
    /// A root type required to initialise the resolver is not known to the type solver.
    #[error("well-known type `{0}` is not available from the type solver")]
    MissingWellKnownType(String),
}

impl ResolveError {
    /// Whether an incomplete-ancestor policy may skip past this error.
    pub(crate) fn is_unresolved(&self) -> bool {
        matches!(
            self,
            ResolveError::UnresolvedSymbol(_) | ResolveError::UnresolvedAncestor(_)
        )
    }
}
