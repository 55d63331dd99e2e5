use std::fmt;
use std::rc::Rc;

use nova_hir::{ItemId, TypeRef};
use once_cell::unsync::OnceCell;

use crate::ResolvedType;

/// A type whose conversion from syntax is deferred until first use.
///
/// The source type is bound to the declaration whose scope it must be resolved
/// in. The converted value is memoised, so clones share one conversion.
#[derive(Clone)]
pub struct LazyType(Rc<LazyInner>);

struct LazyInner {
    source: TypeRef,
    context: ItemId,
    resolved: OnceCell<ResolvedType>,
}

impl LazyType {
    pub fn new(source: TypeRef, context: ItemId) -> Self {
        LazyType(Rc::new(LazyInner {
            source,
            context,
            resolved: OnceCell::new(),
        }))
    }

    pub fn source(&self) -> &TypeRef {
        &self.0.source
    }

    /// The declaration whose scope `source` is resolved in.
    pub fn context(&self) -> ItemId {
        self.0.context
    }

    /// The converted type, if it has been forced already.
    pub fn get(&self) -> Option<&ResolvedType> {
        self.0.resolved.get()
    }

    pub fn get_or_try_init<E>(
        &self,
        convert: impl FnOnce(&TypeRef, ItemId) -> Result<ResolvedType, E>,
    ) -> Result<&ResolvedType, E> {
        self.0
            .resolved
            .get_or_try_init(|| convert(&self.0.source, self.0.context))
    }
}

impl PartialEq for LazyType {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
            || (self.0.context == other.0.context && self.0.source == other.0.source)
    }
}

impl fmt::Debug for LazyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(resolved) => f.debug_tuple("Lazy").field(resolved).finish(),
            None => write!(f, "Lazy({} in {:?})", self.0.source, self.0.context),
        }
    }
}
