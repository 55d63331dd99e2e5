/// Result of a lookup where "not found" is an expected outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolReference<T> {
    Solved(T),
    Unsolved,
}

impl<T> SymbolReference<T> {
    #[inline]
    pub fn solved(value: T) -> Self {
        SymbolReference::Solved(value)
    }

    #[inline]
    pub fn unsolved() -> Self {
        SymbolReference::Unsolved
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, SymbolReference::Solved(_))
    }

    pub fn corresponding_declaration(&self) -> Option<&T> {
        match self {
            SymbolReference::Solved(value) => Some(value),
            SymbolReference::Unsolved => None,
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            SymbolReference::Solved(value) => Some(value),
            SymbolReference::Unsolved => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SymbolReference<U> {
        match self {
            SymbolReference::Solved(value) => SymbolReference::Solved(f(value)),
            SymbolReference::Unsolved => SymbolReference::Unsolved,
        }
    }
}

impl<T> From<Option<T>> for SymbolReference<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => SymbolReference::Solved(value),
            None => SymbolReference::Unsolved,
        }
    }
}
