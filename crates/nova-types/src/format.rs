//! Java-like rendering of resolved types (`java.util.List<java.lang.String>`).

use std::fmt;

use crate::{ResolvedReferenceType, ResolvedType, ResolvedWildcard};

impl fmt::Display for ResolvedReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name().as_str())?;
        let args = self.type_arguments();
        if args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (idx, arg) in args.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Primitive(p) => f.write_str(p.keyword()),
            ResolvedType::Void => f.write_str("void"),
            ResolvedType::Null => f.write_str("null"),
            ResolvedType::Reference(reference) => write!(f, "{reference}"),
            ResolvedType::TypeVariable(tv) => f.write_str(tv.name.as_str()),
            ResolvedType::Array(component) => write!(f, "{component}[]"),
            ResolvedType::Wildcard(ResolvedWildcard::Unbounded) => f.write_str("?"),
            ResolvedType::Wildcard(ResolvedWildcard::Extends(bound)) => {
                write!(f, "? extends {bound}")
            }
            ResolvedType::Wildcard(ResolvedWildcard::Super(bound)) => write!(f, "? super {bound}"),
            ResolvedType::Lazy(lazy) => match lazy.get() {
                Some(resolved) => write!(f, "{resolved}"),
                None => write!(f, "{}", lazy.source()),
            },
        }
    }
}
