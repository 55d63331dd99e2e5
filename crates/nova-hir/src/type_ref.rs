//! Types as written in source, before resolution.

use std::fmt;

use nova_core::Name;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Widening primitive conversion (JLS 5.1.2), including identity.
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        use PrimitiveType::*;

        if self == target {
            return true;
        }
        matches!(
            (self, target),
            (Byte, Short | Int | Long | Float | Double)
                | (Short, Int | Long | Float | Double)
                | (Char, Int | Long | Float | Double)
                | (Int, Long | Float | Double)
                | (Long, Float | Double)
                | (Float, Double)
        )
    }
}

/// A class or interface type reference, possibly scoped (`Map.Entry<K, V>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassOrInterfaceType {
    pub scope: Option<Box<ClassOrInterfaceType>>,
    pub name: Name,
    /// `None` for a raw reference, `Some(vec![])` for the diamond form.
    pub type_args: Option<Vec<TypeRef>>,
}

impl ClassOrInterfaceType {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            scope: None,
            name: name.into(),
            type_args: None,
        }
    }

    /// Build a (possibly scoped) reference from dotted text, e.g. `java.util.Map.Entry`.
    pub fn parse(dotted: &str) -> Self {
        let mut segments = dotted
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty());
        let first = segments.next().unwrap_or_default();
        let mut ty = ClassOrInterfaceType::new(first);
        for segment in segments {
            ty = ClassOrInterfaceType {
                scope: Some(Box::new(ty)),
                name: Name::from(segment),
                type_args: None,
            };
        }
        ty
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<TypeRef>) -> Self {
        self.type_args = Some(args);
        self
    }

    /// The dotted name as written, without type arguments.
    pub fn qualified_text(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}.{}", scope.qualified_text(), self.name),
            None => self.name.to_string(),
        }
    }
}

impl fmt::Display for ClassOrInterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scope) = &self.scope {
            write!(f, "{scope}.")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(args) = &self.type_args {
            f.write_str("<")?;
            for (idx, arg) in args.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WildcardRef {
    Unbounded,
    Extends(Box<TypeRef>),
    Super(Box<TypeRef>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Void,
    Class(ClassOrInterfaceType),
    Array(Box<TypeRef>),
    Wildcard(WildcardRef),
}

impl TypeRef {
    pub fn int() -> Self {
        TypeRef::Primitive(PrimitiveType::Int)
    }

    pub fn boolean() -> Self {
        TypeRef::Primitive(PrimitiveType::Boolean)
    }

    /// A raw class reference from dotted text.
    pub fn named(dotted: &str) -> Self {
        TypeRef::Class(ClassOrInterfaceType::parse(dotted))
    }

    /// A parameterized class reference (`generic("List", vec![TypeRef::named("String")])`).
    pub fn generic(dotted: &str, args: Vec<TypeRef>) -> Self {
        TypeRef::Class(ClassOrInterfaceType::parse(dotted).with_args(args))
    }

    pub fn array_of(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.keyword()),
            TypeRef::Void => f.write_str("void"),
            TypeRef::Class(ty) => write!(f, "{ty}"),
            TypeRef::Array(component) => write!(f, "{component}[]"),
            TypeRef::Wildcard(WildcardRef::Unbounded) => f.write_str("?"),
            TypeRef::Wildcard(WildcardRef::Extends(bound)) => write!(f, "? extends {bound}"),
            TypeRef::Wildcard(WildcardRef::Super(bound)) => write!(f, "? super {bound}"),
        }
    }
}
