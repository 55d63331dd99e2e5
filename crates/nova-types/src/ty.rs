use nova_core::{Name, TypeName};
use nova_hir::{ItemId, PrimitiveType};

use crate::LazyType;

/// Declaration that introduces a type parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeParamOwner {
    Type(ItemId),
    /// A generic method, identified by its owner and its index in the owner's method list.
    Method { owner: ItemId, index: u32 },
}

/// A use of a type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeVar {
    pub owner: TypeParamOwner,
    pub index: u32,
    pub name: Name,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedWildcard {
    Unbounded,
    Extends(Box<ResolvedType>),
    Super(Box<ResolvedType>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedType {
    Primitive(PrimitiveType),
    Void,
    Null,
    Reference(ResolvedReferenceType),
    TypeVariable(TypeVar),
    Array(Box<ResolvedType>),
    Wildcard(ResolvedWildcard),
    Lazy(LazyType),
}

impl ResolvedType {
    pub fn int() -> Self {
        ResolvedType::Primitive(PrimitiveType::Int)
    }

    pub fn boolean() -> Self {
        ResolvedType::Primitive(PrimitiveType::Boolean)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ResolvedType::Primitive(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ResolvedType::Null)
    }

    /// `true` for types whose values are references (including `null`).
    ///
    /// Unforced lazy types answer `false`; force them first.
    pub fn is_reference_like(&self) -> bool {
        match self {
            ResolvedType::Reference(_)
            | ResolvedType::TypeVariable(_)
            | ResolvedType::Array(_)
            | ResolvedType::Null => true,
            ResolvedType::Lazy(lazy) => lazy.get().is_some_and(ResolvedType::is_reference_like),
            ResolvedType::Primitive(_) | ResolvedType::Void | ResolvedType::Wildcard(_) => false,
        }
    }

    /// The reference type, looking through an already-forced lazy layer.
    pub fn as_reference_type(&self) -> Option<&ResolvedReferenceType> {
        match self {
            ResolvedType::Reference(reference) => Some(reference),
            ResolvedType::Lazy(lazy) => lazy.get().and_then(ResolvedType::as_reference_type),
            _ => None,
        }
    }

    /// Replace type variables according to `f`, leaving unmatched variables in place.
    ///
    /// Lazy types are substituted through their forced value; an unforced lazy type
    /// is returned unchanged.
    pub fn substitute(&self, f: &dyn Fn(&TypeVar) -> Option<ResolvedType>) -> ResolvedType {
        match self {
            ResolvedType::TypeVariable(tv) => f(tv).unwrap_or_else(|| self.clone()),
            ResolvedType::Reference(reference) => {
                ResolvedType::Reference(reference.substitute(f))
            }
            ResolvedType::Array(component) => {
                ResolvedType::Array(Box::new(component.substitute(f)))
            }
            ResolvedType::Wildcard(ResolvedWildcard::Extends(bound)) => ResolvedType::Wildcard(
                ResolvedWildcard::Extends(Box::new(bound.substitute(f))),
            ),
            ResolvedType::Wildcard(ResolvedWildcard::Super(bound)) => ResolvedType::Wildcard(
                ResolvedWildcard::Super(Box::new(bound.substitute(f))),
            ),
            ResolvedType::Lazy(lazy) => match lazy.get() {
                Some(resolved) => resolved.substitute(f),
                None => self.clone(),
            },
            ResolvedType::Primitive(_)
            | ResolvedType::Void
            | ResolvedType::Null
            | ResolvedType::Wildcard(ResolvedWildcard::Unbounded) => self.clone(),
        }
    }
}

impl From<ResolvedReferenceType> for ResolvedType {
    fn from(value: ResolvedReferenceType) -> Self {
        ResolvedType::Reference(value)
    }
}

/// A declaration plus the type arguments bound at a use site (`List<String>`).
///
/// An empty argument list means either a non-generic declaration or a raw use.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedReferenceType {
    decl: ItemId,
    name: TypeName,
    type_args: Vec<ResolvedType>,
}

impl ResolvedReferenceType {
    pub fn new(decl: ItemId, name: TypeName, type_args: Vec<ResolvedType>) -> Self {
        Self {
            decl,
            name,
            type_args,
        }
    }

    pub fn raw(decl: ItemId, name: TypeName) -> Self {
        Self::new(decl, name, Vec::new())
    }

    pub fn type_declaration(&self) -> ItemId {
        self.decl
    }

    pub fn qualified_name(&self) -> &TypeName {
        &self.name
    }

    pub fn type_arguments(&self) -> &[ResolvedType] {
        &self.type_args
    }

    pub fn is_raw(&self) -> bool {
        self.type_args.is_empty()
    }

    /// Rewrite `ty`, which is expressed in terms of this declaration's type
    /// parameters, using the arguments bound here.
    ///
    /// Given `Box<String>` and the field type `T` of `class Box<T>`, returns
    /// `String`. Raw uses leave the parameters in place.
    pub fn use_this_type_parameters_on_the_given_type(&self, ty: &ResolvedType) -> ResolvedType {
        if self.type_args.is_empty() {
            return ty.clone();
        }
        ty.substitute(&|tv: &TypeVar| self.bound_argument(tv))
    }

    /// This reference with its arguments rewritten through the bindings of
    /// `view`, a use of the declaration this reference was written in.
    pub fn viewed_through(&self, view: &ResolvedReferenceType) -> ResolvedReferenceType {
        if view.type_args.is_empty() {
            return self.clone();
        }
        self.substitute(&|tv: &TypeVar| view.bound_argument(tv))
    }

    fn bound_argument(&self, tv: &TypeVar) -> Option<ResolvedType> {
        if tv.owner != TypeParamOwner::Type(self.decl) {
            return None;
        }
        self.type_args.get(tv.index as usize).cloned()
    }

    fn substitute(&self, f: &dyn Fn(&TypeVar) -> Option<ResolvedType>) -> ResolvedReferenceType {
        ResolvedReferenceType {
            decl: self.decl,
            name: self.name.clone(),
            type_args: self.type_args.iter().map(|arg| arg.substitute(f)).collect(),
        }
    }
}
