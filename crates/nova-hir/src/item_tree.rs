//! Arena of compilation units and type declarations.

use nova_core::{Name, PackageName, QualifiedName};

use crate::ids::{ItemId, UnitId};
use crate::type_ref::{ClassOrInterfaceType, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessSpecifier {
    Public,
    Protected,
    Private,
    #[default]
    PackagePrivate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDecl {
    TypeSingle { ty: QualifiedName },
    TypeStar { package: PackageName },
}

#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub package: PackageName,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<ItemId>,
}

/// Lexical owner of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemParent {
    Unit(UnitId),
    Type(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: Name,
    pub bounds: Vec<ClassOrInterfaceType>,
}

impl TypeParam {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    #[must_use]
    pub fn bounded_by(mut self, bound: ClassOrInterfaceType) -> Self {
        self.bounds.push(bound);
        self
    }
}

/// An annotation usage (`@Deprecated`), identified by its name as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: QualifiedName,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: TypeRef,
    pub access: AccessSpecifier,
    pub is_static: bool,
    pub is_volatile: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<Name>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            access: AccessSpecifier::default(),
            is_static: false,
            is_volatile: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: Name,
    pub ty: TypeRef,
}

impl ParamDecl {
    pub fn new(name: impl Into<Name>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: Name,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<ParamDecl>,
    pub return_ty: TypeRef,
    pub access: AccessSpecifier,
    pub is_static: bool,
}

impl MethodDecl {
    pub fn new(name: impl Into<Name>, return_ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            params: Vec::new(),
            return_ty,
            access: AccessSpecifier::Public,
            is_static: false,
        }
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<Name>, ty: TypeRef) -> Self {
        self.params.push(ParamDecl::new(name, ty));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ConstructorDecl {
    pub params: Vec<ParamDecl>,
    pub access: AccessSpecifier,
}

#[derive(Debug, Clone)]
pub struct RecordComponent {
    pub name: Name,
    pub ty: TypeRef,
}

#[derive(Debug, Clone)]
pub struct EnumConstant {
    pub name: Name,
}

/// A type declaration as lowered from syntax.
///
/// Which lists are meaningful depends on `kind`: `extends` holds the superclass
/// of a class (at most one entry) or the superinterfaces of an interface;
/// `implements` is used by classes, enums and records; `components` only by
/// records.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub kind: ItemKind,
    pub name: Name,
    pub access: AccessSpecifier,
    pub type_params: Vec<TypeParam>,
    pub annotations: Vec<Annotation>,
    pub extends: Vec<ClassOrInterfaceType>,
    pub implements: Vec<ClassOrInterfaceType>,
    pub components: Vec<RecordComponent>,
    pub enum_constants: Vec<EnumConstant>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub constructors: Vec<ConstructorDecl>,
}

impl TypeDecl {
    pub fn new(kind: ItemKind, name: impl Into<Name>) -> Self {
        Self {
            kind,
            name: name.into(),
            access: AccessSpecifier::Public,
            type_params: Vec::new(),
            annotations: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            components: Vec::new(),
            enum_constants: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn class(name: impl Into<Name>) -> Self {
        Self::new(ItemKind::Class, name)
    }

    pub fn interface(name: impl Into<Name>) -> Self {
        Self::new(ItemKind::Interface, name)
    }

    pub fn record(name: impl Into<Name>) -> Self {
        Self::new(ItemKind::Record, name)
    }

    pub fn enumeration(name: impl Into<Name>) -> Self {
        Self::new(ItemKind::Enum, name)
    }

    pub fn annotation(name: impl Into<Name>) -> Self {
        Self::new(ItemKind::Annotation, name)
    }

    #[must_use]
    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    #[must_use]
    pub fn extends(mut self, ty: ClassOrInterfaceType) -> Self {
        self.extends.push(ty);
        self
    }

    #[must_use]
    pub fn implements(mut self, ty: ClassOrInterfaceType) -> Self {
        self.implements.push(ty);
        self
    }

    #[must_use]
    pub fn component(mut self, name: impl Into<Name>, ty: TypeRef) -> Self {
        self.components.push(RecordComponent {
            name: name.into(),
            ty,
        });
        self
    }

    #[must_use]
    pub fn constant(mut self, name: impl Into<Name>) -> Self {
        self.enum_constants.push(EnumConstant { name: name.into() });
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn constructor(mut self, ctor: ConstructorDecl) -> Self {
        self.constructors.push(ctor);
        self
    }

    #[must_use]
    pub fn annotated(mut self, name: &str) -> Self {
        self.annotations.push(Annotation {
            name: QualifiedName::from_dotted(name),
        });
        self
    }
}

/// A type declaration stored in the tree, with its lexical links.
#[derive(Debug, Clone)]
pub struct TypeItem {
    pub decl: TypeDecl,
    pub parent: ItemParent,
    pub unit: UnitId,
    pub members: Vec<ItemId>,
}

impl std::ops::Deref for TypeItem {
    type Target = TypeDecl;

    fn deref(&self) -> &TypeDecl {
        &self.decl
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemTree {
    units: Vec<CompilationUnit>,
    items: Vec<TypeItem>,
}

impl ItemTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, package: PackageName, imports: Vec<ImportDecl>) -> UnitId {
        let id = UnitId::from_raw(self.units.len() as u32);
        self.units.push(CompilationUnit {
            package,
            imports,
            types: Vec::new(),
        });
        id
    }

    /// Add a top-level type to `unit`.
    ///
    /// Panics if `unit` does not belong to this tree.
    pub fn add_type(&mut self, unit: UnitId, decl: TypeDecl) -> ItemId {
        let id = self.push_item(decl, ItemParent::Unit(unit), unit);
        self.units[unit.idx()].types.push(id);
        id
    }

    /// Add a member type nested in `outer`.
    ///
    /// Panics if `outer` does not belong to this tree.
    pub fn add_member_type(&mut self, outer: ItemId, decl: TypeDecl) -> ItemId {
        let unit = self.items[outer.idx()].unit;
        let id = self.push_item(decl, ItemParent::Type(outer), unit);
        self.items[outer.idx()].members.push(id);
        id
    }

    fn push_item(&mut self, decl: TypeDecl, parent: ItemParent, unit: UnitId) -> ItemId {
        let id = ItemId::from_raw(self.items.len() as u32);
        self.items.push(TypeItem {
            decl,
            parent,
            unit,
            members: Vec::new(),
        });
        id
    }

    #[must_use]
    pub fn unit(&self, id: UnitId) -> &CompilationUnit {
        &self.units[id.idx()]
    }

    #[must_use]
    pub fn get_unit(&self, id: UnitId) -> Option<&CompilationUnit> {
        self.units.get(id.idx())
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> &TypeItem {
        &self.items[id.idx()]
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&TypeItem> {
        self.items.get(id.idx())
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &TypeItem)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| (ItemId::from_raw(idx as u32), item))
    }

    pub fn units(&self) -> impl Iterator<Item = (UnitId, &CompilationUnit)> + '_ {
        self.units
            .iter()
            .enumerate()
            .map(|(idx, unit)| (UnitId::from_raw(idx as u32), unit))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
