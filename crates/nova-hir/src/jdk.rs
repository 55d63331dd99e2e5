//! Source-level stubs for the handful of JDK types the resolver relies on.

use nova_core::PackageName;

use crate::item_tree::{ItemTree, MethodDecl, TypeDecl, TypeParam};
use crate::type_ref::{ClassOrInterfaceType, TypeRef};

impl ItemTree {
    /// A tree pre-populated with [`ItemTree::add_minimal_jdk`].
    pub fn with_minimal_jdk() -> Self {
        let mut tree = ItemTree::new();
        tree.add_minimal_jdk();
        tree
    }

    /// Add stubs for `java.lang.Object`, `Record`, `Enum`, `Comparable`,
    /// `Cloneable`, `String`, `Integer`, `Deprecated`, `java.io.Serializable`
    /// and `java.lang.annotation.Annotation`.
    pub fn add_minimal_jdk(&mut self) {
        let lang = self.add_unit(PackageName::from_dotted("java.lang"), Vec::new());

        self.add_type(
            lang,
            TypeDecl::class("Object")
                .method(
                    MethodDecl::new("equals", TypeRef::boolean())
                        .param("obj", TypeRef::named("Object")),
                )
                .method(MethodDecl::new("hashCode", TypeRef::int()))
                .method(MethodDecl::new("toString", TypeRef::named("String"))),
        );
        self.add_type(lang, TypeDecl::class("Record"));
        self.add_type(
            lang,
            TypeDecl::interface("Comparable")
                .type_param(TypeParam::new("T"))
                .method(
                    MethodDecl::new("compareTo", TypeRef::int()).param("o", TypeRef::named("T")),
                ),
        );
        self.add_type(lang, TypeDecl::interface("Cloneable"));
        self.add_type(
            lang,
            TypeDecl::class("Enum")
                .type_param(
                    TypeParam::new("E").bounded_by(
                        ClassOrInterfaceType::new("Enum")
                            .with_args(vec![TypeRef::named("E")]),
                    ),
                )
                .implements(
                    ClassOrInterfaceType::new("Comparable").with_args(vec![TypeRef::named("E")]),
                )
                .implements(ClassOrInterfaceType::parse("java.io.Serializable"))
                .method(MethodDecl::new("name", TypeRef::named("String")))
                .method(MethodDecl::new("ordinal", TypeRef::int())),
        );
        self.add_type(
            lang,
            TypeDecl::class("String")
                .implements(
                    ClassOrInterfaceType::new("Comparable")
                        .with_args(vec![TypeRef::named("String")]),
                )
                .implements(ClassOrInterfaceType::parse("java.io.Serializable"))
                .method(MethodDecl::new("length", TypeRef::int())),
        );
        self.add_type(
            lang,
            TypeDecl::class("Integer")
                .implements(
                    ClassOrInterfaceType::new("Comparable")
                        .with_args(vec![TypeRef::named("Integer")]),
                )
                .method(MethodDecl::new("intValue", TypeRef::int())),
        );
        self.add_type(lang, TypeDecl::annotation("Deprecated"));

        let io = self.add_unit(PackageName::from_dotted("java.io"), Vec::new());
        self.add_type(io, TypeDecl::interface("Serializable"));

        let annotation = self.add_unit(
            PackageName::from_dotted("java.lang.annotation"),
            Vec::new(),
        );
        self.add_type(annotation, TypeDecl::interface("Annotation"));
    }
}
