use nova_hir::{ClassOrInterfaceType, TypeDecl, TypeParam, TypeRef};
use nova_resolve::{MemoryTypeSolver, ResolveError, SymbolResolver};
use pretty_assertions::assert_eq;

use super::support::{demo_tree, names, rendered};

#[test]
fn object_has_no_ancestors() {
    let (tree, _) = demo_tree();
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let object = db.declaration(db.well_known().object).unwrap();
    assert!(object.ancestors(&db, false).unwrap().is_empty());
    assert!(object.all_ancestors(&db, false).unwrap().is_empty());
    assert_eq!(object.super_class(&db).unwrap(), None);
}

#[test]
fn class_without_extends_has_object_superclass() {
    let (mut tree, unit) = demo_tree();
    let plain = tree.add_type(unit, TypeDecl::class("Plain"));
    let marker = tree.add_type(unit, TypeDecl::interface("Marker"));
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let plain = db.declaration(plain).unwrap();
    assert_eq!(names(&plain.ancestors(&db, false).unwrap()), vec!["java.lang.Object"]);

    let marker = db.declaration(marker).unwrap();
    assert_eq!(marker.super_class(&db).unwrap(), None);
    assert_eq!(names(&marker.ancestors(&db, false).unwrap()), vec!["java.lang.Object"]);
}

#[test]
fn superclass_comes_before_interfaces_in_source_order() {
    let (mut tree, unit) = demo_tree();
    tree.add_type(unit, TypeDecl::class("Base"));
    tree.add_type(unit, TypeDecl::interface("First"));
    tree.add_type(unit, TypeDecl::interface("Second"));
    let derived = tree.add_type(
        unit,
        TypeDecl::class("Derived")
            .extends(ClassOrInterfaceType::new("Base"))
            .implements(ClassOrInterfaceType::new("Second"))
            .implements(ClassOrInterfaceType::new("First")),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let derived = db.declaration(derived).unwrap();
    assert_eq!(
        names(&derived.ancestors(&db, false).unwrap()),
        vec!["demo.Base", "demo.Second", "demo.First"]
    );
    assert_eq!(
        names(&derived.interfaces(&db).unwrap()),
        vec!["demo.Second", "demo.First"]
    );
}

#[test]
fn unresolved_ancestor_fails_strict_and_is_skipped_when_incomplete() {
    let (mut tree, unit) = demo_tree();
    tree.add_type(unit, TypeDecl::class("Base"));
    let broken = tree.add_type(
        unit,
        TypeDecl::class("Broken")
            .extends(ClassOrInterfaceType::new("Base"))
            .implements(ClassOrInterfaceType::new("Missing"))
            .implements(ClassOrInterfaceType::new("Cloneable")),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();
    let broken = db.declaration(broken).unwrap();

    assert_eq!(
        broken.ancestors(&db, false),
        Err(ResolveError::UnresolvedAncestor("Missing".to_string()))
    );
    assert_eq!(
        names(&broken.ancestors(&db, true).unwrap()),
        vec!["demo.Base", "java.lang.Cloneable"]
    );
}

#[test]
fn unresolved_superclass_is_reported_by_its_simple_name() {
    let (mut tree, unit) = demo_tree();
    let orphan = tree.add_type(
        unit,
        TypeDecl::class("Orphan").extends(ClassOrInterfaceType::parse("gone.Parent")),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();
    let orphan = db.declaration(orphan).unwrap();

    assert_eq!(
        orphan.super_class(&db),
        Err(ResolveError::UnresolvedAncestor("Parent".to_string()))
    );
    assert!(orphan.ancestors(&db, true).unwrap().is_empty());
}

#[test]
fn own_nested_type_is_never_an_ancestor() {
    let (mut tree, unit) = demo_tree();
    let outer = tree.add_type(
        unit,
        TypeDecl::class("Outer").implements(ClassOrInterfaceType::parse("Outer.Marker")),
    );
    tree.add_member_type(outer, TypeDecl::interface("Marker"));
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let outer = db.declaration(outer).unwrap();
    assert_eq!(names(&outer.ancestors(&db, false).unwrap()), vec!["java.lang.Object"]);
    assert_eq!(names(&outer.ancestors(&db, true).unwrap()), vec!["java.lang.Object"]);
}

#[test]
fn scoped_supertype_resolves_through_enclosing_unit() {
    let (mut tree, unit) = demo_tree();
    let outer = tree.add_type(unit, TypeDecl::class("Outer"));
    tree.add_member_type(outer, TypeDecl::interface("Api"));
    let client = tree.add_type(
        unit,
        TypeDecl::class("Client").implements(ClassOrInterfaceType::parse("Outer.Api")),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let client = db.declaration(client).unwrap();
    assert_eq!(
        names(&client.ancestors(&db, false).unwrap()),
        vec!["java.lang.Object", "demo.Outer.Api"]
    );
}

#[test]
fn enum_and_annotation_have_implicit_supertypes() {
    let (mut tree, unit) = demo_tree();
    let color = tree.add_type(unit, TypeDecl::enumeration("Color").constant("RED"));
    let marker = tree.add_type(unit, TypeDecl::annotation("Marker"));
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let color = db.declaration(color).unwrap();
    assert_eq!(
        rendered(&color.ancestors(&db, false).unwrap()),
        vec!["java.lang.Enum<demo.Color>"]
    );

    let marker = db.declaration(marker).unwrap();
    assert_eq!(marker.super_class(&db).unwrap(), None);
    assert_eq!(
        names(&marker.ancestors(&db, false).unwrap()),
        vec!["java.lang.annotation.Annotation"]
    );
}

#[test]
fn all_ancestors_carries_type_arguments_along_each_edge() {
    let (mut tree, unit) = demo_tree();
    tree.add_type(
        unit,
        TypeDecl::class("Box")
            .type_param(TypeParam::new("T"))
            .implements(
                ClassOrInterfaceType::new("Comparable").with_args(vec![TypeRef::named("T")]),
            ),
    );
    let crate_ = tree.add_type(
        unit,
        TypeDecl::class("Crate").extends(
            ClassOrInterfaceType::new("Box").with_args(vec![TypeRef::named("String")]),
        ),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let all = db.declaration(crate_).unwrap().all_ancestors(&db, false).unwrap();
    assert_eq!(
        rendered(&all),
        vec![
            "demo.Box<java.lang.String>",
            "java.lang.Object",
            "java.lang.Comparable<java.lang.String>",
        ]
    );
}

#[test]
fn all_ancestors_reports_each_type_once() {
    let (mut tree, unit) = demo_tree();
    tree.add_type(unit, TypeDecl::interface("Shape"));
    tree.add_type(
        unit,
        TypeDecl::interface("Polygon").extends(ClassOrInterfaceType::new("Shape")),
    );
    let square = tree.add_type(
        unit,
        TypeDecl::class("Square")
            .implements(ClassOrInterfaceType::new("Polygon"))
            .implements(ClassOrInterfaceType::new("Shape")),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let all = db.declaration(square).unwrap().all_ancestors(&db, false).unwrap();
    assert_eq!(
        names(&all),
        vec!["java.lang.Object", "demo.Polygon", "demo.Shape"]
    );
}

#[test]
fn cyclic_hierarchy_terminates() {
    let (mut tree, unit) = demo_tree();
    let a = tree.add_type(unit, TypeDecl::class("A").extends(ClassOrInterfaceType::new("B")));
    tree.add_type(unit, TypeDecl::class("B").extends(ClassOrInterfaceType::new("A")));
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let a = db.declaration(a).unwrap();
    assert_eq!(names(&a.all_ancestors(&db, true).unwrap()), vec!["demo.B"]);
    assert!(a.all_fields(&db).unwrap().is_empty());
}

#[test]
fn ancestor_queries_are_memoised() {
    let (mut tree, unit) = demo_tree();
    let broken = tree.add_type(
        unit,
        TypeDecl::class("Broken").implements(ClassOrInterfaceType::new("Missing")),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();
    let broken = db.declaration(broken).unwrap();

    let lenient = broken.ancestors(&db, true).unwrap();
    assert_eq!(broken.ancestors(&db, true).unwrap(), lenient);
    // The lenient result is cached separately and never leaks into strict queries.
    assert!(broken.ancestors(&db, false).is_err());
    assert!(broken.ancestors(&db, false).is_err());
}
