use nova_hir::{
    AccessSpecifier, ClassOrInterfaceType, ConstructorDecl, FieldDecl, MethodDecl, TypeDecl,
    TypeRef,
};
use nova_resolve::{
    AncestorOps, DeclarationKind, MemberOps, MemoryTypeSolver, SymbolResolver, TypeDeclaration,
};
use nova_types::{ResolvedType, SymbolReference};
use pretty_assertions::assert_eq;

use super::support::{captured_messages, demo_tree, names, rendered};

#[test]
fn point_record_exposes_components_as_fields() {
    let (mut tree, unit) = demo_tree();
    let point = tree.add_type(
        unit,
        TypeDecl::record("Point")
            .component("x", TypeRef::int())
            .component("y", TypeRef::int()),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let decl = db.declaration(point).unwrap();
    assert!(decl.is_record());

    let fields = decl.all_fields(&db).unwrap();
    let summary: Vec<_> = fields
        .iter()
        .map(|field| (field.name().as_str(), field.ty().clone()))
        .collect();
    assert_eq!(
        summary,
        vec![("x", ResolvedType::int()), ("y", ResolvedType::int())]
    );
    assert!(fields.iter().all(|field| field.is_derived()));
    assert!(fields
        .iter()
        .all(|field| field.access_specifier() == AccessSpecifier::Private && !field.is_static()));

    assert_eq!(
        names(&decl.ancestors(&db, false).unwrap()),
        vec!["java.lang.Record"]
    );
}

#[test]
fn record_superclass_is_always_record() {
    let (mut tree, unit) = demo_tree();
    tree.add_type(unit, TypeDecl::class("Base"));
    // Not legal Java, but a malformed tree must not change the superclass.
    let odd = tree.add_type(
        unit,
        TypeDecl::record("Odd").extends(ClassOrInterfaceType::new("Base")),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let record = db.declaration(odd).unwrap().as_record().unwrap();
    let superclass = record.super_class(&db).unwrap().unwrap();
    assert_eq!(superclass.qualified_name().as_str(), "java.lang.Record");
    assert_eq!(superclass.type_declaration(), db.well_known().record);
    assert_eq!(names(&record.ancestors(&db, false).unwrap()), vec!["java.lang.Record"]);
}

#[test]
fn record_reports_no_constructors() {
    let (mut tree, unit) = demo_tree();
    let point = tree.add_type(
        unit,
        TypeDecl::record("Point")
            .component("x", TypeRef::int())
            .constructor(ConstructorDecl {
                params: Vec::new(),
                access: AccessSpecifier::Public,
            }),
    );
    let plain = tree.add_type(
        unit,
        TypeDecl::class("Plain").constructor(ConstructorDecl {
            params: Vec::new(),
            access: AccessSpecifier::Public,
        }),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    assert!(db.declaration(point).unwrap().constructors(&db).is_empty());
    assert_eq!(db.declaration(plain).unwrap().constructors(&db).len(), 1);
}

#[test]
fn self_referential_type_argument_is_resolved_lazily() {
    let (mut tree, unit) = demo_tree();
    let pair = tree.add_type(
        unit,
        TypeDecl::record("Pair")
            .component("left", TypeRef::int())
            .component("right", TypeRef::int())
            .implements(
                ClassOrInterfaceType::new("Comparable").with_args(vec![TypeRef::named("Pair")]),
            ),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let ancestors = db.declaration(pair).unwrap().ancestors(&db, false).unwrap();
    assert_eq!(names(&ancestors), vec!["java.lang.Record", "java.lang.Comparable"]);

    let comparable = &ancestors[1];
    let [arg] = comparable.type_arguments() else {
        panic!("expected one type argument, got {comparable:?}");
    };
    let ResolvedType::Lazy(lazy) = arg else {
        panic!("expected a lazy type argument, got {arg:?}");
    };
    assert!(lazy.get().is_none(), "ancestor enumeration must not force arguments");

    let forced = db.force(arg).unwrap();
    let reference = forced.as_reference_type().unwrap();
    assert_eq!(reference.type_declaration(), pair);
    assert_eq!(reference.qualified_name().as_str(), "demo.Pair");

    // Forcing again reuses the memoised value.
    assert_eq!(db.force(arg).unwrap(), forced);
}

#[test]
fn qualified_self_prefix_reaches_nested_types() {
    let (mut tree, unit) = demo_tree();
    let outer = tree.add_type(unit, TypeDecl::record("Outer").component("v", TypeRef::int()));
    let inner = tree.add_member_type(
        outer,
        TypeDecl::record("Inner").component("w", TypeRef::int()),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let record = db.declaration(outer).unwrap();
    let expected = SymbolReference::Solved(db.declaration(inner).unwrap());
    assert_eq!(record.solve_type(&db, "Inner").unwrap(), expected);
    // Each leading `Outer.` is peeled off before the enclosing scope is consulted.
    for name in ["Outer.Inner", "Outer.Outer.Inner"] {
        let (solved, messages) = captured_messages(|| record.solve_type(&db, name));
        assert_eq!(solved.unwrap(), expected);
        assert!(
            !messages.iter().any(|message| message.starts_with("delegating type lookup")),
            "`{name}` left the record's own scope: {messages:?}"
        );
    }
    assert_eq!(
        record.solve_type(&db, "Outer").unwrap(),
        SymbolReference::Solved(record)
    );
    assert_eq!(
        record.solve_type(&db, "Missing").unwrap(),
        SymbolReference::Unsolved
    );
}

#[test]
fn record_type_lookup_falls_back_to_enclosing_scope() {
    let (mut tree, unit) = demo_tree();
    let holder = tree.add_type(unit, TypeDecl::record("Holder").component("n", TypeRef::int()));
    let sibling = tree.add_type(unit, TypeDecl::class("Sibling"));
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let record = db.declaration(holder).unwrap();
    let (solved, messages) = captured_messages(|| record.solve_type(&db, "Sibling"));
    assert_eq!(
        solved.unwrap(),
        SymbolReference::Solved(db.declaration(sibling).unwrap())
    );
    assert!(messages
        .iter()
        .any(|message| message.starts_with("delegating type lookup")));
    let string = record.solve_type(&db, "String").unwrap();
    assert_eq!(
        string.into_option().unwrap().qualified_name(&db).as_str(),
        "java.lang.String"
    );
}

#[test]
fn components_precede_body_fields() {
    let (mut tree, unit) = demo_tree();
    let counter = tree.add_type(
        unit,
        TypeDecl::record("Counter")
            .component("count", TypeRef::int())
            .field(FieldDecl {
                is_static: true,
                ..FieldDecl::new("ZERO", TypeRef::named("Counter"))
            }),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let record = db.declaration(counter).unwrap().as_record().unwrap();
    let fields = record.all_fields(&db).unwrap();
    let summary: Vec<_> = fields
        .iter()
        .map(|field| (field.name().as_str(), field.is_derived(), field.is_static()))
        .collect();
    assert_eq!(summary, vec![("count", true, false), ("ZERO", false, true)]);
    assert_eq!(fields[1].ty().to_string(), "demo.Counter");
    assert_eq!(record.components(&db).unwrap().len(), 1);
    assert!(record.has_component(&db, "count"));
    assert!(!record.has_component(&db, "ZERO"));
}

#[test]
fn component_accessor_is_found_by_method_lookup() {
    let (mut tree, unit) = demo_tree();
    let point = tree.add_type(
        unit,
        TypeDecl::record("Point")
            .component("x", TypeRef::int())
            .component("label", TypeRef::named("String"))
            .method(MethodDecl::new("label", TypeRef::named("String"))),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();
    let record = db.declaration(point).unwrap();

    let x = record
        .solve_method(&db, "x", &[], false)
        .unwrap()
        .into_option()
        .unwrap();
    assert!(x.is_record_accessor());
    assert_eq!(x.name(&db).as_str(), "x");
    assert_eq!(x.return_type(&db).unwrap(), ResolvedType::int());

    // The explicit method shadows the implicit accessor.
    let label = record
        .solve_method(&db, "label", &[], false)
        .unwrap()
        .into_option()
        .unwrap();
    assert!(!label.is_record_accessor());

    // Accessors are instance methods.
    assert_eq!(
        record.solve_method(&db, "x", &[], true).unwrap(),
        SymbolReference::Unsolved
    );
    // `declared_methods` only lists what the body declares.
    assert_eq!(record.declared_methods(&db).len(), 1);
}

#[test]
fn record_annotations_resolve_in_enclosing_scope() {
    let (mut tree, unit) = demo_tree();
    let point = tree.add_type(
        unit,
        TypeDecl::record("Point")
            .component("x", TypeRef::int())
            .annotated("Deprecated")
            .annotated("Unknown"),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();
    let record = db.declaration(point).unwrap();

    let annotations = record.declared_annotations(&db).unwrap();
    assert_eq!(annotations.len(), 2);
    let deprecated = annotations[0].declaration.unwrap();
    assert_eq!(
        TypeDeclaration::Annotation(deprecated)
            .qualified_name(&db)
            .as_str(),
        "java.lang.Deprecated"
    );
    assert_eq!(annotations[1].declaration, None);

    assert!(record.has_direct_annotation(&db, "java.lang.Deprecated").unwrap());
    assert!(!record.has_direct_annotation(&db, "demo.Unknown").unwrap());
}

#[test]
fn record_members_are_stable_across_queries() {
    let (mut tree, unit) = demo_tree();
    let pair = tree.add_type(
        unit,
        TypeDecl::record("Pair")
            .component("a", TypeRef::int())
            .implements(
                ClassOrInterfaceType::new("Comparable").with_args(vec![TypeRef::named("Pair")]),
            ),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();
    let record = db.declaration(pair).unwrap();

    let first_fields = record.all_fields(&db).unwrap();
    let first_ancestors = rendered(&record.ancestors(&db, true).unwrap());
    assert_eq!(record.all_fields(&db).unwrap(), first_fields);
    assert_eq!(rendered(&record.ancestors(&db, true).unwrap()), first_ancestors);
    assert_eq!(
        record.as_record().unwrap().item(),
        pair,
        "handle refers to the declaring item"
    );
}
