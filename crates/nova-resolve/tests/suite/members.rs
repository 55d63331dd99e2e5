use nova_hir::{
    AccessSpecifier, ClassOrInterfaceType, FieldDecl, MethodDecl, TypeDecl, TypeParam, TypeRef,
};
use nova_resolve::{MemberOps, MemoryTypeSolver, ResolveError, SymbolResolver};
use nova_types::SymbolReference;
use pretty_assertions::assert_eq;

use super::support::demo_tree;

#[test]
fn all_fields_lists_own_fields_then_inherited_ones() {
    let (mut tree, unit) = demo_tree();
    let base = tree.add_type(
        unit,
        TypeDecl::class("Base").field(FieldDecl::new("id", TypeRef::int())),
    );
    let derived = tree.add_type(
        unit,
        TypeDecl::class("Derived")
            .extends(ClassOrInterfaceType::new("Base"))
            .field(FieldDecl::new("name", TypeRef::named("String")))
            .field(FieldDecl::new("size", TypeRef::int())),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let base = db.declaration(base).unwrap();
    let derived = db.declaration(derived).unwrap();
    let fields = derived.all_fields(&db).unwrap();
    let names: Vec<_> = fields.iter().map(|field| field.name().as_str()).collect();
    assert_eq!(names, vec!["name", "size", "id"]);
    assert_eq!(fields[2].declaring_type(), base.item().unwrap());

    let own = derived.declared_fields(&db).unwrap().len();
    let inherited: usize = derived
        .ancestors(&db, true)
        .unwrap()
        .iter()
        .map(|ancestor| {
            db.declaration(ancestor.type_declaration())
                .unwrap()
                .all_fields(&db)
                .unwrap()
                .len()
        })
        .sum();
    assert_eq!(fields.len(), own + inherited);

    // Repeated queries agree.
    assert_eq!(derived.all_fields(&db).unwrap(), fields);
}

#[test]
fn inherited_field_types_use_the_bound_type_arguments() {
    let (mut tree, unit) = demo_tree();
    tree.add_type(
        unit,
        TypeDecl::class("Holder")
            .type_param(TypeParam::new("T"))
            .field(FieldDecl::new("value", TypeRef::named("T")))
            .field(FieldDecl::new("values", TypeRef::array_of(TypeRef::named("T")))),
    );
    let ints = tree.add_type(
        unit,
        TypeDecl::class("IntHolder").extends(
            ClassOrInterfaceType::new("Holder").with_args(vec![TypeRef::named("Integer")]),
        ),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let fields = db.declaration(ints).unwrap().all_fields(&db).unwrap();
    let rendered: Vec<_> = fields
        .iter()
        .map(|field| format!("{} {}", field.ty(), field.name()))
        .collect();
    assert_eq!(
        rendered,
        vec!["java.lang.Integer value", "java.lang.Integer[] values"]
    );
}

#[test]
fn unresolvable_ancestor_contributes_no_fields() {
    let (mut tree, unit) = demo_tree();
    let broken = tree.add_type(
        unit,
        TypeDecl::class("Broken")
            .extends(ClassOrInterfaceType::new("Missing"))
            .field(FieldDecl::new("kept", TypeRef::int())),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let fields = db.declaration(broken).unwrap().all_fields(&db).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name().as_str(), "kept");
}

#[test]
fn field_with_unknown_type_is_still_listed() {
    let (mut tree, unit) = demo_tree();
    let base = tree.add_type(
        unit,
        TypeDecl::class("Base")
            .field(FieldDecl::new("kept", TypeRef::int()))
            .field(FieldDecl::new("thing", TypeRef::named("Nowhere"))),
    );
    let derived = tree.add_type(
        unit,
        TypeDecl::class("Derived")
            .extends(ClassOrInterfaceType::new("Base"))
            .field(FieldDecl::new("own", TypeRef::int())),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();
    let base = db.declaration(base).unwrap();
    let derived = db.declaration(derived).unwrap();

    let kept = base.field(&db, "kept").unwrap().into_option().unwrap();
    assert_eq!(kept.resolved_type(&db).unwrap().to_string(), "int");

    let fields = derived.all_fields(&db).unwrap();
    let names: Vec<_> = fields.iter().map(|field| field.name().as_str()).collect();
    assert_eq!(names, vec!["own", "kept", "thing"]);
    assert!(fields.len() >= derived.declared_fields(&db).unwrap().len());

    // The type error surfaces only when the type itself is asked for.
    let thing = &fields[2];
    assert_eq!(thing.ty().to_string(), "Nowhere");
    assert_eq!(
        thing.resolved_type(&db),
        Err(ResolveError::UnresolvedSymbol("Nowhere".to_string()))
    );

    assert!(derived.solve_symbol(&db, "own").unwrap().is_solved());
    assert!(derived.solve_symbol(&db, "thing").unwrap().is_solved());
}

#[test]
fn cyclic_field_expansion_does_not_depend_on_query_order() {
    let (mut tree, unit) = demo_tree();
    let a = tree.add_type(
        unit,
        TypeDecl::class("A")
            .extends(ClassOrInterfaceType::new("B"))
            .field(FieldDecl::new("a", TypeRef::int())),
    );
    let b = tree.add_type(
        unit,
        TypeDecl::class("B")
            .extends(ClassOrInterfaceType::new("A"))
            .field(FieldDecl::new("b", TypeRef::int())),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let field_names = |db: &SymbolResolver<'_>, item| -> Vec<String> {
        db.declaration(item)
            .unwrap()
            .all_fields(db)
            .unwrap()
            .iter()
            .map(|field| field.name().to_string())
            .collect()
    };

    let a_first = SymbolResolver::new(&tree, &solver).unwrap();
    field_names(&a_first, a);
    let b_after_a = field_names(&a_first, b);

    let b_first = SymbolResolver::new(&tree, &solver).unwrap();
    let b_alone = field_names(&b_first, b);

    assert_eq!(b_after_a, b_alone);
    assert_eq!(b_alone, vec!["b", "a", "b"]);
    assert_eq!(field_names(&b_first, b), b_alone);
}

#[test]
fn interface_fields_are_public_static_constants() {
    let (mut tree, unit) = demo_tree();
    let limits = tree.add_type(
        unit,
        TypeDecl::interface("Limits").field(FieldDecl::new("MAX", TypeRef::int())),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let fields = db.declaration(limits).unwrap().all_fields(&db).unwrap();
    assert_eq!(fields.len(), 1);
    assert!(fields[0].is_static());
    assert_eq!(fields[0].access_specifier(), AccessSpecifier::Public);
}

#[test]
fn enum_constants_are_static_fields_of_the_enum_type() {
    let (mut tree, unit) = demo_tree();
    let color = tree.add_type(
        unit,
        TypeDecl::enumeration("Color")
            .constant("RED")
            .constant("GREEN")
            .field(FieldDecl::new("rgb", TypeRef::int())),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let fields = db.declaration(color).unwrap().declared_fields(&db).unwrap();
    let summary: Vec<_> = fields
        .iter()
        .map(|field| (field.name().as_str(), field.ty().to_string(), field.is_static()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("RED", "demo.Color".to_string(), true),
            ("GREEN", "demo.Color".to_string(), true),
            ("rgb", "int".to_string(), false),
        ]
    );
}

#[test]
fn field_lookup_by_name() {
    let (mut tree, unit) = demo_tree();
    let base = tree.add_type(
        unit,
        TypeDecl::class("Base").field(FieldDecl {
            is_volatile: true,
            ..FieldDecl::new("flag", TypeRef::boolean())
        }),
    );
    let derived = tree.add_type(
        unit,
        TypeDecl::class("Derived").extends(ClassOrInterfaceType::new("Base")),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let derived = db.declaration(derived).unwrap();
    let flag = derived.field(&db, "flag").unwrap().into_option().unwrap();
    assert!(flag.is_volatile());
    assert_eq!(flag.declaring_type(), base);
    assert_eq!(derived.field(&db, "other").unwrap(), SymbolReference::Unsolved);

    let class = match derived {
        nova_resolve::TypeDeclaration::Class(class) => class,
        other => panic!("expected a class, got {other:?}"),
    };
    assert!(class.has_field(&db, "flag").unwrap());
    assert!(!class.has_field(&db, "other").unwrap());
}

#[test]
fn declared_methods_and_constructors() {
    let (mut tree, unit) = demo_tree();
    let service = tree.add_type(
        unit,
        TypeDecl::class("Service")
            .method(MethodDecl::new("start", TypeRef::Void))
            .method(MethodDecl::new("stop", TypeRef::Void).param("force", TypeRef::boolean())),
    );
    let solver = MemoryTypeSolver::new(&tree);
    let db = SymbolResolver::new(&tree, &solver).unwrap();

    let service = db.declaration(service).unwrap();
    let methods = service.declared_methods(&db);
    let mut names: Vec<_> = methods
        .iter()
        .map(|method| (method.name(&db).as_str(), method.param_count(&db)))
        .collect();
    names.sort();
    assert_eq!(names, vec![("start", 0), ("stop", 1)]);
    assert!(service.constructors(&db).is_empty());
}
