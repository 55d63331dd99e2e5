use nova_core::PackageName;
use nova_hir::{ItemKind, ItemParent, ItemTree, TypeDecl};

#[test]
fn member_types_share_their_outer_unit() {
    let mut tree = ItemTree::new();
    let unit = tree.add_unit(PackageName::from_dotted("demo"), Vec::new());
    let outer = tree.add_type(unit, TypeDecl::class("Outer"));
    let inner = tree.add_member_type(outer, TypeDecl::record("Inner"));

    assert_eq!(tree.unit(unit).types, vec![outer]);
    assert_eq!(tree.item(outer).members, vec![inner]);
    assert_eq!(tree.item(inner).parent, ItemParent::Type(outer));
    assert_eq!(tree.item(inner).unit, unit);
    assert_eq!(tree.item(inner).kind, ItemKind::Record);
    assert_eq!(tree.len(), 2);
}

#[test]
fn lookups_outside_the_tree_are_none() {
    let mut tree = ItemTree::new();
    let unit = tree.add_unit(PackageName::from_dotted("demo"), Vec::new());
    let mut larger = tree.clone();
    let stray = larger.add_type(unit, TypeDecl::class("Stray"));
    let stray_unit = larger.add_unit(PackageName::from_dotted("other"), Vec::new());

    assert!(tree.get(stray).is_none());
    assert!(tree.get_unit(stray_unit).is_none());
    assert!(larger.get(stray).is_some());
    assert!(tree.is_empty());
}

#[test]
fn minimal_jdk_declares_the_root_types() {
    let tree = ItemTree::with_minimal_jdk();
    let names: Vec<_> = tree
        .items()
        .filter(|(_, item)| item.parent == ItemParent::Unit(item.unit))
        .map(|(_, item)| {
            format!(
                "{}.{}",
                tree.unit(item.unit).package.to_dotted(),
                item.name
            )
        })
        .collect();

    for expected in [
        "java.lang.Object",
        "java.lang.Record",
        "java.lang.Enum",
        "java.lang.Comparable",
        "java.io.Serializable",
        "java.lang.annotation.Annotation",
    ] {
        assert!(names.iter().any(|name| name == expected), "missing {expected}");
    }
}
