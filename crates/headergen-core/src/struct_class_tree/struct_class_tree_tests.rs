#![allow(non_snake_case)]

use super::*;

fn diamond() -> StructClassTree {
    let mut tree = StructClassTree::new();
    tree.add_link("D", "B", AccessSpecifier::Public);
    tree.add_link("D", "C", AccessSpecifier::Public);
    tree.add_link("B", "A", AccessSpecifier::Public);
    tree.add_link("C", "A", AccessSpecifier::Protected);
    tree
}

#[test]
fn StructClassTree___add_link___is_idempotent() {
    let mut tree = StructClassTree::new();

    assert!(tree.add_link("B", "A", AccessSpecifier::Public));
    assert!(!tree.add_link("B", "A", AccessSpecifier::Public));
    assert_eq!(tree.len(), 1);
}

#[test]
fn StructClassTree___parents_of___keeps_declaration_order() {
    let tree = diamond();

    let parents: Vec<_> = tree.parents_of("D").iter().map(|l| l.parent.as_str()).collect();

    assert_eq!(parents, vec!["B", "C"]);
    assert!(tree.parents_of("A").is_empty());
}

#[test]
fn StructClassTree___all_bases___is_transitive_without_duplicates() {
    let tree = diamond();

    assert_eq!(tree.all_bases("D"), vec!["B", "A", "C"]);
}

#[test]
fn StructClassTree___is_base_of___follows_multi_level_chains() {
    let tree = diamond();

    assert!(tree.is_base_of("A", "D"));
    assert!(tree.is_base_of("B", "D"));
    assert!(!tree.is_base_of("D", "A"));
    assert!(!tree.is_base_of("C", "B"));
}

#[test]
fn StructClassTree___is_empty___for_new_tree() {
    let tree = StructClassTree::new();

    assert!(tree.is_empty());
    assert!(!tree.contains("A"));
}
