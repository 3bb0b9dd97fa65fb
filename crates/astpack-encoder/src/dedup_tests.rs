use astpack_core::{NodeId, Tree, Value};
use indoc::indoc;

use crate::dedup::Signer;
use crate::test_utils::tree;
use crate::{AstModule, EncodeStats, EncoderConfig, deduplicate_objects, discover};

fn discovered(tree: &Tree) -> AstModule<'_> {
    discover(tree, &EncoderConfig::new(), &mut EncodeStats::new()).unwrap()
}

fn merges(json: &str) -> usize {
    let tree = tree(json);
    let mut module = discovered(&tree);
    deduplicate_objects(&mut module, &mut EncodeStats::new()).unwrap()
}

#[test]
fn identical_null_objects_collapse() {
    let tree = tree(r#"{"a": {"v": null}, "b": {"v": null}}"#);
    let mut module = discovered(&tree);
    let mut stats = EncodeStats::new();

    let count = deduplicate_objects(&mut module, &mut stats).unwrap();

    assert_eq!(count, 1);
    assert_eq!(stats.objects_merged, 1);
    assert_eq!(module.objects().get_count(), 2);
    assert_eq!(module.shapes().len(), 2);
}

#[test]
fn distinct_values_are_kept() {
    assert_eq!(merges(r#"{"list": [{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]}"#), 0);
}

#[test]
fn one_differing_field_prevents_merge() {
    assert_eq!(merges(r#"{"list": [{"a": 1, "b": "x"}, {"a": 1, "b": "z"}]}"#), 0);
}

#[test]
fn string_and_number_with_same_text_differ() {
    assert_eq!(merges(r#"{"a": {"v": "1"}, "b": {"v": 1}}"#), 0);
}

#[test]
fn same_values_under_different_names_differ() {
    assert_eq!(merges(r#"{"a": {"x": 1}, "b": {"y": 1}}"#), 0);
}

#[test]
fn field_order_is_irrelevant() {
    assert_eq!(merges(r#"{"a": {"x": 1, "y": true}, "b": {"y": true, "x": 1}}"#), 1);
}

#[test]
fn arrays_compare_by_content() {
    assert_eq!(merges(r#"{"a": {"v": [1, [2]]}, "b": {"v": [1, [2]]}}"#), 1);
    assert_eq!(merges(r#"{"a": {"v": [1]}, "b": {"v": [1, 1]}}"#), 0);
    assert_eq!(merges(r#"{"a": {"v": []}, "b": {"v": {}}}"#), 0);
}

#[test]
fn first_discovered_is_canonical() {
    let mut tree = Tree::new();
    let first = tree.add_object([("v", Value::Null)]);
    let second = tree.add_object([("v", Value::Null)]);
    let root = tree.add_object([("a", first), ("b", second)]);
    tree.set_root(root);
    let mut module = discovered(&tree);

    deduplicate_objects(&mut module, &mut EncodeStats::new()).unwrap();

    let objects = module.objects();
    let first_id = objects.get_id(&first).unwrap();
    let second_id = objects.get_id(&second).unwrap();
    assert!(objects.is_live(first_id));
    assert!(!objects.is_live(second_id));
    assert_eq!(objects.resolve(second_id), first_id);
}

#[test]
fn nested_repeats_need_one_pass() {
    let tree = tree(indoc! {r#"
        {"items": [
            {"p": {"q": [1, {"r": null}]}},
            {"p": {"q": [1, {"r": null}]}},
            {"p": {"q": [1, {"r": false}]}},
            {"p": {"q": [1, {"r": null}]}}
        ]}
    "#});
    let mut module = discovered(&tree);
    assert_eq!(module.objects().get_count(), 13);

    let first = deduplicate_objects(&mut module, &mut EncodeStats::new()).unwrap();
    let second = deduplicate_objects(&mut module, &mut EncodeStats::new()).unwrap();

    // items 2 and 4, their p and r objects.
    assert_eq!(first, 6);
    assert_eq!(second, 0);
    assert_eq!(module.objects().get_count(), 7);
}

#[test]
fn self_reference_terminates() {
    let mut tree = Tree::new();
    let parent = tree.add_object([("type", "Parent")]);
    let child = tree.add_object([("parent", parent)]);
    tree.set_field(parent, "child", child);
    tree.set_root(parent);
    let mut module = discovered(&tree);

    let count = deduplicate_objects(&mut module, &mut EncodeStats::new()).unwrap();

    assert_eq!(count, 0);
}

#[test]
fn cycles_closing_on_different_nodes_are_not_merged() {
    let mut tree = Tree::new();
    let a = tree.add_object([("next", Value::Null)]);
    let b = tree.add_object([("next", Value::Null)]);
    tree.set_field(a, "next", a);
    tree.set_field(b, "next", b);
    let root = tree.add_object([("a", a), ("b", b)]);
    tree.set_root(root);
    let mut module = discovered(&tree);

    let count = deduplicate_objects(&mut module, &mut EncodeStats::new()).unwrap();

    assert_eq!(count, 0);
    assert_eq!(module.objects().get_count(), 3);
}

fn binary_chain(tree: &mut Tree, depth: usize) -> NodeId {
    let mut left = tree.add_object([("type", "Identifier"), ("name", "a")]);
    for _ in 0..depth {
        left = tree.add_object([
            ("type", Value::from("BinaryExpression")),
            ("left", Value::from(left)),
        ]);
    }
    left
}

#[test]
fn deep_chains_are_signed_without_recursion() {
    const DEPTH: usize = 100_000;
    let mut tree = Tree::new();
    let a = binary_chain(&mut tree, DEPTH);
    let b = binary_chain(&mut tree, DEPTH);
    let root = tree.add_object([("a", a), ("b", b)]);
    tree.set_root(root);
    let mut module = discovered(&tree);

    let count = deduplicate_objects(&mut module, &mut EncodeStats::new()).unwrap();

    // Every level of the second chain, plus its leaf.
    assert_eq!(count, DEPTH + 1);
    assert_eq!(module.objects().get_count(), DEPTH + 2);
}

#[test]
fn nested_signatures_stay_bounded() {
    const DEPTH: usize = 1_000;
    let mut tree = Tree::new();
    let top = binary_chain(&mut tree, DEPTH);
    tree.set_root(top);
    let module = discovered(&tree);
    let mut signer = Signer::new(&tree, module.shapes());

    let signature = signer.signature(top).unwrap();

    assert!(signature.len() < 32, "{signature}");
}
