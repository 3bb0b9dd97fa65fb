use astpack_core::{Fields, Value};

use crate::ShapeRegistry;

fn fields(names: &[&str]) -> Fields {
    names
        .iter()
        .map(|name| (name.to_string(), Value::Null))
        .collect()
}

#[test]
fn field_order_does_not_matter() {
    let mut shapes = ShapeRegistry::new();

    let first = shapes.find_or_create_shape(&fields(&["b", "a"])).index();
    let second = shapes.find_or_create_shape(&fields(&["a", "b"])).index();

    assert_eq!(first, second);
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes.get(0).unwrap().keys(), ["a", "b"]);
}

#[test]
fn extra_or_missing_field_is_a_new_shape() {
    let mut shapes = ShapeRegistry::new();
    shapes.find_or_create_shape(&fields(&["a", "b"]));

    assert!(shapes.find_shape(&fields(&["a"])).is_none());
    assert!(shapes.find_shape(&fields(&["a", "b", "c"])).is_none());

    let smaller = shapes.find_or_create_shape(&fields(&["a"])).index();
    let larger = shapes.find_or_create_shape(&fields(&["a", "b", "c"])).index();
    assert_eq!((smaller, larger), (1, 2));
    assert_eq!(shapes.len(), 3);
}

#[test]
fn same_size_different_names() {
    let mut shapes = ShapeRegistry::new();
    shapes.find_or_create_shape(&fields(&["a", "b"]));

    assert!(shapes.find_shape(&fields(&["a", "c"])).is_none());
}

#[test]
fn empty_object_has_its_own_shape() {
    let mut shapes = ShapeRegistry::new();
    let shape = shapes.find_or_create_shape(&fields(&[]));

    assert!(shape.is_empty());
    assert_eq!(shape.canonical_text(), "[]");
}

#[test]
fn canonical_text_is_sorted_json() {
    let mut shapes = ShapeRegistry::new();
    let shape = shapes.find_or_create_shape(&fields(&["type", "body", "say \"hi\""]));

    assert_eq!(shape.canonical_text(), r#"["body","say \"hi\"","type"]"#);
    assert_eq!(shape.to_string(), r#"<Shape ["body","say \"hi\"","type"]>"#);
}

#[test]
fn iter_is_discovery_order() {
    let mut shapes = ShapeRegistry::new();
    shapes.find_or_create_shape(&fields(&["z"]));
    shapes.find_or_create_shape(&fields(&["a"]));

    let keys: Vec<&[String]> = shapes.iter().map(|shape| shape.keys()).collect();
    assert_eq!(keys, [["z"], ["a"]]);
}
