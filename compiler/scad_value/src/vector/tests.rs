use pretty_assertions::assert_eq;

use super::*;

fn nums(values: &[f64]) -> VectorType {
    values.iter().copied().map(Value::Number).collect()
}

fn collect_numbers(vector: &VectorType) -> Vec<f64> {
    vector
        .iter()
        .map(|v| match v {
            Value::Number(n) => n,
            other => panic!("expected a number, got {other:?}"),
        })
        .collect()
}

#[test]
fn append_embedded_is_counted_without_copying() {
    let mut parent = nums(&[1.0]);
    parent.append_embedded(nums(&[2.0, 3.0, 4.0]).into_embedded());
    assert_eq!(parent.size(), 4);
    assert_eq!(parent.embed_excess(), 2);
    assert_eq!(collect_numbers(&parent), vec![1.0, 2.0, 3.0, 4.0]);
    // Iteration leaves the placeholder in place.
    assert_eq!(parent.embed_excess(), 2);
}

#[test]
fn empty_embedded_vector_appends_nothing() {
    let mut parent = nums(&[1.0]);
    parent.append_embedded(VectorType::new().into_embedded());
    assert_eq!(parent.size(), 1);
    assert_eq!(parent.embed_excess(), 0);
}

#[test]
fn single_element_embedded_vector_is_stored_directly() {
    let mut parent = VectorType::new();
    parent.append_embedded(nums(&[9.0]).into_embedded());
    assert_eq!(parent.size(), 1);
    assert_eq!(parent.embed_excess(), 0);
    assert_eq!(parent.as_slice()[0], Value::Number(9.0));
}

#[test]
fn append_value_splices_embedded_vectors() {
    let mut parent = VectorType::new();
    parent.append_value(Value::Number(0.0));
    parent.append_value(Value::EmbeddedVector(nums(&[1.0, 2.0]).into_embedded()));
    parent.append_value(Value::Number(3.0));
    assert_eq!(parent.size(), 4);
    assert_eq!(collect_numbers(&parent), vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn nested_embedding_iterates_in_order() {
    let mut inner = nums(&[2.0]);
    inner.append_embedded(nums(&[3.0, 4.0]).into_embedded());
    let mut outer = nums(&[1.0]);
    outer.append_embedded(inner.into_embedded());
    outer.append_value(Value::Number(5.0));
    assert_eq!(outer.size(), 5);
    assert_eq!(collect_numbers(&outer), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn random_access_flattens_once_for_all_clones() {
    let mut parent = nums(&[1.0]);
    parent.append_embedded(nums(&[2.0, 3.0]).into_embedded());
    let copy = parent.clone();
    assert_eq!(parent.get(2), Value::Number(3.0));
    assert_eq!(parent.embed_excess(), 0);
    assert_eq!(copy.embed_excess(), 0);
    assert_eq!(copy.as_slice().len(), 3);
}

#[test]
fn get_out_of_range_is_undefined() {
    let vector = nums(&[1.0]);
    assert_eq!(vector.get(1), Value::Undefined);
}

#[test]
fn flatten_preserves_order_and_size() {
    let mut parent = VectorType::new();
    for chunk in [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]] {
        parent.append_embedded(nums(&chunk).into_embedded());
    }
    let before = collect_numbers(&parent);
    parent.flatten();
    assert_eq!(parent.size(), 6);
    assert_eq!(parent.embed_excess(), 0);
    assert_eq!(collect_numbers(&parent), before);
}

#[test]
fn indexing_during_iteration_keeps_the_sequence() {
    let mut parent = nums(&[1.0]);
    parent.append_embedded(nums(&[2.0, 3.0]).into_embedded());
    parent.append_value(Value::Number(4.0));

    let mut seen = Vec::new();
    let mut iter = parent.iter();
    seen.extend(iter.next());
    seen.extend(iter.next());
    // Flattens the storage the iterator is walking.
    assert_eq!(parent.get(0), Value::Number(1.0));
    seen.extend(iter);
    assert_eq!(
        seen,
        vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
            Value::Number(4.0)
        ]
    );
}

#[test]
fn appends_do_not_leak_into_clones() {
    let original = nums(&[1.0, 2.0]);
    let mut grown = original.clone();
    grown.append_value(Value::Number(3.0));
    assert_eq!(original.size(), 2);
    assert_eq!(grown.size(), 3);
    assert!(!VectorType::ptr_eq(&original, &grown));
}

#[test]
fn append_vector_into_empty_takes_storage() {
    let source = nums(&[1.0, 2.0]);
    let mut target = VectorType::new();
    target.append_vector(source.clone());
    assert!(VectorType::ptr_eq(&target, &source));
}

#[test]
fn append_vector_carries_embed_excess() {
    let mut tail = nums(&[2.0]);
    tail.append_embedded(nums(&[3.0, 4.0]).into_embedded());
    let mut head = nums(&[1.0]);
    head.append_vector(tail);
    assert_eq!(head.size(), 4);
    assert_eq!(head.embed_excess(), 1);
    assert_eq!(collect_numbers(&head), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn append_shared_vector_leaves_source_intact() {
    let tail = nums(&[2.0, 3.0]);
    let mut head = nums(&[1.0]);
    head.append_vector(tail.clone());
    assert_eq!(collect_numbers(&head), vec![1.0, 2.0, 3.0]);
    assert_eq!(collect_numbers(&tail), vec![2.0, 3.0]);
}

#[test]
fn equality_ignores_embedding_layout() {
    let mut embedded = nums(&[1.0]);
    embedded.append_embedded(nums(&[2.0, 3.0]).into_embedded());
    assert_eq!(embedded, nums(&[1.0, 2.0, 3.0]));
    assert_ne!(embedded, nums(&[1.0, 2.0]));
    assert_ne!(embedded, nums(&[1.0, 2.0, 4.0]));
}

#[test]
fn from_vec_splices_embedded_elements() {
    let vector = VectorType::from(vec![
        Value::Number(1.0),
        Value::EmbeddedVector(nums(&[2.0, 3.0]).into_embedded()),
    ]);
    assert_eq!(vector.size(), 3);
}

#[test]
fn vec3_builds_three_numbers() {
    assert_eq!(collect_numbers(&VectorType::vec3(1.0, 2.0, 3.0)), vec![1.0, 2.0, 3.0]);
}

#[test]
fn iterator_is_fused() {
    let vector = nums(&[1.0]);
    let mut iter = vector.iter();
    assert!(iter.next().is_some());
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn dropping_a_long_embedded_chain_does_not_overflow() {
    let mut chain = nums(&[0.0, 0.0]);
    for _ in 0..200_000 {
        let mut next = nums(&[0.0]);
        next.append_embedded(chain.into_embedded());
        chain = next;
    }
    assert_eq!(chain.size(), 200_002);
    drop(chain);
}

#[test]
fn dropping_deeply_nested_vectors_does_not_overflow() {
    let mut nested = VectorType::new();
    for _ in 0..200_000 {
        nested = VectorType::from(vec![Value::Vector(nested)]);
    }
    drop(nested);
}
