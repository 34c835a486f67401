use pretty_assertions::assert_eq;

use super::*;

fn count(begin: f64, step: f64, end: f64) -> u32 {
    RangeType::with_step(begin, step, end).num_values()
}

#[test]
fn single_value_ranges() {
    assert_eq!(count(0.0, 1.0, 0.0), 1);
    assert_eq!(count(3.0, f64::INFINITY, 10.0), 1);
}

#[test]
fn empty_ranges() {
    assert_eq!(count(0.0, 1.0, -1.0), 0);
    assert_eq!(count(0.0, -1.0, 5.0), 0);
}

#[test]
fn unbounded_ranges() {
    assert_eq!(count(0.0, 0.0, 5.0), u32::MAX);
    assert_eq!(count(0.0, 1.0, f64::INFINITY), u32::MAX);
    assert_eq!(count(f64::NEG_INFINITY, 1.0, 0.0), u32::MAX);
}

#[test]
fn nan_components_make_the_range_empty() {
    assert_eq!(count(f64::NAN, 1.0, 5.0), 0);
    assert_eq!(count(0.0, f64::NAN, 5.0), 0);
    assert_eq!(count(0.0, 1.0, f64::NAN), 0);
    assert_eq!(RangeType::with_step(0.0, f64::NAN, 5.0).iter().count(), 0);
}

#[test]
fn ordinary_counts() {
    assert_eq!(count(0.0, 1.0, 10.0), 11);
    assert_eq!(count(0.0, 2.0, 9.0), 5);
    assert_eq!(count(10.0, -2.5, 0.0), 5);
    assert_eq!(RangeType::new(1.0, 3.0).num_values(), 3);
}

#[test]
fn quotients_just_below_a_whole_number_count_it() {
    // (0.3 - 0.0) / 0.1 == 2.9999999999999996
    assert_eq!(count(0.0, 0.1, 0.3), 4);
    assert_eq!(count(0.0, 0.1, 1.0), 11);
}

#[test]
fn iteration_matches_count() {
    let range = RangeType::with_step(0.0, 0.5, 2.0);
    let values: Vec<f64> = range.iter().collect();
    assert_eq!(values, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    assert_eq!(range.iter().size_hint(), (5, Some(5)));
}

#[test]
fn descending_iteration() {
    let range = RangeType::with_step(3.0, -1.0, 1.0);
    assert_eq!(range.iter().collect::<Vec<_>>(), vec![3.0, 2.0, 1.0]);
}

#[test]
fn zero_step_iterates_nothing() {
    let range = RangeType::with_step(1.0, 0.0, 5.0);
    let mut iter = range.iter();
    assert!(iter.is_done());
    assert_eq!(iter.next(), None);
}

#[test]
fn cursor_states() {
    let range = RangeType::new(0.0, 1.0);
    let mut iter = range.iter();
    assert_eq!(iter.state(), CursorState::Begin);
    assert_eq!(iter.next(), Some(0.0));
    assert_eq!(iter.state(), CursorState::Running);
    assert_eq!(iter.next(), Some(1.0));
    assert_eq!(iter.state(), CursorState::End);
    assert_eq!(iter.next(), None);
}

#[test]
fn cursor_equality() {
    let range = RangeType::new(0.0, 2.0);
    let mut a = range.iter();
    let mut b = range.iter();
    assert!(a == b);
    a.next();
    assert!(a != b);
    b.next();
    assert!(a == b);

    // Exhausted cursors compare by state only.
    let other = RangeType::new(0.0, 2.0);
    let mut done_a = range.iter();
    let mut done_b = other.iter();
    done_a.by_ref().for_each(drop);
    done_b.by_ref().for_each(drop);
    assert!(done_a == done_b);
}

#[test]
fn empty_ranges_are_all_equal() {
    let a = RangeType::with_step(0.0, 1.0, -1.0);
    let b = RangeType::with_step(5.0, -1.0, 9.0);
    assert_eq!(a, b);
    assert!(a <= b);
    assert!(a >= b);
    assert!(a < RangeType::new(0.0, 1.0));
}

#[test]
fn non_empty_ranges_order_by_begin_then_step_then_count() {
    let base = RangeType::with_step(0.0, 1.0, 5.0);
    assert!(base < RangeType::with_step(1.0, 1.0, 5.0));
    assert!(base < RangeType::with_step(0.0, 2.0, 5.0));
    assert!(base < RangeType::with_step(0.0, 1.0, 6.0));
    assert_eq!(base, RangeType::with_step(0.0, 1.0, 5.5));
    assert!(base > RangeType::with_step(0.0, 1.0, 1.0));
}

#[test]
fn display() {
    assert_eq!(
        RangeType::with_step(0.0, 0.5, 10.0).to_string(),
        "[0 : 0.5 : 10]"
    );
    assert_eq!(
        RangeType::with_step(f64::NEG_INFINITY, 1.0, 1e30).to_string(),
        "[-inf : 1 : 1e+30]"
    );
}
