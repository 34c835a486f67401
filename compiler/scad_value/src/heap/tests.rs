use super::*;

#[test]
fn test_heap_deref() {
    let h = Heap::new(42i64);
    assert_eq!(*h, 42);
}

#[test]
fn test_heap_clone_shares_allocation() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let h2 = h1.clone();
    assert_eq!(*h1, *h2);
    assert!(Heap::ptr_eq(&h1, &h2));
    assert_eq!(Heap::share_count(&h1), 2);
}

#[test]
fn test_heap_eq_compares_contents() {
    let h1 = Heap::new("hello".to_string());
    let h2 = Heap::new("hello".to_string());
    let h3 = Heap::new("world".to_string());
    assert_eq!(h1, h2);
    assert_ne!(h1, h3);
    assert!(!Heap::ptr_eq(&h1, &h2));
}

#[test]
fn test_make_mut_copies_when_shared() {
    let mut h1 = Heap::new(vec![1, 2]);
    let h2 = h1.clone();
    Heap::make_mut(&mut h1).push(3);
    assert_eq!(*h1, vec![1, 2, 3]);
    assert_eq!(*h2, vec![1, 2]);
    assert!(!Heap::ptr_eq(&h1, &h2));
}

#[test]
fn test_try_unwrap_only_for_last_owner() {
    let h1 = Heap::new(7u8);
    let h2 = h1.clone();
    let h1 = match Heap::try_unwrap(h1) {
        Ok(_) => panic!("shared heap must not unwrap"),
        Err(h) => h,
    };
    drop(h2);
    assert_eq!(Heap::try_unwrap(h1).ok(), Some(7));
}
