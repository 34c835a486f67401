//! Vector values with O(1) concatenation.
//!
//! # Embedded vectors
//!
//! List comprehensions build vectors by splicing many sub-vectors into a
//! parent. Copying every sub-vector on append makes that quadratic, so a
//! sub-vector can instead be appended as an [`EmbeddedVectorType`]: it is
//! stored as a single placeholder element and its remaining elements are
//! counted in `embed_excess`. `size()` is always
//! `direct elements + embed_excess`.
//!
//! The placeholders are resolved lazily:
//! - [`VectorType::iter`] walks through embedded sub-vectors in place, using
//!   an explicit stack of cursors, without flattening.
//! - Any random access ([`VectorType::get`], [`VectorType::as_slice`])
//!   flattens first. Flattening rewrites the shared storage, so every clone
//!   sees the flat form afterwards and pays for it at most once.
//!
//! # Sharing
//!
//! Storage is shared between clones. Mutators take `&mut self` and copy the
//! storage first if it is shared, so no clone ever observes an append.
//! Flattening is the one in-place rewrite of shared storage; it does not
//! change the logical sequence.
//!
//! # Teardown
//!
//! Dropping the last owner of a deeply nested or long embedded chain must not
//! recurse once per level. The storage's `Drop` moves children onto a
//! worklist and releases them one at a time.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::heap::Heap;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Backing storage of a vector: direct elements plus the number of extra
/// elements hidden inside embedded placeholders.
#[derive(Clone, Default)]
struct VectorObject {
    vec: Vec<Value>,
    embed_excess: usize,
}

impl VectorObject {
    fn size(&self) -> usize {
        self.vec.len() + self.embed_excess
    }
}

impl Drop for VectorObject {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.vec);
        while let Some(value) = pending.pop() {
            let storage = match value {
                Value::Vector(vector) => vector.storage,
                Value::EmbeddedVector(embedded) => embedded.0.storage,
                _ => continue,
            };
            // Shared storage just loses one owner; only the last owner's
            // elements join the worklist.
            if let Ok(cell) = Heap::try_unwrap(storage) {
                let mut object = cell.into_inner();
                pending.append(&mut object.vec);
            }
        }
    }
}

type Storage = Heap<RefCell<VectorObject>>;

/// Vector payload of [`Value::Vector`].
#[derive(Clone)]
pub struct VectorType {
    storage: Storage,
}

impl VectorType {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Wrap plain values. Embedded placeholders in `values` are spliced.
    pub fn from_vec(values: Vec<Value>) -> Self {
        if values
            .iter()
            .any(|v| matches!(v, Value::EmbeddedVector(_)))
        {
            let mut vector = Self::with_capacity(values.len());
            for value in values {
                vector.append_value(value);
            }
            return vector;
        }
        VectorType {
            storage: Heap::new(RefCell::new(VectorObject {
                vec: values,
                embed_excess: 0,
            })),
        }
    }

    /// `[x, y, z]`.
    pub fn vec3(x: f64, y: f64, z: f64) -> Self {
        Self::from_vec(vec![Value::Number(x), Value::Number(y), Value::Number(z)])
    }

    /// Logical element count, including elements of embedded sub-vectors.
    #[inline]
    pub fn size(&self) -> usize {
        self.storage.borrow().size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Elements still hidden in embedded placeholders.
    #[inline]
    pub fn embed_excess(&self) -> usize {
        self.storage.borrow().embed_excess
    }

    /// Clone of the element at `index`, or `Undefined` when out of range.
    /// Flattens first.
    pub fn get(&self, index: usize) -> Value {
        self.as_slice()
            .get(index)
            .cloned()
            .unwrap_or(Value::Undefined)
    }

    /// Flat view of the elements. Flattens first.
    pub fn as_slice(&self) -> Ref<'_, [Value]> {
        self.flatten();
        Ref::map(self.storage.borrow(), |object| object.vec.as_slice())
    }

    /// Lazily walk the logical elements, descending into embedded
    /// sub-vectors without flattening.
    pub fn iter(&self) -> VectorIter {
        let mut stack = SmallVec::new();
        stack.push(Cursor::new(self.storage.clone()));
        VectorIter { stack }
    }

    /// Append one element. An embedded vector is spliced, not nested.
    pub fn append_value(&mut self, value: Value) {
        match value {
            Value::EmbeddedVector(embedded) => self.append_embedded(embedded),
            value => self.object_mut().vec.push(value),
        }
    }

    /// Splice `embedded`'s elements in O(1), deferring the copy to the next
    /// flatten.
    pub fn append_embedded(&mut self, embedded: EmbeddedVectorType) {
        match embedded.size() {
            0 => {}
            // A lone element would not change `embed_excess`, which is what
            // signals that a flatten is due, so store the element itself.
            1 => {
                let only = embedded.0.get(0);
                self.object_mut().vec.push(only);
            }
            size => {
                let object = self.object_mut();
                // The placeholder already counts as one element.
                object.embed_excess += size - 1;
                object.vec.push(Value::EmbeddedVector(embedded));
            }
        }
    }

    /// Concatenate `other` onto the end of this vector.
    ///
    /// An empty receiver takes over `other`'s storage in O(1); otherwise
    /// `other`'s direct elements (placeholders included) are moved across.
    pub fn append_vector(&mut self, other: VectorType) {
        if self.is_empty() {
            self.storage = other.storage;
            return;
        }
        let (values, excess) = match Heap::try_unwrap(other.storage) {
            Ok(cell) => {
                let mut object = cell.into_inner();
                (std::mem::take(&mut object.vec), object.embed_excess)
            }
            Err(shared) => {
                let object = shared.borrow();
                (object.vec.clone(), object.embed_excess)
            }
        };
        let object = self.object_mut();
        object.vec.reserve(values.len());
        object.vec.extend(values);
        object.embed_excess += excess;
    }

    /// Materialize every embedded sub-vector as direct elements, in order.
    pub fn flatten(&self) {
        if self.storage.borrow().embed_excess == 0 {
            return;
        }
        let flat: Vec<Value> = self.iter().collect();
        tracing::trace!(size = flat.len(), "flattened vector");
        let previous = {
            let mut object = self.storage.borrow_mut();
            object.embed_excess = 0;
            std::mem::replace(&mut object.vec, flat)
        };
        drop(previous);
    }

    /// Turn this vector into a fragment to splice into a parent.
    pub fn into_embedded(self) -> EmbeddedVectorType {
        EmbeddedVectorType(self)
    }

    /// Whether both handles share storage.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Heap::ptr_eq(&a.storage, &b.storage)
    }

    fn object_mut(&mut self) -> &mut VectorObject {
        Heap::make_mut(&mut self.storage).get_mut()
    }
}

impl Default for VectorType {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Value>> for VectorType {
    fn from(values: Vec<Value>) -> Self {
        Self::from_vec(values)
    }
}

impl FromIterator<Value> for VectorType {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut vector = VectorType::new();
        for value in iter {
            vector.append_value(value);
        }
        vector
    }
}

impl Extend<Value> for VectorType {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        for value in iter {
            self.append_value(value);
        }
    }
}

impl<'a> IntoIterator for &'a VectorType {
    type Item = Value;
    type IntoIter = VectorIter;

    fn into_iter(self) -> VectorIter {
        self.iter()
    }
}

/// Element-wise equality over the logical sequences.
impl PartialEq for VectorType {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && ensure_sufficient_stack(|| self.iter().zip(other.iter()).all(|(a, b)| a == b))
    }
}

impl fmt::Debug for VectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| f.debug_list().entries(self.iter()).finish())
    }
}

/// A vector being spliced into a parent vector.
///
/// Appending one of these appends its elements, not itself. It only exists
/// on the way into a parent; the evaluator never sees one as a result.
#[derive(Clone, PartialEq)]
pub struct EmbeddedVectorType(VectorType);

impl EmbeddedVectorType {
    pub fn new(vector: VectorType) -> Self {
        EmbeddedVectorType(vector)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.0.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_vector(&self) -> &VectorType {
        &self.0
    }

    pub fn into_vector(self) -> VectorType {
        self.0
    }
}

impl From<VectorType> for EmbeddedVectorType {
    fn from(vector: VectorType) -> Self {
        EmbeddedVectorType(vector)
    }
}

impl fmt::Debug for EmbeddedVectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Embedded({:?})", self.0)
    }
}

struct Cursor {
    storage: Storage,
    /// Index into the storage's direct elements.
    pos: usize,
    /// Logical elements yielded from this level and everything below it.
    yielded: usize,
    /// Storage still had placeholders when this cursor started.
    lazy: bool,
}

impl Cursor {
    fn new(storage: Storage) -> Self {
        let lazy = storage.borrow().embed_excess > 0;
        Cursor {
            storage,
            pos: 0,
            yielded: 0,
            lazy,
        }
    }
}

/// Iterator over a vector's logical elements.
///
/// Holds one cursor per embedded level currently being walked; when an inner
/// level runs out, the outer cursor resumes where it left off.
pub struct VectorIter {
    stack: SmallVec<[Cursor; 4]>,
}

impl VectorIter {
    /// A level flattened behind our back (say, by indexing the vector being
    /// iterated) now has its logical order as its direct order, so restart it
    /// at the logical offset and drop the levels below it.
    fn resync(&mut self) {
        let flattened = self
            .stack
            .iter()
            .position(|c| c.lazy && c.storage.borrow().embed_excess == 0);
        if let Some(level) = flattened {
            self.stack.truncate(level + 1);
            let cursor = &mut self.stack[level];
            cursor.pos = cursor.yielded;
            cursor.lazy = false;
        }
    }
}

impl Iterator for VectorIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.resync();
        loop {
            let cursor = self.stack.last_mut()?;
            let element = cursor.storage.borrow().vec.get(cursor.pos).cloned();
            match element {
                None => {
                    self.stack.pop();
                }
                Some(Value::EmbeddedVector(embedded)) => {
                    cursor.pos += 1;
                    self.stack.push(Cursor::new(embedded.0.storage));
                }
                Some(value) => {
                    cursor.pos += 1;
                    for level in &mut self.stack {
                        level.yielded += 1;
                    }
                    return Some(value);
                }
            }
        }
    }
}

impl FusedIterator for VectorIter {}

#[cfg(test)]
mod tests;
