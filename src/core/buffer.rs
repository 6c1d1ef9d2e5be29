//! Shared, copy-on-write scalar storage.
//!
//! A [`Buffer`] is a contiguous block of `count` elements behind an `Arc`.
//! Cloning a buffer (or any container holding one) is O(1) and shares the
//! allocation. The first write through a handle whose allocation is shared
//! detaches that handle onto a private copy, so writes are never observed
//! through another handle. [`Buffer::deep_copy`] detaches eagerly.
//!
//! No shape validation happens here: out-of-range indexes panic through the
//! slice bounds check. Containers validate indexes against their shape first
//! and panic with a message naming the offending index.

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Buffer<T> {
    data: Arc<Vec<T>>,
}

impl<T: Copy + Default> Buffer<T> {
    /// Storage for `count` elements, each set to `T::default()` (zero for
    /// every numeric scalar).
    pub fn allocate(count: usize) -> Self {
        Self::filled(count, T::default())
    }

    /// Storage for `count` copies of `value`.
    pub fn filled(count: usize, value: T) -> Self {
        Buffer {
            data: Arc::new(vec![value; count]),
        }
    }

    /// Copy-initialises from a flat slice.
    pub fn from_slice(data: &[T]) -> Self {
        Buffer {
            data: Arc::new(data.to_vec()),
        }
    }

    /// Takes ownership of `data` without copying.
    pub fn from_vec(data: Vec<T>) -> Self {
        Buffer { data: Arc::new(data) }
    }

    /// A new allocation holding a copy of `other`'s elements.
    pub fn deep_copy(other: &Buffer<T>) -> Self {
        log::trace!("deep copy of buffer with {} elements", other.count());
        Self::from_slice(other.as_slice())
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.data[index]
    }

    /// Writes one element, detaching from other handles first if shared.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        self.as_mut_slice()[index] = value;
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the elements. Detaches from other handles first if
    /// the allocation is shared.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the buffer, copying only if the allocation is shared.
    pub fn into_vec(self) -> Vec<T> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| shared.as_ref().clone())
    }

    /// True when both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Buffer<T>) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// True when no other handle shares this allocation.
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.data) == 1
    }
}

impl<T: Copy + Default> From<Vec<T>> for Buffer<T> {
    fn from(data: Vec<T>) -> Self {
        Buffer::from_vec(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_zeroed() {
        let b = Buffer::<f64>::allocate(4);
        assert_eq!(b.count(), 4);
        assert!(b.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn clone_shares_until_written() {
        let a = Buffer::from_slice(&[1i32, 2, 3]);
        let mut b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.is_unique());

        b.set(0, 10);
        assert!(!a.ptr_eq(&b));
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(b.as_slice(), &[10, 2, 3]);
        assert!(a.is_unique() && b.is_unique());
    }

    #[test]
    fn deep_copy_is_a_distinct_allocation() {
        let a = Buffer::filled(3, 2.5f32);
        let c = Buffer::deep_copy(&a);
        assert!(!a.ptr_eq(&c));
        assert_eq!(a.as_slice(), c.as_slice());
    }

    #[test]
    fn into_vec_copies_only_when_shared() {
        let a = Buffer::from_vec(vec![1u8, 2]);
        let b = a.clone();
        assert_eq!(a.into_vec(), vec![1, 2]);
        assert!(b.is_unique());
        assert_eq!(b.into_vec(), vec![1, 2]);
    }

    #[test]
    #[should_panic]
    fn out_of_range_get_panics() {
        let b = Buffer::<f32>::allocate(2);
        let _ = b.get(2);
    }
}
