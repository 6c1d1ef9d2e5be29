//! One-dimensional dense vector.

use crate::core::buffer::Buffer;
use crate::core::traits::{Indexing, Padding, RandomFill, Reduction, Scalar, Update};
use rand::Rng;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
pub struct Vector<T> {
    pub(crate) buffer: Buffer<T>,
    length: usize,
}

impl<T: Scalar> Vector<T> {
    pub fn filled(length: usize, value: T) -> Self {
        Vector {
            buffer: Buffer::filled(length, value),
            length,
        }
    }

    pub fn zeros(length: usize) -> Self {
        Self::filled(length, T::zero())
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        let length = data.len();
        Vector {
            buffer: Buffer::from_vec(data),
            length,
        }
    }

    pub fn from_slice(data: &[T]) -> Self {
        Vector {
            buffer: Buffer::from_slice(data),
            length: data.len(),
        }
    }

    /// A zero vector of `other`'s length with its own storage.
    pub fn like(other: &Vector<T>) -> Self {
        Self::zeros(other.length)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    #[track_caller]
    fn check(&self, i: usize) {
        assert!(i < self.length, "index {i} out of range for vector of length {}", self.length);
    }

    #[track_caller]
    pub fn get(&self, i: usize) -> T {
        self.check(i);
        self.buffer.get(i)
    }

    #[track_caller]
    pub fn set(&mut self, i: usize, value: T) {
        self.check(i);
        self.buffer.set(i, value);
    }

    pub fn flat(&self) -> Vec<T> {
        self.buffer.as_slice().to_vec()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buffer.as_mut_slice()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.buffer.into_vec()
    }

    /// Equal-valued vector backed by a new allocation.
    pub fn copy(&self) -> Self {
        self.rebuild(Buffer::deep_copy(&self.buffer))
    }

    pub(crate) fn rebuild(&self, buffer: Buffer<T>) -> Self {
        debug_assert_eq!(buffer.count(), self.length);
        Vector {
            buffer,
            length: self.length,
        }
    }
}

impl<T: Reduction> Vector<T> {
    /// Inner product `selfᵀ other`.
    ///
    /// # Panics
    /// Panics if the lengths differ.
    #[track_caller]
    pub fn dot(&self, other: &Vector<T>) -> T {
        assert_eq!(self.length, other.length, "dot: vectors must have the same length");
        T::dot(self.as_slice(), other.as_slice())
    }
}

impl<T: Update> Vector<T> {
    /// In-place `self ← self + α x`.
    ///
    /// # Panics
    /// Panics if the lengths differ.
    #[track_caller]
    pub fn update(&mut self, alpha: T, x: &Vector<T>) {
        assert_eq!(self.length, x.length, "update: vectors must have the same length");
        T::axpy(alpha, x.as_slice(), self.buffer.as_mut_slice());
    }
}

impl<T: Padding> Vector<T> {
    /// `before` copies of `value`, the elements, then `after` copies.
    pub fn padded(&self, before: usize, after: usize, value: T) -> Self {
        Vector::from_vec(T::pad(self.as_slice(), before, after, value))
    }
}

impl<T: RandomFill> Vector<T> {
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        let mut v = Self::zeros(length);
        v.fill_random(rng);
        v
    }
}

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Vector::from_vec(data)
    }
}

impl<T: Scalar> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl<T: Scalar> Indexing for Vector<T> {
    type Elem = T;

    fn dims(&self) -> Vec<usize> {
        vec![self.length]
    }

    fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }
}

impl<T: Scalar> Index<usize> for Vector<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, i: usize) -> &T {
        self.check(i);
        &self.buffer.as_slice()[i]
    }
}

impl<T: Scalar> IndexMut<usize> for Vector<T> {
    #[track_caller]
    fn index_mut(&mut self, i: usize) -> &mut T {
        self.check(i);
        &mut self.buffer.as_mut_slice()[i]
    }
}

impl<T: Scalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_operators() {
        let a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let b = Vector::from_vec(vec![0.5, 0.5, 0.5]);
        assert_eq!((&a + &b).flat(), vec![1.5, 2.5, 3.5]);
        assert_eq!((&a - &b).flat(), vec![0.5, 1.5, 2.5]);
        assert_eq!((&a * 2.0).flat(), vec![2.0, 4.0, 6.0]);
        assert_eq!((&a / 2.0).flat(), vec![0.5, 1.0, 1.5]);
        assert_eq!((-&a).flat(), vec![-1.0, -2.0, -3.0]);
        assert_eq!(a.elementwise_mul(&b).flat(), vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn dot_and_update() {
        let x = Vector::from_vec(vec![1.0f32, 2.0, 3.0]);
        let mut y = Vector::from_vec(vec![4.0f32, -5.0, 6.0]);
        assert_eq!(x.dot(&y), 12.0);
        y.update(2.0, &x);
        assert_eq!(y.flat(), vec![6.0, -1.0, 12.0]);
    }

    #[test]
    fn integer_vectors_reduce_without_update() {
        let v: Vector<i64> = (1..=4).collect();
        assert_eq!(v.sum(), 10);
        assert_eq!(v.dot(&v), 30);
        assert_eq!(v.norm(), 30.0f64.sqrt());
    }

    #[test]
    fn padded_vector() {
        let v = Vector::from_vec(vec![1, 2]);
        assert_eq!(v.padded(2, 1, 0).flat(), vec![0, 0, 1, 2, 0]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn mismatched_add_panics() {
        let _ = &Vector::from_vec(vec![1.0]) + &Vector::from_vec(vec![1.0, 2.0]);
    }

    #[test]
    fn display_flat() {
        assert_eq!(Vector::from_vec(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
    }
}
