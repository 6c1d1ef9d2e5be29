//! N-dimensional array with a dynamic shape.
//!
//! Elements are stored in row-major (C) order. For a shape
//! `[d₀, d₁, …, dₙ₋₁]` the strides are
//!
//! ```text
//! stride[n-1] = 1
//! stride[k]   = stride[k+1] * shape[k+1]
//! flat        = Σ index[k] * stride[k]
//! ```
//!
//! and [`ShapedArray::multi_index`] inverts the mapping by successive
//! division and remainder with the same strides. A zero-dimensional array
//! (empty shape) holds exactly one element.

use crate::core::buffer::Buffer;
use crate::core::traits::{Indexing, RandomFill, Scalar};
use crate::matrix::{Matrix, Vector};
use rand::Rng;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
pub struct ShapedArray<T> {
    pub(crate) buffer: Buffer<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

/// Row-major strides for `shape`, in elements.
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for d in (0..shape.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * shape[d + 1];
    }
    strides
}

impl<T: Scalar> ShapedArray<T> {
    pub fn filled(shape: &[usize], value: T) -> Self {
        ShapedArray {
            buffer: Buffer::filled(shape.iter().product(), value),
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::filled(shape, T::zero())
    }

    /// Wraps row-major `data`.
    ///
    /// # Panics
    /// Panics if `data.len()` is not the product of `shape`.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Self {
        let count: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            count,
            "ShapedArray::from_vec: {} elements cannot fill shape {shape:?}",
            data.len()
        );
        ShapedArray {
            buffer: Buffer::from_vec(data),
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// A zero array with `other`'s shape and its own storage.
    pub fn like(other: &ShapedArray<T>) -> Self {
        Self::zeros(&other.shape)
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Flat row-major offset of `index`.
    ///
    /// # Panics
    /// Panics if `index` has the wrong rank or any component is out of range.
    #[track_caller]
    pub fn flat_index(&self, index: &[usize]) -> usize {
        assert_eq!(
            index.len(),
            self.shape.len(),
            "index {index:?} has rank {}, array has rank {}",
            index.len(),
            self.shape.len()
        );
        let mut flat = 0;
        for ((&i, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            assert!(i < dim, "index {index:?} out of range for shape {:?}", self.shape);
            flat += i * stride;
        }
        flat
    }

    /// Multi-index of the element at flat offset `flat`.
    ///
    /// # Panics
    /// Panics if `flat` is not below the element count.
    #[track_caller]
    pub fn multi_index(&self, flat: usize) -> Vec<usize> {
        assert!(
            flat < self.buffer.count(),
            "flat index {flat} out of range for shape {:?}",
            self.shape
        );
        let mut rem = flat;
        self.strides
            .iter()
            .map(|&stride| {
                let i = rem / stride;
                rem %= stride;
                i
            })
            .collect()
    }

    #[track_caller]
    pub fn get(&self, index: &[usize]) -> T {
        self.buffer.get(self.flat_index(index))
    }

    #[track_caller]
    pub fn set(&mut self, index: &[usize], value: T) {
        let k = self.flat_index(index);
        self.buffer.set(k, value);
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

    /// Equal-valued array backed by a new allocation.
    pub fn copy(&self) -> Self {
        self.rebuild(Buffer::deep_copy(&self.buffer))
    }

    /// Same elements under a new shape. The result shares storage with
    /// `self` until either is written to.
    ///
    /// # Panics
    /// Panics if the element counts differ.
    #[track_caller]
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let count: usize = shape.iter().product();
        assert_eq!(
            count,
            self.buffer.count(),
            "cannot reshape {:?} into {shape:?}",
            self.shape
        );
        ShapedArray {
            buffer: self.buffer.clone(),
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// Reverses the order of the axes.
    pub fn transpose(&self) -> Self {
        let shape: Vec<usize> = self.shape.iter().rev().copied().collect();
        let strides = compute_strides(&shape);
        let src = self.buffer.as_slice();
        let mut out = Buffer::allocate(src.len());
        let dst = out.as_mut_slice();
        for (flat, value) in src.iter().enumerate() {
            let index = self.multi_index(flat);
            let target: usize = index.iter().rev().zip(&strides).map(|(i, s)| i * s).sum();
            dst[target] = *value;
        }
        ShapedArray {
            buffer: out,
            shape,
            strides,
        }
    }

    pub(crate) fn rebuild(&self, buffer: Buffer<T>) -> Self {
        debug_assert_eq!(buffer.count(), self.buffer.count());
        ShapedArray {
            buffer,
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }
}

impl<T: RandomFill> ShapedArray<T> {
    pub fn random<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Self {
        let mut a = Self::zeros(shape);
        a.fill_random(rng);
        a
    }
}

impl<T: Scalar> From<Matrix<T>> for ShapedArray<T> {
    fn from(m: Matrix<T>) -> Self {
        let shape = [m.rows(), m.columns()];
        ShapedArray {
            buffer: m.buffer,
            shape: shape.to_vec(),
            strides: compute_strides(&shape),
        }
    }
}

impl<T: Scalar> From<Vector<T>> for ShapedArray<T> {
    fn from(v: Vector<T>) -> Self {
        let shape = [v.len()];
        ShapedArray {
            buffer: v.buffer,
            shape: shape.to_vec(),
            strides: vec![1],
        }
    }
}

impl<T: Scalar> Indexing for ShapedArray<T> {
    type Elem = T;

    fn dims(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }
}

impl<T: Scalar> Index<&[usize]> for ShapedArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: &[usize]) -> &T {
        &self.buffer.as_slice()[self.flat_index(index)]
    }
}

impl<T: Scalar> IndexMut<&[usize]> for ShapedArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: &[usize]) -> &mut T {
        let k = self.flat_index(index);
        &mut self.buffer.as_mut_slice()[k]
    }
}

impl<T: Scalar> fmt::Display for ShapedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapedArray(shape={:?}, data=[", self.shape)?;
        for (i, x) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_are_row_major() {
        assert_eq!(compute_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(compute_strides(&[5]), vec![1]);
        assert!(compute_strides(&[]).is_empty());
    }

    #[test]
    fn flat_and_multi_index_agree() {
        let a = ShapedArray::<f32>::zeros(&[2, 3, 4]);
        assert_eq!(a.flat_index(&[1, 2, 3]), 23);
        assert_eq!(a.multi_index(23), vec![1, 2, 3]);
        assert_eq!(a.multi_index(5), vec![0, 1, 1]);
    }

    #[test]
    fn scalar_array_has_one_element() {
        let mut a = ShapedArray::filled(&[], 7i32);
        assert_eq!(a.as_slice().len(), 1);
        assert_eq!(a.get(&[]), 7);
        a.set(&[], 8);
        let scalar: &[usize] = &[];
        assert_eq!(a[scalar], 8);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_component_panics() {
        ShapedArray::<u8>::zeros(&[2, 2]).get(&[0, 2]);
    }

    #[test]
    fn reshape_shares_until_written() {
        let a = ShapedArray::from_vec(&[2, 3], (0..6).collect());
        let mut b = a.reshape(&[3, 2]);
        assert!(a.buffer.ptr_eq(&b.buffer));
        assert_eq!(b.get(&[2, 1]), 5);
        b.set(&[0, 0], 100);
        assert_eq!(a.get(&[0, 0]), 0);
    }

    #[test]
    fn transpose_reverses_axes() {
        let a = ShapedArray::from_vec(&[2, 3, 4], (0..24).collect::<Vec<i32>>());
        let t = a.transpose();
        assert_eq!(t.shape(), &[4, 3, 2]);
        assert_eq!(t.get(&[3, 1, 0]), a.get(&[0, 1, 3]));
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn matrix_conversion_keeps_layout() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let a: ShapedArray<f64> = m.clone().into();
        assert_eq!(a.shape(), &[2, 2]);
        assert_eq!(a.get(&[1, 0]), m.get(1, 0));
    }
}
