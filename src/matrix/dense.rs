//! Row-major dense matrix.
//!
//! Element `(i, j)` lives at flat offset `i * columns + j`. Row slices are
//! contiguous copies; column slices are strided gathers.

use crate::core::buffer::Buffer;
use crate::core::traits::{Indexing, MatMul, MatVec, Padding, RandomFill, Scalar};
use crate::matrix::Vector;
use rand::Rng;
use std::fmt;
use std::ops::{Index, IndexMut, Mul};

#[derive(Debug, Clone)]
pub struct Matrix<T> {
    pub(crate) buffer: Buffer<T>,
    rows: usize,
    columns: usize,
}

impl<T: Scalar> Matrix<T> {
    /// `rows × columns` copies of `value`.
    pub fn filled(rows: usize, columns: usize, value: T) -> Self {
        Matrix {
            buffer: Buffer::filled(rows * columns, value),
            rows,
            columns,
        }
    }

    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, T::zero())
    }

    /// Wraps row-major `data`.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * columns`.
    pub fn from_vec(rows: usize, columns: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            rows * columns,
            "Matrix::from_vec: {} elements cannot fill a {rows}x{columns} matrix",
            data.len()
        );
        Matrix {
            buffer: Buffer::from_vec(data),
            rows,
            columns,
        }
    }

    /// Builds a matrix from a nested literal, one slice per row.
    ///
    /// # Panics
    /// Panics if the rows have different lengths.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(
                row.len(),
                columns,
                "Matrix::from_rows: row {i} has {} elements, expected {columns}",
                row.len()
            );
            data.extend_from_slice(row);
        }
        Matrix::from_vec(rows.len(), columns, data)
    }

    /// A zero matrix with `other`'s shape and its own storage.
    pub fn like(other: &Matrix<T>) -> Self {
        Self::zeros(other.rows, other.columns)
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        let data = m.buffer.as_mut_slice();
        for i in 0..n {
            data[i * n + i] = T::one();
        }
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    #[inline]
    #[track_caller]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.columns,
            "index ({i}, {j}) out of range for {}x{} matrix",
            self.rows,
            self.columns
        );
        i * self.columns + j
    }

    /// # Panics
    /// Panics if `(i, j)` is out of range.
    #[track_caller]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.buffer.get(self.offset(i, j))
    }

    /// # Panics
    /// Panics if `(i, j)` is out of range.
    #[track_caller]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let k = self.offset(i, j);
        self.buffer.set(k, value);
    }

    /// Copy of row `i`.
    #[track_caller]
    pub fn row(&self, i: usize) -> Vector<T> {
        assert!(i < self.rows, "row {i} out of range for {} rows", self.rows);
        let start = i * self.columns;
        Vector::from_slice(&self.buffer.as_slice()[start..start + self.columns])
    }

    /// Overwrites row `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range or `values.len() != columns`.
    #[track_caller]
    pub fn set_row(&mut self, i: usize, values: &[T]) {
        assert!(i < self.rows, "row {i} out of range for {} rows", self.rows);
        assert_eq!(
            values.len(),
            self.columns,
            "set_row: source width {} does not match {} columns",
            values.len(),
            self.columns
        );
        let start = i * self.columns;
        let columns = self.columns;
        self.buffer.as_mut_slice()[start..start + columns].copy_from_slice(values);
    }

    /// Copy of column `j`.
    #[track_caller]
    pub fn column(&self, j: usize) -> Vector<T> {
        assert!(j < self.columns, "column {j} out of range for {} columns", self.columns);
        let data = self.buffer.as_slice();
        Vector::from_vec((0..self.rows).map(|i| data[i * self.columns + j]).collect())
    }

    /// Overwrites column `j`.
    ///
    /// # Panics
    /// Panics if `j` is out of range or `values.len() != rows`.
    #[track_caller]
    pub fn set_column(&mut self, j: usize, values: &[T]) {
        assert!(j < self.columns, "column {j} out of range for {} columns", self.columns);
        assert_eq!(
            values.len(),
            self.rows,
            "set_column: source height {} does not match {} rows",
            values.len(),
            self.rows
        );
        let columns = self.columns;
        let data = self.buffer.as_mut_slice();
        for (i, v) in values.iter().enumerate() {
            data[i * columns + j] = *v;
        }
    }

    /// Row-major copy of the elements.
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

    /// Equal-valued matrix backed by a new allocation.
    pub fn copy(&self) -> Self {
        self.rebuild(Buffer::deep_copy(&self.buffer))
    }

    pub fn transpose(&self) -> Self {
        let (r, c) = (self.rows, self.columns);
        let src = self.buffer.as_slice();
        let mut out = Buffer::allocate(r * c);
        let dst = out.as_mut_slice();
        for i in 0..r {
            for j in 0..c {
                dst[j * r + i] = src[i * c + j];
            }
        }
        Matrix {
            buffer: out,
            rows: c,
            columns: r,
        }
    }

    pub(crate) fn rebuild(&self, buffer: Buffer<T>) -> Self {
        debug_assert_eq!(buffer.count(), self.rows * self.columns);
        Matrix {
            buffer,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

impl<T: RandomFill> Matrix<T> {
    pub fn random<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let mut m = Self::zeros(rows, columns);
        m.fill_random(rng);
        m
    }
}

impl<T: Padding> Matrix<T> {
    /// Surrounds the matrix with `value`: `top`/`bottom` extra rows and
    /// `left`/`right` extra columns.
    pub fn padded(&self, top: usize, bottom: usize, left: usize, right: usize, value: T) -> Self {
        let columns = left + self.columns + right;
        let rows = top + self.rows + bottom;
        let mut data = Vec::with_capacity(rows * columns);
        data.resize(top * columns, value);
        for row in self.buffer.as_slice().chunks(self.columns.max(1)).take(self.rows) {
            data.extend(T::pad(row, left, right, value));
        }
        data.resize(rows * columns, value);
        Matrix::from_vec(rows, columns, data)
    }
}

impl<T: MatMul> Matrix<T> {
    /// Matrix product `self · rhs`.
    ///
    /// # Panics
    /// Panics if `self.columns() != rhs.rows()`.
    #[track_caller]
    pub fn matmul(&self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.columns, rhs.rows,
            "matmul: {}x{} · {}x{} has mismatched inner dimensions",
            self.rows, self.columns, rhs.rows, rhs.columns
        );
        let (m, n, k) = (self.rows, rhs.columns, self.columns);
        let mut out = Buffer::allocate(m * n);
        T::gemm(
            m,
            n,
            k,
            T::one(),
            self.buffer.as_slice(),
            k.max(1),
            rhs.buffer.as_slice(),
            n.max(1),
            T::zero(),
            out.as_mut_slice(),
            n.max(1),
        );
        Matrix {
            buffer: out,
            rows: m,
            columns: n,
        }
    }
}

impl<T: MatMul> MatVec<Vector<T>> for Matrix<T> {
    fn matvec(&self, x: &Vector<T>, y: &mut Vector<T>) {
        assert_eq!(self.columns, x.len(), "Input vector x has incorrect length");
        assert_eq!(self.rows, y.len(), "Output vector y has incorrect length");
        T::gemm(
            self.rows,
            1,
            self.columns,
            T::one(),
            self.buffer.as_slice(),
            self.columns.max(1),
            x.as_slice(),
            1,
            T::zero(),
            y.as_mut_slice(),
            1,
        );
    }
}

impl<T: MatMul> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.matmul(rhs)
    }
}

impl<T: MatMul> Mul<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self.matmul(&rhs)
    }
}

impl<T: MatMul> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;
    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        let mut y = Vector::zeros(self.rows);
        self.matvec(rhs, &mut y);
        y
    }
}

impl<T: Scalar> Indexing for Matrix<T> {
    type Elem = T;

    fn dims(&self) -> Vec<usize> {
        vec![self.rows, self.columns]
    }

    fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }
}

impl<T: Scalar> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.buffer.as_slice()[self.offset(i, j)]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Matrix<T> {
    #[track_caller]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let k = self.offset(i, j);
        &mut self.buffer.as_mut_slice()[k]
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows {
            if i > 0 {
                write!(f, ",\n ")?;
            }
            write!(f, "[")?;
            for j in 0..self.columns {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.buffer.get(i * self.columns + j))?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
