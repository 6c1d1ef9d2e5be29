//! Dense containers: [`Vector`], [`Matrix`] and [`ShapedArray`].
//!
//! All three are thin shape descriptions over a copy-on-write
//! [`Buffer`](crate::core::buffer::Buffer). Cloning a container clones the
//! handle: both handles share storage until one of them is written to.
//! `copy()` always returns a container with its own allocation.
//!
//! Operations that combine two containers require identical shapes and panic
//! otherwise. Operations are only available for element types carrying the
//! matching capability from [`crate::core::traits`].

pub mod dense;
pub mod shaped;
pub mod vector;

pub use dense::Matrix;
pub use shaped::ShapedArray;
pub use vector::Vector;

use crate::core::buffer::Buffer;
use crate::core::traits::Arithmetic;

/// Applies a binary slice kernel to two buffers, returning a fresh buffer.
pub(crate) fn zip_buffers<T: Arithmetic>(
    a: &Buffer<T>,
    b: &Buffer<T>,
    kernel: fn(&[T], &[T], &mut [T]),
) -> Buffer<T> {
    let mut out = Buffer::allocate(a.count());
    kernel(a.as_slice(), b.as_slice(), out.as_mut_slice());
    out
}

/// Applies a unary slice kernel, returning a fresh buffer.
pub(crate) fn map_buffer<T: Copy + Default>(a: &Buffer<T>, kernel: impl FnOnce(&[T], &mut [T])) -> Buffer<T> {
    let mut out = Buffer::allocate(a.count());
    kernel(a.as_slice(), out.as_mut_slice());
    out
}

/// Elementwise operators and capability-gated methods shared by every
/// container. Each container provides `dims()` (via `Indexing`) and a
/// crate-private `rebuild(buffer)` returning a container of the same shape.
macro_rules! impl_container_ops {
    ($ty:ident) => {
        impl<T: $crate::core::traits::Arithmetic> $ty<T> {
            #[track_caller]
            fn assert_same_shape(&self, other: &Self, op: &str) {
                use $crate::core::traits::Indexing;
                assert_eq!(
                    self.dims(),
                    other.dims(),
                    "{op}: shape mismatch between operands"
                );
            }

            /// Elementwise (Hadamard) product.
            ///
            /// # Panics
            /// Panics if the shapes differ.
            pub fn elementwise_mul(&self, other: &Self) -> Self {
                self.assert_same_shape(other, "elementwise_mul");
                self.rebuild($crate::matrix::zip_buffers(&self.buffer, &other.buffer, T::mul))
            }

            /// Elementwise quotient.
            ///
            /// # Panics
            /// Panics if the shapes differ, or for integer elements when a
            /// divisor is zero.
            pub fn elementwise_div(&self, other: &Self) -> Self {
                self.assert_same_shape(other, "elementwise_div");
                self.rebuild($crate::matrix::zip_buffers(&self.buffer, &other.buffer, T::div))
            }
        }

        impl<T: $crate::core::traits::Arithmetic> std::ops::Add<&$ty<T>> for &$ty<T> {
            type Output = $ty<T>;
            fn add(self, rhs: &$ty<T>) -> $ty<T> {
                self.assert_same_shape(rhs, "add");
                self.rebuild($crate::matrix::zip_buffers(&self.buffer, &rhs.buffer, T::add))
            }
        }

        impl<T: $crate::core::traits::Arithmetic> std::ops::Add<$ty<T>> for $ty<T> {
            type Output = $ty<T>;
            fn add(self, rhs: $ty<T>) -> $ty<T> {
                &self + &rhs
            }
        }

        impl<T: $crate::core::traits::Arithmetic> std::ops::Sub<&$ty<T>> for &$ty<T> {
            type Output = $ty<T>;
            fn sub(self, rhs: &$ty<T>) -> $ty<T> {
                self.assert_same_shape(rhs, "sub");
                self.rebuild($crate::matrix::zip_buffers(&self.buffer, &rhs.buffer, T::sub))
            }
        }

        impl<T: $crate::core::traits::Arithmetic> std::ops::Sub<$ty<T>> for $ty<T> {
            type Output = $ty<T>;
            fn sub(self, rhs: $ty<T>) -> $ty<T> {
                &self - &rhs
            }
        }

        impl<T: $crate::core::traits::Arithmetic> std::ops::Neg for &$ty<T> {
            type Output = $ty<T>;
            fn neg(self) -> $ty<T> {
                self.rebuild($crate::matrix::map_buffer(&self.buffer, T::neg))
            }
        }

        impl<T: $crate::core::traits::Arithmetic> std::ops::Neg for $ty<T> {
            type Output = $ty<T>;
            fn neg(self) -> $ty<T> {
                -&self
            }
        }

        impl_container_ops!(@scalar $ty, Add, add, add_scalar);
        impl_container_ops!(@scalar $ty, Sub, sub, sub_scalar);
        impl_container_ops!(@scalar $ty, Mul, mul, mul_scalar);
        impl_container_ops!(@scalar $ty, Div, div, div_scalar);

        impl<T: $crate::core::traits::Reduction> $ty<T> {
            /// Sum of all elements (wrapping for integers).
            pub fn sum(&self) -> T {
                T::sum(self.buffer.as_slice())
            }

            /// Euclidean norm of the flattened elements.
            pub fn norm(&self) -> T::Norm {
                T::norm(self.buffer.as_slice())
            }

            /// `α · self`, in a new container.
            pub fn scaled(&self, alpha: T) -> Self {
                let mut buffer = $crate::core::buffer::Buffer::deep_copy(&self.buffer);
                T::scale(alpha, buffer.as_mut_slice());
                self.rebuild(buffer)
            }

            /// Approximate equality with the element type's default tolerances
            /// (`atol = 0`, `rtol = 1e-6` for f32, `1e-8` otherwise).
            ///
            /// # Panics
            /// Panics if the shapes differ.
            pub fn is_approximately_equal(&self, other: &Self) -> bool {
                $crate::utils::tolerance::is_approximately_equal(
                    self,
                    other,
                    $crate::config::ApproxOptions::for_scalar::<T>(),
                )
            }

            /// Approximate equality with explicit tolerances.
            ///
            /// # Panics
            /// Panics if the shapes differ.
            pub fn is_approximately_equal_with(
                &self,
                other: &Self,
                options: $crate::config::ApproxOptions<T::Norm>,
            ) -> bool {
                $crate::utils::tolerance::is_approximately_equal(self, other, options)
            }
        }

        impl<T: $crate::core::traits::Trigonometric> $ty<T> {
            pub fn sin(&self) -> Self {
                self.rebuild($crate::matrix::map_buffer(&self.buffer, T::sin))
            }
            pub fn cos(&self) -> Self {
                self.rebuild($crate::matrix::map_buffer(&self.buffer, T::cos))
            }
            pub fn tan(&self) -> Self {
                self.rebuild($crate::matrix::map_buffer(&self.buffer, T::tan))
            }
        }

        impl<T: $crate::core::traits::Exponential> $ty<T> {
            pub fn exp(&self) -> Self {
                self.rebuild($crate::matrix::map_buffer(&self.buffer, T::exp))
            }
        }

        impl<T: $crate::core::traits::Logarithmic> $ty<T> {
            /// Elementwise natural logarithm.
            pub fn ln(&self) -> Self {
                self.rebuild($crate::matrix::map_buffer(&self.buffer, T::ln))
            }
        }

        impl<T: $crate::core::traits::Power> $ty<T> {
            /// Raises every element to `p`.
            pub fn pow(&self, p: T) -> Self {
                self.rebuild($crate::matrix::map_buffer(&self.buffer, |a, out| T::pow(a, p, out)))
            }
        }

        impl<T: $crate::core::traits::RandomFill> $ty<T> {
            /// Overwrites every element with a draw from `rng`.
            pub fn fill_random<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
                T::random_fill(rng, self.buffer.as_mut_slice());
            }
        }

        impl<T: $crate::core::traits::Scalar> PartialEq for $ty<T> {
            /// Shapes equal and elements equal; never handle identity.
            fn eq(&self, other: &Self) -> bool {
                use $crate::core::traits::Indexing;
                self.dims() == other.dims() && self.buffer.as_slice() == other.buffer.as_slice()
            }
        }
    };
    (@scalar $ty:ident, $trait:ident, $method:ident, $kernel:ident) => {
        impl<T: $crate::core::traits::Arithmetic> std::ops::$trait<T> for &$ty<T> {
            type Output = $ty<T>;
            fn $method(self, rhs: T) -> $ty<T> {
                self.rebuild($crate::matrix::map_buffer(&self.buffer, |a, out| T::$kernel(a, rhs, out)))
            }
        }

        impl<T: $crate::core::traits::Arithmetic> std::ops::$trait<T> for $ty<T> {
            type Output = $ty<T>;
            fn $method(self, rhs: T) -> $ty<T> {
                std::ops::$trait::$method(&self, rhs)
            }
        }
    };
}

impl_container_ops!(Vector);
impl_container_ops!(Matrix);
impl_container_ops!(ShapedArray);
