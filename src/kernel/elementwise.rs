//! Elementwise arithmetic over contiguous buffers.
//!
//! Binary kernels take two inputs of equal length and write into `out`.
//! Scalar kernels combine every element with a single value. With the `rayon`
//! feature enabled the loops run on rayon's global pool.

macro_rules! elementwise_kernels {
    ($name:ident, $t:ty) => {
        pub mod $name {
            #[inline]
            fn check_len(a: usize, b: usize, out: usize) {
                assert!(
                    a == b && b == out,
                    "elementwise kernel: length mismatch (a = {a}, b = {b}, out = {out})"
                );
            }

            fn binary(a: &[$t], b: &[$t], out: &mut [$t], f: impl Fn($t, $t) -> $t + Send + Sync) {
                check_len(a.len(), b.len(), out.len());
                #[cfg(feature = "rayon")]
                {
                    use rayon::prelude::*;
                    out.par_iter_mut()
                        .zip(a.par_iter().zip(b.par_iter()))
                        .for_each(|(o, (x, y))| *o = f(*x, *y));
                }
                #[cfg(not(feature = "rayon"))]
                {
                    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
                        *o = f(*x, *y);
                    }
                }
            }

            fn unary(a: &[$t], out: &mut [$t], f: impl Fn($t) -> $t + Send + Sync) {
                check_len(a.len(), a.len(), out.len());
                #[cfg(feature = "rayon")]
                {
                    use rayon::prelude::*;
                    out.par_iter_mut().zip(a.par_iter()).for_each(|(o, x)| *o = f(*x));
                }
                #[cfg(not(feature = "rayon"))]
                {
                    for (o, x) in out.iter_mut().zip(a.iter()) {
                        *o = f(*x);
                    }
                }
            }

            /// `out[i] = a[i] + b[i]`
            pub fn add(a: &[$t], b: &[$t], out: &mut [$t]) {
                binary(a, b, out, |x, y| x + y)
            }

            /// `out[i] = a[i] - b[i]`
            pub fn sub(a: &[$t], b: &[$t], out: &mut [$t]) {
                binary(a, b, out, |x, y| x - y)
            }

            /// `out[i] = a[i] * b[i]`
            pub fn mul(a: &[$t], b: &[$t], out: &mut [$t]) {
                binary(a, b, out, |x, y| x * y)
            }

            /// `out[i] = a[i] / b[i]`
            pub fn div(a: &[$t], b: &[$t], out: &mut [$t]) {
                binary(a, b, out, |x, y| x / y)
            }

            /// `out[i] = a[i] + s`
            pub fn add_scalar(a: &[$t], s: $t, out: &mut [$t]) {
                unary(a, out, |x| x + s)
            }

            /// `out[i] = a[i] - s`
            pub fn sub_scalar(a: &[$t], s: $t, out: &mut [$t]) {
                unary(a, out, |x| x - s)
            }

            /// `out[i] = a[i] * s`
            pub fn mul_scalar(a: &[$t], s: $t, out: &mut [$t]) {
                unary(a, out, |x| x * s)
            }

            /// `out[i] = a[i] / s`
            pub fn div_scalar(a: &[$t], s: $t, out: &mut [$t]) {
                unary(a, out, |x| x / s)
            }

            /// `out[i] = -a[i]`
            pub fn neg(a: &[$t], out: &mut [$t]) {
                unary(a, out, |x| -x)
            }
        }
    };
}

elementwise_kernels!(single, f32);
elementwise_kernels!(double, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_kernels_match_scalar_loops() {
        let a = [1.0f64, 2.0, 3.0, 4.0];
        let b = [0.5f64, -1.0, 2.0, 8.0];
        let mut out = [0.0f64; 4];
        double::add(&a, &b, &mut out);
        assert_eq!(out, [1.5, 1.0, 5.0, 12.0]);
        double::sub(&a, &b, &mut out);
        assert_eq!(out, [0.5, 3.0, 1.0, -4.0]);
        double::mul(&a, &b, &mut out);
        assert_eq!(out, [0.5, -2.0, 6.0, 32.0]);
        double::div(&a, &b, &mut out);
        assert_eq!(out, [2.0, -2.0, 1.5, 0.5]);
    }

    #[test]
    fn scalar_kernels_single_precision() {
        let a = [1.0f32, -2.0, 4.0];
        let mut out = [0.0f32; 3];
        single::add_scalar(&a, 1.0, &mut out);
        assert_eq!(out, [2.0, -1.0, 5.0]);
        single::mul_scalar(&a, 0.5, &mut out);
        assert_eq!(out, [0.5, -1.0, 2.0]);
        single::div_scalar(&a, 2.0, &mut out);
        assert_eq!(out, [0.5, -1.0, 2.0]);
        single::neg(&a, &mut out);
        assert_eq!(out, [-1.0, 2.0, -4.0]);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn mismatched_lengths_panic() {
        let mut out = [0.0f64; 2];
        double::add(&[1.0, 2.0], &[1.0], &mut out);
    }
}
