//! Elementwise transcendental functions.

macro_rules! transcendental_kernels {
    ($name:ident, $t:ty) => {
        pub mod $name {
            fn map(a: &[$t], out: &mut [$t], f: impl Fn($t) -> $t + Send + Sync) {
                assert_eq!(a.len(), out.len(), "transcendental kernel: length mismatch");
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

            pub fn exp(a: &[$t], out: &mut [$t]) {
                map(a, out, <$t>::exp)
            }

            /// Natural logarithm.
            pub fn ln(a: &[$t], out: &mut [$t]) {
                map(a, out, <$t>::ln)
            }

            pub fn sin(a: &[$t], out: &mut [$t]) {
                map(a, out, <$t>::sin)
            }

            pub fn cos(a: &[$t], out: &mut [$t]) {
                map(a, out, <$t>::cos)
            }

            pub fn tan(a: &[$t], out: &mut [$t]) {
                map(a, out, <$t>::tan)
            }

            /// `out[i] = a[i]^p`
            pub fn pow(a: &[$t], p: $t, out: &mut [$t]) {
                map(a, out, |x| x.powf(p))
            }
        }
    };
}

transcendental_kernels!(single, f32);
transcendental_kernels!(double, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn exp_and_ln_are_inverse() {
        let a = [0.5f64, 1.0, 2.0];
        let mut e = [0.0; 3];
        let mut back = [0.0; 3];
        double::exp(&a, &mut e);
        double::ln(&e, &mut back);
        for (x, y) in a.iter().zip(back.iter()) {
            assert_relative_eq!(*x, *y, max_relative = 1e-12);
        }
    }

    #[test]
    fn trig_and_pow_single() {
        let a = [0.0f32, std::f32::consts::FRAC_PI_2];
        let mut out = [0.0f32; 2];
        single::sin(&a, &mut out);
        assert_relative_eq!(out[1], 1.0, max_relative = 1e-6);
        single::cos(&a, &mut out);
        assert_relative_eq!(out[0], 1.0);
        single::pow(&[2.0, 3.0], 2.0, &mut out);
        assert_relative_eq!(out[0], 4.0, max_relative = 1e-6);
        assert_relative_eq!(out[1], 9.0, max_relative = 1e-6);
    }
}
