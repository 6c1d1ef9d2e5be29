//! Approximate-equality properties over random containers.

use numkit::{ApproxOptions, Matrix, ShapedArray, Vector};

#[test]
fn add_then_subtract_round_trips_single() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let x = Matrix::<f32>::random(4, 5, &mut rng);
        let y = Matrix::<f32>::random(4, 5, &mut rng);
        assert!((&(&x + &y) - &y).is_approximately_equal(&x));
    }
}

#[test]
fn add_then_subtract_round_trips_double() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let x = ShapedArray::<f64>::random(&[2, 3, 4], &mut rng);
        let y = ShapedArray::<f64>::random(&[2, 3, 4], &mut rng);
        assert!((&(&x + &y) - &y).is_approximately_equal(&x));
    }
}

#[test]
fn equal_under_zero_tolerance_is_reflexive() {
    let mut rng = rand::thread_rng();
    let x = Vector::<f64>::random(16, &mut rng);
    assert!(x.is_approximately_equal_with(&x, ApproxOptions::new(0.0, 0.0)));
    let n = Vector::<i16>::random(16, &mut rng);
    assert!(n.is_approximately_equal_with(&n, ApproxOptions::new(0.0, 0.0)));
}

#[test]
fn integer_norm_does_not_wrap() {
    let v = Vector::from_vec(vec![i64::MAX, i64::MAX]);
    let expected = (i64::MAX as f64) * 2f64.sqrt();
    assert!((v.norm() - expected).abs() <= expected * 1e-12);
}
