//! Integration tests for the LU-based determinant, inverse and solve.

use numkit::core::traits::MatVec;
use numkit::solver::{LinearSolver, LuSolver, determinant, inverse, solve};
use numkit::{LuStage, Matrix, NumericFailure, Vector};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn singular() -> [[f64; 3]; 3] {
    [[0.0, 12.0, 0.0], [4.0, 5.0, 0.0], [7.0, 0.0, 0.0]]
}

#[test]
fn determinant_double_is_exact() {
    init_logger();
    let a = Matrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]]);
    assert_eq!(determinant(&a).unwrap(), -2.0);
}

#[test]
fn determinant_float_three_by_three() {
    init_logger();
    let a = Matrix::from_rows(&[[1.0f32, 12.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.5]]);
    let det = Vector::from_vec(vec![determinant(&a).unwrap()]);
    assert!(det.is_approximately_equal(&Vector::from_vec(vec![38.500015f32])), "det = {det}");
}

#[test]
fn inverse_both_precisions() {
    init_logger();
    let a32 = Matrix::from_rows(&[[1.0f32, 2.0], [3.0, 4.0]]);
    let e32 = Matrix::from_rows(&[[-2.0f32, 1.0], [1.5, -0.5]]);
    assert_eq!(a32.inverse(), e32);
    assert_eq!(inverse(&a32).unwrap(), e32);

    let a64 = Matrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]]);
    let e64 = Matrix::from_rows(&[[-2.0f64, 1.0], [1.5, -0.5]]);
    assert_eq!(a64.inverse(), e64);
}

#[test]
fn product_with_inverse_is_identity() {
    let a = Matrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]]);
    assert!((&a * &a.inverse()).is_approximately_equal(&Matrix::identity(2)));

    let mut rng = rand::thread_rng();
    let n = 6;
    let m = Matrix::<f64>::random(n, n, &mut rng);
    // diagonally dominant, so well conditioned
    let a = &m + &(&Matrix::identity(n) * n as f64);
    assert!((&a * &inverse(&a).unwrap()).is_approximately_equal(&Matrix::identity(n)));
}

#[test]
fn singular_matrix_is_reported_not_computed() {
    init_logger();
    let a = Matrix::from_rows(&singular());
    let det = determinant(&a).unwrap_err();
    let inv = inverse(&a).unwrap_err();
    for err in [&det, &inv] {
        match err {
            NumericFailure::Singular { diagonal_index, message, stage, .. } => {
                assert_eq!(*diagonal_index, 2);
                assert_eq!(*stage, LuStage::Factorization);
                assert!(message.contains("U[2, 2]"));
            }
            other => panic!("expected Singular, got {other:?}"),
        }
    }
    // input untouched, partial holds the factors
    assert_eq!(a, Matrix::from_rows(&singular()));
    assert_ne!(det.partial(), &a);

    let a32 = Matrix::from_rows(&[[0.0f32, 12.0, 0.0], [4.0, 5.0, 0.0], [7.0, 0.0, 0.0]]);
    assert_eq!(determinant(&a32).unwrap_err().index(), 2);
}

#[test]
#[should_panic(expected = "LU factorization: U[2, 2] is exactly zero")]
fn aborting_inverse_panics() {
    Matrix::from_rows(&singular()).inverse();
}

#[test]
fn solve_random_system() {
    init_logger();
    let mut rng = rand::thread_rng();
    let n = 8;
    let m = Matrix::<f64>::random(n, n, &mut rng);
    let a = &(&m.transpose() * &m) + &Matrix::identity(n);
    let b = Vector::<f64>::random(n, &mut rng);

    let x = solve(&a, &b).unwrap();
    let mut ax = Vector::zeros(n);
    a.matvec(&x, &mut ax);
    assert!(ax.is_approximately_equal(&b));

    let mut solver = LuSolver::new();
    let mut y = Vector::zeros(n);
    solver.solve(&a, &b, &mut y).unwrap();
    assert!(y.is_approximately_equal(&x));
}
