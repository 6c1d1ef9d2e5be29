use numkit::solver::{LinearSolver, LuSolver, determinant};
use numkit::{Matrix, Vector};

fn main() {
    let n = 10;
    // build a random SPD matrix: A = MᵀM + I
    let mut rng = rand::thread_rng();
    let m = Matrix::<f64>::random(n, n, &mut rng);
    let a = &(&m.transpose() * &m) + &Matrix::identity(n);

    // rhs
    let b = Vector::<f64>::random(n, &mut rng);
    let mut x = Vector::zeros(n);

    let mut lus = LuSolver::new();
    match lus.solve(&a, &b, &mut x) {
        Ok(()) => println!("LU x = {x}"),
        Err(e) => println!("LU failed: {e}"),
    }
    println!("det(A) = {}", a.determinant());

    let residual = &(&a * &x) - &b;
    println!("‖Ax - b‖ = {:e}", residual.norm());

    // a singular system reports the zero pivot instead of a value
    let s = Matrix::from_rows(&[[0.0, 12.0, 0.0], [4.0, 5.0, 0.0], [7.0, 0.0, 0.0]]);
    if let Err(e) = determinant(&s) {
        println!("singular at diagonal {}: {e}", e.index());
    }
}
