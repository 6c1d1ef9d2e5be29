use criterion::{Criterion, black_box, criterion_group, criterion_main};
use faer::Mat;
use faer::linalg::solvers::SolveCore;
use numkit::solver::{LinearSolver, LuSolver};
use numkit::{Matrix, Vector};

fn bench_lu_vs_faer(c: &mut Criterion) {
    let n = 200;
    let data: Vec<f64> = (0..n * n).map(|i| (i as f64).sin()).collect();
    let rhs: Vec<f64> = (0..n).map(|i| (i as f64).cos()).collect();

    let a = Matrix::from_vec(n, n, data.clone());
    let b = Vector::from_vec(rhs.clone());
    let mut x = Vector::zeros(n);

    c.bench_function("numkit LU solve", |ben| {
        let mut solver = LuSolver::new();
        ben.iter(|| {
            solver.solve(black_box(&a), black_box(&b), black_box(&mut x)).unwrap();
        })
    });

    c.bench_function("numkit determinant", |ben| {
        ben.iter(|| black_box(&a).determinant())
    });

    let fa = Mat::from_fn(n, n, |i, j| data[i * n + j]);
    c.bench_function("faer raw LU", |ben| {
        ben.iter(|| {
            let factor = faer::linalg::solvers::FullPivLu::new(fa.as_ref());
            let mut y = rhs.clone();
            let y_mat = faer::MatMut::from_column_major_slice_mut(&mut y, n, 1);
            factor.solve_in_place_with_conj(faer::Conj::No, y_mat);
        })
    });

    let m = Matrix::from_vec(n, n, data.clone());
    c.bench_function("numkit gemm", |ben| ben.iter(|| black_box(&m) * black_box(&m)));
}

criterion_group!(benches, bench_lu_vs_faer);
criterion_main!(benches);
