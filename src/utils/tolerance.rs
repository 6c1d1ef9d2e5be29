//! Norm and approximate equality over dense containers.

use crate::config::ApproxOptions;
use crate::core::buffer::Buffer;
use crate::core::traits::{Arithmetic, Indexing, Reduction};

/// Euclidean norm of every element of `x`, flattened.
pub fn norm<C>(x: &C) -> <C::Elem as Reduction>::Norm
where
    C: Indexing,
    C::Elem: Reduction,
{
    C::Elem::norm(x.buffer().as_slice())
}

/// `‖x − y‖ ≤ max(atol, rtol · max(‖x‖, ‖y‖))`.
///
/// The difference is computed with the element type's own subtraction, so
/// integer operands wrap exactly like `x - y` would.
///
/// # Panics
/// Panics if `x` and `y` have different shapes.
#[track_caller]
pub fn is_approximately_equal<C>(x: &C, y: &C, options: ApproxOptions<<C::Elem as Reduction>::Norm>) -> bool
where
    C: Indexing,
    C::Elem: Reduction,
{
    assert_eq!(
        x.dims(),
        y.dims(),
        "is_approximately_equal: shape mismatch between operands"
    );
    let a = x.buffer().as_slice();
    let b = y.buffer().as_slice();
    let mut diff = Buffer::allocate(a.len());
    C::Elem::sub(a, b, diff.as_mut_slice());
    let distance = C::Elem::norm(diff.as_slice());
    let threshold = options.threshold(C::Elem::norm(a), C::Elem::norm(b));
    log::trace!("approximate comparison: distance {distance}, threshold {threshold}");
    distance <= threshold
}
