//! Min/max scans over flat buffers.
//!
//! With the `parallel` feature the scans run on rayon; the comparison is the same
//! strict `<`/`>` as the sequential loop, so both paths return the same element.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this length the sequential scan is used even with `parallel`.
#[cfg(feature = "parallel")]
const PAR_THRESHOLD: usize = 1 << 14;

#[inline]
fn pick_min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

#[inline]
fn pick_max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

pub(crate) fn min_of<T: PartialOrd + Copy + Send + Sync>(values: &[T]) -> Option<T> {
    #[cfg(feature = "parallel")]
    if values.len() >= PAR_THRESHOLD {
        return values.par_iter().copied().reduce_with(pick_min);
    }
    values.iter().copied().reduce(pick_min)
}

pub(crate) fn max_of<T: PartialOrd + Copy + Send + Sync>(values: &[T]) -> Option<T> {
    #[cfg(feature = "parallel")]
    if values.len() >= PAR_THRESHOLD {
        return values.par_iter().copied().reduce_with(pick_max);
    }
    values.iter().copied().reduce(pick_max)
}
