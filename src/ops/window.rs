use crate::types::{normalize, Sample, Series};

/// Drives a trailing-window reduction over `a`.
///
/// Position `i` is missing while `i + 1 < window` or when any sample in
/// `a[i + 1 - window..=i]` is missing; otherwise it is `reduce(window_slice)`.
/// A zero window, or one longer than `a`, yields an all-missing series.
pub fn rolling_apply<F>(a: &[Sample], window: usize, mut reduce: F) -> Series
where
    F: FnMut(&[Sample]) -> Option<f64>,
{
    let n = a.len();
    if window == 0 || window > n {
        return Series::missing(n);
    }
    let mut out = Vec::with_capacity(n);
    out.resize(window - 1, None);
    let mut missing = a[..window - 1].iter().filter(|s| s.is_none()).count();
    for (start, win) in a.windows(window).enumerate() {
        if win[window - 1].is_none() {
            missing += 1;
        }
        if missing == 0 {
            out.push(reduce(win).and_then(normalize));
        } else {
            out.push(None);
        }
        if win[0].is_none() {
            missing -= 1;
        }
        debug_assert_eq!(start + window, out.len());
    }
    Series::from_samples(out)
}

#[inline]
fn present(win: &[Sample]) -> impl Iterator<Item = f64> + '_ {
    win.iter().flatten().copied()
}

pub fn rolling_sum(a: &[Sample], window: usize) -> Series {
    rolling_apply(a, window, |win| Some(present(win).sum()))
}

pub fn rolling_mean(a: &[Sample], window: usize) -> Series {
    rolling_apply(a, window, |win| {
        Some(present(win).sum::<f64>() / win.len() as f64)
    })
}

pub fn rolling_product(a: &[Sample], window: usize) -> Series {
    rolling_apply(a, window, |win| Some(present(win).product()))
}

pub fn rolling_min(a: &[Sample], window: usize) -> Series {
    rolling_apply(a, window, |win| present(win).reduce(f64::min))
}

pub fn rolling_max(a: &[Sample], window: usize) -> Series {
    rolling_apply(a, window, |win| present(win).reduce(f64::max))
}

/// 1-based offset (oldest sample = 1) of the window maximum; the oldest occurrence wins ties.
pub fn rolling_argmax(a: &[Sample], window: usize) -> Series {
    rolling_apply(a, window, |win| extreme_offset(win, |v, best| v > best))
}

/// 1-based offset (oldest sample = 1) of the window minimum; the oldest occurrence wins ties.
pub fn rolling_argmin(a: &[Sample], window: usize) -> Series {
    rolling_apply(a, window, |win| extreme_offset(win, |v, best| v < best))
}

#[inline]
fn extreme_offset(win: &[Sample], better: impl Fn(f64, f64) -> bool) -> Option<f64> {
    let mut values = present(win);
    let mut best = values.next()?;
    let mut best_offset = 0usize;
    for (offset, v) in values.enumerate() {
        if better(v, best) {
            best = v;
            best_offset = offset + 1;
        }
    }
    Some((best_offset + 1) as f64)
}
