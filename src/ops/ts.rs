use crate::error::SeriesError;
use crate::ops::order::OrderedWindow;
use crate::ops::stats::RollingBivariateMoments;
use crate::ops::window::rolling_apply;
use crate::types::{ensure_same_len, normalize, Sample, Series};

/// Average rank of `value` inside an ascending `sorted` slice.
#[inline]
fn average_rank_in_sorted(sorted: &[f64], value: f64) -> f64 {
    let lower = sorted.partition_point(|v| *v < value);
    let upper = sorted.partition_point(|v| *v <= value);
    ((lower + 1 + upper) as f64) * 0.5
}

#[inline]
fn sort_present(values: &mut [f64]) {
    values.sort_unstable_by(f64::total_cmp);
}

/// Average rank (1-based, ties averaged) of the last sample among all samples of `window`.
///
/// Missing when `window` is empty or holds a missing sample.
pub fn rank_last(window: &[Sample]) -> Sample {
    let latest = (*window.last()?)?;
    let mut sorted = window.iter().copied().collect::<Option<Vec<f64>>>()?;
    sort_present(&mut sorted);
    Some(average_rank_in_sorted(&sorted, latest))
}

/// Sliding-window rank of the newest sample, O(n log w).
///
/// The window's present values live in an [`OrderedWindow`]; each step evicts
/// `a[i - window]`, inserts `a[i]` and answers with two bound counts. Any
/// missing sample inside the window makes that position missing.
pub fn ts_rank(a: &[Sample], window: usize) -> Series {
    let n = a.len();
    if window == 0 || window > n {
        return Series::missing(n);
    }
    let mut ordered = OrderedWindow::with_capacity(window);
    let mut missing = 0usize;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        if i >= window {
            match a[i - window] {
                Some(old) => {
                    let removed = ordered.remove(old);
                    debug_assert!(removed, "evicted value must be in the window");
                }
                None => missing -= 1,
            }
        }
        match a[i] {
            Some(v) => ordered.insert(v),
            None => missing += 1,
        }
        debug_assert!(ordered.len() + missing <= window);
        if i + 1 < window || missing > 0 {
            out.push(None);
            continue;
        }
        out.push(a[i].map(|latest| ordered.average_rank(latest)));
    }
    Series::from_samples(out)
}

/// Reference rank: copies and sorts every window, O(n w log w).
pub fn ts_rank_naive(a: &[Sample], window: usize) -> Series {
    rolling_apply(a, window, rank_last)
}

/// Reference rank over borrowed window views, sorting into one reused buffer.
pub fn ts_rank_span(a: &[Sample], window: usize) -> Series {
    let mut sorted = Vec::with_capacity(window);
    rolling_apply(a, window, |win| {
        let latest = (*win.last()?)?;
        sorted.clear();
        sorted.extend(win.iter().flatten().copied());
        sort_present(&mut sorted);
        Some(average_rank_in_sorted(&sorted, latest))
    })
}

/// `a[i] - a[i - period]`, missing for `i < period`.
pub fn delta(a: &[Sample], period: usize) -> Series {
    a.iter()
        .enumerate()
        .map(|(i, cur)| {
            let old = a.get(i.checked_sub(period)?)?;
            normalize((*cur)? - (*old)?)
        })
        .collect()
}

/// `a[i - period]`, missing for `i < period`.
pub fn delay(a: &[Sample], period: usize) -> Series {
    (0..a.len())
        .map(|i| *a.get(i.checked_sub(period)?)?)
        .collect()
}

/// Linearly weighted moving average: weights `1..=period` (newest heaviest) normalized to sum 1.
pub fn decay_linear(a: &[Sample], period: usize) -> Series {
    if period == 0 || period > a.len() {
        return Series::missing(a.len());
    }
    let divisor = period as f64 * (period as f64 + 1.0) * 0.5;
    rolling_apply(a, period, |win| {
        let weighted_sum = win
            .iter()
            .flatten()
            .enumerate()
            .map(|(k, v)| (k + 1) as f64 * v)
            .sum::<f64>();
        Some(weighted_sum / divisor)
    })
}

fn rolling_pairwise<F>(
    a: &[Sample],
    b: &[Sample],
    window: usize,
    mut reduce: F,
) -> Result<Series, SeriesError>
where
    F: FnMut(&[Sample], &[Sample]) -> Option<f64>,
{
    ensure_same_len(a, b)?;
    let n = a.len();
    if window == 0 || window > n {
        return Ok(Series::missing(n));
    }
    let mut out = Vec::with_capacity(n);
    out.resize(window - 1, None);
    for (win_a, win_b) in a.windows(window).zip(b.windows(window)) {
        let poisoned = win_a.iter().chain(win_b).any(Option::is_none);
        out.push(if poisoned { None } else { reduce(win_a, win_b) });
    }
    Ok(Series::from_samples(out))
}

/// `(sum(da * db), sum(da^2), sum(db^2))` for deviations from each window's mean.
fn deviation_sums(win_a: &[Sample], win_b: &[Sample]) -> (f64, f64, f64) {
    let n = win_a.len() as f64;
    let mean_a = win_a.iter().flatten().sum::<f64>() / n;
    let mean_b = win_b.iter().flatten().sum::<f64>() / n;
    let mut spd = 0.0_f64;
    let mut ss_a = 0.0_f64;
    let mut ss_b = 0.0_f64;
    for (x, y) in win_a.iter().flatten().zip(win_b.iter().flatten()) {
        let dev_a = x - mean_a;
        let dev_b = y - mean_b;
        spd += dev_a * dev_b;
        ss_a += dev_a * dev_a;
        ss_b += dev_b * dev_b;
    }
    (spd, ss_a, ss_b)
}

/// Rolling Pearson correlation, recomputed per window. Constant windows are missing.
pub fn rolling_correlation(
    a: &[Sample],
    b: &[Sample],
    window: usize,
) -> Result<Series, SeriesError> {
    rolling_pairwise(a, b, window, |win_a, win_b| {
        let (spd, ss_a, ss_b) = deviation_sums(win_a, win_b);
        Some(spd / (ss_a * ss_b).sqrt())
    })
}

/// Rolling sample covariance (divides by `window - 1`), recomputed per window.
pub fn rolling_covariance(
    a: &[Sample],
    b: &[Sample],
    window: usize,
) -> Result<Series, SeriesError> {
    rolling_pairwise(a, b, window, |win_a, win_b| {
        let (spd, _, _) = deviation_sums(win_a, win_b);
        Some(spd / (win_a.len() as f64 - 1.0))
    })
}

fn rolling_bivariate_map<F>(
    a: &[Sample],
    b: &[Sample],
    window: usize,
    mut emit: F,
) -> Result<Series, SeriesError>
where
    F: FnMut(&RollingBivariateMoments) -> Option<f64>,
{
    ensure_same_len(a, b)?;
    let n = a.len();
    if window == 0 || window > n {
        return Ok(Series::missing(n));
    }
    let mut moments = RollingBivariateMoments::default();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut resync = false;
        if i >= window {
            let (old_a, old_b) = (a[i - window], b[i - window]);
            moments.remove(old_a, old_b);
            resync = moments.lost_precision(old_a, old_b) || (i + 1) % window == 0;
        }
        moments.add(a[i], b[i]);
        if resync {
            let live = i + 1 - window..=i;
            moments.rebuild(&a[live.clone()], &b[live]);
        }
        out.push(if moments.is_full(window) {
            emit(&moments)
        } else {
            None
        });
    }
    Ok(Series::from_samples(out))
}

/// O(n) rolling correlation from five running sums.
///
/// Agrees with [`rolling_correlation`] up to floating-point cancellation;
/// near-constant windows are reported missing.
pub fn rolling_correlation_incremental(
    a: &[Sample],
    b: &[Sample],
    window: usize,
) -> Result<Series, SeriesError> {
    rolling_bivariate_map(a, b, window, RollingBivariateMoments::correlation)
}

/// O(n) rolling sample covariance from running sums.
pub fn rolling_covariance_incremental(
    a: &[Sample],
    b: &[Sample],
    window: usize,
) -> Result<Series, SeriesError> {
    rolling_bivariate_map(a, b, window, RollingBivariateMoments::covariance)
}
