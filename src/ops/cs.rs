use crate::error::SeriesError;
use crate::state::RankScratch;
use crate::types::{normalize, Sample, Series};

/// Populations up to this size are ordered by insertion sort.
pub const INSERTION_SORT_MAX_LEN: usize = 32;

#[inline]
fn insertion_sort_by_value(pairs: &mut [(usize, f64)]) {
    for i in 1..pairs.len() {
        let key = pairs[i];
        let mut j = i;
        while j > 0 && pairs[j - 1].1 > key.1 {
            pairs[j] = pairs[j - 1];
            j -= 1;
        }
        pairs[j] = key;
    }
}

#[inline]
fn sort_by_value(pairs: &mut [(usize, f64)]) {
    if pairs.len() <= INSERTION_SORT_MAX_LEN {
        insertion_sort_by_value(pairs);
    } else {
        pairs.sort_unstable_by(|a, b| a.1.total_cmp(&b.1));
    }
}

/// Writes `avg_rank / m` for every `(index, value)` of an ascending `pairs` into `out`.
fn assign_percentile_ranks(pairs: &[(usize, f64)], out: &mut [Sample]) {
    let m = pairs.len() as f64;
    let mut i = 0usize;
    while i < pairs.len() {
        let mut j = i + 1;
        while j < pairs.len() && pairs[j].1 == pairs[i].1 {
            j += 1;
        }
        let avg_rank = ((i + 1 + j) as f64) * 0.5;
        let rank = avg_rank / m;
        for &(idx, _) in &pairs[i..j] {
            out[idx] = Some(rank);
        }
        i = j;
    }
}

/// Percentile rank of each present value among the present values of `x`.
///
/// Missing stays missing; ties share their average rank. Results lie in `(0, 1]`.
pub fn cross_sectional_rank(x: &[Sample]) -> Series {
    let mut out = vec![None; x.len()];
    let mut pairs: Vec<(usize, f64)> = present_pairs(x).collect();
    sort_by_value(&mut pairs);
    assign_percentile_ranks(&pairs, &mut out);
    Series::from_samples(out)
}

/// Allocation-free form of [`cross_sectional_rank`].
///
/// `out` is fully overwritten (missing first); the scratch buffers are cleared
/// on entry and handed back to `scratch` on exit, so one scratch can serve every
/// time column of a matrix.
pub fn cross_sectional_rank_into(
    x: &[Sample],
    out: &mut [Sample],
    scratch: &mut RankScratch,
) -> Result<(), SeriesError> {
    if out.len() != x.len() {
        return Err(SeriesError::OutputLengthMismatch {
            expected: x.len(),
            actual: out.len(),
        });
    }
    out.fill(None);
    let mut pairs = scratch.take_rank_pairs(x.len());
    pairs.extend(present_pairs(x));
    sort_by_value(&mut pairs);
    assign_percentile_ranks(&pairs, out);
    scratch.put_rank_pairs(pairs);
    Ok(())
}

#[inline]
fn present_pairs(x: &[Sample]) -> impl Iterator<Item = (usize, f64)> + '_ {
    x.iter()
        .enumerate()
        .filter_map(|(idx, sample)| sample.map(|v| (idx, v)))
}

/// `a[i] * k / sum(|a|)` over present values; a zero absolute sum leaves everything missing.
pub fn scale(a: &[Sample], k: f64) -> Series {
    let abs_sum = a.iter().flatten().map(|v| v.abs()).sum::<f64>();
    a.iter()
        .map(|sample| normalize((*sample)? * k / abs_sum))
        .collect()
}

#[cfg(test)]
pub(crate) fn cross_sectional_rank_with_strategy(x: &[Sample], insertion: bool) -> Series {
    let mut out = vec![None; x.len()];
    let mut pairs: Vec<(usize, f64)> = present_pairs(x).collect();
    if insertion {
        insertion_sort_by_value(&mut pairs);
    } else {
        pairs.sort_unstable_by(|a, b| a.1.total_cmp(&b.1));
    }
    assign_percentile_ranks(&pairs, &mut out);
    Series::from_samples(out)
}
