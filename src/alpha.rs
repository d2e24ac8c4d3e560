//! Alpha#001 from "101 Formulaic Alphas" (Kakushadze, 2016):
//!
//! `rank(ts_argmax(signed_power(returns < 0 ? stddev(returns, 20) : close, 2), 5)) - 0.5`
//!
//! The single-series form ranks the argmax series over time; the matrix form
//! ranks across stocks at every time step.

use crate::error::SeriesError;
use crate::exec;
use crate::ops::{
    cross_sectional_rank, cross_sectional_rank_into, rolling_argmax, rolling_stddev,
    select_negative, square, sub_scalar,
};
use crate::state::RankScratch;
use crate::types::{ensure_same_len, Matrix, Sample, Series};
use serde::{Deserialize, Serialize};
use tracing::debug;

const RANK_CENTER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Alpha001Params {
    pub stddev_window: usize,
    pub argmax_window: usize,
    /// Keep the per-stock pass on the calling thread even with the `parallel` feature.
    pub force_sequential: bool,
}

impl Default for Alpha001Params {
    fn default() -> Self {
        Self {
            stddev_window: 20,
            argmax_window: 5,
            force_sequential: false,
        }
    }
}

impl Alpha001Params {
    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.stddev_window == 0 {
            return Err(SeriesError::InvalidParam {
                param: "stddev_window",
                value: self.stddev_window,
            });
        }
        if self.argmax_window == 0 {
            return Err(SeriesError::InvalidParam {
                param: "argmax_window",
                value: self.argmax_window,
            });
        }
        Ok(())
    }

    /// Leading positions that are always missing, e.g. 23 for windows 20 and 5.
    pub fn warmup_len(&self) -> usize {
        (self.stddev_window + self.argmax_window).saturating_sub(2)
    }
}

/// Steps (a)-(c): stddev of returns, selector, square, then 1-based argmax offset.
fn argmax_stage(
    close: &[Sample],
    returns: &[Sample],
    params: &Alpha001Params,
) -> Result<Series, SeriesError> {
    let std_ret = rolling_stddev(returns, params.stddev_window);
    // The selector is only defined where the stddev window is.
    let gated_close: Vec<Sample> = close
        .iter()
        .zip(std_ret.iter())
        .map(|(c, s)| s.and(*c))
        .collect();
    let inner = select_negative(returns, &std_ret, &gated_close)?;
    Ok(rolling_argmax(&square(&inner), params.argmax_window))
}

pub fn alpha001(close: &[Sample], returns: &[Sample]) -> Result<Series, SeriesError> {
    alpha001_with(close, returns, &Alpha001Params::default())
}

/// Single-asset alpha001: the argmax series is ranked over its own time axis.
pub fn alpha001_with(
    close: &[Sample],
    returns: &[Sample],
    params: &Alpha001Params,
) -> Result<Series, SeriesError> {
    ensure_same_len(close, returns)?;
    params.validate()?;
    debug!(
        len = close.len(),
        warmup = params.warmup_len(),
        "alpha001 single-series"
    );
    let argmax = argmax_stage(close, returns, params)?;
    let ranked = cross_sectional_rank(&argmax);
    Ok(sub_scalar(&ranked, RANK_CENTER))
}

pub fn alpha001_matrix(close: &Matrix, returns: &Matrix) -> Result<Matrix, SeriesError> {
    alpha001_matrix_with(close, returns, &Alpha001Params::default())
}

/// Cross-sectional alpha001 over stock x time matrices.
///
/// The per-stock pass is independent per row (parallel under the `parallel`
/// feature); the ranking pass walks time columns with one reused scratch.
pub fn alpha001_matrix_with(
    close: &Matrix,
    returns: &Matrix,
    params: &Alpha001Params,
) -> Result<Matrix, SeriesError> {
    if close.shape() != returns.shape() {
        return Err(SeriesError::ShapeMismatch {
            lhs_rows: close.rows(),
            lhs_cols: close.cols(),
            rhs_rows: returns.rows(),
            rhs_cols: returns.cols(),
        });
    }
    params.validate()?;
    let (stocks, steps) = close.shape();
    debug!(
        stocks,
        steps,
        warmup = params.warmup_len(),
        force_sequential = params.force_sequential,
        "alpha001 matrix"
    );

    let rows: Vec<(&[Sample], &[Sample])> = close.iter_rows().zip(returns.iter_rows()).collect();
    let argmax_rows = exec::map_slice(
        &rows,
        |&(close_row, returns_row)| argmax_stage(close_row, returns_row, params),
        params.force_sequential,
    )
    .into_iter()
    .collect::<Result<Vec<Series>, SeriesError>>()?;

    // Time-major copy so each cross-section is one contiguous slice.
    let mut by_time: Vec<Sample> = vec![None; stocks * steps];
    for (stock_idx, row) in argmax_rows.iter().enumerate() {
        for (time_idx, value) in row.iter().enumerate() {
            by_time[time_idx * stocks + stock_idx] = *value;
        }
    }

    let mut values: Vec<Sample> = vec![None; stocks * steps];
    let mut scratch = RankScratch::with_capacity(stocks);
    let mut ranked = scratch.take_column(stocks);
    ranked.resize(stocks, None);
    for (time_idx, cross_section) in by_time.chunks(stocks.max(1)).enumerate() {
        cross_sectional_rank_into(cross_section, &mut ranked, &mut scratch)?;
        for (stock_idx, rank) in ranked.iter().enumerate() {
            values[stock_idx * steps + time_idx] = rank.map(|r| r - RANK_CENTER);
        }
    }
    scratch.put_column(ranked);

    Ok(Matrix::from_row_major(stocks, steps, values))
}
