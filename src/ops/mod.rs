//! Kernel layer.
//!
//! Every kernel is a pure function over `&[Sample]` returning a freshly
//! allocated [`Series`](crate::types::Series) of the same length:
//! `window.rs` holds the generic trailing-window driver and its reducers,
//! `stats.rs` the running-sum moments, `order.rs` the order-statistics window,
//! `ts.rs` rank / lag / pairwise kernels, `cs.rs` cross-sectional kernels and
//! `elem.rs` elementwise helpers.

pub mod order;
pub mod stats;

mod cs;
mod elem;
mod ts;
mod window;

pub use cs::{cross_sectional_rank, cross_sectional_rank_into, scale, INSERTION_SORT_MAX_LEN};
pub use elem::{select_negative, signed_power, square, sub_scalar};
pub use order::OrderedWindow;
pub use stats::{rolling_stddev, rolling_variance, RollingBivariateMoments, RollingMoments};
pub use ts::{
    decay_linear, delay, delta, rank_last, rolling_correlation, rolling_correlation_incremental,
    rolling_covariance, rolling_covariance_incremental, ts_rank, ts_rank_naive, ts_rank_span,
};
pub use window::{
    rolling_apply, rolling_argmax, rolling_argmin, rolling_max, rolling_mean, rolling_min,
    rolling_product, rolling_sum,
};

#[cfg(test)]
pub(crate) use cs::cross_sectional_rank_with_strategy;
