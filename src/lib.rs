pub mod alpha;
pub mod error;
pub mod exec;
pub mod ops;
pub mod state;
pub mod types;

pub use alpha::{alpha001, alpha001_matrix, alpha001_matrix_with, alpha001_with, Alpha001Params};
pub use error::SeriesError;
pub use ops::{
    cross_sectional_rank, cross_sectional_rank_into, decay_linear, delay, delta,
    rolling_argmax, rolling_argmin, rolling_correlation, rolling_covariance, rolling_max,
    rolling_mean, rolling_min, rolling_product, rolling_stddev, rolling_sum, scale, ts_rank,
    OrderedWindow,
};
pub use state::RankScratch;
pub use types::{normalize, Matrix, Sample, Series};

#[cfg(test)]
mod tests;
