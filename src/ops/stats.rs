use crate::types::{normalize, Sample, Series};

/// Running first and second moments over a sliding window.
///
/// Missing samples are counted but never enter the sums, so a window is only
/// evaluable once it holds `window` present samples and no missing one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingMoments {
    pub(crate) n: usize,
    pub(crate) missing: usize,
    pub(crate) sum: f64,
    pub(crate) sum_sq: f64,
}

impl RollingMoments {
    #[inline]
    pub fn add(&mut self, sample: Sample) {
        match sample {
            Some(v) => {
                self.n += 1;
                self.sum += v;
                self.sum_sq += v * v;
            }
            None => self.missing += 1,
        }
    }

    #[inline]
    pub fn remove(&mut self, sample: Sample) {
        match sample {
            Some(v) => {
                debug_assert!(self.n > 0, "remove from empty RollingMoments");
                self.n -= 1;
                if self.n == 0 {
                    // Drop accumulated rounding error once the window drains.
                    self.sum = 0.0;
                    self.sum_sq = 0.0;
                } else {
                    self.sum -= v;
                    self.sum_sq -= v * v;
                }
            }
            None => {
                debug_assert!(self.missing > 0, "remove missing from RollingMoments");
                self.missing -= 1;
            }
        }
    }

    #[inline]
    pub fn is_full(&self, window: usize) -> bool {
        self.missing == 0 && self.n == window
    }

    /// Recomputes every accumulator from the live window `samples`.
    pub fn rebuild(&mut self, samples: &[Sample]) {
        *self = Self::default();
        for sample in samples {
            self.add(*sample);
        }
    }

    /// True when evicting `sample` left `sum_sq` too small to trust against the
    /// magnitude just subtracted from it.
    #[inline]
    pub fn lost_precision(&self, sample: Sample) -> bool {
        sample.is_some_and(|v| dominates(v * v, self.sum_sq))
    }

    #[inline]
    pub fn mean(&self) -> Option<f64> {
        if self.n == 0 {
            return None;
        }
        normalize(self.sum / self.n as f64)
    }

    /// Sample variance (divides by `n - 1`), floored at zero.
    #[inline]
    pub fn variance(&self) -> Option<f64> {
        if self.n <= 1 {
            return None;
        }
        let n = self.n as f64;
        let m2 = self.sum_sq - (self.sum * self.sum) / n;
        normalize((m2 / (n - 1.0)).max(0.0))
    }

    #[inline]
    pub fn std(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}

/// Running sums of `x`, `y`, `x^2`, `y^2` and `x*y` over a paired sliding window.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingBivariateMoments {
    pub(crate) n: usize,
    pub(crate) missing: usize,
    pub(crate) sum_x: f64,
    pub(crate) sum_y: f64,
    pub(crate) sum_xx: f64,
    pub(crate) sum_yy: f64,
    pub(crate) sum_xy: f64,
}

const VAR_NUM_EPS: f64 = 1e-12;

/// An evicted square this many times larger than what remains means the
/// remaining running sum has lost most of its significant digits.
const RESYNC_RATIO: f64 = 1e3;

#[inline]
fn dominates(removed_sq: f64, remaining: f64) -> bool {
    removed_sq > RESYNC_RATIO * remaining.abs()
}

impl RollingBivariateMoments {
    #[inline]
    pub fn add(&mut self, x: Sample, y: Sample) {
        let (Some(x), Some(y)) = (x, y) else {
            self.missing += 1;
            return;
        };
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_yy += y * y;
        self.sum_xy += x * y;
    }

    #[inline]
    pub fn remove(&mut self, x: Sample, y: Sample) {
        let (Some(x), Some(y)) = (x, y) else {
            debug_assert!(self.missing > 0, "remove missing pair");
            self.missing -= 1;
            return;
        };
        debug_assert!(self.n > 0, "remove from empty RollingBivariateMoments");
        self.n -= 1;
        if self.n == 0 {
            *self = Self {
                missing: self.missing,
                ..Self::default()
            };
            return;
        }
        self.sum_x -= x;
        self.sum_y -= y;
        self.sum_xx -= x * x;
        self.sum_yy -= y * y;
        self.sum_xy -= x * y;
    }

    #[inline]
    pub fn is_full(&self, window: usize) -> bool {
        self.missing == 0 && self.n == window
    }

    /// Recomputes every accumulator from the live paired window.
    pub fn rebuild(&mut self, xs: &[Sample], ys: &[Sample]) {
        *self = Self::default();
        for (x, y) in xs.iter().zip(ys) {
            self.add(*x, *y);
        }
    }

    #[inline]
    pub fn lost_precision(&self, x: Sample, y: Sample) -> bool {
        match (x, y) {
            (Some(x), Some(y)) => {
                dominates(x * x, self.sum_xx) || dominates(y * y, self.sum_yy)
            }
            _ => false,
        }
    }

    /// Sample covariance (divides by `n - 1`).
    #[inline]
    pub fn covariance(&self) -> Option<f64> {
        if self.n <= 1 {
            return None;
        }
        let n = self.n as f64;
        let cov_num = self.sum_xy - (self.sum_x * self.sum_y) / n;
        normalize(cov_num / (n - 1.0))
    }

    #[inline]
    pub fn correlation(&self) -> Option<f64> {
        if self.n <= 1 {
            return None;
        }
        let n = self.n as f64;
        let cov_num = self.sum_xy - (self.sum_x * self.sum_y) / n;
        let var_x_num = self.sum_xx - (self.sum_x * self.sum_x) / n;
        let var_y_num = self.sum_yy - (self.sum_y * self.sum_y) / n;
        if var_x_num <= VAR_NUM_EPS || var_y_num <= VAR_NUM_EPS {
            return None;
        }
        normalize(cov_num / (var_x_num.sqrt() * var_y_num.sqrt()))
    }
}

fn rolling_moments_map<F>(a: &[Sample], window: usize, mut emit: F) -> Series
where
    F: FnMut(&RollingMoments) -> Option<f64>,
{
    let n = a.len();
    if window <= 1 || window > n {
        return Series::missing(n);
    }
    let mut moments = RollingMoments::default();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut resync = false;
        if i >= window {
            let evicted = a[i - window];
            moments.remove(evicted);
            resync = moments.lost_precision(evicted) || (i + 1) % window == 0;
        }
        moments.add(a[i]);
        if resync {
            moments.rebuild(&a[i + 1 - window..=i]);
        }
        if moments.is_full(window) {
            out.push(emit(&moments));
        } else {
            out.push(None);
        }
    }
    Series::from_samples(out)
}

/// Rolling sample standard deviation in O(n) via running `sum` and `sum_sq`.
///
/// The sums are rebuilt from the live window every `window` steps and whenever
/// an evicted value dominates what remains, so one spike cannot corrupt later
/// windows.
///
/// `window <= 1` or `window > a.len()` yields an all-missing series.
pub fn rolling_stddev(a: &[Sample], window: usize) -> Series {
    rolling_moments_map(a, window, RollingMoments::std)
}

/// Rolling sample variance, floored at zero.
pub fn rolling_variance(a: &[Sample], window: usize) -> Series {
    rolling_moments_map(a, window, RollingMoments::variance)
}
