use crate::error::SeriesError;
use crate::types::{ensure_same_len, normalize, Sample, Series};

#[inline]
fn map_present(a: &[Sample], f: impl Fn(f64) -> f64) -> Series {
    a.iter().map(|sample| normalize(f((*sample)?))).collect()
}

/// `sign(x) * |x|^exponent`.
pub fn signed_power(a: &[Sample], exponent: f64) -> Series {
    map_present(a, |v| v.signum() * v.abs().powf(exponent))
}

pub fn square(a: &[Sample]) -> Series {
    map_present(a, |v| v * v)
}

pub fn sub_scalar(a: &[Sample], k: f64) -> Series {
    map_present(a, |v| v - k)
}

/// `cond[i] < 0 ? if_negative[i] : otherwise[i]`; missing `cond` gives missing.
///
/// Only the selected branch needs to be present.
pub fn select_negative(
    cond: &[Sample],
    if_negative: &[Sample],
    otherwise: &[Sample],
) -> Result<Series, SeriesError> {
    ensure_same_len(cond, if_negative)?;
    ensure_same_len(cond, otherwise)?;
    Ok(cond
        .iter()
        .zip(if_negative.iter().zip(otherwise))
        .map(|(c, (neg, other))| if (*c)? < 0.0 { *neg } else { *other })
        .collect())
}
