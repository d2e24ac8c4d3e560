use factor_series::{Matrix, Sample, Series};

#[allow(dead_code)]
pub const TOL: f64 = 1e-8;

/// Deterministic price-like path for `slot`; distinct slots give distinct paths.
#[allow(dead_code)]
pub fn price_path(n: usize, slot: usize) -> Vec<f64> {
    let base = slot as f64;
    (0..n)
        .map(|i| {
            let t = i as f64;
            80.0 + 3.0 * base
                + t * (0.05 + 0.007 * base)
                + (t * (0.017 + 0.002 * base)).sin() * (1.1 + 0.2 * base)
                + (t * (0.043 + 0.003 * base)).cos() * (0.4 + 0.05 * base)
        })
        .collect()
}

/// Simple returns of [`price_path`], first element missing.
#[allow(dead_code)]
pub fn returns_of(prices: &[f64]) -> Vec<f64> {
    std::iter::once(f64::NAN)
        .chain(prices.windows(2).map(|w| w[1] / w[0] - 1.0))
        .collect()
}

/// [`price_path`] snapped to a coarse grid so windows hold duplicates.
#[allow(dead_code)]
pub fn tied_path(n: usize, slot: usize) -> Series {
    Series::from_values(
        &price_path(n, slot)
            .into_iter()
            .map(|v| (v * 0.25).round())
            .collect::<Vec<_>>(),
    )
}

/// Punches missing samples into `series` every `every` positions, starting at `offset`.
#[allow(dead_code)]
pub fn with_gaps(series: &Series, every: usize, offset: usize) -> Series {
    series
        .iter()
        .enumerate()
        .map(|(i, v)| if i % every == offset { None } else { *v })
        .collect()
}

/// `stocks` x `steps` close and returns matrices built from [`price_path`].
#[allow(dead_code)]
pub fn close_and_returns(stocks: usize, steps: usize) -> (Matrix, Matrix) {
    let closes: Vec<Vec<f64>> = (0..stocks).map(|slot| price_path(steps, slot)).collect();
    let returns: Vec<Vec<f64>> = closes.iter().map(|row| returns_of(row)).collect();
    let close = Matrix::from_f64_rows(&closes).expect("close rows are rectangular");
    let returns = Matrix::from_f64_rows(&returns).expect("returns rows are rectangular");
    (close, returns)
}

#[allow(dead_code)]
pub fn assert_close(lhs: Sample, rhs: Sample, ctx: &str) {
    match (lhs, rhs) {
        (None, None) => {}
        (Some(a), Some(b)) => {
            let abs = (a - b).abs();
            let scale = a.abs().max(b.abs()).max(1.0);
            assert!(
                abs <= TOL || abs <= TOL * 10.0 * scale,
                "mismatch at {}: lhs={} rhs={} abs={}",
                ctx,
                a,
                b,
                abs
            );
        }
        _ => panic!(
            "null/finite mismatch at {}: lhs={:?} rhs={:?}",
            ctx, lhs, rhs
        ),
    }
}

#[allow(dead_code)]
pub fn assert_series_close(lhs: &[Sample], rhs: &[Sample], label: &str) {
    assert_eq!(lhs.len(), rhs.len(), "{label}: length mismatch");
    for (i, (a, b)) in lhs.iter().zip(rhs).enumerate() {
        assert_close(*a, *b, &format!("{label}[{i}]"));
    }
}
