use crate::types::{Sample, Series};

mod types;
mod window;

const NAN: f64 = f64::NAN;

fn approx_eq(lhs: f64, rhs: f64) -> bool {
    (lhs.is_nan() && rhs.is_nan()) || (lhs - rhs).abs() < 1e-9
}

fn series(values: &[f64]) -> Series {
    Series::from_values(values)
}

fn assert_series_close(actual: &[Sample], expected: &[Sample]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (idx, (a, e)) in actual.iter().zip(expected).enumerate() {
        match (a, e) {
            (None, None) => {}
            (Some(a), Some(e)) => assert!(
                approx_eq(*a, *e),
                "mismatch at {idx}: actual={a} expected={e}"
            ),
            _ => panic!("missing mismatch at {idx}: actual={a:?} expected={e:?}"),
        }
    }
}

/// Deterministic price-like path with enough curvature to exercise every kernel.
fn wave(n: usize, base: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            60.0 + 2.5 * base
                + t * (0.08 + 0.01 * base)
                + (t * (0.021 + 0.003 * base)).sin() * (0.6 + 0.1 * base)
                + (t * (0.031 + 0.004 * base)).cos() * (0.35 + 0.08 * base)
        })
        .collect()
}

/// Same path rounded to a coarse grid so windows contain ties.
fn tied_wave(n: usize, base: f64) -> Vec<f64> {
    wave(n, base).into_iter().map(|v| (v * 0.5).round()).collect()
}

fn naive_sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
    (ss / (n - 1.0)).sqrt()
}
