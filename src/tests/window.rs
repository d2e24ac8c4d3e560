use super::*;
use crate::ops::{
    rolling_apply, rolling_argmax, rolling_argmin, rolling_max, rolling_mean, rolling_min,
    rolling_product, rolling_sum,
};

#[test]
fn rolling_sum_matches_worked_example() {
    let out = rolling_sum(&series(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
    assert_eq!(out.as_slice(), &[None, None, Some(6.0), Some(9.0), Some(12.0)]);
    assert_eq!(out.to_string(), "[NaN, NaN, 6, 9, 12]");
}

#[test]
fn basic_reducers_match_hand_computed_windows() {
    let a = series(&[2.0, -1.0, 4.0, 0.5, 3.0]);
    assert_series_close(
        &rolling_mean(&a, 2),
        &series(&[NAN, 0.5, 1.5, 2.25, 1.75]),
    );
    assert_series_close(
        &rolling_product(&a, 3),
        &series(&[NAN, NAN, -8.0, -2.0, 6.0]),
    );
    assert_series_close(
        &rolling_min(&a, 3),
        &series(&[NAN, NAN, -1.0, -1.0, 0.5]),
    );
    assert_series_close(&rolling_max(&a, 3), &series(&[NAN, NAN, 4.0, 4.0, 4.0]));
}

#[test]
fn product_with_zero_in_window_is_zero() {
    let a = series(&[1.0, 0.0, 3.0, 4.0]);
    assert_series_close(&rolling_product(&a, 2), &series(&[NAN, 0.0, 0.0, 12.0]));
}

#[test]
fn window_one_is_identity_for_value_reducers() {
    let values = [3.5, -2.0, 0.0, 7.25];
    let a = series(&values);
    for out in [
        rolling_sum(&a, 1),
        rolling_mean(&a, 1),
        rolling_product(&a, 1),
        rolling_min(&a, 1),
        rolling_max(&a, 1),
    ] {
        assert_eq!(out, a);
    }
    assert_eq!(rolling_argmax(&a, 1), series(&[1.0; 4]));
    assert_eq!(rolling_argmin(&a, 1), series(&[1.0; 4]));
}

#[test]
fn zero_or_oversized_window_yields_all_missing() {
    let a = series(&[1.0, 2.0, 3.0]);
    for window in [0, 4, 10] {
        let out = rolling_sum(&a, window);
        assert_eq!(out.len(), 3);
        assert_eq!(out.missing_count(), 3, "window={window}");
    }
    assert!(rolling_sum(&[], 0).is_empty());
}

#[test]
fn warmup_prefix_is_exactly_window_minus_one() {
    let a = series(&wave(40, 1.0));
    for window in 1..=12 {
        for out in [
            rolling_sum(&a, window),
            rolling_mean(&a, window),
            rolling_min(&a, window),
            rolling_argmax(&a, window),
        ] {
            assert_eq!(out.len(), a.len());
            assert_eq!(out.leading_missing(), window - 1, "window={window}");
            assert_eq!(out.missing_count(), window - 1, "window={window}");
        }
    }
}

#[test]
fn missing_sample_poisons_every_window_touching_it() {
    let a = series(&[1.0, NAN, 3.0, 4.0, 5.0]);
    assert_series_close(
        &rolling_sum(&a, 2),
        &series(&[NAN, NAN, NAN, 7.0, 9.0]),
    );
    assert_series_close(
        &rolling_argmax(&a, 3),
        &series(&[NAN, NAN, NAN, NAN, 3.0]),
    );
}

#[test]
fn argmax_and_argmin_pick_oldest_extreme() {
    let a = series(&[1.0, 3.0, 3.0, 2.0]);
    assert_series_close(&rolling_argmax(&a, 3), &series(&[NAN, NAN, 2.0, 1.0]));

    let b = series(&[2.0, 1.0, 1.0, 5.0]);
    assert_series_close(&rolling_argmin(&b, 3), &series(&[NAN, NAN, 2.0, 1.0]));

    let flat = series(&[7.0; 6]);
    assert_series_close(
        &rolling_argmax(&flat, 4),
        &series(&[NAN, NAN, NAN, 1.0, 1.0, 1.0]),
    );
}

#[test]
fn argmax_reports_one_based_offset_from_window_start() {
    let a = series(&[5.0, 1.0, 2.0, 9.0, 3.0, 4.0]);
    assert_series_close(
        &rolling_argmax(&a, 3),
        &series(&[NAN, NAN, 1.0, 3.0, 2.0, 1.0]),
    );
    assert_series_close(
        &rolling_argmin(&a, 3),
        &series(&[NAN, NAN, 2.0, 1.0, 1.0, 2.0]),
    );
}

#[test]
fn rolling_apply_non_finite_reduction_is_missing() {
    let a = series(&[1.0, 0.0, 2.0]);
    let out = rolling_apply(&a, 2, |win| {
        let x = (*win.first()?)?;
        let y = (*win.last()?)?;
        Some(x / y)
    });
    assert_series_close(&out, &series(&[NAN, NAN, 0.0]));
}
