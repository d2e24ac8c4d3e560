use super::*;
use crate::error::SeriesError;
use crate::types::{normalize, Matrix};

#[test]
fn normalize_turns_non_finite_into_missing() {
    assert_eq!(normalize(1.5), Some(1.5));
    assert_eq!(normalize(f64::NAN), None);
    assert_eq!(normalize(f64::INFINITY), None);
    assert_eq!(normalize(f64::NEG_INFINITY), None);
}

#[test]
fn series_normalizes_on_construction() {
    let s = Series::from_samples(vec![Some(1.0), Some(f64::NAN), None, Some(f64::INFINITY)]);
    assert_eq!(s.as_slice(), &[Some(1.0), None, None, None]);
    assert_eq!(s.missing_count(), 3);
    assert_eq!(s.leading_missing(), 0);

    let from_vec: Series = vec![NAN, 2.0].into();
    assert_eq!(from_vec.leading_missing(), 1);
    let collected: Series = [Some(3.0), Some(f64::NEG_INFINITY)].into_iter().collect();
    assert_eq!(collected.as_slice(), &[Some(3.0), None]);
}

#[test]
fn series_renders_missing_as_nan_token() {
    let s = series(&[NAN, 1.5, -2.0]);
    assert_eq!(s.to_string(), "[NaN, 1.5, -2]");
    assert_eq!(Series::default().to_string(), "[]");
    let raw = s.to_f64_vec();
    assert!(raw[0].is_nan());
    assert_eq!(&raw[1..], &[1.5, -2.0]);
}

#[test]
fn matrix_from_rows_is_row_major() {
    let m = Matrix::from_f64_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, NAN, 6.0]])
        .expect("rectangular rows should build");
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.value_at(1, 0), Some(4.0));
    assert_eq!(m.value_at(1, 1), None);
    assert_eq!(m.value_at(2, 0), None);
    assert_eq!(m.row(0), Some(&[Some(1.0), Some(2.0), Some(3.0)][..]));
    assert_eq!(m.row(2), None);
    assert_eq!(m.iter_rows().count(), 2);

    let rows = m.into_rows();
    assert_eq!(rows[1], series(&[4.0, NAN, 6.0]));
}

#[test]
fn matrix_rejects_ragged_rows() {
    let err = Matrix::from_f64_rows(&[vec![1.0, 2.0], vec![3.0]])
        .expect_err("ragged rows must be rejected");
    assert_eq!(
        err,
        SeriesError::RaggedMatrix {
            row: 1,
            expected: 2,
            actual: 1
        }
    );

    let err = Matrix::from_rows(&[series(&[1.0]), series(&[2.0, 3.0])])
        .expect_err("ragged rows must be rejected");
    assert!(matches!(err, SeriesError::RaggedMatrix { row: 1, .. }));
}

#[test]
fn matrix_column_extracts_cross_section() {
    let m = Matrix::from_f64_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![NAN, 6.0]])
        .expect("rectangular rows should build");
    let mut buf = vec![Some(99.0); 8];
    m.column_into(0, &mut buf);
    assert_eq!(buf, vec![Some(1.0), Some(3.0), None]);
    m.column_into(5, &mut buf);
    assert!(buf.is_empty());

    assert_eq!(m.column(1), Some(series(&[2.0, 4.0, 6.0])));
    assert_eq!(m.column(2), None);
}

#[test]
fn empty_matrix_shapes() {
    let empty = Matrix::from_f64_rows::<Vec<f64>>(&[]).expect("empty matrix should build");
    assert_eq!(empty.shape(), (0, 0));
    let no_steps = Matrix::missing(3, 0);
    assert_eq!(no_steps.into_rows().len(), 3);
}
