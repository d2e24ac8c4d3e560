use crate::error::SeriesError;
use std::fmt;
use std::ops::Deref;

/// One observation of a series. `None` is the missing marker; a present value is always finite.
pub type Sample = Option<f64>;

/// Maps a raw float onto a [`Sample`], treating NaN and infinities as missing.
#[inline]
pub fn normalize(value: f64) -> Sample {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Folds `-0.0` onto `0.0` so that total ordering agrees with `==` on present values.
#[inline]
pub(crate) fn canonical(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Ordered, fixed-length sequence of samples for one asset.
///
/// Dereferences to `[Sample]`; every kernel takes `&[Sample]`, so owned series,
/// sub-slices and borrowed views share one code path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn missing(len: usize) -> Self {
        Self {
            samples: vec![None; len],
        }
    }

    pub fn from_values(values: &[f64]) -> Self {
        Self {
            samples: values.iter().copied().map(normalize).collect(),
        }
    }

    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let mut samples = samples;
        for sample in &mut samples {
            *sample = sample.and_then(normalize);
        }
        Self { samples }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Missing samples become `f64::NAN`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|sample| sample.unwrap_or(f64::NAN))
            .collect()
    }

    pub fn missing_count(&self) -> usize {
        self.samples.iter().filter(|sample| sample.is_none()).count()
    }

    pub fn leading_missing(&self) -> usize {
        self.samples
            .iter()
            .take_while(|sample| sample.is_none())
            .count()
    }
}

impl Deref for Series {
    type Target = [Sample];

    #[inline]
    fn deref(&self) -> &[Sample] {
        &self.samples
    }
}

impl AsRef<[Sample]> for Series {
    #[inline]
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(&values)
    }
}

impl From<&[f64]> for Series {
    fn from(values: &[f64]) -> Self {
        Self::from_values(values)
    }
}

impl FromIterator<Sample> for Series {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::from_samples(iter.into_iter().collect())
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, sample) in self.samples.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            match sample {
                Some(v) => write!(f, "{v}")?,
                None => f.write_str("NaN")?,
            }
        }
        f.write_str("]")
    }
}

/// Stock x time table. Row-major: `values[stock_idx * cols + time_idx]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<Sample>,
}

impl Matrix {
    pub fn missing(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![None; rows * cols],
        }
    }

    pub fn from_rows<R: AsRef<[Sample]>>(rows: &[R]) -> Result<Self, SeriesError> {
        let cols = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            check_row_len(row_idx, cols, row.len())?;
            values.extend(row.iter().map(|sample| sample.and_then(normalize)));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            values,
        })
    }

    pub fn from_f64_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, SeriesError> {
        let cols = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            check_row_len(row_idx, cols, row.len())?;
            values.extend(row.iter().copied().map(normalize));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            values,
        })
    }

    pub(crate) fn from_row_major(rows: usize, cols: usize, values: Vec<Sample>) -> Self {
        debug_assert_eq!(
            values.len(),
            rows * cols,
            "values length must equal rows * cols"
        );
        Self { rows, cols, values }
    }

    /// Number of stocks.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of time steps.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, row_idx: usize) -> Option<&[Sample]> {
        if row_idx >= self.rows {
            return None;
        }
        let start = row_idx * self.cols;
        Some(&self.values[start..start + self.cols])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Sample]> + '_ {
        (0..self.rows).map(move |row_idx| {
            let start = row_idx * self.cols;
            &self.values[start..start + self.cols]
        })
    }

    #[inline]
    pub fn value_at(&self, row_idx: usize, col_idx: usize) -> Option<f64> {
        if row_idx >= self.rows || col_idx >= self.cols {
            return None;
        }
        self.values[row_idx * self.cols + col_idx]
    }

    /// Copies column `col_idx` (one cross-section) into `buf`, replacing its contents.
    pub fn column_into(&self, col_idx: usize, buf: &mut Vec<Sample>) {
        buf.clear();
        if col_idx >= self.cols {
            return;
        }
        buf.extend(
            (col_idx..self.values.len())
                .step_by(self.cols)
                .map(|idx| self.values[idx]),
        );
    }

    pub fn column(&self, col_idx: usize) -> Option<Series> {
        if col_idx >= self.cols {
            return None;
        }
        let mut buf = Vec::with_capacity(self.rows);
        self.column_into(col_idx, &mut buf);
        Some(Series { samples: buf })
    }

    pub fn into_rows(self) -> Vec<Series> {
        if self.cols == 0 {
            return vec![Series::default(); self.rows];
        }
        self.values
            .chunks(self.cols)
            .map(|chunk| Series {
                samples: chunk.to_vec(),
            })
            .collect()
    }
}

#[inline]
fn check_row_len(row: usize, expected: usize, actual: usize) -> Result<(), SeriesError> {
    if actual != expected {
        return Err(SeriesError::RaggedMatrix {
            row,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Fails unless both series have the same length.
#[inline]
pub(crate) fn ensure_same_len(lhs: &[Sample], rhs: &[Sample]) -> Result<(), SeriesError> {
    if lhs.len() != rhs.len() {
        return Err(SeriesError::LengthMismatch {
            lhs: lhs.len(),
            rhs: rhs.len(),
        });
    }
    Ok(())
}
