use crate::types::Sample;

/// Reusable buffers for cross-sectional ranking.
///
/// One scratch belongs to one caller. Concurrent workers each own their own.
#[derive(Debug, Clone, Default)]
pub struct RankScratch {
    rank_pairs: Option<Vec<(usize, f64)>>,
    column: Option<Vec<Sample>>,
}

impl RankScratch {
    pub fn with_capacity(len: usize) -> Self {
        Self {
            rank_pairs: Some(Vec::with_capacity(len)),
            column: Some(Vec::with_capacity(len)),
        }
    }

    pub fn take_rank_pairs(&mut self, min_capacity: usize) -> Vec<(usize, f64)> {
        take_buffer(&mut self.rank_pairs, min_capacity)
    }

    pub fn put_rank_pairs(&mut self, mut buf: Vec<(usize, f64)>) {
        put_buffer(&mut self.rank_pairs, &mut buf);
    }

    pub fn take_column(&mut self, min_capacity: usize) -> Vec<Sample> {
        take_buffer(&mut self.column, min_capacity)
    }

    pub fn put_column(&mut self, mut buf: Vec<Sample>) {
        put_buffer(&mut self.column, &mut buf);
    }

    #[cfg(test)]
    pub fn rank_pairs_capacity(&self) -> Option<usize> {
        self.rank_pairs.as_ref().map(Vec::capacity)
    }

    #[cfg(test)]
    pub fn column_capacity(&self) -> Option<usize> {
        self.column.as_ref().map(Vec::capacity)
    }
}

#[inline]
fn take_buffer<T>(slot: &mut Option<Vec<T>>, min_capacity: usize) -> Vec<T> {
    let mut buf = slot
        .take()
        .unwrap_or_else(|| Vec::with_capacity(min_capacity.max(1)));
    buf.clear();
    if buf.capacity() < min_capacity {
        buf.reserve(min_capacity);
    }
    buf
}

#[inline]
fn put_buffer<T>(slot: &mut Option<Vec<T>>, buf: &mut Vec<T>) {
    buf.clear();
    *slot = Some(std::mem::take(buf));
}
