//! Sequential / parallel execution over independent assets.
//!
//! `map_slice` is the usual rayon-or-iterator helper shape (same signature as
//! a workspace `parallel::map_slice` utility), plus trace events naming the
//! path taken. The `cfg` switch lives here only: with the `parallel` feature
//! the map runs on rayon's global pool, and `force_sequential` keeps it on the
//! calling thread.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maps `f` over `slice`, preserving order.
#[inline]
pub fn map_slice<T, F, R>(slice: &[T], f: F, force_sequential: bool) -> Vec<R>
where
    T: Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        if force_sequential {
            tracing::trace!(len = slice.len(), "map_slice sequential (forced)");
            slice.iter().map(f).collect()
        } else {
            tracing::trace!(len = slice.len(), "map_slice parallel");
            slice.par_iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = force_sequential;
        slice.iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::map_slice;

    #[test]
    fn map_slice_preserves_order_in_both_modes() {
        let items: Vec<u32> = (0..64).collect();
        let forced = map_slice(&items, |v| v * 2, true);
        let default = map_slice(&items, |v| v * 2, false);
        let expected: Vec<u32> = items.iter().map(|v| v * 2).collect();
        assert_eq!(forced, expected);
        assert_eq!(default, expected);
    }
}
