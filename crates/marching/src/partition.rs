//! Work partitioning across a fixed number of workers.

use std::ops::Range;

/// Half-open range of the outer dimension assigned to `worker_id`.
///
/// `start = id * len / workers`, `end = (id + 1) * len / workers`; the last
/// worker's end is forced to `len` so truncation never leaves a gap.
///
/// # Panics
/// Panics if `workers == 0` or `worker_id >= workers`.
pub fn partition(worker_id: usize, workers: usize, len: usize) -> Range<usize> {
    assert!(workers > 0, "worker count must be positive");
    assert!(worker_id < workers, "worker id {} out of range", worker_id);

    let start = scaled(worker_id, len, workers);
    let end = if worker_id == workers - 1 {
        len
    } else {
        scaled(worker_id + 1, len, workers)
    };
    start..end
}

/// Partitions for every worker, in worker-id order.
pub fn partitions(workers: usize, len: usize) -> Vec<Range<usize>> {
    (0..workers).map(|id| partition(id, workers, len)).collect()
}

/// `id * len / workers` without intermediate overflow.
#[inline]
fn scaled(id: usize, len: usize, workers: usize) -> usize {
    (id as u128 * len as u128 / workers as u128) as usize
}

/// Split a row-major buffer into one mutable band per range.
///
/// `ranges` must be contiguous, start at row 0, and end at
/// `buf.len() / row_len`. Band `k` holds rows `ranges[k]`.
///
/// # Panics
/// Panics if the ranges do not tile the buffer exactly.
pub fn split_rows_mut<'a, T>(
    buf: &'a mut [T],
    row_len: usize,
    ranges: &[Range<usize>],
) -> Vec<&'a mut [T]> {
    let mut bands = Vec::with_capacity(ranges.len());
    let mut rest = buf;
    let mut next_row = 0;

    for range in ranges {
        assert_eq!(range.start, next_row, "row ranges must be contiguous");
        let (band, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * row_len);
        bands.push(band);
        rest = tail;
        next_row = range.end;
    }

    assert!(rest.is_empty(), "row ranges must cover the whole buffer");
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(workers: usize, len: usize) {
        let ranges = partitions(workers, len);
        assert_eq!(ranges.len(), workers);
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges[workers - 1].end, len);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "gap or overlap: {:?}", pair);
        }
        let covered: usize = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(covered, len);
    }

    #[test]
    fn test_partition_even_split() {
        assert_eq!(partitions(4, 8), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_partition_uneven_split() {
        assert_eq!(partitions(3, 10), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_partition_more_workers_than_rows() {
        let ranges = partitions(5, 2);
        assert_eq!(ranges.iter().filter(|r| !r.is_empty()).count(), 2);
        assert_exact_cover(5, 2);
    }

    #[test]
    fn test_partition_exact_cover_grid() {
        for workers in 1..=17 {
            for len in [0, 1, 2, 7, 64, 255, 256, 257, 2048] {
                assert_exact_cover(workers, len);
            }
        }
    }

    #[test]
    fn test_single_worker_gets_everything() {
        assert_eq!(partition(0, 1, 99), 0..99);
    }

    #[test]
    #[should_panic]
    fn test_zero_workers_panics() {
        partition(0, 0, 10);
    }

    #[test]
    fn test_split_rows_mut() {
        let mut buf: Vec<u32> = (0..12).collect();
        let bands = split_rows_mut(&mut buf, 3, &[0..1, 1..1, 1..4]);
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0], &[0, 1, 2]);
        assert!(bands[1].is_empty());
        assert_eq!(bands[2].len(), 9);

        for band in bands {
            for value in band.iter_mut() {
                *value += 100;
            }
        }
        assert!(buf.iter().all(|v| *v >= 100));
    }

    #[test]
    #[should_panic(expected = "cover")]
    fn test_split_rows_mut_short_ranges() {
        let mut buf = vec![0u8; 6];
        split_rows_mut(&mut buf, 2, &[0..2]);
    }
}
