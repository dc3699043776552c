//! Batch slice arithmetic.
//!
//! The prober endpoint is stateless: every invocation reconstructs the slice
//! it serves from the batch index and the fixed batch size alone. This
//! module holds that arithmetic so the endpoint and its tests share one
//! definition.

/// The slice of the full item list addressed by one batch index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub total: usize,
    pub batch_index: u32,
    pub batch_size: usize,
    pub start: usize,
    pub end: usize,
    pub is_last_batch: bool,
}

impl BatchPlan {
    /// Compute the slice `[index * size, min(index * size + size, total))`.
    ///
    /// An index at or past the end yields an empty slice with
    /// `is_last_batch` set.
    pub fn new(total: usize, batch_index: u32, batch_size: usize) -> Self {
        let start = (batch_index as usize).saturating_mul(batch_size).min(total);
        let end = start.saturating_add(batch_size).min(total);
        Self {
            total,
            batch_index,
            batch_size,
            start,
            end,
            is_last_batch: end >= total,
        }
    }

    /// Percent complete after serving this batch: exactly 100 on the last
    /// batch, otherwise `round((index + 1) * size / total * 100)` capped at
    /// 99. The cap matters on large lists, where the rounding alone reaches
    /// 100 a batch early (9990 of 9991 rounds to 100); 100 is reserved as
    /// the completion signal.
    pub fn progress(&self) -> u8 {
        if self.is_last_batch {
            return 100;
        }
        let done = (self.batch_index as usize + 1) * self.batch_size;
        let percent = (done as f64 / self.total as f64 * 100.0).round() as u8;
        percent.min(99)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_are_contiguous_and_bounded() {
        let plan = BatchPlan::new(23, 0, 10);
        assert_eq!((plan.start, plan.end), (0, 10));
        assert!(!plan.is_last_batch);

        let plan = BatchPlan::new(23, 1, 10);
        assert_eq!((plan.start, plan.end), (10, 20));
        assert!(!plan.is_last_batch);

        // 23 items: the third batch holds the remaining 3 and is last.
        let plan = BatchPlan::new(23, 2, 10);
        assert_eq!((plan.start, plan.end), (20, 23));
        assert!(plan.is_last_batch);
        assert_eq!(plan.progress(), 100);
    }

    #[test]
    fn index_past_end_is_empty_and_last() {
        for index in [3, 4, 100] {
            let plan = BatchPlan::new(23, index, 10);
            assert_eq!(plan.start, plan.end, "batch {index} should be empty");
            assert!(plan.is_last_batch);
            assert_eq!(plan.progress(), 100);
        }
    }

    #[test]
    fn empty_list_is_immediately_last() {
        let plan = BatchPlan::new(0, 0, 10);
        assert_eq!((plan.start, plan.end), (0, 0));
        assert!(plan.is_last_batch);
        // No division by zero: last batch short-circuits to 100.
        assert_eq!(plan.progress(), 100);
    }

    #[test]
    fn exact_multiple_marks_final_full_batch_as_last() {
        let plan = BatchPlan::new(20, 1, 10);
        assert_eq!((plan.start, plan.end), (10, 20));
        assert!(plan.is_last_batch);
        assert_eq!(plan.progress(), 100);
    }

    #[test]
    fn progress_never_rounds_to_100_before_the_last_batch() {
        // 9990 of 9991 is 99.99%, which rounds to 100 without the cap.
        let plan = BatchPlan::new(9991, 998, 10);
        assert!(!plan.is_last_batch);
        assert_eq!(plan.progress(), 99);

        let plan = BatchPlan::new(9991, 999, 10);
        assert!(plan.is_last_batch);
        assert_eq!(plan.progress(), 100);
    }

    #[test]
    fn progress_is_monotone_across_batches() {
        let total = 47;
        let mut last = 0;
        for index in 0..5 {
            let plan = BatchPlan::new(total, index, 10);
            let progress = plan.progress();
            assert!(progress >= last, "progress regressed at batch {index}");
            assert_eq!(progress == 100, plan.is_last_batch);
            last = progress;
        }
    }
}
