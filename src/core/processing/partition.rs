//! Train/val/test partition arithmetic.
//!
//! Train and val sizes are rounded up independently and test takes whatever
//! is left. For tiny categories the two ceilings can overshoot the total
//! (n = 3 gives 3 + 1 > 3), so each count is clamped to what remains: train
//! to `n`, val to `n - train`, and test is the non-negative remainder.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Subset;

const RATIO_TOLERANCE: f64 = 1e-6;

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
    /// Only checked for consistency; the test subset always receives the remainder.
    pub test: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.70,
            val: 0.15,
            test: 0.15,
        }
    }
}

impl SplitRatios {
    pub fn validate(&self) -> Result<()> {
        let in_range = |r: f64| r.is_finite() && (0.0..=1.0).contains(&r);
        let sum = self.train + self.val + self.test;
        if !(in_range(self.train) && in_range(self.val) && in_range(self.test))
            || (sum - 1.0).abs() > RATIO_TOLERANCE
        {
            return Err(Error::InvalidRatios {
                train: self.train,
                val: self.val,
                test: self.test,
            });
        }
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct PartitionCounts {
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

impl PartitionCounts {
    pub fn compute(total: usize, ratios: &SplitRatios) -> Self {
        let ceil_share = |ratio: f64| (total as f64 * ratio).ceil() as usize;

        let raw_train = ceil_share(ratios.train);
        let raw_val = ceil_share(ratios.val);

        let train = raw_train.min(total);
        let val = raw_val.min(total - train);
        let test = total - train - val;

        if raw_train + raw_val > total {
            debug!(
                "Clamped split of {} files: requested train={} val={}, using {}/{}/{}",
                total, raw_train, raw_val, train, val, test
            );
        }

        Self { train, val, test }
    }

    pub fn total(&self) -> usize {
        self.train + self.val + self.test
    }

    pub fn get(&self, subset: Subset) -> usize {
        match subset {
            Subset::Train => self.train,
            Subset::Val => self.val,
            Subset::Test => self.test,
        }
    }
}

/// A category's items divided into three contiguous, non-overlapping runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAssignment<T> {
    pub train: Vec<T>,
    pub val: Vec<T>,
    pub test: Vec<T>,
}

impl<T> SplitAssignment<T> {
    /// Items `[0, train)` go to train, the next `val` to val, the rest to test.
    /// `counts` must have been computed for `items.len()`.
    pub fn assign(mut items: Vec<T>, counts: PartitionCounts) -> Result<Self> {
        if counts.total() != items.len() {
            return Err(Error::Processing(format!(
                "partition counts {:?} do not cover {} items",
                counts,
                items.len()
            )));
        }
        let test = items.split_off(counts.train + counts.val);
        let val = items.split_off(counts.train);
        Ok(Self {
            train: items,
            val,
            test,
        })
    }

    pub fn subset(&self, subset: Subset) -> &[T] {
        match subset {
            Subset::Train => &self.train,
            Subset::Val => &self.val,
            Subset::Test => &self.test,
        }
    }

    pub fn counts(&self) -> PartitionCounts {
        PartitionCounts {
            train: self.train.len(),
            val: self.val.len(),
            test: self.test.len(),
        }
    }
}
