use serde::{Deserialize, Serialize};

use crate::comparison::record::QueryComparisonRecord;

/// Running sums over the records of a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    queries: usize,
    overlap_count: usize,
    percent_overlap: f64,
    coefficient: f64,
}

/// The per-query averages of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchAverages {
    /// The number of compared queries the averages are taken over.
    pub queries: usize,
    pub overlap_count: f64,
    pub percent_overlap: f64,
    pub coefficient: f64,
}

impl BatchSummary {
    /// Adds a record to the sums.
    #[must_use]
    pub fn add(self, record: &QueryComparisonRecord) -> Self {
        Self {
            queries: self.queries + 1,
            overlap_count: self.overlap_count + record.overlap_count,
            percent_overlap: self.percent_overlap + record.percent_overlap,
            coefficient: self.coefficient + record.coefficient,
        }
    }

    /// The number of records added so far.
    pub fn queries(&self) -> usize {
        self.queries
    }

    /// Divides the sums by the number of added records, `None` if there are none.
    pub fn finalize(&self) -> Option<BatchAverages> {
        (self.queries > 0).then(|| {
            let queries = self.queries as f64;
            BatchAverages {
                queries: self.queries,
                overlap_count: self.overlap_count as f64 / queries,
                percent_overlap: self.percent_overlap / queries,
                coefficient: self.coefficient / queries,
            }
        })
    }
}
