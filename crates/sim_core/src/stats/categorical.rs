//! Counts per outcome bucket.

/// Percentage `100 · count / total`, or 0 when `total` is 0.
#[inline]
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

/// One histogram bar.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryCount {
    /// Bucket label (`heads`, `3`, `inside`, ...).
    pub label: String,
    /// Number of outcomes in the bucket.
    pub count: u64,
    /// Share of all outcomes, in percent.
    pub percentage: f64,
}

/// Histogram over a fixed, labelled outcome domain.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryCounts {
    labels: Vec<String>,
    counts: Vec<u64>,
    total: u64,
}

impl CategoryCounts {
    /// Creates a zeroed histogram with one bucket per label.
    pub fn new(labels: Vec<String>) -> Self {
        let counts = vec![0; labels.len()];
        Self {
            labels,
            counts,
            total: 0,
        }
    }

    /// Counts one outcome in bucket `index`; out-of-range indices are ignored.
    pub fn record(&mut self, index: usize) -> bool {
        match self.counts.get_mut(index) {
            Some(count) => {
                *count += 1;
                self.total += 1;
                true
            }
            None => false,
        }
    }

    /// Count of bucket `index` (0 when out of range).
    pub fn count(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Raw counts, in domain order.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total outcomes counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Percentage of bucket `index`.
    pub fn percentage(&self, index: usize) -> f64 {
        percentage(self.count(index), self.total)
    }

    /// Percentages of every bucket, in domain order.
    pub fn percentages(&self) -> Vec<f64> {
        self.counts
            .iter()
            .map(|&count| percentage(count, self.total))
            .collect()
    }

    /// Labelled buckets, in domain order.
    pub fn buckets(&self) -> Vec<CategoryCount> {
        self.labels
            .iter()
            .zip(&self.counts)
            .map(|(label, &count)| CategoryCount {
                label: label.clone(),
                count,
                percentage: percentage(count, self.total),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_percentage_of_empty_total_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_record_and_buckets() {
        let mut counts = CategoryCounts::new(labels(&["heads", "tails"]));
        assert!(counts.record(0));
        assert!(counts.record(0));
        assert!(counts.record(1));
        assert!(!counts.record(2));

        assert_eq!(counts.total(), 3);
        assert_eq!(counts.counts(), &[2, 1]);
        assert_eq!(counts.count(5), 0);

        let buckets = counts.buckets();
        assert_eq!(buckets[0].label, "heads");
        assert_eq!(buckets[0].count, 2);
        assert!((buckets[1].percentage - 100.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let mut counts = CategoryCounts::new(labels(&["1", "2", "3"]));
        for i in [0, 1, 1, 2, 2, 2, 2] {
            counts.record(i);
        }
        let sum: f64 = counts.percentages().iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }
}
