/// Descriptive statistics summarizing a dataset of `f64` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The median value; the mean of the two middle values for even counts.
    pub median: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kohs_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    ///
    /// assert!(DescriptiveStats::new([]).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let mean = sorted_values.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            f64::midpoint(sorted_values[mid - 1], sorted_values[mid])
        } else {
            sorted_values[mid]
        };

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
        })
    }

    /// Mean of the values, or zero for an empty dataset.
    #[must_use]
    pub fn mean_or_zero<I>(values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        Self::new(values).map_or(0.0, |stats| stats.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_count_median() {
        let stats = DescriptiveStats::new([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert!((stats.median - 2.5).abs() < f64::EPSILON);
        assert!((stats.mean - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([7.5]).unwrap();
        assert_eq!(stats, DescriptiveStats {
            count: 1,
            min: 7.5,
            max: 7.5,
            mean: 7.5,
            median: 7.5,
        });
    }

    #[test]
    fn test_empty_mean_is_zero() {
        assert!(DescriptiveStats::mean_or_zero([]).abs() < f64::EPSILON);
        assert!((DescriptiveStats::mean_or_zero([1.0, 2.0]) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "sorted")]
    fn test_unsorted_input_panics() {
        let _ = DescriptiveStats::from_sorted(&[2.0, 1.0]);
    }
}
