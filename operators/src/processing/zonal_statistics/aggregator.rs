/// Aggregating cell values of a single feature
pub trait Aggregator {
    fn add_value(&mut self, value: f64, weight: f64);

    /// `None` if no value was added
    fn result(&self) -> Option<f64>;
}

/// Aggregation function that calculates the weighted mean.
///
/// If all weights are zero, e.g. because the feature only touches its cells,
/// the result is the unweighted mean of all added values.
#[derive(Debug, Default, Clone)]
pub struct WeightedMeanAggregator {
    weighted_mean: f64,
    sum_weights: f64,
    unweighted_mean: f64,
    count: usize,
}

impl WeightedMeanAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sum_weights(&self) -> f64 {
        self.sum_weights
    }

    /// Number of added values, including those with zero weight
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Aggregator for WeightedMeanAggregator {
    fn add_value(&mut self, value: f64, weight: f64) {
        debug_assert!(weight >= 0., "weights must not be negative");

        self.count += 1;
        self.unweighted_mean += (value - self.unweighted_mean) / self.count as f64;

        if weight <= 0. {
            return;
        }

        let old_normalized_weight = self.sum_weights / weight;

        self.sum_weights += weight;
        self.weighted_mean += (value - self.weighted_mean) / (old_normalized_weight + 1.);
    }

    fn result(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }

        if self.sum_weights > 0. {
            Some(self.weighted_mean)
        } else {
            Some(self.unweighted_mean)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn mean() {
        let mut equal_weights = WeightedMeanAggregator::new();
        let mut linear_weights = WeightedMeanAggregator::new();

        for i in 1..=10 {
            equal_weights.add_value(f64::from(i), 1.);
            linear_weights.add_value(f64::from(i), f64::from(i));
        }

        assert!(approx_eq!(f64, equal_weights.result().unwrap(), 5.5));
        assert!(approx_eq!(f64, linear_weights.result().unwrap(), 385. / 55.));
        assert!(approx_eq!(f64, linear_weights.sum_weights(), 55.));
    }

    #[test]
    fn fractional_weights() {
        let mut aggregator = WeightedMeanAggregator::new();

        aggregator.add_value(1., 0.25);
        aggregator.add_value(2., 0.25);
        aggregator.add_value(3., 0.25);
        aggregator.add_value(4., 0.25);

        assert!(approx_eq!(f64, aggregator.result().unwrap(), 2.5));
        assert!(approx_eq!(f64, aggregator.sum_weights(), 1.));
    }

    #[test]
    fn zero_weights_ignore_value_in_weighted_mean() {
        let mut aggregator = WeightedMeanAggregator::new();

        aggregator.add_value(100., 0.);
        aggregator.add_value(2., 0.5);
        aggregator.add_value(4., 0.5);

        assert!(approx_eq!(f64, aggregator.result().unwrap(), 3.));
        assert_eq!(aggregator.count(), 3);
    }

    #[test]
    fn falls_back_to_unweighted_mean() {
        let mut aggregator = WeightedMeanAggregator::new();

        aggregator.add_value(1., 0.);
        aggregator.add_value(5., 0.);

        let result = aggregator.result().unwrap();
        assert!(approx_eq!(f64, result, 3.));
        assert!(!result.is_nan());
    }

    #[test]
    fn empty_has_no_result() {
        assert_eq!(WeightedMeanAggregator::new().result(), None);
    }
}
