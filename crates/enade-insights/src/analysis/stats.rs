//! Small numeric helpers. Every function returns `None` instead of dividing by zero.

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Sample standard deviation (divisor `n - 1`); undefined below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let center = mean(values.iter().copied())?;
    let squares: f64 = values.iter().map(|value| (value - center).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// Linear interpolation between order statistics. `sorted` must be ascending.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Share of `values` strictly below `reference`, in percent.
pub fn percentile_rank(values: &[f64], reference: f64) -> Option<f64> {
    if values.is_empty() || !reference.is_finite() {
        return None;
    }
    let below = values.iter().filter(|value| **value < reference).count();
    Some(100.0 * below as f64 / values.len() as f64)
}

pub fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn mean_of_nothing_is_missing() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean(vec![1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn std_dev_uses_sample_divisor() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx(sample_std_dev(&values).unwrap(), (32.0f64 / 7.0).sqrt()));
        assert_eq!(sample_std_dev(&[3.0]), None);
    }

    #[test]
    fn percentiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(percentile(&sorted, 25.0).unwrap(), 1.75));
        assert!(approx(percentile(&sorted, 50.0).unwrap(), 2.5));
        assert!(approx(percentile(&sorted, 75.0).unwrap(), 3.25));
        assert_eq!(percentile(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile(&sorted, 100.0), Some(4.0));
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn percentile_rank_counts_strictly_lower_values() {
        let values = [1.0, 2.0, 2.0, 3.0];
        assert_eq!(percentile_rank(&values, 2.0), Some(25.0));
        assert_eq!(percentile_rank(&values, 10.0), Some(100.0));
        assert_eq!(percentile_rank(&[], 2.0), None);
        assert_eq!(percentile_rank(&values, f64::NAN), None);
    }
}
