/// Percentile rank of `query` within `values`, on a 0-100 scale.
///
/// The rank is the fraction of the distribution strictly below the first
/// element >= `query`; a query above the maximum ranks at 100. Callers must
/// not pass an empty distribution (the query façade guards this).
pub fn percentile_rank(values: &[f64], query: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    match sorted.iter().position(|v| *v >= query) {
        Some(index) => (index as f64 / sorted.len() as f64) * 100.0,
        None => 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_of_interior_value() {
        // First element >= 3 sits at index 2; 2/5 of the distribution is below.
        assert_eq!(percentile_rank(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0), 40.0);
    }

    #[test]
    fn test_rank_above_maximum_is_100() {
        assert_eq!(percentile_rank(&[1.0, 2.0, 3.0], 10.0), 100.0);
    }

    #[test]
    fn test_rank_below_minimum_is_0() {
        assert_eq!(percentile_rank(&[1.0, 2.0, 3.0], 0.0), 0.0);
    }

    #[test]
    fn test_unsorted_input_is_handled() {
        assert_eq!(percentile_rank(&[5.0, 1.0, 4.0, 2.0, 3.0], 3.0), 40.0);
    }

    #[test]
    fn test_duplicates_rank_at_first_occurrence() {
        assert_eq!(percentile_rank(&[1.0, 2.0, 2.0, 2.0, 5.0], 2.0), 20.0);
    }
}
