use rand::seq::SliceRandom;

/// Every-Nth down-sampling.
///
/// Collections at or under the target are returned whole. Otherwise the
/// stride is ceil(len / target) and every index divisible by it is kept,
/// preserving original order and approximate spacing along an ordered axis.
pub fn sample_stride<T: Clone>(items: &[T], target: usize) -> Vec<T> {
    if target == 0 {
        return Vec::new();
    }
    if items.len() <= target {
        return items.to_vec();
    }
    let stride = items.len().div_ceil(target);
    items.iter().step_by(stride).cloned().collect()
}

/// Uniform random down-sampling.
///
/// Collections at or under the target are returned whole. Otherwise a copy
/// is shuffled and truncated to the target; the input is never mutated and
/// output order is unspecified.
pub fn sample_random<T: Clone>(items: &[T], target: usize) -> Vec<T> {
    if target == 0 {
        return Vec::new();
    }
    if items.len() <= target {
        return items.to_vec();
    }
    let mut sampled = items.to_vec();
    sampled.shuffle(&mut rand::rng());
    sampled.truncate(target);
    sampled
}
