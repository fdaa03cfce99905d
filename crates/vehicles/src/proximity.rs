//! Nearest-neighbour queries by linear scan.
//!
//! Ties keep the first candidate in iteration order.

use glam::Vec3;

/// Closest candidate to `position`, skipping `exclude`.
pub fn nearest<K, I>(candidates: I, position: Vec3, exclude: Option<K>) -> Option<(K, f32)>
where
    K: Copy + PartialEq,
    I: IntoIterator<Item = (K, Vec3)>,
{
    nearest_within(candidates, position, exclude, f32::INFINITY)
}

/// Closest candidate strictly closer than `radius`.
pub fn nearest_within<K, I>(
    candidates: I,
    position: Vec3,
    exclude: Option<K>,
    radius: f32,
) -> Option<(K, f32)>
where
    K: Copy + PartialEq,
    I: IntoIterator<Item = (K, Vec3)>,
{
    let mut best = None;
    let mut min_distance = radius;
    for (key, candidate) in candidates {
        if exclude == Some(key) {
            continue;
        }
        let distance = position.distance(candidate);
        if distance < min_distance {
            min_distance = distance;
            best = Some((key, distance));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Vec<(usize, Vec3)> {
        vec![
            (0, Vec3::new(0.0, 0.0, 0.0)),
            (1, Vec3::new(10.0, 0.0, 0.0)),
            (2, Vec3::new(100.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn picks_closest() {
        let (key, distance) = nearest(row(), Vec3::new(1.0, 0.0, 0.0), None).unwrap();
        assert_eq!(key, 0);
        assert!((distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn excluded_candidate_is_skipped() {
        let (key, _) = nearest(row(), Vec3::ZERO, Some(0)).unwrap();
        assert_eq!(key, 1);
        assert!(nearest(vec![(7, Vec3::ONE)], Vec3::ONE, Some(7)).is_none());
    }

    #[test]
    fn ties_keep_first() {
        let c = vec![(0, Vec3::new(-5.0, 0.0, 0.0)), (1, Vec3::new(5.0, 0.0, 0.0))];
        assert_eq!(nearest(c, Vec3::ZERO, None).map(|(k, _)| k), Some(0));
    }

    #[test]
    fn radius_is_exclusive() {
        let at = |x: f32| vec![(0usize, Vec3::new(x, 0.0, 0.0))];
        assert!(nearest_within(at(20.0), Vec3::ZERO, None, 20.0).is_none());
        assert!(nearest_within(at(19.99), Vec3::ZERO, None, 20.0).is_some());
    }

    #[test]
    fn empty_input_is_none() {
        assert!(nearest(Vec::<(usize, Vec3)>::new(), Vec3::ZERO, None).is_none());
    }
}
