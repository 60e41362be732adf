//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where 
    T: Float 
{
    target_range.0 
        + ((value - source_range.0) 
        * (target_range.1 - target_range.0) 
        / (source_range.1 - source_range.0))
}

/// Return the euclidian norm (distance between) of two points.
///
/// If the points do not have the same number of dimentions then `None` is 
/// returned.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T> 
where
    T: Float
{
    // Check that the dimentions match
    if point_0.len() != point_1.len() {
        return None;
    }

    let sum = point_0
        .iter()
        .zip(point_1.iter())
        .fold(T::zero(), |acc, (&a, &b)| acc + (a - b).powi(2));

    Some(sum.sqrt())
}

/// Limit a value to the range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        // Inverted throttle dial onto a gain
        assert_eq!(lin_map((1f64, -1f64), (0f64, 1f64), -1f64), 1f64);
        assert_eq!(lin_map((1f64, -1f64), (0f64, 1f64), 1f64), 0f64);
        assert_eq!(lin_map((1f64, -1f64), (0f64, 1f64), 0f64), 0.5f64);
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[3f64, 4f64], &[0f64, 0f64]), Some(5f64));
        assert_eq!(norm(&[1f64], &[0f64, 0f64]), None);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&1.5f64, &-1f64, &1f64), 1f64);
        assert_eq!(clamp(&-3f64, &-1f64, &1f64), -1f64);
        assert_eq!(clamp(&0.25f64, &-1f64, &1f64), 0.25f64);
    }
}
