//! Utility functions for the crate.

/// Return the index and value of the maximum value in the given slice.
///
/// Ties go to the first of the tied values. NAN values are ordered by
/// [`f64::total_cmp`].
///
/// This will return `None` if the given slice is empty.
pub fn arg_max(values: &[f64]) -> Option<(usize, f64)> {
    let (mut arg, mut max) = (0, *values.first()?);
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v.total_cmp(&max).is_gt() {
            (arg, max) = (i, v);
        }
    }
    Some((arg, max))
}
