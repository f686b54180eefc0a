//! Ordering fix-up for samples sharing a ray
//!
//! A silhouette corner and its continuation point have (nearly) the same
//! pseudo-angle, so the sort alone cannot tell which comes first. At the
//! clockwise start of an occluder the boundary must step from the rim in to
//! the corner; at its clockwise end, from the corner back out to the rim.

use super::sample::{LightSample, Side};
use super::sorter::sort_descending;

/// Swap adjacent same-ray samples into shadow-edge order
///
/// One linear pass over a list already sorted descending. Running it again
/// on its own output changes nothing.
pub fn reconcile(samples: &mut [LightSample], angle_epsilon: f32) {
    for i in 1..samples.len() {
        let (a, b) = (samples[i - 1], samples[i]);
        if (a.angle - b.angle).abs() > angle_epsilon {
            continue;
        }

        let far_first = b.side == Side::Far && a.distance_squared() > b.distance_squared();
        let rim_first = a.side == Side::Near && a.distance_squared() < b.distance_squared();

        if far_first || rim_first {
            samples.swap(i - 1, i);
        }
    }
}

/// Sort then reconcile
pub fn order_samples(samples: &mut [LightSample], angle_epsilon: f32) {
    sort_descending(samples);
    reconcile(samples, angle_epsilon);
}
