//! Clockwise ordering by pseudo-angle
//!
//! Keys run counter-clockwise from -1 (straight down, right of the cut)
//! through 0 (+x), 1 (+y) and 2 (-x) to 3 (straight down, left of the cut).
//! Sorting them in descending order walks the boundary clockwise.

use super::sample::LightSample;

/// Stable sort by descending pseudo-angle
pub fn sort_descending(samples: &mut [LightSample]) {
    samples.sort_by(|a, b| b.angle.total_cmp(&a.angle));
}

/// Which sides of the cut a set of samples reaches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapFlags {
    /// Some key is below 0 (below the +x axis, right half)
    pub lows: bool,
    /// Some key is above 2 (below the -x axis, left half)
    pub his: bool,
}

impl WrapFlags {
    /// Scan the keys of `samples`
    pub fn scan(samples: &[LightSample]) -> Self {
        samples.iter().fold(Self::default(), |flags, s| Self {
            lows: flags.lows || s.angle < 0.0,
            his: flags.his || s.angle > 2.0,
        })
    }

    /// The samples straddle the cut, so the array ends are not the extremes
    pub fn wraps(self) -> bool {
        self.lows && self.his
    }
}

/// Indices of the clockwise-first and clockwise-last samples
///
/// `samples` must already be sorted descending. Returns `None` for an empty
/// slice; a single sample is both extremes.
pub fn extremes(samples: &[LightSample]) -> Option<(usize, usize)> {
    let last = samples.len().checked_sub(1)?;
    if !WrapFlags::scan(samples).wraps() {
        return Some((0, last));
    }

    // Right of the cut the largest key is the clockwise start,
    // left of it the smallest key is the clockwise end.
    let near = samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.angle < 1.0)
        .max_by(|a, b| a.1.angle.total_cmp(&b.1.angle))
        .map_or(0, |(i, _)| i);
    let far = samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.angle > 2.0)
        .min_by(|a, b| a.1.angle.total_cmp(&b.1.angle))
        .map_or(last, |(i, _)| i);

    Some((near, far))
}
