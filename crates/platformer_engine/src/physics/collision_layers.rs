//! Collision layer system for filtering queries and ray casts
//!
//! Every collider lives on exactly one layer; queries take a mask selecting
//! which layers they see. Bits 0-7 are named, bits 8-31 are free for games.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of collision layers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LayerMask: u32 {
        /// Layer new colliders are placed on
        const DEFAULT = 1 << 0;

        /// Player character layer
        const PLAYER = 1 << 1;

        /// Static level geometry the player stands on
        const ENVIRONMENT = 1 << 2;

        /// Geometry that blocks light but not movement
        const OCCLUDER = 1 << 3;

        /// Trigger volumes (no physical response)
        const TRIGGER = 1 << 4;

        /// Every layer
        const ALL = u32::MAX;
    }
}

impl LayerMask {
    /// Mask containing the single layer at `index`
    ///
    /// Returns an empty mask when `index` is outside 0-31.
    pub fn from_layer(index: u32) -> Self {
        1u32.checked_shl(index)
            .map_or_else(Self::empty, Self::from_bits_retain)
    }

    /// Whether a collider on `layer` is selected by this mask
    ///
    /// ```
    /// use platformer_engine::physics::LayerMask;
    ///
    /// let lights_stop_on = LayerMask::ENVIRONMENT | LayerMask::OCCLUDER;
    /// assert!(lights_stop_on.selects(LayerMask::OCCLUDER));
    /// assert!(!lights_stop_on.selects(LayerMask::PLAYER));
    /// ```
    pub fn selects(self, layer: Self) -> bool {
        self.intersects(layer)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_any_shared_layer() {
        let mask = LayerMask::PLAYER | LayerMask::ENVIRONMENT;

        assert!(mask.selects(LayerMask::ENVIRONMENT));
        assert!(mask.selects(LayerMask::ENVIRONMENT | LayerMask::TRIGGER));
        assert!(!mask.selects(LayerMask::TRIGGER));
        assert!(!LayerMask::empty().selects(LayerMask::ALL));
    }

    #[test]
    fn test_from_layer() {
        assert_eq!(LayerMask::from_layer(3), LayerMask::OCCLUDER);
        assert_eq!(LayerMask::from_layer(31).bits(), 1 << 31);
        assert!(LayerMask::from_layer(32).is_empty());
    }

    #[test]
    fn test_selects() {
        let mask = LayerMask::ENVIRONMENT | LayerMask::OCCLUDER;

        assert!(mask.selects(LayerMask::OCCLUDER));
        assert!(!mask.selects(LayerMask::PLAYER));
        assert!(LayerMask::ALL.selects(LayerMask::from_layer(20)));
    }
}
