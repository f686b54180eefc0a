//! Visibility culling of lights
//!
//! Lights nobody can see skip their rebuild entirely.

use crate::foundation::math::Vec2;

/// Decides whether a light at a position could be on screen
pub trait VisibilityCuller {
    /// Whether anything within `radius` of `position` may be visible
    fn is_visible(&self, position: Vec2, radius: f32) -> bool;
}

/// Culler that never culls
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCulling;

impl VisibilityCuller for NoCulling {
    fn is_visible(&self, _position: Vec2, _radius: f32) -> bool {
        true
    }
}

/// Rectangular orthographic view in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportCuller {
    /// Center of the view
    pub center: Vec2,
    /// Half width and half height of the view
    pub half_extents: Vec2,
}

impl ViewportCuller {
    /// View centered at `center` with the given full size
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Move the view
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Corners of the view rectangle
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            self.center + Vec2::new(h.x, h.y),
            self.center + Vec2::new(h.x, -h.y),
            self.center + Vec2::new(-h.x, h.y),
            self.center + Vec2::new(-h.x, -h.y),
        ]
    }

    /// Whether a point lies inside the view rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        let d = point - self.center;
        d.x.abs() <= self.half_extents.x && d.y.abs() <= self.half_extents.y
    }
}

impl VisibilityCuller for ViewportCuller {
    fn is_visible(&self, position: Vec2, radius: f32) -> bool {
        if self.contains(position) {
            return true;
        }

        // Any view corner within half a view width plus the radius
        let reach = self.half_extents.x + radius;
        self.corners().iter().any(|corner| (corner - position).norm() < reach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewportCuller {
        ViewportCuller::new(Vec2::zeros(), Vec2::new(16.0, 9.0))
    }

    #[test]
    fn test_center_inside_view() {
        assert!(view().is_visible(Vec2::new(7.0, -4.0), 0.1));
    }

    #[test]
    fn test_light_reaching_into_view() {
        // Just outside the right edge, radius overlaps the corner region
        assert!(view().is_visible(Vec2::new(10.0, 0.0), 3.0));
    }

    #[test]
    fn test_far_light_culled() {
        assert!(!view().is_visible(Vec2::new(100.0, 0.0), 5.0));
    }

    #[test]
    fn test_view_follows_center() {
        let mut view = view();
        view.set_center(Vec2::new(100.0, 0.0));
        assert!(view.is_visible(Vec2::new(100.0, 0.0), 1.0));
    }

    #[test]
    fn test_no_culling() {
        assert!(NoCulling.is_visible(Vec2::new(1e6, 1e6), 0.0));
    }
}
