//! Collision tests for the scrolling world
//!
//! Particles are circles, obstacles are axis-aligned bars, projectiles are
//! points and the player is a square box centered on its position.

use glam::Vec2;

/// Circle-vs-circle: centers closer than `reach` (sum of radii)
#[inline]
pub fn circles_touch(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance(b) < reach
}

/// Point inside rectangle `[min, min + size]`, edges inclusive
#[inline]
pub fn point_in_rect(point: Vec2, min: Vec2, size: Vec2) -> bool {
    let max = min + size;
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Centered box vs. rectangle `[min, min + size]`, strict overlap
/// (touching edges do not count)
#[inline]
pub fn box_overlaps_rect(center: Vec2, box_size: f32, min: Vec2, size: Vec2) -> bool {
    let half = box_size / 2.0;
    let max = min + size;
    center.x + half > min.x
        && center.x - half < max.x
        && center.y + half > min.y
        && center.y - half < max.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_touch() {
        // Player 25 + particle 15 => reach 20
        let player = Vec2::new(100.0, 100.0);
        assert!(circles_touch(player, Vec2::new(110.0, 110.0), 20.0));
        assert!(!circles_touch(player, Vec2::new(120.0, 100.0), 20.0));
    }

    #[test]
    fn test_point_in_rect_edges_inclusive() {
        let min = Vec2::new(10.0, 10.0);
        let size = Vec2::new(100.0, 50.0);
        assert!(point_in_rect(Vec2::new(10.0, 10.0), min, size));
        assert!(point_in_rect(Vec2::new(110.0, 60.0), min, size));
        assert!(!point_in_rect(Vec2::new(110.1, 30.0), min, size));
        assert!(!point_in_rect(Vec2::new(50.0, 9.9), min, size));
    }

    #[test]
    fn test_box_overlaps_rect() {
        let min = Vec2::new(0.0, 100.0);
        let size = Vec2::new(200.0, 50.0);
        // Box bottom at 100 exactly touches the top edge
        assert!(!box_overlaps_rect(Vec2::new(50.0, 87.5), 25.0, min, size));
        assert!(box_overlaps_rect(Vec2::new(50.0, 88.0), 25.0, min, size));
        // Left of the bar
        assert!(!box_overlaps_rect(Vec2::new(-20.0, 120.0), 25.0, min, size));
        assert!(box_overlaps_rect(Vec2::new(-12.0, 120.0), 25.0, min, size));
    }
}
