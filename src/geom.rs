//! Small 2D geometry helpers shared by both games

use glam::Vec2;
use rand::Rng;

/// Axis-aligned rectangle (top-left origin, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Random point strictly inside the rectangle (1 px inset so relocated
    /// entities never sit exactly on the border)
    pub fn random_point_inside(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.random_range(self.x + 1.0..self.x + self.width - 1.0),
            rng.random_range(self.y + 1.0..self.y + self.height - 1.0),
        )
    }
}

/// Point-in-circle test used for both drag picking and fire resolution
#[inline]
pub fn hit_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(100.0, 400.0, 600.0, 80.0);
        assert!(rect.contains(Vec2::new(100.0, 400.0)));
        assert!(rect.contains(Vec2::new(700.0, 480.0)));
        assert!(!rect.contains(Vec2::new(99.9, 440.0)));
        assert!(!rect.contains(Vec2::new(400.0, 480.1)));
    }

    #[test]
    fn test_random_point_strictly_inside() {
        let rect = Rect::new(100.0, 400.0, 600.0, 80.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let p = rect.random_point_inside(&mut rng);
            assert!(p.x > rect.x && p.x < rect.x + rect.width);
            assert!(p.y > rect.y && p.y < rect.y + rect.height);
        }
    }

    #[test]
    fn test_hit_circle_boundary() {
        let center = Vec2::new(10.0, 10.0);
        assert!(hit_circle(Vec2::new(10.0, 18.0), center, 8.0));
        assert!(!hit_circle(Vec2::new(10.0, 18.1), center, 8.0));
    }
}
