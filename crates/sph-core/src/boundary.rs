use glam::Vec2;

/// Axis-aligned box the integrator keeps particles inside.
///
/// The engine only reads the corners, once per step. `top_left` has the
/// smaller coordinates on both axes.
pub trait Boundary {
    fn top_left(&self) -> Vec2;
    fn bottom_right(&self) -> Vec2;
}

/// Host-owned container rectangle, stored as center and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryVolume {
    center: Vec2,
    width: f32,
    height: f32,
}

impl BoundaryVolume {
    /// Box spanning two corners, in any order.
    pub fn new(corner_a: Vec2, corner_b: Vec2) -> Self {
        let min = corner_a.min(corner_b);
        let max = corner_a.max(corner_b);
        Self {
            center: (min + max) * 0.5,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width: width.abs(),
            height: height.abs(),
        }
    }

    /// Change the size, keeping the center.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.abs();
        self.height = height.abs();
    }

    /// Move the center, keeping the size.
    pub fn move_to(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }
}

impl Boundary for BoundaryVolume {
    fn top_left(&self) -> Vec2 {
        self.center - self.half_extent()
    }

    fn bottom_right(&self) -> Vec2 {
        self.center + self.half_extent()
    }
}
