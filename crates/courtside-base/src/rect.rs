use crate::Vec2;

/// Axis-aligned rectangle stored as top-left origin plus size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            origin: Vec2::zero(),
            size: Vec2::zero(),
        }
    }
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: Default> Rect<T> {
    pub fn zero() -> Self {
        Self::default()
    }
}

impl<T: std::ops::Add<Output = T> + Copy> Rect<T> {
    pub fn min(&self) -> Vec2<T> {
        self.origin
    }

    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: std::ops::Mul<Output = T> + Copy> Rect<T> {
    pub fn area(&self) -> T {
        self.size.x * self.size.y
    }
}

impl<T: std::ops::Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: std::ops::Add<Output = T> + PartialOrd + Copy> Rect<T> {
    /// Point containment with both edges inclusive.
    ///
    /// A point lying exactly on the right or bottom edge counts as inside,
    /// which is what pointer hit-testing against drawn boxes expects.
    pub fn contains_point(&self, point: Vec2<T>) -> bool {
        let max = self.max();
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= max.x
            && point.y <= max.y
    }
}

impl Rect<f32> {
    /// Build a rectangle from a center point and a size.
    pub fn from_center(center: Vec2<f32>, size: Vec2<f32>) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    /// Build a rectangle spanning two arbitrary corners, in any drag direction.
    pub fn from_corners(a: Vec2<f32>, b: Vec2<f32>) -> Self {
        Self {
            origin: a.min(b),
            size: (b - a).abs(),
        }
    }

    pub fn center(&self) -> Vec2<f32> {
        self.origin + self.size / 2.0
    }
}
