#![forbid(unsafe_code)]

//! Geometric primitives for touch input.
//!
//! Coordinates are surface pixels as reported by the host, origin at the
//! top-left, `y` growing downwards.

/// A point on the touch surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate in pixels.
    pub x: f32,
    /// Vertical coordinate in pixels.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another point.
    ///
    /// Slop checks compare against pre-squared thresholds, so the square
    /// root is never taken on the input path.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A 2D velocity in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new velocity.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Dot product with another velocity.
    ///
    /// Negative when the two vectors point in opposing directions.
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Clamp both components to `[-max, max]`.
    #[must_use]
    pub fn clamp(self, max: f32) -> Self {
        if !max.is_finite() || max <= 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x.clamp(-max, max), self.y.clamp(-max, max))
    }

    /// Whether either axis exceeds `threshold` in magnitude.
    #[inline]
    #[must_use]
    pub fn exceeds(self, threshold: f32) -> bool {
        self.x.abs() > threshold || self.y.abs() > threshold
    }
}
