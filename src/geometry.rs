use nalgebra::{distance, Point2};
use serde::{Deserialize, Serialize};

use crate::algorithms::{ConfigurationError, Error};

/// A point of the sampling domain.
///
/// Positions read from a 3D source are projected onto the ground plane by
/// dropping their `z` component. Equality is exact, so a position copied out of
/// a [`Grid`](crate::grid::Grid) compares equal to the cell it came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f64 {
        distance(&self.to_point(), &other.to_point())
    }

    /// The point at fraction `t` of the way from `self` to `other`.
    pub fn lerp(&self, other: &Position, t: f64) -> Position {
        Position::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// Result of projecting a position into a [`Domain`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamped {
    pub position: Position,
    /// Whether the input lay outside the domain and had to be moved.
    pub adjusted: bool,
}

/// Axis-aligned bounds of the area of interest.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: Position,
    pub max: Position,
}

impl Domain {
    pub fn new(min: Position, max: Position) -> Result<Self, Error> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigurationError::NonFinite("domain bounds").into());
        }
        if min.x > max.x || min.y > max.y {
            return Err(ConfigurationError::InvertedBounds.into());
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, position: &Position) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
    }

    /// Moves `position` to the nearest in-domain point, axis by axis.
    ///
    /// Non-finite coordinates cannot be clamped meaningfully; callers reject
    /// them before they get here.
    pub fn clamp(&self, position: &Position) -> Clamped {
        let clamped = Position::new(
            position.x.clamp(self.min.x, self.max.x),
            position.y.clamp(self.min.y, self.max.y),
        );
        Clamped {
            position: clamped,
            adjusted: clamped != *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_ulps_eq;
    use super::*;

    #[test]
    fn test_distance() {
        // Arrange
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);

        // Act
        let d = a.distance(&b);

        // Assert
        assert_ulps_eq!(d, 5.0);
        assert_ulps_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_clamp_inside_is_untouched() {
        let domain = Domain::new(Position::new(0.0, 0.0), Position::new(10.0, 5.0)).unwrap();
        let p = Position::new(2.5, 5.0);

        let clamped = domain.clamp(&p);

        assert!(!clamped.adjusted);
        assert_eq!(clamped.position, p);
        assert!(domain.contains(&p));
    }

    #[test]
    fn test_clamp_outside_moves_to_nearest_point() {
        let domain = Domain::new(Position::new(0.0, 0.0), Position::new(10.0, 5.0)).unwrap();

        let clamped = domain.clamp(&Position::new(-3.0, 7.5));

        assert!(clamped.adjusted);
        assert_eq!(clamped.position, Position::new(0.0, 5.0));
    }

    #[test]
    fn test_inverted_domain_is_rejected() {
        let result = Domain::new(Position::new(1.0, 0.0), Position::new(0.0, 1.0));

        assert!(matches!(
            result,
            Err(Error::Configuration(ConfigurationError::InvertedBounds))
        ));
    }
}
