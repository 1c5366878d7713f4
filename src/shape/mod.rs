mod circle;
mod polygon;

use geo::{Coord, Line, Vector2DOps};

pub use circle::*;
pub use polygon::*;

pub const EPSILON: f64 = 0.000000001;

/// Sine of the angle below which two lines count as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;


pub trait CoordExt: Sized {
    fn rotate_ccwise(&self, angle_rad: f64) -> Self;

    /// Z component of the cross product
    fn cross(&self, other: &Self) -> f64;
}


impl CoordExt for Coord {
    fn rotate_ccwise(&self, angle_rad: f64) -> Self {
        let sin = angle_rad.sin();
        let cos = angle_rad.cos();

        Self {
            x: cos * self.x - sin * self.y,
            y: sin * self.x + cos * self.y,
        }
    }

    fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }
}


pub trait LineExt: Sized {
    /// Translate the line to its right-hand side, which is the outside of a counter-clockwise ring.
    ///
    /// Returns `None` when the line has no direction.
    fn shift_right(&self, offset: f64) -> Option<Self>;

    /// Find where the infinite lines through `self` and `other` cross.
    ///
    /// Returns `None` for parallel (or nearly parallel) lines.
    fn intersect_infinite(&self, other: &Self) -> Option<Coord>;

    /// Position of `point` along the line, `0.0` at the start and `1.0` at the end
    fn parameter_of(&self, point: Coord) -> f64;

    fn point_at(&self, t: f64) -> Coord;
}


impl LineExt for Line {
    fn shift_right(&self, offset: f64) -> Option<Self> {
        let shift = Coord { x: self.dy(), y: - self.dx() }
            .try_normalize()?
            * offset;

        Some(Line::new(self.start + shift, self.end + shift))
    }

    fn intersect_infinite(&self, other: &Self) -> Option<Coord> {
        let d1 = self.delta();
        let d2 = other.delta();

        let denominator = d1.cross(&d2);
        if denominator.abs() < PARALLEL_EPSILON * d1.magnitude() * d2.magnitude() {
            return None;
        }

        let t = (other.start - self.start).cross(&d2) / denominator;
        Some(self.point_at(t))
    }

    fn parameter_of(&self, point: Coord) -> f64 {
        let delta = self.delta();
        (point - self.start).dot_product(delta) / delta.magnitude_squared()
    }

    fn point_at(&self, t: f64) -> Coord {
        self.start + self.delta() * t
    }
}
