use geo::Coord;

use crate::shape::Boundary;


/// Fixed-point coordinate grid applied at the edges of the pipeline.
///
/// Coordinates are multiplied by `scale` and truncated toward zero on the way in. On the way out they
/// are rounded onto the grid and divided back. Everything in between works in the scaled space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantizer {
    scale: f64,
}

impl Quantizer {
    pub const DEFAULT_SCALE: f64 = 100.0;

    pub fn new(scale: f64) -> Self {
        assert!(scale > 0.0, "Quantizer scale should be positive");
        Self {
            scale,
        }
    }

    pub fn quantize(&self, c: Coord) -> Coord {
        Coord {
            x: (c.x * self.scale).trunc(),
            y: (c.y * self.scale).trunc(),
        }
    }

    /// Snap a coordinate that is already scaled onto the nearest grid point
    pub fn snap(&self, c: Coord) -> Coord {
        Coord {
            x: c.x.round(),
            y: c.y.round(),
        }
    }

    pub fn restore(&self, c: Coord) -> Coord {
        c / self.scale
    }

    pub fn quantize_boundary(&self, boundary: &Boundary) -> Boundary {
        boundary.map_coords(|c| self.quantize(c))
    }

    pub fn restore_boundary(&self, boundary: &Boundary) -> Boundary {
        boundary.map_coords(|c| self.restore(self.snap(c)))
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCALE)
    }
}
