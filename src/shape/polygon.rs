use geo::{Area, Coord, Line, LineString, Polygon, Winding};

use crate::error::OffsetError;

use super::LineExt;


/// A closed ring of vertices without the repeated closing point.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1`, the last edge wraps around to vertex `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    inner: Vec<Coord>,
}

impl Boundary {
    /// Build a counter-clockwise boundary out of a ring, closed or not.
    pub fn new(mut ring: LineString) -> Result<Self, OffsetError> {
        if ring.0.len() > 1 && ring.is_closed() {
            ring.0.pop();
        }

        if ring.0.len() < 3 {
            return Err(OffsetError::InvalidInput(format!(
                "a boundary needs at least 3 vertices, got {}", ring.0.len()
            )));
        }

        if let Some(c) = ring.0.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(OffsetError::InvalidInput(format!("vertex {c:?} is not finite")));
        }

        ring.close();
        ring.make_ccw_winding();
        ring.0.pop();

        Ok(Self {
            inner: ring.0,
        })
    }

    /// Take the vertices as they are, without any checks or reordering.
    pub fn from_ccw(inner: Vec<Coord>) -> Self {
        Self {
            inner,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn coords(&self) -> &[Coord] {
        &self.inner
    }

    pub fn edge(&self, i: usize) -> Line {
        let n = self.inner.len();
        Line::new(self.inner[i % n], self.inner[(i + 1) % n])
    }

    /// Point at a ring parameter: the integer part selects the edge, the fraction is the position on it.
    pub fn point_at(&self, param: f64) -> Coord {
        let edge = param.floor();
        self.edge(edge as usize).point_at(param - edge)
    }

    /// Walk the ring from one parameter to another, `to` may exceed the vertex count to wrap around.
    pub fn trace(&self, from: f64, to: f64) -> Vec<Coord> {
        let n = self.inner.len();
        let mut piece = vec![self.point_at(from)];

        let mut v = from.floor() as usize + 1;
        while (v as f64) < to {
            piece.push(self.inner[v % n]);
            v += 1;
        }

        piece.push(self.point_at(to));
        piece
    }

    /// Signed area, positive for counter-clockwise rings
    pub fn signed_area(&self) -> f64 {
        Polygon::from(self.clone()).signed_area()
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn into_ccw(mut self) -> Self {
        if self.signed_area() < 0.0 {
            self.inner.reverse();
        }
        self
    }

    pub fn map_coords(&self, f: impl Fn(Coord) -> Coord) -> Self {
        Self {
            inner: self.inner.iter().copied().map(f).collect(),
        }
    }

    /// The ring with its first vertex repeated at the end
    pub fn to_line_string(&self) -> LineString {
        let mut ring = LineString::new(self.inner.clone());
        ring.close();
        ring
    }
}

impl From<Boundary> for Polygon {
    fn from(boundary: Boundary) -> Polygon {
        Polygon::new(LineString::new(boundary.inner), vec![])
    }
}
