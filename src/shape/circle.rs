use std::f64::consts::TAU;

use geo::{Coord, LineString};

use super::CoordExt;


#[derive(Clone, Debug)]
pub struct Circle {
    center: Coord,
    radius: f64,
}

impl Circle {
    pub fn new(center: Coord, radius: f64) -> Self {
        assert!(radius > 0.0);
        Self {
            center,
            radius,
        }
    }
}


/// Discretize a closed curve into a closed ring of points no further than `resolution` apart.
pub trait IntoRing {
    fn into_ring(self, resolution: f64) -> LineString;
}

impl IntoRing for Circle {
    fn into_ring(self, resolution: f64) -> LineString {
        let circum = TAU * self.radius;
        let segments = (circum / resolution).ceil() as usize;
        let segments = segments.max(6);
        let angle = TAU / segments as f64;

        let mut boundary = vec![];
        let mut v = Coord { x: 0.0, y: self.radius };

        for _ in 0..segments {
            boundary.push(self.center + v);
            v = v.rotate_ccwise(angle);
        }

        let mut ring = LineString::new(boundary);
        ring.close();
        ring
    }
}
