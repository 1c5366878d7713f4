use std::f64::consts::TAU;

use geo::{algorithm::line_intersection::{line_intersection, LineIntersection}, Coord, Line, Vector2DOps};
use log::debug;

use crate::{error::OffsetError, shape::{Boundary, CoordExt, LineExt, EPSILON}};


/// A point where the ring crosses itself.
///
/// Parameters are ring parameters: edge index plus the position along that edge. `param_a` is the smaller
/// one. A crossing through a vertex has an integer parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfIntersection {
    pub param_a: f64,
    pub param_b: f64,
    pub point: Coord,
}

impl SelfIntersection {
    fn new(p: f64, q: f64, point: Coord) -> Self {
        Self {
            param_a: p.min(q),
            param_b: p.max(q),
            point,
        }
    }
}

fn push_unique(found: &mut Vec<SelfIntersection>, x: SelfIntersection) {
    let seen = found.iter()
        .any(|y| (x.param_a - y.param_a).abs() < EPSILON && (x.param_b - y.param_b).abs() < EPSILON);

    if !seen {
        found.push(x);
    }
}

/// Which side of the line `p` is on: `1` left, `-1` right, `0` within `tolerance` of it.
fn side(line: &Line, p: Coord, tolerance: f64) -> i32 {
    let delta = line.delta();
    let c = delta.cross(&(p - line.start));

    if c.abs() <= tolerance * delta.magnitude() {
        0
    } else if c > 0.0 {
        1
    } else {
        -1
    }
}

/// Angle from `from` to `to`, counter-clockwise, in `[0, TAU)`.
fn ccw_angle(from: Coord, to: Coord) -> f64 {
    let angle = from.cross(&to).atan2(from.dot_product(to));
    if angle < 0.0 { angle + TAU } else { angle }
}

/// Proper crossings between the insides of two non-adjacent edges.
fn edge_crossings(ring: &Boundary, tolerance: f64, found: &mut Vec<SelfIntersection>) {
    let n = ring.len();

    for i in 0..n {
        let a = ring.edge(i);
        let len_a = a.delta().magnitude();
        if len_a <= EPSILON {
            continue;
        }

        for j in (i + 2)..n {
            // The closing edge is adjacent to the first one
            if i == 0 && j == n - 1 {
                continue;
            }

            let b = ring.edge(j);
            let len_b = b.delta().magnitude();
            if len_b <= EPSILON {
                continue;
            }

            let Some(LineIntersection::SinglePoint { intersection, .. }) = line_intersection(a, b) else {
                continue;
            };

            let ta = a.parameter_of(intersection);
            let tb = b.parameter_of(intersection);

            // Hits near an edge end are vertex events
            if ta * len_a <= tolerance || (1.0 - ta) * len_a <= tolerance
                || tb * len_b <= tolerance || (1.0 - tb) * len_b <= tolerance {
                continue;
            }

            push_unique(found, SelfIntersection::new(i as f64 + ta, j as f64 + tb, intersection));
        }
    }
}

/// Vertices lying inside an edge they are not part of.
///
/// The strand through the vertex crosses the edge when its neighbours are on opposite sides of it,
/// otherwise it only touches.
fn vertex_edge_crossings(ring: &Boundary, tolerance: f64, found: &mut Vec<SelfIntersection>) {
    let n = ring.len();
    let coords = ring.coords();

    for k in 0..n {
        let v = coords[k];
        let prev = coords[(k + n - 1) % n];
        let next = coords[(k + 1) % n];

        for j in 0..n {
            if j == k || j == (k + n - 1) % n {
                continue;
            }

            let edge = ring.edge(j);
            let len = edge.delta().magnitude();
            if len <= EPSILON {
                continue;
            }

            let t = edge.parameter_of(v);
            if t * len <= tolerance || (1.0 - t) * len <= tolerance {
                continue;
            }

            if (v - edge.point_at(t)).magnitude() > tolerance {
                continue;
            }

            if side(&edge, prev, tolerance) * side(&edge, next, tolerance) < 0 {
                push_unique(found, SelfIntersection::new(k as f64, j as f64 + t, v));
            }
        }
    }
}

/// Non-adjacent vertices at the same spot.
///
/// The strands cross when exactly one end of the second strand lies between the ends of the first one.
fn vertex_crossings(ring: &Boundary, tolerance: f64, found: &mut Vec<SelfIntersection>) {
    let n = ring.len();
    let c = ring.coords();

    for k in 0..n {
        for l in (k + 2)..n {
            if k == 0 && l == n - 1 {
                continue;
            }

            let v = c[k];
            if (c[l] - v).magnitude() > tolerance {
                continue;
            }

            let a_in = c[(k + n - 1) % n] - v;
            let a_out = c[(k + 1) % n] - v;
            let sweep = ccw_angle(a_out, a_in);
            let between = |d: Coord| {
                let angle = ccw_angle(a_out, d);
                angle > 0.0 && angle < sweep
            };

            if between(c[(l + n - 1) % n] - v) != between(c[(l + 1) % n] - v) {
                push_unique(found, SelfIntersection::new(k as f64, l as f64, v));
            }
        }
    }
}

/// Find the points where a ring crosses itself.
///
/// Strands passing through a vertex count, strands that only touch there do not. Collinear overlaps are
/// skipped. Points within `tolerance` of each other are the same point.
pub fn find_self_intersections(ring: &Boundary, tolerance: f64) -> Vec<SelfIntersection> {
    let mut found = vec![];

    if ring.len() < 4 {
        return found;
    }

    edge_crossings(ring, tolerance, &mut found);
    vertex_edge_crossings(ring, tolerance, &mut found);
    vertex_crossings(ring, tolerance, &mut found);

    found
}

/// Cut the ring at every crossing and join the pieces back into closed loops.
///
/// A loop arriving at a crossing along one strand leaves it along the other one, so no loop passes through
/// a crossing. Loops come in ring order of their first piece, without the closing point.
pub fn stitch_loops(ring: &Boundary, crossings: &[SelfIntersection]) -> Vec<Vec<Coord>> {
    let mut cuts: Vec<(f64, usize)> = crossings.iter()
        .enumerate()
        .flat_map(|(c, x)| [(x.param_a, c), (x.param_b, c)])
        .collect();
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let m = cuts.len();
    let n = ring.len() as f64;

    // Position of the other cut made by the same crossing
    let partner: Vec<usize> = (0..m)
        .map(|k| (0..m).find(|&l| l != k && cuts[l].1 == cuts[k].1).unwrap_or(k))
        .collect();

    // Piece `k` runs from cut `k` to cut `k + 1`, the last one wraps around through vertex `0`
    let pieces: Vec<Vec<Coord>> = (0..m)
        .map(|k| {
            let to = cuts.get(k + 1).map_or(cuts[0].0 + n, |cut| cut.0);
            ring.trace(cuts[k].0, to)
        })
        .collect();

    let mut visited = vec![false; m];
    let mut loops = vec![];

    for start in 0..m {
        let mut k = start;
        let mut points: Vec<Coord> = vec![];

        while !visited[k] {
            visited[k] = true;
            points.extend_from_slice(&pieces[k][..pieces[k].len() - 1]);
            k = partner[(k + 1) % m];
        }

        if !points.is_empty() {
            loops.push(points);
        }
    }

    loops
}

/// The loop with the largest area, the first one when areas are equal up to rounding.
fn largest(loops: Vec<Boundary>) -> Result<Boundary, OffsetError> {
    let mut best: Option<(f64, Boundary)> = None;

    for candidate in loops {
        let area = candidate.area();
        if best.as_ref().is_none_or(|(best_area, _)| area > best_area + EPSILON * best_area.max(1.0)) {
            best = Some((area, candidate));
        }
    }

    best.map(|(_, ring)| ring)
        .ok_or(OffsetError::NoSimpleLoopFound)
}


/// Reduces a self-intersecting ring to the largest simple loop it contains.
#[derive(Clone, Copy, Debug)]
pub struct SelfIntersectionResolver {
    pub tolerance: f64,
}

impl SelfIntersectionResolver {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
        }
    }

    /// Simple closed loops a ring falls apart into at its self-intersections, in ring order.
    pub fn loops(&self, ring: &Boundary) -> Vec<Boundary> {
        let crossings = find_self_intersections(ring, self.tolerance);
        for x in &crossings {
            debug!("Ring crosses itself at {:?}, parameters {} and {}", x.point, x.param_a, x.param_b);
        }

        stitch_loops(ring, &crossings)
            .into_iter()
            .filter_map(|mut points| {
                points.dedup_by(|a, b| (*a - *b).magnitude() <= EPSILON);
                while points.len() > 1 && (points[0] - points[points.len() - 1]).magnitude() <= EPSILON {
                    points.pop();
                }

                if points.len() < 3 {
                    return None;
                }

                let candidate = Boundary::from_ccw(points);
                if !find_self_intersections(&candidate, self.tolerance).is_empty() {
                    debug!("Dropping a loop of {} vertices that still crosses itself", candidate.len());
                    return None;
                }

                Some(candidate)
            })
            .collect()
    }

    /// Ring without self-intersections is returned as is. Otherwise the largest loop wins, the first
    /// one in ring order on a tie, and comes back counter-clockwise.
    pub fn resolve(&self, ring: Boundary) -> Result<Boundary, OffsetError> {
        if find_self_intersections(&ring, self.tolerance).is_empty() {
            return Ok(ring);
        }

        let loops = self.loops(&ring);
        debug!("Ring of {} vertices split into {} simple loops", ring.len(), loops.len());

        largest(loops).map(Boundary::into_ccw)
    }
}

impl Default for SelfIntersectionResolver {
    fn default() -> Self {
        Self::new(super::DEFAULT_TOLERANCE)
    }
}
