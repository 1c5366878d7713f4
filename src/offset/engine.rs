use geo::{Coord, Line};
use log::debug;
use serde::Deserialize;

use crate::{error::OffsetError, shape::{Boundary, LineExt}};

use super::EdgeOffsets;


/// Which edges of a boundary get an offset line.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum EdgeLoop {
    /// Every edge, including the one closing the ring.
    #[default]
    Closed,
    /// All edges but the closing one, as older deployments did.
    ///
    /// The closing edge gets no offset line of its own: the last line is joined straight to the first
    /// one and the result has one vertex less than the input.
    Open,
}

/// What to do at a corner whose two offset lines are parallel.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Use the end point of the incoming offset line.
    #[default]
    Fallback,
    /// Fail with [`OffsetError::DegenerateIntersection`].
    Error,
}


/// Moves every edge along its outward normal by its own distance and joins the moved edges back
/// into a ring at the intersections of their lines.
///
/// Expects a counter-clockwise boundary: positive offsets grow it, negative ones shrink it.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeOffsetEngine {
    pub edge_loop: EdgeLoop,
    pub parallel: ParallelPolicy,
}

impl EdgeOffsetEngine {
    pub fn new(edge_loop: EdgeLoop, parallel: ParallelPolicy) -> Self {
        Self {
            edge_loop,
            parallel,
        }
    }

    /// Offset lines in edge order.
    pub fn offset_lines(&self, boundary: &Boundary, offsets: &EdgeOffsets) -> Result<Vec<Line>, OffsetError> {
        let n = boundary.len();
        let edge_count = match self.edge_loop {
            EdgeLoop::Closed => n,
            EdgeLoop::Open => n.saturating_sub(1),
        };

        if edge_count < 2 {
            return Err(OffsetError::InvalidInput(format!(
                "{n} vertices give {edge_count} offset lines, at least 2 are needed to form a corner"
            )));
        }

        (0..edge_count)
            .map(|edge| {
                let offset = offsets.get(edge);
                if !offset.is_finite() {
                    return Err(OffsetError::InvalidInput(format!("offset of edge {edge} is not finite: {offset}")));
                }

                boundary.edge(edge)
                    .shift_right(offset)
                    .ok_or(OffsetError::DegenerateEdge { edge })
            })
            .collect()
    }

    pub fn offset(&self, boundary: &Boundary, offsets: &EdgeOffsets) -> Result<Boundary, OffsetError> {
        let lines = self.offset_lines(boundary, offsets)?;
        let m = lines.len();

        // Corner `j` sits between the lines of edges `j - 1` and `j`
        let corners = (0..m)
            .map(|j| self.corner(j, &lines[(j + m - 1) % m], &lines[j]))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Offset {n} vertices into {m} corners", n = boundary.len());

        Ok(Boundary::from_ccw(corners))
    }

    fn corner(&self, corner: usize, incoming: &Line, outgoing: &Line) -> Result<Coord, OffsetError> {
        if let Some(p) = incoming.intersect_infinite(outgoing) {
            return Ok(p);
        }

        match self.parallel {
            ParallelPolicy::Fallback => {
                debug!("Corner {corner}: offset lines are parallel, using {:?}", incoming.end);
                Ok(incoming.end)
            },
            ParallelPolicy::Error => Err(OffsetError::DegenerateIntersection { corner }),
        }
    }
}
