use thiserror::Error;

/// Failures of the offset core.
///
/// Application code wraps these into `anyhow::Error`; batch callers keep them per boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OffsetError {
    /// Two consecutive vertices coincide, so the edge has no normal.
    #[error("edge {edge} has zero length, its normal is undefined")]
    DegenerateEdge { edge: usize },

    /// The offset lines meeting at a corner are parallel.
    #[error("offset lines meeting at corner {corner} are parallel")]
    DegenerateIntersection { corner: usize },

    /// Self-intersection cleanup left nothing usable.
    #[error("no simple closed loop left after splitting at self-intersections")]
    NoSimpleLoopFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
