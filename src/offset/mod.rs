mod edges;
mod engine;
mod resolver;

use log::{debug, error};

use crate::{error::OffsetError, shape::Boundary};

pub use edges::*;
pub use engine::*;
pub use resolver::*;

/// Distance under which points are considered to coincide.
pub const DEFAULT_TOLERANCE: f64 = 0.001;


#[derive(Clone, Copy, Debug)]
pub struct OffsetOptions {
    pub edge_loop: EdgeLoop,
    pub parallel: ParallelPolicy,
    /// Reduce self-intersecting results to their largest simple loop
    pub resolve: bool,
    pub tolerance: f64,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            edge_loop: EdgeLoop::default(),
            parallel: ParallelPolicy::default(),
            resolve: true,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}


/// Offset one counter-clockwise boundary by per-edge distances.
pub fn variable_offset(boundary: &Boundary, offsets: &EdgeOffsets, options: &OffsetOptions) -> Result<Boundary, OffsetError> {
    let engine = EdgeOffsetEngine::new(options.edge_loop, options.parallel);
    let raw = engine.offset(boundary, offsets)?;

    if !options.resolve {
        return Ok(raw);
    }

    SelfIntersectionResolver::new(options.tolerance).resolve(raw)
}

/// Offset independent boundaries, boundary `i` using `offsets.for_path(i)`.
///
/// Slot `i` of the result always belongs to input `i`: an input that failed to build keeps its error, and a
/// failing boundary does not affect the rest.
pub fn offset_batch(inputs: &[Result<Boundary, OffsetError>], offsets: &BatchOffsets, options: &OffsetOptions) -> Vec<Result<Boundary, OffsetError>> {
    inputs.iter()
        .enumerate()
        .map(|(i, input)| {
            let boundary = input.as_ref().map_err(|err| err.clone())?;
            let result = variable_offset(boundary, offsets.for_path(i), options);

            match &result {
                Ok(ring) => debug!("Boundary {i}: {} vertices in, {} out", boundary.len(), ring.len()),
                Err(err) => error!("Boundary {i}: {err}"),
            }

            result
        })
        .collect()
}
