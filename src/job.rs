use std::path::PathBuf;

use anyhow::{ensure, Result};
use geo::LineString;
use log::{debug, error, info};

use crate::{config::{JobConfig, SharedConfig}, error::OffsetError, io::quantize::Quantizer, offset::offset_batch, shape::Boundary};


/// Input boundaries of one job and what became of each of them.
#[derive(Debug)]
pub struct OffsetData {
    pub input: PathBuf,
    pub originals: Vec<Boundary>,
    pub results: Vec<Result<Boundary, OffsetError>>,
}

impl OffsetData {
    pub fn new(config: &SharedConfig, job: JobConfig, rings: Vec<LineString>) -> Result<Self> {
        ensure!(config.resolution > 0.0, "Resolution should be positive, got {}", config.resolution);
        ensure!(config.tolerance >= 0.0, "Tolerance should not be negative, got {}", config.tolerance);

        // Slot `i` belongs to input ring `i`
        let inputs: Vec<Result<Boundary, OffsetError>> = rings.into_iter()
            .enumerate()
            .map(|(i, ring)| {
                Boundary::new(ring).inspect_err(|err| error!("Input boundary {i} is invalid: {err}"))
            })
            .collect();

        let originals: Vec<Boundary> = inputs.iter()
            .filter_map(|input| input.as_ref().ok())
            .cloned()
            .collect();

        info!("Offsetting {} boundaries from {:?}", originals.len(), job.input);

        let offsets = job.batch_offsets();
        let mut options = job.options(config);

        let results = if config.quantize {
            let scale = config.scale;
            ensure!(scale > 0.0, "Scale should be positive, got {scale}");
            debug!("Working on a grid of {scale} steps per unit");

            let quantizer = Quantizer::new(scale);
            let scaled: Vec<Result<Boundary, OffsetError>> = inputs.iter()
                .map(|input| input.as_ref().map(|b| quantizer.quantize_boundary(b)).map_err(|err| err.clone()))
                .collect();

            options.tolerance *= scale;

            offset_batch(&scaled, &offsets.scaled(scale), &options)
                .into_iter()
                .map(|result| result.map(|ring| quantizer.restore_boundary(&ring)))
                .collect()
        } else {
            offset_batch(&inputs, &offsets, &options)
        };

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            error!("{failed} of {} boundaries from {:?} could not be offset", results.len(), job.input);
        }

        Ok(Self {
            input: job.input,
            originals,
            results,
        })
    }
}
