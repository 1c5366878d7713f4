pub mod config;
pub mod error;
pub mod io;
pub mod job;
pub mod offset;
pub mod shape;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;
use config::OffsetConfig;
use io::report::OffsetReport;
use job::OffsetData;
use log::{error, info, warn};

use crate::{io::svg_input::process_svg, io::svg_output::make_svg};


/// Offset every edge of closed SVG shapes by its own distance.
#[derive(Parser)]
pub struct Args {
    /// Path to the job config.
    pub config: PathBuf,
}


fn main() {
    if let Err(_) = std::env::var("RUST_LOG") {
        unsafe { std::env::set_var("RUST_LOG", "info") };
    }

    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("{err}");
        std::process::exit(1);
    }
}


fn run(args: Args) -> Result<()> {
    let config: OffsetConfig = serde_norway::from_reader(std::fs::File::open(&args.config)?)?;

    if !config.outdir.exists() {
        std::fs::create_dir_all(&config.outdir)?;
    }
    ensure!(config.outdir.is_dir(), "{:?} should be a directory", config.outdir);

    let name = config.name;

    let mut ods: Vec<OffsetData> = Vec::with_capacity(config.jobs.len());

    for (i, job) in config.jobs.into_iter().enumerate() {
        let mut content = String::new();
        let parser = svg::open(&job.input, &mut content)?;
        let rings = process_svg(parser)?.rings(config.shared.resolution);

        info!("Job {i:02} - processed the SVG");

        let od = OffsetData::new(&config.shared, job, rings)?;

        info!("Job {i:02} - offset the boundaries");

        let report = OffsetReport::new(&od);
        if report.failures() > 0 {
            warn!("Job {i:02} - {} boundaries failed, see the report", report.failures());
        }

        let output_path = config.outdir.join(format!("{name}-{i:02}.yaml"));
        serde_norway::to_writer(std::fs::File::create(output_path)?, &report)?;

        info!("Job {i:02} - wrote the report");

        ods.push(od);
    }

    let document = make_svg(&ods);
    let output_path = config.outdir.join(format!("{name}.svg"));
    svg::save(output_path, &document)?;

    info!("Produced the overview SVG");

    Ok(())
}
