mod concept;

use std::{collections::BTreeMap, path::{Path, PathBuf}};

use anyhow::{ensure, Result};
use geo::Coord;
use svg::node::element;

use crate::{
    config::{JobConfig, SharedConfig},
    io::{quantize::Quantizer, report::OffsetReport, svg_input::process_svg, svg_output::make_svg},
    job::OffsetData,
    offset::{EdgeLoop, ParallelPolicy, DEFAULT_TOLERANCE},
};

pub const OUTDIR: &'_ str = "tmp/test-output/";

fn ensure_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    ensure!(dir.is_dir(), "{dir:?} should be a directory");
    Ok(())
}

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .format_target(false)
        .is_test(true)
        .try_init();
}

pub fn shared(quantize: bool) -> SharedConfig {
    SharedConfig {
        resolution: 0.1,
        tolerance: DEFAULT_TOLERANCE,
        quantize,
        scale: Quantizer::DEFAULT_SCALE,
    }
}

pub fn job(offsets: Vec<f64>, default_offset: f64) -> JobConfig {
    JobConfig {
        input: PathBuf::new(),
        offsets,
        default_offset,
        path_offsets: BTreeMap::new(),
        edge_loop: EdgeLoop::Closed,
        parallel: ParallelPolicy::Fallback,
        resolve: true,
    }
}

/// Save `doc`, read it back as a job input and offset it, leaving the overview and the report next to it.
pub fn run(name: &str, doc: &svg::Document, shared: &SharedConfig, mut job: JobConfig) -> Result<OffsetData> {
    init_test_logger();
    ensure_dir(&OUTDIR)?;

    let input = format!("input-{name}");
    let input = Path::new(OUTDIR).join(input).with_extension("svg");

    let output = format!("output-{name}");
    let output = Path::new(OUTDIR).join(output);

    svg::save(&input, doc)?;
    let mut content = String::new();
    let parser = svg::open(&input, &mut content)?;

    let rings = process_svg(parser)?.rings(shared.resolution);

    job.input = input;
    let od = OffsetData::new(shared, job, rings)?;

    svg::save(output.with_extension("svg"), &make_svg(std::slice::from_ref(&od)))?;
    serde_norway::to_writer(std::fs::File::create(output.with_extension("yaml"))?, &OffsetReport::new(&od))?;

    Ok(od)
}

pub fn make_polygon(points: Vec<Coord>) -> element::Path {
    let mut data = element::path::Data::new()
        .move_to(points[0].x_y());

    for point in points.into_iter().skip(1) {
        data = data.line_to(point.x_y());
    }

    data = data.close();

    element::Path::new()
        .set("d", data)
        .set("fill", "black")
        .set("stroke", "none")
}

pub fn make_circle(center: Coord, radius: f64) -> element::Circle {
    element::Circle::new()
        .set("cx", center.x)
        .set("cy", center.y)
        .set("r", radius)
        .set("fill", "black")
        .set("stroke", "none")
}

pub fn make_test_svg(shapes: element::Group, dim: (usize, usize)) -> svg::Document {
    svg::Document::new()
        .set("viewBox", (0, 0, dim.0, dim.1))
        .add(shapes)
}

pub fn assert_ring(actual: &[Coord], expected: &[(f64, f64)], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a.x - e.0).abs() < tolerance && (a.y - e.1).abs() < tolerance, "{actual:?} vs {expected:?}");
    }
}
