use std::collections::HashMap;

use anyhow::{bail, ensure, Context, Result};
use geo::{Coord, LineString, RemoveRepeatedPoints};
use log::{error, warn};
use svg::{node::element::{path, tag}, parser::Event, Parser};

use crate::shape::{Circle, IntoRing};


fn check_group(attrs: &HashMap<String, svg::node::Value>) -> Result<()> {
    for (attr, val) in attrs {
        match attr.as_str() {
            "transform" => {
                ensure!(*val == "translate(0 0) scale(1 1)", "only no-op transform is supported");
            },
            "id" | "style" | "fill" | "stroke" | "stroke-width" => {},
            attr => {
                warn!("Ignoring group attribute {attr} (value {val})");
            },
        }
    }

    Ok(())
}


#[derive(Clone, Debug)]
pub struct PathBuilder {
    inner: LineString,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            inner: LineString::new(vec![]),
        }
    }

    pub fn get_position(&self) -> Result<Coord> {
        self.inner.0.last().copied().context("Tried to get the current line position, but the line is empty")
    }

    pub fn moveto(mut self, ps: impl Iterator<Item = Coord>) -> Result<Self> {
        ensure!(self.inner.0.is_empty(), "Move To is only supported as the first command");
        self.inner.0.extend(ps);
        Ok(self)
    }

    pub fn lineto(mut self, ps: impl Iterator<Item = Coord>) -> Result<Self> {
        ensure!(!self.inner.0.is_empty(), "Line To can not be the first command");
        self.inner.0.extend(ps);
        Ok(self)
    }

    /// The first move is relative to the origin, which makes it absolute
    pub fn moveby(mut self, mut ps: impl Iterator<Item = Coord>) -> Result<Self> {
        ensure!(self.inner.0.is_empty(), "Move By is only supported as the first command");
        let first = ps.next().context("Move By without coordinates")?;
        self.inner.0.push(first);
        // Further pairs are implicit relative line-tos
        self.lineby(ps)
    }

    pub fn lineby(mut self, ps: impl Iterator<Item = Coord>) -> Result<Self> {
        ensure!(!self.inner.0.is_empty(), "Line By can not be the first command");
        for p in ps {
            self.inner.0.push(self.get_position()? + p);
        }
        Ok(self)
    }

    pub fn close(mut self) -> Result<LineString> {
        self.inner.remove_repeated_points_mut();
        if self.inner.0.len() > 1 && self.inner.is_closed() {
            self.inner.0.pop();
        }
        ensure!(self.inner.0.len() >= 3, "Can only close a path with at least 3 points");
        self.inner.close();
        Ok(self.inner)
    }
}


/// Closed shapes found in an SVG document.
#[derive(Debug)]
pub struct SvgPrimitives {
    pub rings: Vec<LineString>,
    pub circles: Vec<Circle>,
}

impl SvgPrimitives {
    pub fn new() -> Self {
        Self {
            rings: vec![],
            circles: vec![],
        }
    }

    pub fn add_from_path(&mut self, path_data: path::Data) -> Result<()> {
        let mut builder = PathBuilder::new();

        for command in path_data.iter() {
            use svg::node::element::path::{Command::*, Position::*};

            match command {
                | &Move(_, ref params)
                | &Line(_, ref params) => {
                    ensure!(params.len() % 2 == 0);
                    let pts = params.chunks(2).filter_map(|p| {
                        if let [x, y] = p {
                            Some(Coord{ x: *x as f64, y: *y as f64 })
                        } else {
                            None
                        }
                    });

                    match command {
                        Move(Absolute, ..) => builder = builder.moveto(pts)?,
                        Move(Relative, ..) => builder = builder.moveby(pts)?,
                        Line(Absolute, ..) => builder = builder.lineto(pts)?,
                        Line(Relative, ..) => builder = builder.lineby(pts)?,
                        _ => unreachable!(),
                    }
                },
                &VerticalLine(Absolute, ref params) => {
                    let x = builder.get_position()?.x;
                    builder = builder.lineto(params.iter().map(|y| Coord { x, y: *y as f64 }))?;
                },
                &VerticalLine(Relative, ref params) => {
                    builder = builder.lineby(params.iter().map(|y| Coord { x: 0.0, y: *y as f64 }))?;
                },
                &HorizontalLine(Absolute, ref params) => {
                    let y = builder.get_position()?.y;
                    builder = builder.lineto(params.iter().map(|x| Coord { x: *x as f64, y }))?;
                },
                &HorizontalLine(Relative, ref params) => {
                    builder = builder.lineby(params.iter().map(|x| Coord { x: *x as f64, y: 0.0 }))?;
                },
                &Close => {
                    let ring = builder.close()?;
                    self.rings.push(ring);
                    return Ok(());
                },
                command => {
                    bail!("Unsupported path command {command:?}");
                },
            }
        }

        warn!("Skipping an open path, only closed boundaries can be offset");

        Ok(())
    }

    pub fn add_circle(&mut self, center: Coord, radius: f64) -> Result<()> {
        ensure!(radius > 0.0, "Circle radius should be greater than 0");
        self.circles.push(Circle::new(center, radius));
        Ok(())
    }

    /// Every shape as a closed ring, circles discretized with segments of at most `resolution`.
    pub fn rings(self, resolution: f64) -> Vec<LineString> {
        self.rings.into_iter()
            .chain(self.circles.into_iter().map(|c| c.into_ring(resolution)))
            .collect()
    }
}


pub fn process_svg(parser: Parser) -> Result<SvgPrimitives> {
    let mut shapes = SvgPrimitives::new();

    for event in parser {
        match event {

            /* Ignore some events */

            | Event::Instruction(..)
            | Event::Declaration(..)
            | Event::Text(..)
            | Event::Comment(..)
            | Event::Tag(tag::SVG, ..)
            | Event::Tag(tag::Description, ..)
            | Event::Tag(tag::Text, ..)
            | Event::Tag(tag::Title, ..)
            | Event::Tag(tag::Group, tag::Type::End, ..) => {},

            Event::Tag(tag::Group, tag::Type::Start, attrs) => {
                check_group(&attrs)?;
            },

            /* Handle paths */

            Event::Tag(tag::Path, tag::Type::Empty, ref attrs) => {
                let data = attrs.get("d").context("No 'd' on a path")?;
                let data = path::Data::parse(data)?;

                if let Err(err) = shapes.add_from_path(data) {
                    error!("Error processing {event:?}, skipping it:\n{err}");
                }
            },

            /* Handle circles */

            Event::Tag(tag::Circle, tag::Type::Empty, attrs) => {
                let cx: f64 = attrs.get("cx").context("No 'cx' on circle")?.parse()?;
                let cy: f64 = attrs.get("cy").context("No 'cy' on circle")?.parse()?;
                let r: f64 = attrs.get("r").context("No 'r' on circle")?.parse()?;

                if let Err(err) = shapes.add_circle(Coord { x: cx, y: cy }, r) {
                    error!("Error processing a circle at ({cx}, {cy}), skipping it:\n{err}");
                }
            },

            /* Everything else is not supported */

            event => {
                warn!("Unsupported event {event:?}");
            }
        }
    }

    Ok(shapes)
}
