use svg::{node::element, Document};

use crate::{job::OffsetData, shape::Boundary};

pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ViewBox {
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, (x, y): (f64, f64)) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn add_margin(&mut self, margin: f64) {
        self.min_x -= margin;
        self.min_y -= margin;
        self.max_x += margin;
        self.max_y += margin;
    }

    pub fn get(&self) -> (f64, f64, f64, f64) {
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return (0.0, 0.0, 0.0, 0.0);
        }

        (self.min_x, self.min_y, self.max_x - self.min_x, self.max_y - self.min_y)
    }
}

fn make_svg_path(boundary: &Boundary, view_box: &mut ViewBox) -> Option<element::Path> {
    let mut points = boundary.coords().iter().map(|c| c.x_y());
    let p0 = points.next()?;

    let mut data = element::path::Data::new();
    data = data.move_to(p0);
    view_box.include(p0);

    for p in points {
        data = data.line_to(p);
        view_box.include(p);
    }

    data = data.close();

    Some(element::Path::new()
        .set("d", data)
        .set("vector-effect", "non-scaling-stroke"))
}

fn make_svg_paths<'b>(boundaries: impl Iterator<Item = &'b Boundary>, fill: &str, stroke: &str, view_box: &mut ViewBox) -> element::Group {
    let mut group = element::Group::new()
        .set("fill", fill)
        .set("stroke", stroke)
        .set("stroke-width", 1);

    for boundary in boundaries {
        if let Some(path) = make_svg_path(boundary, view_box) {
            group = group.add(path);
        }
    }

    group
}

/// Overview of every job: input boundaries outlined, offset results filled.
pub fn make_svg(data: &[OffsetData]) -> Document {
    let mut view_box = ViewBox::new();

    let mut doc = Document::new();

    for job in data {
        let originals = make_svg_paths(job.originals.iter(), "none", "black", &mut view_box);
        let results = make_svg_paths(job.results.iter().filter_map(|r| r.as_ref().ok()), "#4774AA22", "red", &mut view_box);

        doc = doc.add(originals).add(results);
    }

    view_box.add_margin(5.0);

    doc.set("viewBox", view_box.get())
}
