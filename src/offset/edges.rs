use std::collections::BTreeMap;


/// Offset distances of one boundary, by edge position.
///
/// Edges past the end of the list get the default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeOffsets {
    offsets: Vec<f64>,
    default: f64,
}

impl EdgeOffsets {
    pub fn new(offsets: Vec<f64>, default: f64) -> Self {
        Self {
            offsets,
            default,
        }
    }

    pub fn uniform(offset: f64) -> Self {
        Self::new(vec![], offset)
    }

    pub fn get(&self, edge: usize) -> f64 {
        self.offsets.get(edge).copied().unwrap_or(self.default)
    }

    /// Same offsets, multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            offsets: self.offsets.iter().map(|o| o * factor).collect(),
            default: self.default * factor,
        }
    }
}


/// Offsets for a batch of independent boundaries: one shared list, overridable per boundary.
#[derive(Clone, Debug, Default)]
pub struct BatchOffsets {
    shared: EdgeOffsets,
    per_path: BTreeMap<usize, EdgeOffsets>,
}

impl BatchOffsets {
    pub fn new(shared: EdgeOffsets) -> Self {
        Self {
            shared,
            per_path: BTreeMap::new(),
        }
    }

    pub fn with_path(mut self, path: usize, offsets: EdgeOffsets) -> Self {
        self.per_path.insert(path, offsets);
        self
    }

    pub fn for_path(&self, path: usize) -> &EdgeOffsets {
        self.per_path.get(&path).unwrap_or(&self.shared)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            shared: self.shared.scaled(factor),
            per_path: self.per_path.iter().map(|(path, offsets)| (*path, offsets.scaled(factor))).collect(),
        }
    }
}
