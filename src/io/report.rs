use std::path::PathBuf;

use serde::Serialize;

use crate::job::OffsetData;


/// Outcome of one boundary.
#[derive(Debug, Serialize, PartialEq)]
pub struct BoundaryReport {
    pub index: usize,
    /// The offset ring, first point repeated at the end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OffsetReport {
    pub input: PathBuf,
    pub boundaries: Vec<BoundaryReport>,
}

impl OffsetReport {
    pub fn new(data: &OffsetData) -> Self {
        let boundaries = data.results.iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(ring) => BoundaryReport {
                    index,
                    points: Some(ring.to_line_string().0.iter().map(|c| [c.x, c.y]).collect()),
                    error: None,
                },
                Err(err) => BoundaryReport {
                    index,
                    points: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();

        Self {
            input: data.input.clone(),
            boundaries,
        }
    }

    pub fn failures(&self) -> usize {
        self.boundaries.iter().filter(|b| b.error.is_some()).count()
    }
}
