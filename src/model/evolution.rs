use serde::{Deserialize, Serialize};

/// A named, ordered series of chart points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSeries {
    pub name: String,
    pub points: Vec<EvolutionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub label: String,
    pub value: f64,
}

impl EvolutionSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push(EvolutionPoint {
            label: label.into(),
            value,
        });
    }

    /// Value of the last point, if any.
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }
}
