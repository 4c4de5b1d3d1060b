use super::stats;
use crate::survey::{Dimension, DimensionRegistry, RowSet, SurveyRow};
use serde::{Deserialize, Serialize};

/// Mean score per dimension plus the overall-mean column, `None` where no data exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    #[serde(rename = "NOC")]
    pub pedagogical: Option<f64>,
    #[serde(rename = "NFC")]
    pub infrastructure: Option<f64>,
    #[serde(rename = "NAC")]
    pub enrichment: Option<f64>,
    #[serde(rename = "OVERALL")]
    pub overall: Option<f64>,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Pedagogical => self.pedagogical,
            Dimension::Infrastructure => self.infrastructure,
            Dimension::Enrichment => self.enrichment,
        }
    }

    fn set(&mut self, dimension: Dimension, value: Option<f64>) {
        match dimension {
            Dimension::Pedagogical => self.pedagogical = value,
            Dimension::Infrastructure => self.infrastructure = value,
            Dimension::Enrichment => self.enrichment = value,
        }
    }
}

/// Mean across the present questions of `dimension` for one row.
pub fn row_dimension_mean(
    registry: &DimensionRegistry,
    row: &SurveyRow,
    dimension: Dimension,
) -> Option<f64> {
    row.mean_of(registry.questions(dimension).iter().map(String::as_str))
}

/// Per-dimension means of `rows`, averaged row first so each evaluation weighs the same
/// regardless of how many questions it answered. Rows with no answered question in a
/// dimension stay out of that dimension's denominator.
pub fn dimension_scores(registry: &DimensionRegistry, rows: &RowSet<'_>) -> DimensionScores {
    let mut scores = DimensionScores {
        overall: stats::mean(rows.iter().filter_map(|row| row.overall_mean)),
        ..DimensionScores::default()
    };

    for dimension in Dimension::ordered() {
        let value = stats::mean(
            rows.iter()
                .filter_map(|row| row_dimension_mean(registry, row, dimension)),
        );
        scores.set(dimension, value);
    }

    scores
}
