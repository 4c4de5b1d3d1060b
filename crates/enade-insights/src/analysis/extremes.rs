use crate::survey::{DimensionRegistry, RowSet, SurveyRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_EXTREMES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionScore {
    pub institution: String,
    pub score: f64,
}

/// Lowest and highest scoring institutions per registered question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    /// Ascending, worst first.
    pub lowest: BTreeMap<String, Vec<InstitutionScore>>,
    /// Descending, best first.
    pub highest: BTreeMap<String, Vec<InstitutionScore>>,
}

impl Extremes {
    pub fn is_empty(&self) -> bool {
        self.lowest.is_empty() && self.highest.is_empty()
    }
}

pub fn find_extremes(registry: &DimensionRegistry, rows: &RowSet<'_>, n: usize) -> Extremes {
    let mut extremes = Extremes::default();

    for question in registry.all_questions() {
        let mut scored: Vec<(&SurveyRow, f64)> = rows
            .iter()
            .filter_map(|row| row.score(question).map(|score| (row, score)))
            .collect();
        if scored.is_empty() {
            continue;
        }
        scored.sort_by(|left, right| left.1.total_cmp(&right.1));

        let lowest = scored.iter().take(n).map(to_entry).collect();
        let highest = scored.iter().rev().take(n).map(to_entry).collect();

        extremes.lowest.insert(question.to_string(), lowest);
        extremes.highest.insert(question.to_string(), highest);
    }

    extremes
}

fn to_entry((row, score): &(&SurveyRow, f64)) -> InstitutionScore {
    InstitutionScore {
        institution: row.institution.clone(),
        score: *score,
    }
}
