use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One institution × course-area evaluation from the questionnaire summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRow {
    pub institution: String,
    pub state: String,
    pub area: String,
    pub category: String,
    #[serde(default)]
    pub course_code: Option<String>,
    pub overall_mean: Option<f64>,
    pub participants: Option<u32>,
    pub participation_pct: Option<f64>,
    #[serde(default)]
    pub scores: BTreeMap<String, Option<f64>>,
}

impl SurveyRow {
    /// Score for `question`, `None` when the column is absent or not applicable.
    pub fn score(&self, question: &str) -> Option<f64> {
        self.scores.get(question).copied().flatten()
    }

    /// Mean of the present scores among `questions`.
    pub fn mean_of<'q, I>(&self, questions: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'q str>,
    {
        crate::analysis::stats::mean(questions.into_iter().filter_map(|q| self.score(q)))
    }
}

/// Immutable dataset loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct SurveyTable {
    rows: Vec<SurveyRow>,
}

impl SurveyTable {
    pub fn new(rows: Vec<SurveyRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SurveyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrowed view over every row, the starting point for filters.
    pub fn all(&self) -> RowSet<'_> {
        RowSet {
            rows: self.rows.iter().collect(),
        }
    }
}

/// Ordered subset of table rows produced by the filter layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet<'a> {
    rows: Vec<&'a SurveyRow>,
}

impl<'a> RowSet<'a> {
    pub fn from_rows(rows: Vec<&'a SurveyRow>) -> Self {
        Self { rows }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SurveyRow> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn retain<F>(&self, predicate: F) -> RowSet<'a>
    where
        F: Fn(&SurveyRow) -> bool,
    {
        RowSet {
            rows: self.iter().filter(|row| predicate(row)).collect(),
        }
    }

    /// Distinct course areas, sorted.
    pub fn areas(&self) -> Vec<String> {
        self.iter()
            .map(|row| row.area.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every question id that has a value in at least one row, sorted.
    pub fn answered_questions(&self) -> BTreeSet<&'a str> {
        self.iter()
            .flat_map(|row| {
                row.scores
                    .iter()
                    .filter(|(_, value)| value.is_some())
                    .map(|(question, _)| question.as_str())
            })
            .collect()
    }

    /// Present values of `question` in row order.
    pub fn values(&self, question: &str) -> Vec<f64> {
        self.iter().filter_map(|row| row.score(question)).collect()
    }
}
