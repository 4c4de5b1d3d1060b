use super::stats;
use crate::survey::{filter, RowSet, SurveyRow};
use serde::{Deserialize, Serialize};

/// Distribution of one question across the rows of a subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub question: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_rank: Option<f64>,
}

pub fn percentile_stats(
    rows: &RowSet<'_>,
    question: &str,
    reference: Option<f64>,
) -> QuestionStats {
    let values = rows.values(question);
    let sorted = stats::sorted_ascending(&values);

    QuestionStats {
        question: question.to_string(),
        count: values.len(),
        mean: stats::mean(values.iter().copied()),
        std_dev: stats::sample_std_dev(&values),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        p25: stats::percentile(&sorted, 25.0),
        median: stats::percentile(&sorted, 50.0),
        p75: stats::percentile(&sorted, 75.0),
        reference_score: reference,
        percentile_rank: reference.and_then(|score| stats::percentile_rank(&values, score)),
    }
}

/// One ranked evaluation with the fields shown next to a league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedInstitution {
    pub institution: String,
    pub score: f64,
    pub state: String,
    pub category: String,
    pub participants: Option<u32>,
}

impl RankedInstitution {
    fn new(row: &SurveyRow, score: f64) -> Self {
        Self {
            institution: row.institution.clone(),
            score,
            state: row.state.clone(),
            category: row.category.clone(),
            participants: row.participants,
        }
    }
}

/// Highest scores for `question`, best first. Ties keep table order.
pub fn top_by_question(rows: &RowSet<'_>, question: &str, limit: usize) -> Vec<RankedInstitution> {
    rank_by(rows, limit, |row| row.score(question))
}

/// Peer ranking by overall mean among rows whose category contains `category`.
pub fn top_by_overall_mean(
    rows: &RowSet<'_>,
    category: &str,
    limit: usize,
) -> Vec<RankedInstitution> {
    let peers = filter::by_category(rows, category);
    rank_by(&peers, limit, |row| row.overall_mean)
}

fn rank_by<F>(rows: &RowSet<'_>, limit: usize, score: F) -> Vec<RankedInstitution>
where
    F: Fn(&SurveyRow) -> Option<f64>,
{
    let mut scored: Vec<(&SurveyRow, f64)> = rows
        .iter()
        .filter_map(|row| score(row).map(|value| (row, value)))
        .collect();
    // `sort_by` is stable, which keeps "top N" reproducible across runs.
    scored.sort_by(|left, right| right.1.total_cmp(&left.1));

    scored
        .into_iter()
        .take(limit)
        .map(|(row, value)| RankedInstitution::new(row, value))
        .collect()
}
