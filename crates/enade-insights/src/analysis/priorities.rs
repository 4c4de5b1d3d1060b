use super::comparison::Benchmark;
use super::ranking::{percentile_stats, top_by_question, RankedInstitution};
use super::stats;
use crate::survey::{Dimension, DimensionRegistry, QuestionClass, RowSet, Scope, SurveyTable};
use serde::Serialize;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
const TOP_PERFORMERS: usize = 5;
/// Display weight applied to the gap to the national mean when ordering priorities.
const PRIORITY_WEIGHT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionMean {
    pub question: String,
    pub dimension: QuestionClass,
    pub mean: f64,
    pub valid_rows: usize,
}

/// Lowest and highest scoring questions of a subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionRanking {
    /// Ascending: the weakest question first.
    pub worst: Vec<QuestionMean>,
    /// Also ascending: the strongest question is the *last* entry.
    pub best: Vec<QuestionMean>,
}

/// Ranks every answered question of `rows` by its mean.
///
/// `best` is the tail of the ascending order and is not reversed, so consumers that want
/// best-first must reverse it themselves. Questions nobody answered are left out.
pub fn worst_and_best_questions(
    registry: &DimensionRegistry,
    rows: &RowSet<'_>,
    k: usize,
) -> QuestionRanking {
    let mut means: Vec<QuestionMean> = rows
        .answered_questions()
        .into_iter()
        .filter_map(|question| {
            let values = rows.values(question);
            stats::mean(values.iter().copied()).map(|mean| QuestionMean {
                question: question.to_string(),
                dimension: registry.classify(question),
                mean,
                valid_rows: values.len(),
            })
        })
        .collect();
    means.sort_by(|left, right| left.mean.total_cmp(&right.mean));

    let worst = means.iter().take(k).cloned().collect();
    let best = means[means.len().saturating_sub(k)..].to_vec();
    QuestionRanking { worst, best }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementPriority {
    pub question: String,
    pub dimension: QuestionClass,
    pub target_score: f64,
    pub national_mean: f64,
    pub percentile_rank: Option<f64>,
    pub gap_to_mean: f64,
    pub gap_to_top: Option<f64>,
    pub priority_score: f64,
    pub top_performer: Option<RankedInstitution>,
    pub top_performers: Vec<RankedInstitution>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrioritySummary {
    pub analyzed_questions: usize,
    pub mean_gap_to_mean: Option<f64>,
    pub focus_dimension: Option<QuestionClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImprovementPlan {
    pub area: Option<String>,
    pub priorities: Vec<ImprovementPriority>,
    pub summary: PrioritySummary,
}

/// Questions where the benchmark institution trails the national mean the most.
pub fn improvement_priorities(
    registry: &DimensionRegistry,
    table: &SurveyTable,
    benchmark: &Benchmark,
    scope: &Scope,
) -> ImprovementPlan {
    let nation = scope.apply(&table.all());
    let target = benchmark.institution_rows(&nation);
    let ranking = worst_and_best_questions(registry, &target, DEFAULT_QUESTION_COUNT);

    let mut priorities: Vec<ImprovementPriority> = ranking
        .worst
        .into_iter()
        .filter_map(|weak| {
            let national = percentile_stats(&nation, &weak.question, Some(weak.mean));
            let national_mean = national.mean?;
            let top_performers = top_by_question(&nation, &weak.question, TOP_PERFORMERS);
            let top_performer = top_performers.first().cloned();
            let gap_to_mean = national_mean - weak.mean;

            Some(ImprovementPriority {
                gap_to_top: top_performer.as_ref().map(|top| top.score - weak.mean),
                priority_score: gap_to_mean * PRIORITY_WEIGHT,
                question: weak.question,
                dimension: weak.dimension,
                target_score: weak.mean,
                national_mean,
                percentile_rank: national.percentile_rank,
                gap_to_mean,
                top_performer,
                top_performers,
            })
        })
        .collect();
    priorities.sort_by(|left, right| right.priority_score.total_cmp(&left.priority_score));

    let summary = summarize(&priorities);
    ImprovementPlan {
        area: scope.area_name().map(str::to_string),
        priorities,
        summary,
    }
}

fn summarize(priorities: &[ImprovementPriority]) -> PrioritySummary {
    let mut largest: Option<&ImprovementPriority> = None;
    for priority in priorities {
        if largest.map_or(true, |current| priority.gap_to_mean > current.gap_to_mean) {
            largest = Some(priority);
        }
    }

    PrioritySummary {
        analyzed_questions: priorities.len(),
        mean_gap_to_mean: stats::mean(priorities.iter().map(|priority| priority.gap_to_mean)),
        focus_dimension: largest.map(|priority| priority.dimension),
    }
}

impl PrioritySummary {
    pub fn focus(&self) -> Option<Dimension> {
        self.focus_dimension.and_then(QuestionClass::dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::SurveyRow;

    fn registry() -> DimensionRegistry {
        DimensionRegistry::new(&["Q1", "Q2"], &["Q3"], &["Q4"]).expect("registry")
    }

    fn row(institution: &str, scores: &[(&str, Option<f64>)]) -> SurveyRow {
        SurveyRow {
            institution: institution.to_string(),
            state: "CE".to_string(),
            area: "LAW".to_string(),
            category: "Private".to_string(),
            course_code: None,
            overall_mean: None,
            participants: None,
            participation_pct: None,
            scores: scores
                .iter()
                .map(|(question, value)| (question.to_string(), *value))
                .collect(),
        }
    }

    fn questions(entries: &[QuestionMean]) -> Vec<&str> {
        entries.iter().map(|entry| entry.question.as_str()).collect()
    }

    #[test]
    fn best_questions_keep_ascending_order() {
        let table = SurveyTable::new(vec![row(
            "X",
            &[
                ("Q1", Some(1.0)),
                ("Q2", Some(2.0)),
                ("Q3", Some(3.0)),
                ("Q4", Some(4.0)),
                ("Q9", Some(5.0)),
            ],
        )]);
        let ranking = worst_and_best_questions(&registry(), &table.all(), 2);
        assert_eq!(questions(&ranking.worst), vec!["Q1", "Q2"]);
        assert_eq!(questions(&ranking.best), vec!["Q4", "Q9"]);
        assert_eq!(ranking.best[1].dimension, QuestionClass::Unknown);
        assert_eq!(
            ranking.worst[0].dimension,
            QuestionClass::Known(Dimension::Pedagogical)
        );
    }

    #[test]
    fn unanswered_questions_are_not_candidates() {
        let table = SurveyTable::new(vec![
            row("X", &[("Q1", Some(4.0)), ("Q3", None)]),
            row("Y", &[("Q1", None), ("Q3", None)]),
        ]);
        let ranking = worst_and_best_questions(&registry(), &table.all(), 5);
        assert_eq!(questions(&ranking.worst), vec!["Q1"]);
        assert_eq!(ranking.worst[0].valid_rows, 1);
        assert_eq!(questions(&ranking.best), vec!["Q1"]);
    }

    #[test]
    fn priorities_rank_by_gap_to_national_mean() {
        let table = SurveyTable::new(vec![
            row("TARGET", &[("Q1", Some(2.0)), ("Q3", Some(3.5))]),
            row("PEER ONE", &[("Q1", Some(4.0)), ("Q3", Some(4.0))]),
            row("PEER TWO", &[("Q1", Some(6.0)), ("Q3", Some(4.5))]),
        ]);
        let benchmark = Benchmark {
            institution: "target".to_string(),
            state: "CE".to_string(),
            region: vec!["CE".to_string()],
        };
        let plan = improvement_priorities(&registry(), &table, &benchmark, &Scope::all());

        assert_eq!(plan.priorities.len(), 2);
        let first = &plan.priorities[0];
        assert_eq!(first.question, "Q1");
        assert_eq!(first.national_mean, 4.0);
        assert_eq!(first.gap_to_mean, 2.0);
        assert_eq!(first.priority_score, 20.0);
        assert_eq!(first.gap_to_top, Some(4.0));
        assert_eq!(first.percentile_rank, Some(0.0));
        assert_eq!(
            first.top_performer.as_ref().map(|top| top.institution.as_str()),
            Some("PEER TWO")
        );

        assert_eq!(plan.priorities[1].question, "Q3");
        assert_eq!(plan.summary.analyzed_questions, 2);
        assert_eq!(plan.summary.mean_gap_to_mean, Some(1.25));
        assert_eq!(plan.summary.focus(), Some(Dimension::Pedagogical));
    }

    #[test]
    fn tied_gaps_take_the_focus_from_the_first_priority() {
        let table = SurveyTable::new(vec![
            row("TARGET", &[("Q1", Some(2.0)), ("Q3", Some(2.0))]),
            row("PEER", &[("Q1", Some(4.0)), ("Q3", Some(4.0))]),
        ]);
        let benchmark = Benchmark {
            institution: "target".to_string(),
            state: "CE".to_string(),
            region: vec!["CE".to_string()],
        };
        let plan = improvement_priorities(&registry(), &table, &benchmark, &Scope::all());

        let gaps: Vec<_> = plan
            .priorities
            .iter()
            .map(|priority| (priority.question.as_str(), priority.gap_to_mean))
            .collect();
        assert_eq!(gaps, vec![("Q1", 1.0), ("Q3", 1.0)]);
        assert_eq!(plan.summary.focus(), Some(Dimension::Pedagogical));
    }

    #[test]
    fn missing_target_produces_an_empty_plan() {
        let table = SurveyTable::new(vec![row("PEER", &[("Q1", Some(4.0))])]);
        let benchmark = Benchmark {
            institution: "absent".to_string(),
            state: "CE".to_string(),
            region: vec![],
        };
        let plan = improvement_priorities(&registry(), &table, &benchmark, &Scope::area("LAW"));
        assert!(plan.priorities.is_empty());
        assert_eq!(plan.summary, PrioritySummary::default());
        assert_eq!(plan.area.as_deref(), Some("LAW"));
    }
}
