//! Aggregations over filtered row subsets. Nothing here fails: empty subsets and
//! unanswered questions surface as `None` or empty collections.

pub mod comparison;
pub mod extremes;
pub mod priorities;
pub mod ranking;
pub mod report;
pub mod scores;
pub mod stats;

pub use comparison::{
    compare_institutions, compare_levels, Benchmark, ComparisonLevel, ComparisonResult,
};
pub use extremes::{find_extremes, Extremes, InstitutionScore, DEFAULT_EXTREMES};
pub use priorities::{
    improvement_priorities, worst_and_best_questions, ImprovementPlan, ImprovementPriority,
    PrioritySummary, QuestionMean, QuestionRanking, DEFAULT_QUESTION_COUNT,
};
pub use ranking::{
    percentile_stats, top_by_overall_mean, top_by_question, QuestionStats, RankedInstitution,
};
pub use report::{detailed_report, dimension_catalog, DetailedReport, DimensionInfo};
pub use scores::{dimension_scores, row_dimension_mean, DimensionScores};
