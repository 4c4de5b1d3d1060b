use crate::analysis::{
    compare_institutions, compare_levels, detailed_report, improvement_priorities,
    percentile_stats, top_by_overall_mean, top_by_question, Benchmark, ComparisonResult,
    DetailedReport, DimensionScores, Extremes, ImprovementPlan, QuestionStats,
    RankedInstitution,
};
use crate::error::RequestError;
use crate::snapshot::{AreaListing, CourseRecord, DashboardData, Snapshot, SnapshotMetadata};
use crate::survey::{DimensionRegistry, QuestionClass, Scope, SurveyTable};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Peer-set category used when the caller does not name one.
pub const DEFAULT_PEER_CATEGORY: &str = "Privada";

#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    pub course: CourseRecord,
    pub extremes: Option<Extremes>,
    pub comparison: Option<ComparisonResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionInsight {
    pub dimension: QuestionClass,
    pub area: Option<String>,
    pub national: QuestionStats,
}

/// Read-only facade over the loaded table and the precomputed snapshot.
pub struct InsightsService {
    registry: DimensionRegistry,
    table: Arc<SurveyTable>,
    snapshot: Arc<Snapshot>,
    benchmark: Benchmark,
    areas: BTreeSet<String>,
    questions: BTreeSet<String>,
}

impl InsightsService {
    pub fn new(
        registry: DimensionRegistry,
        table: Arc<SurveyTable>,
        snapshot: Arc<Snapshot>,
        benchmark: Benchmark,
    ) -> Self {
        let areas = table.all().areas().into_iter().collect();
        let questions = table
            .rows()
            .iter()
            .flat_map(|row| row.scores.keys().cloned())
            .collect();

        Self {
            registry,
            table,
            snapshot,
            benchmark,
            areas,
            questions,
        }
    }

    pub fn metadata(&self) -> &SnapshotMetadata {
        &self.snapshot.metadata
    }

    pub fn areas(&self) -> AreaListing {
        self.snapshot.areas()
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.snapshot.courses
    }

    pub fn dashboard(&self) -> DashboardData {
        self.snapshot.dashboard()
    }

    /// Precomputed comparison; `None` selects the unfiltered one.
    pub fn snapshot_comparison(
        &self,
        area: Option<&str>,
    ) -> Result<&ComparisonResult, RequestError> {
        self.snapshot
            .comparison(area)
            .ok_or_else(|| RequestError::UnknownArea(area.unwrap_or_default().to_string()))
    }

    pub fn snapshot_extremes(&self, area: &str) -> Result<&Extremes, RequestError> {
        self.snapshot
            .extremes(area)
            .ok_or_else(|| RequestError::UnknownArea(area.to_string()))
    }

    pub fn course_detail(&self, area: &str) -> Result<CourseDetail, RequestError> {
        let course = self
            .snapshot
            .course(area)
            .ok_or_else(|| RequestError::CourseNotFound(area.to_string()))?;

        Ok(CourseDetail {
            course: course.clone(),
            extremes: self.snapshot.extremes(area).cloned(),
            comparison: self.snapshot.comparison(Some(area)).cloned(),
        })
    }

    pub fn live_comparison(&self, area: Option<&str>) -> Result<ComparisonResult, RequestError> {
        let scope = self.scope(area)?;
        Ok(compare_levels(
            &self.registry,
            &self.table,
            &self.benchmark,
            &scope,
        ))
    }

    pub fn question_stats(
        &self,
        question: &str,
        area: Option<&str>,
    ) -> Result<QuestionInsight, RequestError> {
        let scope = self.scope(area)?;
        self.ensure_question(question)?;

        let rows = scope.apply(&self.table.all());
        let reference = crate::analysis::stats::mean(
            self.benchmark
                .institution_rows(&rows)
                .iter()
                .filter_map(|row| row.score(question)),
        );

        Ok(QuestionInsight {
            dimension: self.registry.classify(question),
            area: scope.area_name().map(str::to_string),
            national: percentile_stats(&rows, question, reference),
        })
    }

    pub fn ranking(
        &self,
        question: &str,
        area: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RankedInstitution>, RequestError> {
        let scope = self.scope(area)?;
        self.ensure_question(question)?;
        Ok(top_by_question(&scope.apply(&self.table.all()), question, limit))
    }

    pub fn similar_institutions(
        &self,
        area: Option<&str>,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RankedInstitution>, RequestError> {
        let scope = self.scope(area)?;
        Ok(top_by_overall_mean(
            &scope.apply(&self.table.all()),
            category.unwrap_or(DEFAULT_PEER_CATEGORY),
            limit,
        ))
    }

    pub fn priorities(&self, area: Option<&str>) -> Result<ImprovementPlan, RequestError> {
        let scope = self.scope(area)?;
        Ok(improvement_priorities(
            &self.registry,
            &self.table,
            &self.benchmark,
            &scope,
        ))
    }

    pub fn institutions(
        &self,
        needles: &[String],
        area: Option<&str>,
    ) -> Result<BTreeMap<String, DimensionScores>, RequestError> {
        let scope = self.scope(area)?;
        Ok(compare_institutions(
            &self.registry,
            &self.table,
            needles,
            &scope,
        ))
    }

    pub fn report(&self, area: Option<&str>) -> Result<DetailedReport, RequestError> {
        let scope = self.scope(area)?;
        Ok(detailed_report(
            &self.registry,
            &self.table,
            &self.benchmark,
            &scope,
        ))
    }

    fn scope(&self, area: Option<&str>) -> Result<Scope, RequestError> {
        let scope = Scope::from_optional(area);
        match scope.area_name() {
            Some(name) if !self.areas.contains(name) => {
                Err(RequestError::UnknownArea(name.to_string()))
            }
            _ => Ok(scope),
        }
    }

    fn ensure_question(&self, question: &str) -> Result<(), RequestError> {
        if self.questions.contains(question) {
            Ok(())
        } else {
            Err(RequestError::UnknownQuestion(question.to_string()))
        }
    }
}
