use super::{AreaAnalysis, CourseRecord, Snapshot, SnapshotMetadata, GENERAL_KEY};
use crate::analysis::{
    compare_levels, dimension_catalog, find_extremes, row_dimension_mean, Benchmark,
    DimensionScores, DEFAULT_EXTREMES,
};
use crate::survey::{Dimension, DimensionRegistry, Scope, SurveyRow, SurveyTable};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Materializes every aggregate the snapshot-backed endpoints serve.
pub fn build_snapshot(
    registry: &DimensionRegistry,
    table: &SurveyTable,
    benchmark: &Benchmark,
) -> Snapshot {
    let all = table.all();
    let institution_rows = benchmark.institution_rows(&all);
    let institution_areas = institution_rows.areas();

    let mut comparisons = BTreeMap::new();
    comparisons.insert(
        GENERAL_KEY.to_string(),
        compare_levels(registry, table, benchmark, &Scope::all()),
    );

    let mut detailed_analysis = BTreeMap::new();
    for area in &institution_areas {
        debug!(%area, "building area aggregates");
        let scope = Scope::area(area.as_str());
        comparisons.insert(
            area.clone(),
            compare_levels(registry, table, benchmark, &scope),
        );
        detailed_analysis.insert(
            area.clone(),
            AreaAnalysis {
                extremes: find_extremes(registry, &scope.apply(&all), DEFAULT_EXTREMES),
                institution_rows: scope.apply(&institution_rows).iter().cloned().collect(),
            },
        );
    }

    let courses = institution_rows
        .iter()
        .map(|row| course_record(registry, row))
        .collect::<Vec<_>>();

    info!(
        institution = %benchmark.institution,
        rows = table.len(),
        areas = institution_areas.len(),
        courses = courses.len(),
        "snapshot built"
    );

    Snapshot {
        metadata: SnapshotMetadata {
            generated_at: Utc::now(),
            institution: benchmark.institution.clone(),
            total_courses: table.len(),
            institution_courses: institution_rows.len(),
            course_areas: all.areas(),
            institution_areas,
            dimensions: dimension_catalog(registry),
        },
        comparisons,
        detailed_analysis,
        courses,
    }
}

fn course_record(registry: &DimensionRegistry, row: &SurveyRow) -> CourseRecord {
    let mean_for = |dimension: Dimension| row_dimension_mean(registry, row, dimension);
    let questions = registry
        .all_questions()
        .filter_map(|question| row.score(question).map(|score| (question.to_string(), score)))
        .collect();

    CourseRecord {
        course_code: row.course_code.clone(),
        area: row.area.clone(),
        participants: row.participants,
        participation_pct: row.participation_pct,
        overall_mean: row.overall_mean,
        scores: DimensionScores {
            pedagogical: mean_for(Dimension::Pedagogical),
            infrastructure: mean_for(Dimension::Infrastructure),
            enrichment: mean_for(Dimension::Enrichment),
            overall: row.overall_mean,
        },
        questions,
    }
}
