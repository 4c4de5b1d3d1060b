use super::comparison::{compare_levels, Benchmark, ComparisonResult};
use super::extremes::{find_extremes, Extremes, DEFAULT_EXTREMES};
use crate::survey::{Dimension, DimensionRegistry, Scope, SurveyRow, SurveyTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionInfo {
    pub name: String,
    pub questions: Vec<String>,
}

/// Dimension code → display name and ordered questions.
pub fn dimension_catalog(registry: &DimensionRegistry) -> BTreeMap<String, DimensionInfo> {
    Dimension::ordered()
        .into_iter()
        .map(|dimension| {
            (
                dimension.code().to_string(),
                DimensionInfo {
                    name: dimension.label().to_string(),
                    questions: registry.questions(dimension).to_vec(),
                },
            )
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub area: Option<String>,
    pub institution: String,
    pub total_courses: usize,
    pub institution_courses: usize,
    pub dimensions: BTreeMap<String, DimensionInfo>,
}

/// Everything known about the benchmark institution within one scope.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedReport {
    pub metadata: ReportMetadata,
    pub comparison: ComparisonResult,
    pub extremes: Extremes,
    pub institution_rows: Vec<SurveyRow>,
}

pub fn detailed_report(
    registry: &DimensionRegistry,
    table: &SurveyTable,
    benchmark: &Benchmark,
    scope: &Scope,
) -> DetailedReport {
    let scoped = scope.apply(&table.all());
    let institution_rows = benchmark.institution_rows(&scoped);

    DetailedReport {
        metadata: ReportMetadata {
            area: scope.area_name().map(str::to_string),
            institution: benchmark.institution.clone(),
            total_courses: table.len(),
            institution_courses: benchmark.institution_rows(&table.all()).len(),
            dimensions: dimension_catalog(registry),
        },
        comparison: compare_levels(registry, table, benchmark, scope),
        extremes: find_extremes(registry, &scoped, DEFAULT_EXTREMES),
        institution_rows: institution_rows.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ComparisonLevel;

    fn row(institution: &str, area: &str, q27: f64) -> SurveyRow {
        SurveyRow {
            institution: institution.to_string(),
            state: "CE".to_string(),
            area: area.to_string(),
            category: "Private".to_string(),
            course_code: Some("1".to_string()),
            overall_mean: Some(q27),
            participants: Some(3),
            participation_pct: Some(50.0),
            scores: [("Q27".to_string(), Some(q27))].into_iter().collect(),
        }
    }

    #[test]
    fn report_scopes_everything_but_the_course_totals() {
        let table = SurveyTable::new(vec![
            row("UNIVERSIDADE DE FORTALEZA", "LAW", 4.0),
            row("UNIVERSIDADE DE FORTALEZA", "MEDICINE", 5.0),
            row("OTHER", "LAW", 2.0),
        ]);
        let benchmark = Benchmark {
            institution: "UNIVERSIDADE DE FORTALEZA".to_string(),
            state: "CE".to_string(),
            region: vec!["CE".to_string()],
        };
        let registry = DimensionRegistry::standard();
        let report = detailed_report(&registry, &table, &benchmark, &Scope::area("LAW"));

        assert_eq!(report.metadata.total_courses, 3);
        assert_eq!(report.metadata.institution_courses, 2);
        assert_eq!(report.metadata.dimensions["NFC"].questions.len(), 11);
        assert_eq!(report.institution_rows.len(), 1);
        assert_eq!(report.extremes.lowest["Q27"].len(), 2);
        assert_eq!(
            report.comparison[&ComparisonLevel::Nation].pedagogical,
            Some(3.0)
        );
    }
}
