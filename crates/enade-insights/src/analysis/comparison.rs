use super::scores::{dimension_scores, DimensionScores};
use crate::survey::{filter, DimensionRegistry, RowSet, Scope, SurveyTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The institution under study and the geography it is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benchmark {
    pub institution: String,
    pub state: String,
    pub region: Vec<String>,
}

impl Benchmark {
    pub fn institution_rows<'a>(&self, rows: &RowSet<'a>) -> RowSet<'a> {
        filter::by_institution(rows, &self.institution)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonLevel {
    Institution,
    State,
    Region,
    Nation,
}

impl ComparisonLevel {
    pub const fn ordered() -> [ComparisonLevel; 4] {
        [
            ComparisonLevel::Institution,
            ComparisonLevel::State,
            ComparisonLevel::Region,
            ComparisonLevel::Nation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Institution => "Institution",
            Self::State => "State",
            Self::Region => "Region",
            Self::Nation => "Nation",
        }
    }
}

pub type ComparisonResult = BTreeMap<ComparisonLevel, DimensionScores>;

/// Dimension scores of the benchmark institution, its state, its region and the nation.
pub fn compare_levels(
    registry: &DimensionRegistry,
    table: &SurveyTable,
    benchmark: &Benchmark,
    scope: &Scope,
) -> ComparisonResult {
    let nation = scope.apply(&table.all());

    ComparisonLevel::ordered()
        .into_iter()
        .map(|level| {
            let rows = match level {
                ComparisonLevel::Institution => benchmark.institution_rows(&nation),
                ComparisonLevel::State => filter::by_state(&nation, &benchmark.state),
                ComparisonLevel::Region => filter::by_states(&nation, benchmark.region.as_slice()),
                ComparisonLevel::Nation => nation.clone(),
            };
            (level, dimension_scores(registry, &rows))
        })
        .collect()
}

/// Dimension scores for each institution needle, keyed by the needle as given.
pub fn compare_institutions<S: AsRef<str>>(
    registry: &DimensionRegistry,
    table: &SurveyTable,
    needles: &[S],
    scope: &Scope,
) -> BTreeMap<String, DimensionScores> {
    let rows = scope.apply(&table.all());
    needles
        .iter()
        .map(|needle| {
            let needle = needle.as_ref();
            let matched = filter::by_institution(&rows, needle);
            (needle.to_string(), dimension_scores(registry, &matched))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::SurveyRow;

    fn registry() -> DimensionRegistry {
        DimensionRegistry::new(&["Q1"], &["Q2"], &["Q3"]).expect("registry")
    }

    fn row(institution: &str, state: &str, area: &str, q1: f64) -> SurveyRow {
        SurveyRow {
            institution: institution.to_string(),
            state: state.to_string(),
            area: area.to_string(),
            category: "Private".to_string(),
            course_code: None,
            overall_mean: Some(q1),
            participants: None,
            participation_pct: None,
            scores: [("Q1".to_string(), Some(q1))].into_iter().collect(),
        }
    }

    fn table() -> SurveyTable {
        SurveyTable::new(vec![
            row("Institution A", "CE", "LAW", 3.0),
            row("Institution B", "CE", "LAW", 4.0),
            row("UNIVERSIDADE DE FORTALEZA C", "SP", "LAW", 5.0),
            row("Institution D", "RJ", "MEDICINE", 1.0),
        ])
    }

    fn benchmark() -> Benchmark {
        Benchmark {
            institution: "FORTALEZA".to_string(),
            state: "SP".to_string(),
            region: vec!["SP".to_string()],
        }
    }

    #[test]
    fn compares_target_against_each_level() {
        let table = table();
        let result = compare_levels(&registry(), &table, &benchmark(), &Scope::area("LAW"));

        assert_eq!(result.len(), 4);
        assert_eq!(result[&ComparisonLevel::Institution].pedagogical, Some(5.0));
        assert_eq!(result[&ComparisonLevel::State].pedagogical, Some(5.0));
        assert_eq!(result[&ComparisonLevel::Nation].pedagogical, Some(4.0));
        assert_eq!(result[&ComparisonLevel::Nation].infrastructure, None);
    }

    #[test]
    fn unfiltered_scope_covers_every_area() {
        let table = table();
        let result = compare_levels(&registry(), &table, &benchmark(), &Scope::all());
        assert_eq!(result[&ComparisonLevel::Nation].overall, Some(3.25));
    }

    #[test]
    fn absent_target_yields_missing_scores() {
        let table = table();
        let result = compare_levels(&registry(), &table, &benchmark(), &Scope::area("MEDICINE"));
        assert_eq!(
            result[&ComparisonLevel::Institution],
            DimensionScores::default()
        );
        assert_eq!(result[&ComparisonLevel::Nation].pedagogical, Some(1.0));
    }

    #[test]
    fn comparison_is_idempotent() {
        let table = table();
        let first = compare_levels(&registry(), &table, &benchmark(), &Scope::area("LAW"));
        let second = compare_levels(&registry(), &table, &benchmark(), &Scope::area("LAW"));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn compares_named_institutions() {
        let table = table();
        let result = compare_institutions(
            &registry(),
            &table,
            &["institution a", "missing"],
            &Scope::all(),
        );
        assert_eq!(result["institution a"].pedagogical, Some(3.0));
        assert_eq!(result["missing"], DimensionScores::default());
    }
}
