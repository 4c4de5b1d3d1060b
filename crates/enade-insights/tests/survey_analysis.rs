mod common;

use enade_insights::analysis::{
    compare_levels, dimension_scores, find_extremes, improvement_priorities,
    worst_and_best_questions, ComparisonLevel,
};
use enade_insights::survey::{filter, Dimension, DimensionRegistry, Scope, SurveyLoader};
use std::io::Cursor;

fn close(left: Option<f64>, right: f64) -> bool {
    left.map_or(false, |value| (value - right).abs() < 1e-9)
}

#[test]
fn three_row_scenario_compares_target_with_nation() {
    let csv = "Nome da IES,Sigla da UF,Área de Avaliação,Q1\n\
Institution A,CE,LAW,3.0\n\
Institution B,CE,LAW,4.0\n\
Institution C FORTALEZA,SP,LAW,5.0\n";
    let table = SurveyLoader::from_reader(Cursor::new(csv)).expect("loads");
    let registry = DimensionRegistry::new(&["Q1"], &[], &[]).expect("registry");

    let state_rows = filter::by_state(&table.all(), "CE");
    let names: Vec<_> = state_rows.iter().map(|row| row.institution.as_str()).collect();
    assert_eq!(names, vec!["Institution A", "Institution B"]);

    let benchmark = enade_insights::analysis::Benchmark {
        institution: "FORTALEZA".to_string(),
        state: "SP".to_string(),
        region: vec!["SP".to_string()],
    };
    let result = compare_levels(&registry, &table, &benchmark, &Scope::area("LAW"));
    assert_eq!(result[&ComparisonLevel::Institution].pedagogical, Some(5.0));
    assert_eq!(result[&ComparisonLevel::Nation].pedagogical, Some(4.0));
}

#[test]
fn overall_matches_mean_of_overall_column() {
    let table = common::table();
    let registry = DimensionRegistry::standard();
    let scores = dimension_scores(&registry, &table.all());
    let expected = (4.60 + 5.10 + 4.80 + 4.10 + 5.00 + 4.40) / 6.0;
    assert!(close(scores.overall, expected));
}

#[test]
fn comparison_levels_follow_geography() {
    let table = common::table();
    let registry = DimensionRegistry::standard();
    let result = compare_levels(&registry, &table, &common::benchmark(), &Scope::area("DIREITO"));

    // Benchmark DIREITO row: NOC mean of Q27/Q29 = 4.5.
    assert!(close(result[&ComparisonLevel::Institution].pedagogical, 4.5));
    // State: UNIFOR 4.5 and UFC 4.8.
    assert!(close(result[&ComparisonLevel::State].pedagogical, 4.65));
    // Region adds Recife 3.9.
    assert!(close(result[&ComparisonLevel::Region].pedagogical, (4.5 + 4.8 + 3.9) / 3.0));
    // Nation adds São Paulo 5.15.
    assert!(close(
        result[&ComparisonLevel::Nation].pedagogical,
        (4.5 + 4.8 + 3.9 + 5.15) / 4.0
    ));
    // UNIFOR has no Q67 in DIREITO, so NAC is Q43 alone.
    assert!(close(result[&ComparisonLevel::Institution].enrichment, 3.9));
}

#[test]
fn extremes_skip_questions_missing_from_the_area() {
    let table = common::table();
    let registry = DimensionRegistry::standard();
    let rows = Scope::area("MEDICINA").apply(&table.all());
    let extremes = find_extremes(&registry, &rows, 4);

    assert_eq!(extremes.lowest["Q27"].len(), 2);
    assert_eq!(extremes.highest["Q27"][0].institution, "UNIVERSIDADE DE FORTALEZA");
    assert_eq!(extremes.lowest["Q67"].len(), 1);
    assert!(!extremes.lowest.contains_key("Q30"));

    let ranking = worst_and_best_questions(&registry, &rows, 10);
    assert!(ranking.worst.iter().all(|entry| entry.question != "Q30"));
}

#[test]
fn improvement_priorities_focus_on_the_weakest_gaps() {
    let table = common::table();
    let registry = DimensionRegistry::standard();
    let plan = improvement_priorities(
        &registry,
        &table,
        &common::benchmark(),
        &Scope::area("DIREITO"),
    );

    assert_eq!(plan.summary.analyzed_questions, plan.priorities.len());
    assert!(plan
        .priorities
        .windows(2)
        .all(|pair| pair[0].priority_score >= pair[1].priority_score));

    let first = &plan.priorities[0];
    // Q43: UNIFOR 3.9 vs national (3.9 + 4.6 + 3.7 + 5.0) / 4.
    assert_eq!(first.question, "Q43");
    assert!((first.gap_to_mean - (4.3 - 3.9)).abs() < 1e-9);
    assert!((first.priority_score - first.gap_to_mean * 10.0).abs() < 1e-9);
    assert_eq!(
        first.top_performer.as_ref().map(|top| top.institution.as_str()),
        Some("UNIVERSIDADE DE SÃO PAULO")
    );
    assert_eq!(plan.priorities[1].question, "Q27");
    assert_eq!(plan.summary.focus(), Some(Dimension::Enrichment));
}
