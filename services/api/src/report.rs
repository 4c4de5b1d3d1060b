use crate::infra::{load_table, override_paths, rebuild_snapshot};
use chrono::Local;
use clap::Args;
use enade_insights::analysis::{
    compare_levels, find_extremes, improvement_priorities, ComparisonLevel, ComparisonResult,
    Extremes, ImprovementPlan, DEFAULT_EXTREMES,
};
use enade_insights::config::AppConfig;
use enade_insights::error::{AppError, RequestError};
use enade_insights::snapshot::{Snapshot, GENERAL_KEY};
use enade_insights::survey::{DimensionRegistry, Scope, SurveyTable};
use enade_insights::telemetry;
use std::path::PathBuf;

/// Questions shown in the extremes section of the printed report.
const HIGHLIGHT_QUESTIONS: [&str; 3] = ["Q27", "Q55", "Q43"];

#[derive(Args, Debug, Default)]
pub(crate) struct SnapshotArgs {
    /// Questionnaire CSV export to read (overrides APP_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Destination JSON file (overrides APP_SNAPSHOT_PATH)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Questionnaire CSV export to read (overrides APP_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Restrict the report to one course area
    #[arg(long)]
    pub(crate) area: Option<String>,
    /// Include the improvement priorities of the benchmark institution
    #[arg(long)]
    pub(crate) priorities: bool,
}

pub(crate) fn run_snapshot(args: SnapshotArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    override_paths(&mut config.data, args.dataset, args.output);
    telemetry::init(&config.telemetry)?;

    let registry = DimensionRegistry::standard();
    let table = load_table(&config)?;
    let snapshot = rebuild_snapshot(&config.data, &config.benchmark, &registry, &table)?;

    render_snapshot_summary(&snapshot, &config);
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        dataset,
        area,
        priorities,
    } = args;

    let mut config = AppConfig::load()?;
    override_paths(&mut config.data, dataset, None);
    telemetry::init(&config.telemetry)?;

    let registry = DimensionRegistry::standard();
    let table = load_table(&config)?;
    let scope = Scope::from_optional(area.as_deref());
    if let Some(name) = scope.area_name() {
        if !table.all().areas().iter().any(|known| known == name) {
            return Err(RequestError::UnknownArea(name.to_string()).into());
        }
    }

    let benchmark = config.benchmark.to_benchmark();
    let institution_rows = benchmark.institution_rows(&table.all());

    println!("ENADE questionnaire analysis ({})", Local::now().format("%Y-%m-%d %H:%M"));
    println!("Total courses: {}", table.len());
    println!(
        "Courses of {}: {}",
        benchmark.institution,
        institution_rows.len()
    );
    println!("Areas: {}", institution_rows.areas().join(", "));

    let comparison = compare_levels(&registry, &table, &benchmark, &scope);
    render_comparison(scope.area_name().unwrap_or(GENERAL_KEY), &comparison);

    render_extremes(&scoped_extremes(&registry, &table, &scope));

    if priorities {
        let plan = improvement_priorities(&registry, &table, &benchmark, &scope);
        render_priorities(&plan);
    }

    Ok(())
}

fn scoped_extremes(registry: &DimensionRegistry, table: &SurveyTable, scope: &Scope) -> Extremes {
    find_extremes(registry, &scope.apply(&table.all()), DEFAULT_EXTREMES)
}

fn render_snapshot_summary(snapshot: &Snapshot, config: &AppConfig) {
    println!("Snapshot written to {}", config.data.snapshot_path.display());
    println!(
        "Areas of {}: {}",
        snapshot.metadata.institution,
        snapshot.metadata.institution_areas.len()
    );
    println!("Courses: {}", snapshot.courses.len());

    if let Some(area) = snapshot.metadata.institution_areas.first() {
        if let Some(comparison) = snapshot.comparison(Some(area)) {
            render_comparison(area, comparison);
        }
    }
}

fn render_comparison(label: &str, comparison: &ComparisonResult) {
    println!("\nDimension comparison ({label})");
    for level in ComparisonLevel::ordered() {
        let Some(scores) = comparison.get(&level) else {
            continue;
        };
        println!(
            "- {:<12} NOC {}  NFC {}  NAC {}  OVERALL {}",
            level.label(),
            format_score(scores.pedagogical),
            format_score(scores.infrastructure),
            format_score(scores.enrichment),
            format_score(scores.overall)
        );
    }
}

fn render_extremes(extremes: &Extremes) {
    if extremes.is_empty() {
        println!("\nExtremes: no answered questions");
        return;
    }

    for question in HIGHLIGHT_QUESTIONS {
        let Some(lowest) = extremes.lowest.get(question) else {
            continue;
        };
        println!("\n{question} lowest scores");
        for entry in lowest {
            println!("- {}: {:.3}", entry.institution, entry.score);
        }
    }
}

fn render_priorities(plan: &ImprovementPlan) {
    if plan.priorities.is_empty() {
        println!("\nImprovement priorities: none");
        return;
    }

    println!("\nImprovement priorities");
    for priority in &plan.priorities {
        println!(
            "- {} [{}] score {:.3} vs national {:.3} (gap {:.3}, percentile {})",
            priority.question,
            priority.dimension.code(),
            priority.target_score,
            priority.national_mean,
            priority.gap_to_mean,
            format_score(priority.percentile_rank)
        );
    }

    if let Some(dimension) = plan.summary.focus_dimension {
        println!("Focus dimension: {}", dimension.code());
    }
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.3}"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use enade_insights::survey::SurveyRow;

    #[test]
    fn printed_extremes_use_the_default_depth() {
        let rows = (0..6)
            .map(|index| SurveyRow {
                institution: format!("IES {index}"),
                state: "CE".to_string(),
                area: "DIREITO".to_string(),
                category: "Privada".to_string(),
                course_code: None,
                overall_mean: None,
                participants: None,
                participation_pct: None,
                scores: [("Q27".to_string(), Some(index as f64))].into_iter().collect(),
            })
            .collect();
        let table = SurveyTable::new(rows);
        let extremes = scoped_extremes(&DimensionRegistry::standard(), &table, &Scope::all());

        assert_eq!(extremes.lowest["Q27"].len(), DEFAULT_EXTREMES);
        assert_eq!(extremes.highest["Q27"][0].institution, "IES 5");
    }

    #[test]
    fn missing_scores_render_as_not_available() {
        assert_eq!(format_score(None), "n/a");
        assert_eq!(format_score(Some(4.12345)), "4.123");
    }
}
