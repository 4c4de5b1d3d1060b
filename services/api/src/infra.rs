use enade_insights::config::{AppConfig, BenchmarkConfig, DataConfig};
use enade_insights::error::AppError;
use enade_insights::snapshot::{build_snapshot, Snapshot};
use enade_insights::survey::{DimensionRegistry, SurveyLoader, SurveyTable};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Applies CLI path overrides on top of the environment configuration.
pub(crate) fn override_paths(
    data: &mut DataConfig,
    dataset: Option<PathBuf>,
    snapshot: Option<PathBuf>,
) {
    if let Some(dataset) = dataset {
        data.dataset_path = dataset;
    }
    if let Some(snapshot) = snapshot {
        data.snapshot_path = snapshot;
    }
}

pub(crate) fn load_table(config: &AppConfig) -> Result<SurveyTable, AppError> {
    let table = SurveyLoader::from_path(&config.data.dataset_path)?;
    if table.is_empty() {
        warn!(path = %config.data.dataset_path.display(), "questionnaire export has no rows");
    }
    Ok(table)
}

/// Builds a fresh snapshot and persists it at the configured path.
pub(crate) fn rebuild_snapshot(
    data: &DataConfig,
    benchmark: &BenchmarkConfig,
    registry: &DimensionRegistry,
    table: &SurveyTable,
) -> Result<Snapshot, AppError> {
    let snapshot = build_snapshot(registry, table, &benchmark.to_benchmark());
    snapshot.write_to_path(&data.snapshot_path)?;
    Ok(snapshot)
}

/// Reads the snapshot from disk, rebuilding it when forced, absent, or built for
/// a different benchmark institution than the configured one.
pub(crate) fn load_snapshot(
    data: &DataConfig,
    benchmark: &BenchmarkConfig,
    registry: &DimensionRegistry,
    table: &SurveyTable,
    force_rebuild: bool,
) -> Result<Snapshot, AppError> {
    let path = &data.snapshot_path;
    if force_rebuild || !path.exists() {
        info!(path = %path.display(), "building snapshot from dataset");
        return rebuild_snapshot(data, benchmark, registry, table);
    }

    let snapshot = Snapshot::load_from_path(path)?;
    if !snapshot
        .metadata
        .institution
        .trim()
        .eq_ignore_ascii_case(benchmark.institution.trim())
    {
        warn!(
            path = %path.display(),
            snapshot = %snapshot.metadata.institution,
            configured = %benchmark.institution,
            "snapshot was built for another institution, rebuilding"
        );
        return rebuild_snapshot(data, benchmark, registry, table);
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enade_insights::survey::SurveyRow;

    fn table() -> SurveyTable {
        let row = |institution: &str| SurveyRow {
            institution: institution.to_string(),
            state: "CE".to_string(),
            area: "DIREITO".to_string(),
            category: "Privada sem fins lucrativos".to_string(),
            course_code: None,
            overall_mean: Some(4.0),
            participants: Some(10),
            participation_pct: Some(50.0),
            scores: [("Q27".to_string(), Some(4.0))].into_iter().collect(),
        };
        SurveyTable::new(vec![row("UNIVERSIDADE DE FORTALEZA"), row("FACULDADE DO CEARA")])
    }

    fn benchmark(institution: &str) -> BenchmarkConfig {
        BenchmarkConfig {
            institution: institution.to_string(),
            state: "CE".to_string(),
            region: vec!["CE".to_string()],
        }
    }

    fn data(name: &str) -> DataConfig {
        let dir = std::env::temp_dir();
        DataConfig {
            dataset_path: dir.join("unused.csv"),
            snapshot_path: dir.join(format!("enade-api-{}-{name}.json", std::process::id())),
        }
    }

    #[test]
    fn stale_institution_snapshot_is_rebuilt() {
        let registry = DimensionRegistry::standard();
        let table = table();
        let data = data("stale");

        rebuild_snapshot(&data, &benchmark("UNIVERSIDADE DE FORTALEZA"), &registry, &table)
            .expect("initial snapshot");

        let snapshot =
            load_snapshot(&data, &benchmark("FACULDADE DO CEARA"), &registry, &table, false)
                .expect("snapshot loads");
        assert_eq!(snapshot.metadata.institution, "FACULDADE DO CEARA");

        let on_disk = Snapshot::load_from_path(&data.snapshot_path).expect("rewritten");
        assert_eq!(on_disk.metadata.institution, "FACULDADE DO CEARA");
        let _ = std::fs::remove_file(&data.snapshot_path);
    }

    #[test]
    fn matching_snapshot_is_read_from_disk() {
        let registry = DimensionRegistry::standard();
        let table = table();
        let data = data("matching");

        let written = rebuild_snapshot(&data, &benchmark("FORTALEZA"), &registry, &table)
            .expect("initial snapshot");
        let loaded = load_snapshot(&data, &benchmark("fortaleza"), &registry, &table, false)
            .expect("snapshot loads");
        assert_eq!(loaded.metadata.generated_at, written.metadata.generated_at);
        let _ = std::fs::remove_file(&data.snapshot_path);
    }
}
