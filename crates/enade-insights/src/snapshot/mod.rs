mod builder;
mod views;

pub use builder::build_snapshot;
pub use views::{
    AreaListing, CoursePerformance, DashboardCourse, DashboardData, DashboardSummary,
    DimensionCourses,
};

use crate::analysis::{ComparisonResult, DimensionInfo, DimensionScores, Extremes};
use crate::survey::SurveyRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Key of the comparison computed without an area filter.
pub const GENERAL_KEY: &str = "geral";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Precomputed aggregates served by the snapshot-backed endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub metadata: SnapshotMetadata,
    pub comparisons: BTreeMap<String, ComparisonResult>,
    pub detailed_analysis: BTreeMap<String, AreaAnalysis>,
    #[serde(rename = "unifor_courses")]
    pub courses: Vec<CourseRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub generated_at: DateTime<Utc>,
    pub institution: String,
    pub total_courses: usize,
    pub institution_courses: usize,
    pub course_areas: Vec<String>,
    pub institution_areas: Vec<String>,
    pub dimensions: BTreeMap<String, DimensionInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaAnalysis {
    pub extremes: Extremes,
    pub institution_rows: Vec<SurveyRow>,
}

/// One evaluated course of the benchmark institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_code: Option<String>,
    pub area: String,
    pub participants: Option<u32>,
    pub participation_pct: Option<f64>,
    pub overall_mean: Option<f64>,
    pub scores: DimensionScores,
    pub questions: BTreeMap<String, f64>,
}

impl Snapshot {
    /// Comparison for `area`, or the unfiltered one when `area` is `None`.
    pub fn comparison(&self, area: Option<&str>) -> Option<&ComparisonResult> {
        self.comparisons.get(area.unwrap_or(GENERAL_KEY))
    }

    pub fn extremes(&self, area: &str) -> Option<&Extremes> {
        self.detailed_analysis
            .get(area)
            .map(|analysis| &analysis.extremes)
    }

    /// First course of the benchmark institution evaluated in `area`.
    pub fn course(&self, area: &str) -> Option<&CourseRecord> {
        self.courses.iter().find(|course| course.area == area)
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!(path = %path.display(), areas = self.detailed_analysis.len(), "snapshot written");
        Ok(())
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        info!(
            path = %path.display(),
            generated_at = %snapshot.metadata.generated_at,
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}
